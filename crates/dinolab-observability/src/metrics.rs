//! Counters for authentication events.

use metrics::counter;

pub fn track_user_registered() {
    counter!("auth_users_registered_total").increment(1);
}

pub fn track_registration_failure(reason: &str) {
    counter!("auth_registration_failures_total", "reason" => reason.to_string()).increment(1);
}

pub fn track_login_success() {
    counter!("auth_login_success_total").increment(1);
}

pub fn track_login_failure(reason: &str) {
    counter!("auth_login_failures_total", "reason" => reason.to_string()).increment(1);
}

pub fn track_token_issued() {
    counter!("auth_tokens_issued_total").increment(1);
}

pub fn track_token_rejected(reason: &str) {
    counter!("auth_tokens_rejected_total", "reason" => reason.to_string()).increment(1);
}
