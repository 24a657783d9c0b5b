//! # Dinolab Auth
//!
//! Account registration, login, and signed session tokens for the Dinolab
//! user-credential service.
//!
//! ## Overview
//!
//! A registered user is turned into a self-contained bearer token: a claim set
//! (user id, username as subject, email, a unique token id, and the user's
//! roles) plus issued-at and expiry, signed with HMAC under a shared secret.
//! Any instance holding the same secret can verify the token without calling
//! back into the service.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── dinolab-core/           # Error taxonomy, password hashing, serde helpers
//! ├── dinolab-config/         # JwtConfig (secret, algorithm, TTL)
//! ├── dinolab-auth/           # ClaimSet, TokenIssuer, TokenVerifier
//! ├── dinolab-models/         # User, request/response DTOs
//! └── dinolab-observability/  # Logging and metrics
//! src/
//! ├── cli/                    # `dinolab` command handlers
//! ├── identity/               # IdentityStore trait + in-memory store
//! ├── modules/auth/           # AuthService (register, login, authenticate)
//! └── state.rs                # AppState
//! ```
//!
//! ## Flows
//!
//! - **Register**: validate payload, reject a taken email, then a taken username,
//!   create the account, assign the `User` role, issue a token.
//! - **Login**: validate payload, look up by email, check the password, issue a
//!   token. Unknown email and wrong password fail identically.
//!
//! ## Configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `JWT_SECRET` | required, at least as long as the hash output |
//! | `JWT_ALGORITHM` | `HS512` |
//! | `JWT_TTL_SECS` | `1200` |
//! | `LOG_LEVEL` / `RUST_LOG` | `info` |
//! | `LOG_FORMAT` | compact (`json` for JSON lines) |

pub mod cli;
pub mod identity;
pub mod modules;
pub mod state;

pub use identity::{IdentityStore, InMemoryIdentityStore, PasswordPolicy};
pub use modules::auth::AuthService;
pub use state::{AppState, init_app_state};
