use serde::{Deserialize, Deserializer};

/// Accepts either a single string or an array of strings.
///
/// Some JWT issuers collapse a one-element claim list into a bare string.
pub fn deserialize_one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => Ok(vec![value]),
        Some(OneOrMany::Many(values)) => Ok(values),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Roles {
        #[serde(default, deserialize_with = "deserialize_one_or_many")]
        role: Vec<String>,
    }

    #[test]
    fn test_single_string() {
        let roles: Roles = serde_json::from_str(r#"{"role":"User"}"#).unwrap();
        assert_eq!(roles.role, vec!["User"]);
    }

    #[test]
    fn test_array() {
        let roles: Roles = serde_json::from_str(r#"{"role":["User","Admin"]}"#).unwrap();
        assert_eq!(roles.role, vec!["User", "Admin"]);
    }

    #[test]
    fn test_missing_and_null() {
        let roles: Roles = serde_json::from_str(r#"{}"#).unwrap();
        assert!(roles.role.is_empty());
        let roles: Roles = serde_json::from_str(r#"{"role":null}"#).unwrap();
        assert!(roles.role.is_empty());
    }

    #[test]
    fn test_rejects_numbers() {
        assert!(serde_json::from_str::<Roles>(r#"{"role":[1,2]}"#).is_err());
    }
}
