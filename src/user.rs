//! Bridge access credential.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The whitelisted username a bridge hands out after pairing.
///
/// The token is opaque; it is placed verbatim in the authenticated API path.
/// It is serializable so applications can persist it and inject it later
/// with [`Bridge::set_user`](crate::Bridge::set_user).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    username: String,
}

impl User {
    pub fn new(username: &str) -> Self {
        User {
            username: String::from(username),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user() {
        let user = User::new("a7db5f8a-3f8b-11ec-90d6-0242ac120003");
        assert_eq!(user.username(), "a7db5f8a-3f8b-11ec-90d6-0242ac120003");
        assert_eq!(user.to_string(), "a7db5f8a-3f8b-11ec-90d6-0242ac120003");
    }

    #[test]
    fn test_user_serde() {
        let user: User = serde_json::from_str(r#"{"username":"ABC123"}"#).unwrap();
        assert_eq!(user, User::new("ABC123"));
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"username":"ABC123"}"#
        );
    }
}
