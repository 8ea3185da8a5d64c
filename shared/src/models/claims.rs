use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims issued by Supabase Auth for signed-in users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub aud: Option<String>,
}

fn default_role() -> String {
    "authenticated".to_string()
}

impl TokenClaims {
    /// Supabase user id carried in `sub`
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// True for signed-in users (not the anon key)
    pub fn is_authenticated(&self) -> bool {
        self.role == "authenticated" && self.user_id().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_claims() -> TokenClaims {
        let now = chrono::Utc::now().timestamp();
        TokenClaims {
            sub: "8d6f1c2e-3b7a-4a55-9d0e-2f4c6b1a9e77".to_string(),
            email: Some("asha@example.in".to_string()),
            role: "authenticated".to_string(),
            exp: now + 900,
            iat: Some(now),
            aud: Some("authenticated".to_string()),
        }
    }

    #[test]
    fn test_user_id_parses_uuid() {
        let claims = create_test_claims();
        assert_eq!(
            claims.user_id().map(|id| id.to_string()),
            Some("8d6f1c2e-3b7a-4a55-9d0e-2f4c6b1a9e77".to_string())
        );
    }

    #[test]
    fn test_anon_role_is_not_authenticated() {
        let mut claims = create_test_claims();
        claims.role = "anon".to_string();
        assert!(!claims.is_authenticated());
    }

    #[test]
    fn test_non_uuid_subject_is_not_authenticated() {
        let mut claims = create_test_claims();
        claims.sub = "service".to_string();
        assert!(claims.user_id().is_none());
        assert!(!claims.is_authenticated());
    }
}
