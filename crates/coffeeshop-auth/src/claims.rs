//! Validated claim sets and the request-scoped authorization context.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim set of a verified token, exactly as the identity provider issued it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(pub Map<String, Value>);

impl Claims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Subject (`sub`) of the token.
    pub fn subject(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }

    /// Granted permission scopes, or `None` when the claim is absent or not a list.
    pub fn permissions(&self) -> Option<Vec<&str>> {
        self.get("permissions")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Claims(map)
    }
}

/// Produced by the auth gate once a request is authorized and handed to the
/// guarded operation. Lives only for the duration of the request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    claims: Claims,
}

impl AuthContext {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn subject(&self) -> Option<&str> {
        self.claims.subject()
    }

    pub fn permissions(&self) -> Vec<&str> {
        self.claims.permissions().unwrap_or_default()
    }

    /// Check if the token grants a specific permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions().contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Claims {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_claims_are_transparent() {
        let raw = json!({"sub": "auth0|123", "permissions": ["get:drinks-detail"], "custom": {"x": 1}});
        let parsed = claims(raw.clone());
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
        assert_eq!(parsed.subject(), Some("auth0|123"));
    }

    #[test]
    fn test_permissions_absent_or_wrong_type() {
        assert_eq!(claims(json!({"sub": "x"})).permissions(), None);
        assert_eq!(claims(json!({"permissions": "post:drinks"})).permissions(), None);
        assert_eq!(
            claims(json!({"permissions": ["post:drinks", 7]})).permissions(),
            Some(vec!["post:drinks"])
        );
    }

    #[test]
    fn test_has_permission() {
        let ctx = AuthContext::new(claims(json!({
            "permissions": ["get:drinks-detail", "post:drinks"]
        })));

        assert!(ctx.has_permission("post:drinks"));
        assert!(!ctx.has_permission("delete:drinks"));
    }

    #[test]
    fn test_no_permissions_claim() {
        let ctx = AuthContext::new(claims(json!({"sub": "auth0|1"})));
        assert!(ctx.permissions().is_empty());
        assert!(!ctx.has_permission("post:drinks"));
    }
}
