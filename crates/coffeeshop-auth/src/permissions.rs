//! Permission scope checks.
//!
//! A permission is granted only when the token's `permissions` claim is a list
//! containing the exact required string. There are no wildcards and no
//! hierarchy between scopes.

use crate::claims::Claims;
use crate::error::AuthError;

pub fn check_permission(claims: &Claims, required: &str) -> Result<(), AuthError> {
    let granted = claims.permissions().ok_or_else(|| AuthError::PermissionsMissing {
        required: required.to_string(),
    })?;

    if granted.contains(&required) {
        Ok(())
    } else {
        Err(AuthError::PermissionsMissing {
            required: required.to_string(),
        })
    }
}
