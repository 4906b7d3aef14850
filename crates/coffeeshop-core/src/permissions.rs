//! Permission scopes granted by the identity provider.
//!
//! The provider places these strings in the `permissions` claim of an access
//! token. Matching is exact membership; there is no wildcard or hierarchy.

/// Read the full recipe of every drink
pub const DRINKS_DETAIL_READ: &str = "get:drinks-detail";
/// Create a drink
pub const DRINKS_CREATE: &str = "post:drinks";
/// Update a drink
pub const DRINKS_UPDATE: &str = "patch:drinks";
/// Delete a drink
pub const DRINKS_DELETE: &str = "delete:drinks";
