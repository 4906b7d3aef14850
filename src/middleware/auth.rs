use coffeeshop_core::permissions;

/// Defines an extractor that admits a request only if its bearer token grants
/// `$permission`. The handler receives the request's
/// [`AuthContext`](coffeeshop_auth::AuthContext); on denial the
/// [`AuthError`](coffeeshop_auth::AuthError) is the response and the handler
/// never runs.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::coffeeshop_auth::AuthContext);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::coffeeshop_auth::AuthError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                state
                    .auth_gate
                    .authorize(&parts.headers, $permission)
                    .await
                    .map($name)
            }
        }
    };
}

// Drinks permissions
require_permission!(RequireDrinksDetail, permissions::DRINKS_DETAIL_READ);
require_permission!(RequireDrinksCreate, permissions::DRINKS_CREATE);
require_permission!(RequireDrinksUpdate, permissions::DRINKS_UPDATE);
require_permission!(RequireDrinksDelete, permissions::DRINKS_DELETE);
