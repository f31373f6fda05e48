pub mod check;
pub mod landing;
pub mod roles;
pub mod route;

use authz::Principal;
use guards::AuthState;

/// Principal used for dry runs.
pub fn dry_run_principal(role_id: Option<u32>) -> Principal {
    let principal = Principal::new("accessctl", "accessctl@localhost");
    match role_id {
        Some(id) => principal.with_role_id(id),
        None => principal,
    }
}

/// Signed in with `role_id`, or a signed-out visitor when absent.
pub fn auth_state(role_id: Option<u32>) -> AuthState {
    match role_id {
        Some(_) => AuthState::Authenticated(dry_run_principal(role_id)),
        None => AuthState::Unauthenticated,
    }
}
