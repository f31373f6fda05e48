//! Authentication state as seen by the guards.
//!
//! The authentication collaborator owns the principal. Guards only read an
//! [`AuthState`] snapshot, passed in explicitly through a
//! [`GuardContext`]; there is no ambient "current user".

use authz::{DecisionObserver, Principal, Role, RoleRegistry};
use tracing::debug;

/// Authentication state that guards evaluate against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The principal is still being resolved. Guards must not decide yet.
    Loading,
    /// User is authenticated
    Authenticated(Principal),
    /// User is not authenticated
    Unauthenticated,
}

impl AuthState {
    /// Builds a state from the `{ principal, is_authenticated, is_loading }`
    /// triple published by the authentication collaborator.
    ///
    /// Loading wins over everything else. A principal is only trusted when
    /// the collaborator also reports it as authenticated.
    pub fn from_parts(
        principal: Option<Principal>,
        is_authenticated: bool,
        is_loading: bool,
    ) -> Self {
        if is_loading {
            return AuthState::Loading;
        }
        match principal {
            Some(principal) if is_authenticated => AuthState::Authenticated(principal),
            _ => AuthState::Unauthenticated,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }

    /// Check if the user is authenticated
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// Get the authenticated principal if available
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthState::Authenticated(principal) => Some(principal),
            AuthState::Loading | AuthState::Unauthenticated => None,
        }
    }

    /// Get the principal id if authenticated
    pub fn principal_id(&self) -> Option<&str> {
        self.principal().map(|p| p.id.as_str())
    }
}

/// Everything a guard reads during one evaluation.
#[derive(Clone, Copy)]
pub struct GuardContext<'a> {
    pub registry: &'a RoleRegistry,
    pub auth: &'a AuthState,
    pub observer: &'a dyn DecisionObserver,
}

impl<'a> GuardContext<'a> {
    pub fn new(
        registry: &'a RoleRegistry,
        auth: &'a AuthState,
        observer: &'a dyn DecisionObserver,
    ) -> Self {
        Self {
            registry,
            auth,
            observer,
        }
    }

    /// The role the current principal resolves to.
    ///
    /// Loading and unauthenticated states both resolve to the default role.
    pub fn role(&self) -> Role {
        self.registry
            .resolve_role(self.auth.principal().and_then(|p| p.role_id))
    }

    /// Like [`GuardContext::role`], but `None` while the principal is loading.
    pub fn resolved_role(&self) -> Option<Role> {
        if self.auth.is_loading() {
            None
        } else {
            Some(self.role())
        }
    }
}

/// Scoped owner of the authentication state for one browser session.
///
/// Created in [`AuthState::Loading`] when the session starts, updated
/// wholesale by the authentication collaborator, and consumed by
/// [`SessionScope::end`] at logout or expiry.
#[derive(Debug)]
pub struct SessionScope {
    state: AuthState,
}

impl SessionScope {
    pub fn begin() -> Self {
        debug!("Session scope started");
        Self {
            state: AuthState::Loading,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Replaces the snapshot. Called on login, logout and session refresh.
    pub fn update(&mut self, state: AuthState) {
        debug!(
            "Session state changed: loading={} authenticated={}",
            state.is_loading(),
            state.is_authenticated()
        );
        self.state = state;
    }

    /// Marks the principal as being re-resolved (e.g. token refresh).
    pub fn reload(&mut self) {
        self.update(AuthState::Loading);
    }

    /// Borrows a guard context over this session's state.
    pub fn context<'a>(
        &'a self,
        registry: &'a RoleRegistry,
        observer: &'a dyn DecisionObserver,
    ) -> GuardContext<'a> {
        GuardContext::new(registry, &self.state, observer)
    }

    /// Tears the scope down, returning the last principal if any.
    pub fn end(self) -> Option<Principal> {
        debug!("Session scope ended");
        match self.state {
            AuthState::Authenticated(principal) => Some(principal),
            AuthState::Loading | AuthState::Unauthenticated => None,
        }
    }
}
