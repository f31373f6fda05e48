//! Landing destination for a freshly authenticated principal.
//!
//! Candidates are tried in order and the first usable one wins:
//!
//! 1. the `redirectTo` query parameter, when non-empty and a same-origin path
//! 2. the location remembered by a [`crate::RouteGuard`] before it sent the
//!    user to login
//! 3. the role's landing path from the registry

use authz::{
    audit::LandingSource, registry::is_local_path, DecisionEvent, Principal, Role, RoleRegistry,
};
use tracing::{debug, warn};

use crate::error::Result;
use crate::location::Location;
use crate::navigator::{NavigateOptions, Navigator};
use crate::session::GuardContext;

/// Query parameter carrying an explicit post-login destination.
pub const REDIRECT_PARAM: &str = "redirectTo";

/// Where to go, and which rule chose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub path: String,
    pub source: LandingSource,
}

/// Runs the priority chain. Pure; later candidates are not inspected once one
/// matches.
pub fn resolve_destination(registry: &RoleRegistry, role: Role, location: &Location) -> Destination {
    let query_redirect = || {
        let target = location.query_param(REDIRECT_PARAM)?.trim();
        if target.is_empty() {
            return None;
        }
        if !is_local_path(target) {
            warn!("Ignoring off-site {} target '{}'", REDIRECT_PARAM, target);
            return None;
        }
        Some(target.to_string())
    };

    let remembered = || {
        location
            .remembered
            .as_deref()
            .map(str::trim)
            .filter(|path| is_local_path(path))
            .map(str::to_string)
    };

    if let Some(path) = query_redirect() {
        return Destination {
            path,
            source: LandingSource::QueryRedirect,
        };
    }
    if let Some(path) = remembered() {
        return Destination {
            path,
            source: LandingSource::RememberedLocation,
        };
    }
    Destination {
        path: registry.landing_path(role).to_string(),
        source: LandingSource::RoleDefault,
    }
}

/// Navigates once per completed authentication.
///
/// Holds only the principal it last navigated for. Re-renders, page changes
/// and session refreshes that resolve to that same principal are no-ops; a
/// different principal, or a login after sign-out, navigates again.
#[derive(Debug, Default)]
pub struct PostAuthRouter {
    last: Option<Principal>,
}

impl PostAuthRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reacts to the current authentication state.
    ///
    /// Returns the destination when a navigation was issued. Nothing happens
    /// while loading, and the memo survives it. Signing out clears the memo
    /// so the next login navigates again.
    pub fn on_auth_change(
        &mut self,
        ctx: &GuardContext<'_>,
        location: &Location,
        navigator: &mut dyn Navigator,
    ) -> Result<Option<Destination>> {
        if ctx.auth.is_loading() {
            debug!("Principal still loading, post-login navigation deferred");
            return Ok(None);
        }

        let Some(principal) = ctx.auth.principal() else {
            self.last = None;
            return Ok(None);
        };

        if self.last.as_ref() == Some(principal) {
            debug!("Post-login navigation already issued for {}", principal.id);
            return Ok(None);
        }

        let role = ctx.role();
        let destination = resolve_destination(ctx.registry, role, location);

        ctx.observer.on_decision(&DecisionEvent::Landing {
            principal_id: principal.id.clone(),
            role,
            destination: destination.path.clone(),
            source: destination.source,
        });

        self.last = Some(principal.clone());
        navigator.navigate(
            &destination.path,
            NavigateOptions {
                replace: true,
                remember: None,
            },
        )?;
        Ok(Some(destination))
    }
}
