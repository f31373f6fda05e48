//! Decision audit hook.
//!
//! Guards report every decision they make to a [`DecisionObserver`]. This
//! keeps logging out of the rendering path: callers pick the sink
//! ([`TracingObserver`], [`NoopObserver`], or any closure).

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::types::{Permission, Role};

/// Tracing target used by [`TracingObserver`].
pub const AUDIT_TARGET: &str = "access::audit";

/// Result of a route check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteOutcome {
    Rendered,
    Redirected,
    /// The principal was still loading; no decision was made.
    Deferred,
}

/// Which step of the landing priority chain produced a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LandingSource {
    /// `redirectTo` query parameter
    QueryRedirect,
    /// Location remembered by a route guard before redirecting to login
    RememberedLocation,
    RoleDefault,
}

impl LandingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LandingSource::QueryRedirect => "query_redirect",
            LandingSource::RememberedLocation => "remembered_location",
            LandingSource::RoleDefault => "role_default",
        }
    }
}

/// A single guard decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "guard", rename_all = "snake_case")]
pub enum DecisionEvent {
    Render {
        principal_id: Option<String>,
        role: Role,
        permission: Permission,
        granted: bool,
    },
    Route {
        principal_id: Option<String>,
        /// `None` while the principal is loading
        role: Option<Role>,
        required: Vec<Permission>,
        path: String,
        outcome: RouteOutcome,
    },
    Landing {
        principal_id: String,
        role: Role,
        destination: String,
        source: LandingSource,
    },
}

/// Receives guard decisions.
pub trait DecisionObserver {
    fn on_decision(&self, event: &DecisionEvent);
}

impl<F> DecisionObserver for F
where
    F: Fn(&DecisionEvent),
{
    fn on_decision(&self, event: &DecisionEvent) {
        self(event)
    }
}

/// Discards every decision.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {
    fn on_decision(&self, _event: &DecisionEvent) {}
}

/// Emits decisions as structured `tracing` events on [`AUDIT_TARGET`].
///
/// Grants are logged at debug, denials at warn, landings at info.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DecisionObserver for TracingObserver {
    fn on_decision(&self, event: &DecisionEvent) {
        match event {
            DecisionEvent::Render {
                principal_id,
                role,
                permission,
                granted,
            } => {
                let principal = principal_id.as_deref().unwrap_or("anonymous");
                if *granted {
                    debug!(target: AUDIT_TARGET, principal, %role, %permission, "render allowed");
                } else {
                    warn!(target: AUDIT_TARGET, principal, %role, %permission, "render denied");
                }
            }
            DecisionEvent::Route {
                principal_id,
                role,
                required,
                path,
                outcome,
            } => {
                let principal = principal_id.as_deref().unwrap_or("anonymous");
                let role = role.map(|r| r.as_str()).unwrap_or("pending");
                let required = required
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                match outcome {
                    RouteOutcome::Rendered => {
                        debug!(target: AUDIT_TARGET, principal, role, %required, path = path.as_str(), "route allowed")
                    }
                    RouteOutcome::Redirected => {
                        warn!(target: AUDIT_TARGET, principal, role, %required, path = path.as_str(), "route denied, redirecting")
                    }
                    RouteOutcome::Deferred => {
                        debug!(target: AUDIT_TARGET, path = path.as_str(), "route decision deferred while loading")
                    }
                }
            }
            DecisionEvent::Landing {
                principal_id,
                role,
                destination,
                source,
            } => {
                info!(
                    target: AUDIT_TARGET,
                    principal = principal_id.as_str(),
                    %role,
                    destination = destination.as_str(),
                    source = source.as_str(),
                    "post-login navigation"
                );
            }
        }
    }
}
