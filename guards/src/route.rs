//! Route-level permission gate.
//!
//! # Decision Table
//!
//! | Required list | Auth state      | Role holds any? | Decision                      |
//! |---------------|-----------------|-----------------|-------------------------------|
//! | empty         | any             | n/a             | `Render`                      |
//! | non-empty     | Loading         | n/a             | `Pending`                     |
//! | non-empty     | Authenticated   | yes             | `Render`                      |
//! | non-empty     | Authenticated   | no              | `Redirect` (nothing remembered) |
//! | non-empty     | Unauthenticated | guest holds any | `Render`                      |
//! | non-empty     | Unauthenticated | no              | `Redirect` remembering location |

use authz::{audit::RouteOutcome, evaluator, DecisionEvent, Permission, Principal};
use tracing::debug;

use crate::error::Result;
use crate::location::Location;
use crate::navigator::{NavigateOptions, Navigator};
use crate::session::GuardContext;

/// Outcome of a route check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The principal is still loading; render nothing and wait.
    Pending,
    Render,
    Redirect {
        to: String,
        /// Location to return to after login
        remember: Option<String>,
    },
}

/// Guards a route behind a list of acceptable permissions.
///
/// Holding any one of the listed permissions is sufficient. An empty list
/// places no restriction on the route.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    required: Vec<Permission>,
    fallback: String,
    last_redirect: Option<(Option<Principal>, Location)>,
}

impl RouteGuard {
    pub fn new(required: Vec<Permission>, fallback: impl Into<String>) -> Self {
        Self {
            required,
            fallback: fallback.into(),
            last_redirect: None,
        }
    }

    pub fn required(&self) -> &[Permission] {
        &self.required
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Decides without side effects other than reporting to the observer.
    pub fn evaluate(&self, ctx: &GuardContext<'_>, location: &Location) -> RouteDecision {
        let report = |role, outcome| {
            ctx.observer.on_decision(&DecisionEvent::Route {
                principal_id: ctx.auth.principal_id().map(str::to_string),
                role,
                required: self.required.clone(),
                path: location.path.clone(),
                outcome,
            });
        };

        if self.required.is_empty() {
            report(ctx.resolved_role(), RouteOutcome::Rendered);
            return RouteDecision::Render;
        }

        let Some(role) = ctx.resolved_role() else {
            report(None, RouteOutcome::Deferred);
            return RouteDecision::Pending;
        };

        if evaluator::has_any_permission(ctx.registry, role, &self.required) {
            report(Some(role), RouteOutcome::Rendered);
            return RouteDecision::Render;
        }

        report(Some(role), RouteOutcome::Redirected);
        let remember = if ctx.auth.is_authenticated() {
            None
        } else {
            Some(location.href())
        };
        RouteDecision::Redirect {
            to: self.fallback.clone(),
            remember,
        }
    }

    /// Decides and, on `Redirect`, asks the navigator to go to the fallback.
    ///
    /// A redirect fires once per distinct principal and location; repeated
    /// evaluations of the same denial do not navigate again. Navigation
    /// errors are returned as-is.
    pub fn enforce(
        &mut self,
        ctx: &GuardContext<'_>,
        location: &Location,
        navigator: &mut dyn Navigator,
    ) -> Result<RouteDecision> {
        let decision = self.evaluate(ctx, location);

        let RouteDecision::Redirect { to, remember } = &decision else {
            self.last_redirect = None;
            return Ok(decision);
        };

        let key = (ctx.auth.principal().cloned(), location.clone());
        if self.last_redirect.as_ref() == Some(&key) {
            debug!("Redirect to {} already issued for {}", to, location);
            return Ok(decision);
        }
        self.last_redirect = Some(key);

        navigator.navigate(
            to,
            NavigateOptions {
                replace: true,
                remember: remember.clone(),
            },
        )?;
        Ok(decision)
    }
}
