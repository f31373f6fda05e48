//! Component-level permission gate.

use authz::{evaluator, DecisionEvent, Permission};
use tracing::debug;

use crate::session::GuardContext;

/// What a [`PermissionGuard`] decided to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDecision {
    Children,
    Fallback,
}

/// Renders protected content only when the current principal's role holds
/// `permission`.
///
/// A missing principal is evaluated as the default role. While the principal
/// is still loading nothing is decided: the fallback is shown and no decision
/// is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionGuard {
    permission: Permission,
}

impl PermissionGuard {
    pub fn new(permission: Permission) -> Self {
        Self { permission }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn evaluate(&self, ctx: &GuardContext<'_>) -> RenderDecision {
        let Some(role) = ctx.resolved_role() else {
            debug!("Principal still loading, holding back {}", self.permission);
            return RenderDecision::Fallback;
        };
        let granted = evaluator::has_permission(ctx.registry, role, self.permission);

        ctx.observer.on_decision(&DecisionEvent::Render {
            principal_id: ctx.auth.principal_id().map(str::to_string),
            role,
            permission: self.permission,
            granted,
        });

        if granted {
            RenderDecision::Children
        } else {
            RenderDecision::Fallback
        }
    }

    /// Renders `children` when allowed; the fallback is nothing.
    pub fn render<T>(&self, ctx: &GuardContext<'_>, children: impl FnOnce() -> T) -> Option<T> {
        match self.evaluate(ctx) {
            RenderDecision::Children => Some(children()),
            RenderDecision::Fallback => None,
        }
    }

    /// Renders `children` when allowed and `fallback` otherwise. Only the
    /// chosen branch is built.
    pub fn render_or<T>(
        &self,
        ctx: &GuardContext<'_>,
        children: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        match self.evaluate(ctx) {
            RenderDecision::Children => children(),
            RenderDecision::Fallback => fallback(),
        }
    }
}
