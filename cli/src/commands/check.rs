use anyhow::Result;
use authz::{evaluator, Permission, RoleRegistry, TracingObserver};
use colored::*;
use guards::{GuardContext, PermissionGuard, RenderDecision};
use serde_json::json;
use tracing::warn;

use super::auth_state;

/// Evaluate a single permission for a role id, as a render guard would
pub fn execute(
    registry: &RoleRegistry,
    permission: &str,
    role_id: Option<u32>,
    format: &str,
) -> Result<()> {
    let auth = auth_state(role_id);
    let ctx = GuardContext::new(registry, &auth, &TracingObserver);
    let role = ctx.role();

    let granted = match permission.parse::<Permission>() {
        Ok(permission) => PermissionGuard::new(permission).evaluate(&ctx) == RenderDecision::Children,
        Err(e) => {
            warn!("{}, treating as not held", e);
            evaluator::has_permission_token(registry, role, permission)
        }
    };

    match format {
        "json" => {
            let output = json!({
                "role_id": role_id,
                "role": role,
                "permission": permission,
                "granted": granted,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            let verdict = if granted {
                "ALLOWED".green().bold()
            } else {
                "DENIED".red().bold()
            };
            println!("{} {} for role {}", verdict, permission, role.as_str().cyan());
        }
    }

    Ok(())
}
