use anyhow::{anyhow, Result};
use authz::{RoleRegistry, TracingObserver};
use colored::*;
use guards::{
    AuthState, GuardContext, Location, PostAuthRouter, RecordingNavigator, REDIRECT_PARAM,
};
use serde_json::json;

use super::dry_run_principal;

/// Resolve the post-login destination for a role id
pub fn execute(
    registry: &RoleRegistry,
    role_id: Option<u32>,
    redirect_to: Option<&str>,
    remembered: Option<&str>,
    path: &str,
    format: &str,
) -> Result<()> {
    let mut location = Location::parse(path);
    if let Some(target) = redirect_to {
        location
            .query
            .push((REDIRECT_PARAM.to_string(), target.to_string()));
    }
    if let Some(remembered) = remembered {
        location = location.with_remembered(remembered);
    }

    let auth = AuthState::Authenticated(dry_run_principal(role_id));
    let ctx = GuardContext::new(registry, &auth, &TracingObserver);

    let mut router = PostAuthRouter::new();
    let mut navigator = RecordingNavigator::new();
    let destination = router
        .on_auth_change(&ctx, &location, &mut navigator)?
        .ok_or_else(|| anyhow!("No post-login navigation was issued"))?;

    match format {
        "json" => {
            let output = json!({
                "role": ctx.role(),
                "destination": destination.path,
                "source": destination.source,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!(
                "{} {}",
                "Destination:".bold(),
                destination.path.green().bold()
            );
            println!(
                "  {} {} ({})",
                "source:".bold(),
                destination.source.as_str(),
                ctx.role().as_str().cyan()
            );
        }
    }

    Ok(())
}
