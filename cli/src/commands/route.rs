use anyhow::{Context, Result};
use authz::{Permission, RoleRegistry, TracingObserver};
use colored::*;
use guards::{GuardContext, Location, RecordingNavigator, RouteDecision, RouteGuard};
use serde_json::json;

use super::auth_state;

/// Dry-run a route guard and report what it would do
pub fn execute(
    registry: &RoleRegistry,
    require: &[String],
    fallback: &str,
    role_id: Option<u32>,
    path: &str,
    format: &str,
) -> Result<()> {
    // An empty list allows everyone, so unknown tokens must not be dropped
    let required = require
        .iter()
        .map(|token| token.trim().parse::<Permission>())
        .collect::<authz::Result<Vec<_>>>()
        .context("Route requirements must be known permission tokens")?;

    let auth = auth_state(role_id);
    let ctx = GuardContext::new(registry, &auth, &TracingObserver);
    let location = Location::parse(path);

    let mut guard = RouteGuard::new(required, fallback);
    let mut navigator = RecordingNavigator::new();
    let decision = guard.enforce(&ctx, &location, &mut navigator)?;

    match format {
        "json" => {
            let output = match &decision {
                RouteDecision::Pending => json!({ "decision": "pending" }),
                RouteDecision::Render => json!({ "decision": "render" }),
                RouteDecision::Redirect { to, remember } => json!({
                    "decision": "redirect",
                    "to": to,
                    "remember": remember,
                }),
            };
            let output = json!({
                "role": ctx.role(),
                "path": location.href(),
                "result": output,
                "navigations": navigator.history,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => print_decision_text(&decision, &location, ctx.role().as_str()),
    }

    Ok(())
}

fn print_decision_text(decision: &RouteDecision, location: &Location, role: &str) {
    println!("{} {} as {}", "Route:".bold(), location, role.cyan());
    match decision {
        RouteDecision::Pending => println!("{}", "PENDING".yellow().bold()),
        RouteDecision::Render => println!("{}", "RENDER".green().bold()),
        RouteDecision::Redirect { to, remember } => {
            println!("{} -> {}", "REDIRECT".red().bold(), to);
            if let Some(remember) = remember {
                println!("  {} {}", "remembered:".bold(), remember);
            }
        }
    }
}
