use anyhow::Result;
use authz::{Role, RoleRegistry, RoleTableDefinition};
use colored::*;

/// Print the effective role table
pub fn execute(registry: &RoleRegistry, format: &str) -> Result<()> {
    let table = RoleTableDefinition::from_registry(registry);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        "yaml" => {
            print!("{}", serde_yaml::to_string(&table)?);
        }
        _ => {
            print_roles_text(registry);
        }
    }

    Ok(())
}

fn print_roles_text(registry: &RoleRegistry) {
    println!("{}", "Marketplace Roles".bold().underline());

    let role_ids = registry.role_ids();
    for role in Role::ALL {
        let ids: Vec<String> = role_ids
            .iter()
            .filter(|(_, r)| *r == role)
            .map(|(id, _)| id.to_string())
            .collect();

        let label = if role == Role::DEFAULT {
            "(default)".to_string()
        } else if ids.is_empty() {
            "(no role ids)".to_string()
        } else {
            format!("ids: {}", ids.join(", "))
        };

        println!();
        println!("{} {}", role.as_str().cyan().bold(), label.dimmed());
        println!("  {} {}", "landing:".bold(), registry.landing_path(role));

        let permissions = registry.permissions_of(role);
        if permissions.is_empty() {
            println!("  {}", "no permissions".yellow());
        }
        for permission in permissions {
            println!("  - {}", permission);
        }
    }

    println!();
    println!("{} {}", "Total roles:".bold(), Role::ALL.len());
}
