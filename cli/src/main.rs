use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod utils;

use commands::{check, landing, roles, route};
use utils::role_table;

/// Access CLI - Inspect role tables and dry-run marketplace guards
#[derive(Parser)]
#[command(name = "accessctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Role table YAML file (the built-in table is used when omitted)
    #[arg(short, long, global = true, env = "ACCESS_ROLE_TABLE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show role ids, permissions and landing paths
    Roles {
        /// Output format (json, yaml, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check whether a role id holds a permission
    Check {
        /// Permission token (e.g., "listing.create")
        #[arg(short, long)]
        permission: String,

        /// Backend role id of the principal; omit for a signed-out visitor
        #[arg(short, long)]
        role_id: Option<u32>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Dry-run a route guard
    Route {
        /// Acceptable permissions, comma separated; holding any one is enough
        #[arg(long, value_delimiter = ',')]
        require: Vec<String>,

        /// Where to redirect when access is denied
        #[arg(long, default_value = "/login")]
        fallback: String,

        /// Backend role id of the principal; omit for a signed-out visitor
        #[arg(short, long)]
        role_id: Option<u32>,

        /// Requested location, including any query string
        #[arg(long, default_value = "/")]
        path: String,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Resolve where a freshly signed-in principal lands
    Landing {
        /// Backend role id of the principal
        #[arg(short, long)]
        role_id: Option<u32>,

        /// Explicit redirectTo target carried by the login URL
        #[arg(long)]
        redirect_to: Option<String>,

        /// Location remembered by a route guard before the login redirect
        #[arg(long)]
        remembered: Option<String>,

        /// Login page location
        #[arg(long, default_value = "/login")]
        path: String,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    // Load .env before parsing so ACCESS_ROLE_TABLE can come from it
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let registry = role_table::load(cli.config.as_deref())?;

    // Execute the command
    match cli.command {
        Commands::Roles { format } => {
            roles::execute(&registry, &format)?;
        }
        Commands::Check {
            permission,
            role_id,
            format,
        } => {
            check::execute(&registry, &permission, role_id, &format)?;
        }
        Commands::Route {
            require,
            fallback,
            role_id,
            path,
            format,
        } => {
            route::execute(&registry, &require, &fallback, role_id, &path, &format)?;
        }
        Commands::Landing {
            role_id,
            redirect_to,
            remembered,
            path,
            format,
        } => {
            landing::execute(
                &registry,
                role_id,
                redirect_to.as_deref(),
                remembered.as_deref(),
                &path,
                &format,
            )?;
        }
    }

    Ok(())
}
