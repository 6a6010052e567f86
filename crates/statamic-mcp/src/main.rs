// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! statamic-mcp - MCP tools for managing Statamic content.
//!
//! This is the binary entry point: it loads configuration, wires the
//! router, and either serves MCP over stdio or runs a single tool call.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;
use statamic_mcp_config::StatamicMcpConfig;
use statamic_mcp_core::{Actor, Envelope, ExecutionContext};
use statamic_mcp_server::App;

/// statamic-mcp - MCP tools for managing Statamic content.
#[derive(Parser, Debug)]
#[command(name = "statamic-mcp", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the MCP tools over stdin/stdout.
    Serve,
    /// Run one tool call and print the envelope.
    Call {
        /// Tool name, e.g. `statamic.entries`.
        tool: String,
        /// Arguments as a JSON object.
        #[arg(default_value = "{}")]
        arguments: String,
        /// Run in hosted context, with permission checks.
        #[arg(long)]
        web: bool,
        /// Acting user id for hosted context.
        #[arg(long, requires = "web")]
        user: Option<String>,
    },
    /// List the registered tools and their input schemas.
    Tools,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            statamic_mcp_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.server.log_level);
    tracing::debug!(server = %config.server.name, web = config.web.enabled, "config loaded");

    if let Some(Commands::Config) = cli.command {
        match config.to_toml_string() {
            Ok(toml) => print!("{toml}"),
            Err(e) => {
                eprintln!("statamic-mcp: failed to render config: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let app = match App::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("statamic-mcp: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = statamic_mcp_server::serve_stdio(app.router).await {
                eprintln!("statamic-mcp: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Call {
            tool,
            arguments,
            web,
            user,
        }) => {
            let envelope = run_call(&app, &tool, &arguments, web, user);
            print_json(&envelope.to_value());
            if !envelope.is_success() {
                std::process::exit(2);
            }
        }
        Some(Commands::Tools) => {
            print_json(&Value::Array(app.router.registry().tool_definitions()));
        }
        Some(Commands::Config) => {}
        None => {
            println!("statamic-mcp: use --help for available commands");
        }
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<StatamicMcpConfig, Vec<statamic_mcp_config::ConfigError>> {
    match path {
        Some(path) => statamic_mcp_config::load_and_validate_path(path),
        None => statamic_mcp_config::load_and_validate(),
    }
}

/// Parses `arguments` and routes one call through the application's router.
///
/// Malformed JSON is reported in the envelope rather than aborting, so the
/// output shape is the same for every outcome.
fn run_call(app: &App, tool: &str, arguments: &str, web: bool, user: Option<String>) -> Envelope {
    let arguments: Value = match serde_json::from_str(arguments) {
        Ok(value) => value,
        Err(e) => return Envelope::failure(format!("Invalid JSON arguments: {e}")),
    };
    let context = match (web, user) {
        (false, _) => ExecutionContext::cli(),
        (true, Some(id)) => ExecutionContext::web(Actor::new(id)),
        (true, None) => ExecutionContext::anonymous_web(),
    };
    app.router.call(tool, arguments, &context)
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("statamic-mcp: failed to render output: {e}"),
    }
}

/// Logs go to stderr; stdout carries the MCP stream.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("statamic_mcp={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
