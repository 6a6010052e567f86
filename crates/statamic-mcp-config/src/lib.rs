// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for statamic-mcp.
//!
//! TOML files layered with environment overrides, strict key checking, and
//! miette diagnostics with typo suggestions.
//!
//! ```no_run
//! use statamic_mcp_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("web enabled: {}", config.web.enabled);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    AuditConfig, CacheConfig, ServerConfig, StatamicMcpConfig, StoreConfig, ToolsConfig,
    WebConfig,
};

/// Loads the layered configuration and validates it.
pub fn load_and_validate() -> Result<StatamicMcpConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Loads an explicit file (plus env overrides) and validates it.
pub fn load_and_validate_path(
    path: &std::path::Path,
) -> Result<StatamicMcpConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Loads a TOML string and validates it.
pub fn load_and_validate_str(toml_content: &str) -> Result<StatamicMcpConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<StatamicMcpConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<StatamicMcpConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Contents of whichever config files exist, for error spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_paths()
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            let name = std::env::current_dir()
                .ok()
                .filter(|_| path.is_relative())
                .map(|dir| dir.join(&path))
                .unwrap_or(path);
            Some((name.display().to_string(), content))
        })
        .collect()
}
