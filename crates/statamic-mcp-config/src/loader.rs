// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading.
//!
//! Merge order, later wins: compiled defaults, `/etc/statamic-mcp/statamic-mcp.toml`,
//! `~/.config/statamic-mcp/statamic-mcp.toml`, `./statamic-mcp.toml`, then
//! `STATAMIC_MCP_*` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::StatamicMcpConfig;

pub const CONFIG_FILE_NAME: &str = "statamic-mcp.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/statamic-mcp/statamic-mcp.toml";

/// Config files consulted by [`load_config`], lowest precedence first.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("statamic-mcp").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Load configuration from the standard hierarchy with env overrides.
pub fn load_config() -> Result<StatamicMcpConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<StatamicMcpConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StatamicMcpConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<StatamicMcpConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(StatamicMcpConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The full layered figment, before extraction.
pub fn build_figment() -> Figment {
    config_paths().into_iter().fold(
        Figment::new().merge(Serialized::defaults(StatamicMcpConfig::default())),
        |figment, path| figment.merge(Toml::file(path)),
    )
    .merge(env_provider())
}

fn env_provider() -> Env {
    Env::prefixed("STATAMIC_MCP_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a prefix-stripped, lowercased env key onto its dotted config path.
///
/// Section prefixes are matched explicitly so `tools_max_limit` becomes
/// `tools.max_limit` and not `tools.max.limit`.
pub fn map_env_key(key: &str) -> String {
    ["server", "web", "audit", "cache", "tools", "store"]
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|rest| format!("{section}.{rest}"))
        })
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_file_has_highest_file_precedence() {
        let paths = config_paths();
        assert_eq!(paths.first(), Some(&PathBuf::from(SYSTEM_CONFIG_PATH)));
        assert_eq!(paths.last(), Some(&PathBuf::from(CONFIG_FILE_NAME)));
    }

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("tools_max_limit"), "tools.max_limit");
        assert_eq!(map_env_key("web_disabled_tools"), "web.disabled_tools");
        assert_eq!(map_env_key("server_log_level"), "server.log_level");
        assert_eq!(map_env_key("unrelated"), "unrelated");
    }
}
