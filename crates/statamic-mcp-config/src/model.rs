// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is a
//! startup error rather than a silently ignored setting.

use serde::{Deserialize, Serialize};

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StatamicMcpConfig {
    /// Server identity and logging.
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted (web) invocation gate.
    #[serde(default)]
    pub web: WebConfig,

    /// Invocation audit trail.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Cache invalidation after writes.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Router limits and the superuser permission name.
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Content store backing the repositories.
    #[serde(default)]
    pub store: StoreConfig,
}

impl StatamicMcpConfig {
    /// Renders the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Server identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Instance name, used in logs.
    #[serde(default = "default_server_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_server_name() -> String {
    "statamic-mcp".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Hosted invocation configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebConfig {
    /// Whether any tool may be invoked in hosted context.
    #[serde(default)]
    pub enabled: bool,

    /// Tool names that stay unavailable in hosted context even when enabled.
    #[serde(default)]
    pub disabled_tools: Vec<String>,
}

/// Audit trail configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Whether invocation records are written at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Optional JSON-lines file receiving every record.
    #[serde(default)]
    pub file: Option<String>,

    /// Key fragments whose values are masked in logged arguments.
    #[serde(default = "default_sensitive_keys")]
    pub sensitive_keys: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
            sensitive_keys: default_sensitive_keys(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sensitive_keys() -> Vec<String> {
    ["password", "secret", "token", "key", "api"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Segments cleared after every successful mutating action.
    #[serde(default = "default_invalidate_on_write")]
    pub invalidate_on_write: Vec<String>,

    /// Every segment the cache collaborator knows about.
    #[serde(default = "default_segments")]
    pub segments: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            invalidate_on_write: default_invalidate_on_write(),
            segments: default_segments(),
        }
    }
}

fn default_invalidate_on_write() -> Vec<String> {
    vec!["stache".to_string(), "static".to_string()]
}

fn default_segments() -> Vec<String> {
    ["stache", "static", "glide", "views", "application"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    /// Page size used when a list request omits `limit`.
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Upper bound applied to any requested `limit`.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Permission required for actions with no narrower mapping.
    #[serde(default = "default_superuser_permission")]
    pub superuser_permission: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            superuser_permission: default_superuser_permission(),
        }
    }
}

fn default_limit() -> usize {
    50
}

fn default_max_limit() -> usize {
    100
}

fn default_superuser_permission() -> String {
    "super".to_string()
}

/// Content store configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// JSON fixture loaded into the in-memory store at startup.
    #[serde(default)]
    pub fixture: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_closed_for_web() {
        let config = StatamicMcpConfig::default();
        assert!(!config.web.enabled);
        assert!(config.web.disabled_tools.is_empty());
        assert!(config.audit.enabled);
        assert_eq!(config.tools.default_limit, 50);
        assert_eq!(config.tools.max_limit, 100);
        assert_eq!(config.cache.invalidate_on_write, vec!["stache", "static"]);
    }
}
