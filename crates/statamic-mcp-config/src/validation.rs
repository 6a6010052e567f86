// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Every check runs; all failures are returned together.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::StatamicMcpConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Tool names are namespaced under this prefix.
pub const TOOL_NAME_PREFIX: &str = "statamic.";

pub fn validate_config(config: &StatamicMcpConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.name.trim().is_empty() {
        errors.push(ConfigError::validation("server.name must not be empty"));
    }

    let level = config.server.log_level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "server.log_level `{}` is not one of {}",
            config.server.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    let tools = &config.tools;
    if tools.default_limit == 0 {
        errors.push(ConfigError::validation("tools.default_limit must be at least 1"));
    }
    if tools.max_limit == 0 {
        errors.push(ConfigError::validation("tools.max_limit must be at least 1"));
    }
    if tools.default_limit > tools.max_limit {
        errors.push(ConfigError::validation(format!(
            "tools.default_limit ({}) must not exceed tools.max_limit ({})",
            tools.default_limit, tools.max_limit
        )));
    }
    if tools.superuser_permission.trim().is_empty() {
        errors.push(ConfigError::validation(
            "tools.superuser_permission must not be empty",
        ));
    }

    let mut seen = HashSet::new();
    for name in &config.web.disabled_tools {
        if !name.starts_with(TOOL_NAME_PREFIX) {
            errors.push(ConfigError::validation(format!(
                "web.disabled_tools entry `{name}` must start with `{TOOL_NAME_PREFIX}`"
            )));
        }
        if !seen.insert(name) {
            errors.push(ConfigError::validation(format!(
                "duplicate tool `{name}` in web.disabled_tools"
            )));
        }
    }

    let known: HashSet<&str> = config.cache.segments.iter().map(String::as_str).collect();
    for segment in &config.cache.invalidate_on_write {
        if !known.contains(segment.as_str()) {
            errors.push(ConfigError::validation(format!(
                "cache.invalidate_on_write segment `{segment}` is not listed in cache.segments"
            )));
        }
    }

    if config.audit.sensitive_keys.iter().all(|k| k.trim().is_empty()) {
        tracing::warn!("audit.sensitive_keys is empty; logged arguments will not be masked");
    }

    if config
        .audit
        .file
        .as_deref()
        .is_some_and(|f| f.trim().is_empty())
    {
        errors.push(ConfigError::validation("audit.file must not be empty when set"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(validate_config(&StatamicMcpConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_failure() {
        let mut config = StatamicMcpConfig::default();
        config.tools.default_limit = 500;
        config.tools.superuser_permission = " ".into();
        config.server.log_level = "loud".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn rejects_unprefixed_and_duplicate_disabled_tools() {
        let mut config = StatamicMcpConfig::default();
        config.web.disabled_tools = vec![
            "statamic.users".into(),
            "users".into(),
            "statamic.users".into(),
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn rejects_unknown_invalidation_segment() {
        let mut config = StatamicMcpConfig::default();
        config.cache.invalidate_on_write.push("redis".into());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].to_string().contains("redis"));
    }
}
