// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assembles the router and its collaborators from configuration.

use std::path::Path;
use std::sync::Arc;

use statamic_mcp_audit::{
    AuditSink, Auditor, FanoutAuditSink, JsonlAuditSink, TracingAuditSink,
};
use statamic_mcp_config::StatamicMcpConfig;
use statamic_mcp_memory::{Fixture, MemoryCache, MemoryStore};
use statamic_mcp_security::Sanitizer;
use statamic_mcp_tools::{
    ActionRouter, PermissionResolver, RouterPolicy, ToolRegistry, builtin_registry,
};
use tracing::info;

use crate::error::ServerError;

/// A fully wired application.
#[derive(Debug)]
pub struct App {
    pub router: Arc<ActionRouter>,
    pub store: Arc<MemoryStore>,
    pub cache: Arc<MemoryCache>,
}

impl App {
    pub fn from_config(config: &StatamicMcpConfig) -> Result<Self, ServerError> {
        let store = Arc::new(load_store(config.store.fixture.as_deref())?);
        let cache = Arc::new(MemoryCache::new(config.cache.segments.iter().cloned()));
        let services = statamic_mcp_memory::services(store.clone(), cache.clone());

        let registry = builtin_registry();
        let policy = router_policy(config, &registry)?;
        let auditor = build_auditor(config)?;
        let router = ActionRouter::new(registry, services, auditor)
            .with_policy(policy)
            .with_resolver(PermissionResolver::new(
                config.tools.superuser_permission.clone(),
            ));

        Ok(Self {
            router: Arc::new(router),
            store,
            cache,
        })
    }
}

fn load_store(fixture: Option<&str>) -> Result<MemoryStore, ServerError> {
    let fixture = match fixture {
        Some(path) => {
            info!(path, "loading fixture");
            Fixture::from_path(Path::new(path))?
        }
        None => Fixture::minimal(),
    };
    Ok(fixture.into_store()?)
}

fn build_auditor(config: &StatamicMcpConfig) -> Result<Auditor, ServerError> {
    if !config.audit.enabled {
        info!("audit logging disabled");
        return Ok(Auditor::disabled());
    }
    let mut sinks: Vec<Arc<dyn AuditSink>> = vec![Arc::new(TracingAuditSink)];
    if let Some(path) = &config.audit.file {
        sinks.push(Arc::new(JsonlAuditSink::new(path)?));
        info!(path = %path, "audit records appended to file");
    }
    Ok(Auditor::new(
        Arc::new(FanoutAuditSink::new(sinks)),
        Sanitizer::new(&config.audit.sensitive_keys),
    ))
}

/// Router policy from config; every web-disabled tool must exist.
fn router_policy(
    config: &StatamicMcpConfig,
    registry: &ToolRegistry,
) -> Result<RouterPolicy, ServerError> {
    for name in &config.web.disabled_tools {
        if !registry.contains(name) {
            return Err(ServerError::UnknownTool {
                name: name.clone(),
                suggestion: suggest_tool(name, registry),
            });
        }
    }
    Ok(RouterPolicy {
        web_enabled: config.web.enabled,
        web_disabled_tools: config.web.disabled_tools.iter().cloned().collect(),
        write_segments: config.cache.invalidate_on_write.clone(),
        default_limit: config.tools.default_limit,
        max_limit: config.tools.max_limit,
    })
}

fn suggest_tool(name: &str, registry: &ToolRegistry) -> Option<String> {
    registry
        .names()
        .into_iter()
        .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate))
        .filter(|(score, _)| *score > 0.75)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        let app = App::from_config(&StatamicMcpConfig::default()).unwrap();
        assert_eq!(app.router.registry().len(), 8);
        assert!(!app.router.policy().web_enabled);
        assert_eq!(app.router.policy().write_segments, vec!["stache", "static"]);
    }

    #[test]
    fn unknown_disabled_tool_is_rejected_with_suggestion() {
        let mut config = StatamicMcpConfig::default();
        config.web.disabled_tools = vec!["statamic.user".into()];
        let err = App::from_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "web.disabled_tools names unknown tool 'statamic.user' (did you mean 'statamic.users'?)"
        );
    }

    #[test]
    fn missing_fixture_is_an_error() {
        let mut config = StatamicMcpConfig::default();
        config.store.fixture = Some("/nonexistent/statamic-fixture.json".into());
        assert!(matches!(
            App::from_config(&config),
            Err(ServerError::Fixture(_))
        ));
    }
}
