// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end router tests against the in-memory backend.

use std::sync::Arc;

use serde_json::{Value, json};
use statamic_mcp_audit::{Auditor, MemoryAuditSink, Outcome};
use statamic_mcp_core::traits::{AssetRepository, EntryRepository, HandleRepository};
use statamic_mcp_core::types::AssetContainer;
use statamic_mcp_core::{
    Actor, Domain, Envelope, ExecutionContext, Services, ToolError, ToolRequest,
};
use statamic_mcp_memory::{Fixture, MemoryCache, MemoryStore};
use statamic_mcp_security::{REDACTED, Sanitizer};
use statamic_mcp_tools::{
    ActionRouter, ActionSpec, PermissionResolver, RouterPolicy, Tool, builtin_registry,
};
use tracing_test::traced_test;

const FIXTURE: &str = r#"{
    "sites": [{"handle": "default", "name": "Default", "url": "/", "locale": "en_US"}],
    "collections": [
        {"handle": "articles", "title": "Articles"},
        {"handle": "secret", "title": "Secret"}
    ],
    "entries": [{"id": "s1", "collection": "secret", "slug": "plans", "site": "default",
                 "published": true, "data": {"title": "Plans"}}],
    "taxonomies": [{"handle": "tags", "title": "Tags"}],
    "asset_containers": [{"handle": "main", "title": "Main", "disk": "public"}],
    "assets": [{"container": "main", "path": "photos/a.jpg", "size": 10}],
    "roles": [
        {"handle": "editor", "title": "Editor",
         "permissions": ["view articles entries", "create articles entries", "edit articles entries"]},
        {"handle": "user_manager", "title": "User Manager",
         "permissions": ["view users", "create users", "edit users"]}
    ],
    "users": [
        {"id": "admin", "email": "admin@example.test", "super": true},
        {"id": "ed", "email": "ed@example.test", "roles": ["editor"]},
        {"id": "mgr", "email": "mgr@example.test", "roles": ["user_manager"]}
    ]
}"#;

struct Harness {
    router: ActionRouter,
    store: Arc<MemoryStore>,
    cache: Arc<MemoryCache>,
    audit: Arc<MemoryAuditSink>,
}

impl Harness {
    fn new() -> Self {
        Self::with_policy(RouterPolicy::default())
    }

    fn with_policy(policy: RouterPolicy) -> Self {
        Self::build(builtin_registry(), policy)
    }

    fn build(registry: statamic_mcp_tools::ToolRegistry, policy: RouterPolicy) -> Self {
        let store = Arc::new(Fixture::from_json(FIXTURE).unwrap().into_store().unwrap());
        let cache = Arc::new(MemoryCache::default());
        let audit = Arc::new(MemoryAuditSink::new());
        let services = statamic_mcp_memory::services(store.clone(), cache.clone());
        let auditor = Auditor::new(audit.clone(), Sanitizer::default());
        let router = ActionRouter::new(registry, services, auditor).with_policy(policy);
        Self {
            router,
            store,
            cache,
            audit,
        }
    }

    fn cli(&self, tool: &str, args: Value) -> Envelope {
        self.router.call(tool, args, &ExecutionContext::cli())
    }

    fn web(&self, actor: &str, tool: &str, args: Value) -> Envelope {
        self.router
            .call(tool, args, &ExecutionContext::web(Actor::new(actor)))
    }
}

fn web_policy() -> RouterPolicy {
    RouterPolicy {
        web_enabled: true,
        ..RouterPolicy::default()
    }
}

fn error_of(envelope: &Envelope) -> String {
    assert!(!envelope.is_success(), "expected failure, got {envelope:?}");
    envelope.errors().join("; ")
}

fn data_of(envelope: Envelope) -> Value {
    assert!(envelope.is_success(), "expected success, got {envelope:?}");
    envelope.data().cloned().unwrap()
}

// --- Discovery ---

#[test]
fn discovery_actions_need_no_other_fields() {
    let h = Harness::new();
    for tool in h.router.registry().names() {
        for action in ["help", "discover", "examples"] {
            let data = data_of(h.cli(tool, json!({"action": action})));
            assert_eq!(data["tool"], tool, "{tool} {action}");
        }
    }
    assert!(h.audit.records().is_empty());
}

#[test]
fn discovery_is_answered_even_when_web_is_disabled() {
    let h = Harness::new();
    let envelope = h.web("ed", "statamic.entries", json!({"action": "help"}));
    assert!(envelope.is_success());
}

#[test]
fn discover_groups_capabilities_by_type() {
    let h = Harness::new();
    let data = data_of(h.cli("statamic.assets", json!({"action": "discover"})));
    assert_eq!(data["types"], json!(["container", "asset"]));
    assert!(data["capabilities"]["asset"].is_array());
    assert!(data["input_schema"]["properties"]["action"]["enum"].is_array());
}

// --- Resolution and validation ---

#[test]
fn unknown_tool_is_rejected() {
    let h = Harness::new();
    let err = error_of(&h.cli("statamic.nope", json!({"action": "list"})));
    assert_eq!(err, "Unknown tool: statamic.nope");
}

#[test]
fn unknown_action_suggests_the_closest() {
    let h = Harness::new();
    let err = error_of(&h.cli("statamic.entries", json!({"action": "lst"})));
    assert!(err.starts_with("Unknown action 'lst' for statamic.entries"));
    assert!(err.contains("Did you mean 'list'?"));
}

#[test]
fn targeted_tools_require_a_known_type() {
    let h = Harness::new();
    let err = error_of(&h.cli("statamic.users", json!({"action": "list"})));
    assert_eq!(err, "Missing required field: type");

    let err = error_of(&h.cli("statamic.users", json!({"action": "list", "type": "group"})));
    assert_eq!(
        err,
        "Unknown type 'group' for statamic.users. Valid types: user, role"
    );
}

#[test]
fn id_actions_fail_without_id_and_never_reach_the_handler() {
    let h = Harness::new();
    for action in ["get", "update", "delete", "publish", "unpublish"] {
        let envelope = h.cli(
            "statamic.entries",
            json!({"action": action, "data": {"title": "x"}}),
        );
        assert_eq!(error_of(&envelope), "Missing required field: id", "{action}");
    }
    assert!(h.audit.records().is_empty());
    assert!(h.cache.clears().is_empty());
}

#[test]
fn create_requires_non_empty_data() {
    let h = Harness::new();
    for args in [
        json!({"action": "create", "collection": "articles"}),
        json!({"action": "create", "collection": "articles", "data": {}}),
    ] {
        let err = error_of(&h.cli("statamic.entries", args));
        assert_eq!(err, "Missing required field: data");
    }
    assert_eq!(EntryRepository::count(h.store.as_ref(), "articles").unwrap(), 0);
}

#[test]
fn create_in_missing_collection_fails_before_any_write() {
    let h = Harness::new();
    let err = error_of(&h.cli(
        "statamic.entries",
        json!({"action": "create", "collection": "news", "data": {"title": "Hi"}}),
    ));
    assert_eq!(err, "Collection not found: news");
    assert_eq!(EntryRepository::count(h.store.as_ref(), "news").unwrap(), 0);
    assert!(h.audit.records().is_empty());
}

#[test]
fn missing_taxonomy_is_reported_without_audit() {
    let h = Harness::new();
    let err = error_of(&h.cli(
        "statamic.terms",
        json!({"action": "list", "taxonomy": "categories"}),
    ));
    assert_eq!(err, "Taxonomy not found: categories");
    assert!(h.audit.records().is_empty());
}

#[test]
fn destructive_blueprint_delete_needs_confirmation() {
    let h = Harness::new();
    let err = error_of(&h.cli(
        "statamic.blueprints",
        json!({"action": "delete", "namespace": "collections.articles", "handle": "article"}),
    ));
    assert_eq!(err, "Action 'delete' is destructive and requires confirm: true");
}

#[test]
fn limit_is_clamped_to_the_policy_maximum() {
    let h = Harness::new();
    let data = data_of(h.cli(
        "statamic.entries",
        json!({"action": "list", "collection": "articles", "limit": 500}),
    ));
    assert_eq!(data["limit"], 100);
    assert_eq!(data["offset"], 0);
    assert_eq!(data["has_more"], false);
}

// --- Handlers ---

#[test]
fn created_entry_reads_back() {
    let h = Harness::new();
    let created = data_of(h.cli(
        "statamic.entries",
        json!({"action": "create", "collection": "articles",
               "data": {"title": "Hello World", "content": "First"}}),
    ));
    assert_eq!(created["slug"], "hello-world");
    assert_eq!(created["published"], true);
    assert_eq!(created["site"], "default");

    let id = created["id"].as_str().unwrap();
    let fetched = data_of(h.cli("statamic.entries", json!({"action": "get", "id": id})));
    assert_eq!(fetched["data"]["title"], "Hello World");
    assert_eq!(fetched["data"]["content"], "First");

    let err = error_of(&h.cli(
        "statamic.entries",
        json!({"action": "create", "collection": "articles", "data": {"title": "Hello world!"}}),
    ));
    assert_eq!(
        err,
        "Entry with slug 'hello-world' already exists in collection 'articles'"
    );
}

#[test]
fn unpublish_and_filtered_listing() {
    let h = Harness::new();
    let created = data_of(h.cli(
        "statamic.entries",
        json!({"action": "create", "collection": "articles", "data": {"title": "Draft me"}}),
    ));
    let id = created["id"].as_str().unwrap();
    data_of(h.cli("statamic.entries", json!({"action": "unpublish", "id": id})));

    let drafts = data_of(h.cli(
        "statamic.entries",
        json!({"action": "list", "collection": "articles", "status": "draft"}),
    ));
    assert_eq!(drafts["total"], 1);
    assert_eq!(drafts["items"][0]["id"], id);
}

#[test]
fn container_with_assets_is_not_deleted() {
    let h = Harness::new();
    let err = error_of(&h.cli(
        "statamic.assets",
        json!({"action": "delete", "type": "container", "handle": "main"}),
    ));
    assert_eq!(
        err,
        "Asset container 'main' still contains 1 asset(s); delete or move them first"
    );
    let container: Option<AssetContainer> = HandleRepository::find(h.store.as_ref(), "main").unwrap();
    assert!(container.is_some());
    assert_eq!(AssetRepository::count(h.store.as_ref(), "main").unwrap(), 1);
}

#[test]
fn cache_clear_is_idempotent() {
    let h = Harness::new();
    let first = data_of(h.cli("statamic.system", json!({"action": "cache_clear"})));
    let second = data_of(h.cli("statamic.system", json!({"action": "cache_clear"})));
    assert_eq!(first, second);
    assert_eq!(first["cleared"].as_array().unwrap().len(), 5);
    assert_eq!(h.cache.clears().len(), 2);
}

#[test]
fn cache_clear_rejects_unknown_segment() {
    let h = Harness::new();
    let err = error_of(&h.cli(
        "statamic.system",
        json!({"action": "cache_clear", "segments": ["redis"]}),
    ));
    assert!(err.starts_with("Unknown cache segment 'redis'"));
}

// --- Audit ---

#[test]
fn audit_logs_masked_password_while_handler_sees_it() {
    let h = Harness::new();
    let envelope = h.cli(
        "statamic.users",
        json!({"action": "create", "type": "user",
               "data": {"email": "new@example.test", "password": "secret123"}}),
    );
    let text = serde_json::to_string(&envelope).unwrap();
    assert!(!text.contains("secret123"));
    let user = data_of(envelope);
    let id = user["id"].as_str().unwrap();
    assert!(h.store.verify_password(id, "secret123"));

    let records = h.audit.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].outcome, Outcome::Started);
    assert_eq!(records[1].outcome, Outcome::Success);
    for record in &records {
        assert_eq!(record.arguments["data"]["password"], REDACTED);
        assert_eq!(record.arguments["data"]["email"], "new@example.test");
    }
    assert_eq!(records[0].invocation_id, records[1].invocation_id);
    assert_eq!(records[0].target, "users:user");
}

#[test]
fn failed_handler_is_audited_as_failure() {
    let h = Harness::new();
    let err = error_of(&h.cli("statamic.entries", json!({"action": "get", "id": "missing"})));
    assert_eq!(err, "Entry not found: missing");

    let records = h.audit.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].outcome, Outcome::Failure);
    assert_eq!(records[1].error.as_deref(), Some("Entry not found: missing"));
    assert_eq!(records[1].error_kind.as_deref(), Some("not_found"));
}

#[test]
fn audit_target_carries_the_scope() {
    let h = Harness::new();
    data_of(h.cli(
        "statamic.entries",
        json!({"action": "list", "collection": "articles"}),
    ));
    assert_eq!(h.audit.records()[0].target, "entries:articles");
}

struct PanickingTool;

static PANICKING_ACTIONS: [ActionSpec; 1] = [ActionSpec::new("boom", "Always panics", boom)];

fn boom(_: &Services, _: &ToolRequest) -> Result<Value, ToolError> {
    panic!("kaboom")
}

impl Tool for PanickingTool {
    fn name(&self) -> &'static str {
        "test.panicking"
    }

    fn description(&self) -> &'static str {
        "Panics on every call"
    }

    fn domain(&self) -> Domain {
        Domain::System
    }

    fn actions(&self) -> &'static [ActionSpec] {
        &PANICKING_ACTIONS
    }
}

#[test]
fn handler_panic_becomes_a_failure_envelope() {
    let mut registry = builtin_registry();
    registry.register(Arc::new(PanickingTool));
    let h = Harness::build(registry, RouterPolicy::default());

    let err = error_of(&h.cli("test.panicking", json!({"action": "boom"})));
    assert_eq!(err, "handler panicked: kaboom");
    let records = h.audit.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].outcome, Outcome::Failure);
}

// --- Cache invalidation ---

#[test]
fn successful_mutation_invalidates_write_segments() {
    let h = Harness::new();
    data_of(h.cli(
        "statamic.entries",
        json!({"action": "create", "collection": "articles", "data": {"title": "A"}}),
    ));
    assert_eq!(
        h.cache.clears(),
        vec![vec!["stache".to_string(), "static".to_string()]]
    );

    data_of(h.cli("statamic.entries", json!({"action": "list"})));
    assert_eq!(h.cache.clears().len(), 1);
}

#[test]
fn failed_mutation_does_not_invalidate() {
    let h = Harness::new();
    error_of(&h.cli(
        "statamic.entries",
        json!({"action": "update", "id": "missing", "data": {"title": "A"}}),
    ));
    assert!(h.cache.clears().is_empty());
}

#[traced_test]
#[test]
fn invalidation_failure_is_logged_not_surfaced() {
    let h = Harness::new();
    h.cache.set_failing(true);
    let envelope = h.cli(
        "statamic.entries",
        json!({"action": "create", "collection": "articles", "data": {"title": "A"}}),
    );
    assert!(envelope.is_success());
    assert_eq!(EntryRepository::count(h.store.as_ref(), "articles").unwrap(), 1);
    assert!(logs_contain("cache invalidation failed"));
}

// --- Hosted context ---

#[test]
fn web_gate_applies_before_field_validation() {
    let h = Harness::new();
    let err = error_of(&h.web("admin", "statamic.entries", json!({"action": "bogus"})));
    assert_eq!(err, "Tool statamic.entries is not enabled for web access");

    let mut policy = web_policy();
    policy
        .web_disabled_tools
        .insert("statamic.users".to_string());
    let h = Harness::with_policy(policy);
    let err = error_of(&h.web("admin", "statamic.users", json!({"action": "get", "type": "user"})));
    assert_eq!(err, "Tool statamic.users is not enabled for web access");
    assert!(h.web("admin", "statamic.entries", json!({"action": "list"})).is_success());
}

#[test]
fn anonymous_web_call_needs_authentication() {
    let h = Harness::with_policy(web_policy());
    let envelope = h.router.call(
        "statamic.entries",
        json!({"action": "list", "collection": "articles"}),
        &ExecutionContext::anonymous_web(),
    );
    assert_eq!(error_of(&envelope), "Authentication required");
}

#[test]
fn role_permissions_gate_web_calls() {
    let h = Harness::with_policy(web_policy());
    let listed = h.web(
        "ed",
        "statamic.entries",
        json!({"action": "list", "collection": "articles"}),
    );
    assert!(listed.is_success());

    let err = error_of(&h.web(
        "ed",
        "statamic.entries",
        json!({"action": "delete", "collection": "articles", "id": "x"}),
    ));
    assert_eq!(err, "Permission denied: requires 'delete articles entries'");

    // No collection means no narrower permission applies.
    let err = error_of(&h.web("ed", "statamic.entries", json!({"action": "list"})));
    assert_eq!(err, "Permission denied: requires 'super'");

    assert!(h.web("admin", "statamic.entries", json!({"action": "list"})).is_success());
    // Denied calls are never audited; the two allowed lists are.
    assert_eq!(h.audit.records().len(), 4);
}

#[test]
fn entry_ids_are_bound_to_the_named_collection() {
    let h = Harness::with_policy(web_policy());

    let err = error_of(&h.web("ed", "statamic.entries", json!({"action": "get", "id": "s1"})));
    assert_eq!(err, "Permission denied: requires 'super'");

    let err = error_of(&h.web(
        "ed",
        "statamic.entries",
        json!({"action": "get", "id": "s1", "collection": "articles"}),
    ));
    assert_eq!(err, "Entry not found: s1");

    let err = error_of(&h.web(
        "ed",
        "statamic.entries",
        json!({"action": "update", "id": "s1", "collection": "articles", "data": {"title": "changed"}}),
    ));
    assert_eq!(err, "Entry not found: s1");

    let stored = EntryRepository::find(h.store.as_ref(), "s1").unwrap().unwrap();
    assert_eq!(stored.data["title"], "Plans");
    // Refused in precheck, so never audited.
    assert!(h.audit.records().is_empty());
}

#[test]
fn named_collection_must_match_in_cli_context_too() {
    let h = Harness::new();
    let err = error_of(&h.cli(
        "statamic.entries",
        json!({"action": "delete", "id": "s1", "collection": "articles"}),
    ));
    assert_eq!(err, "Entry not found: s1");
    assert_eq!(EntryRepository::count(h.store.as_ref(), "secret").unwrap(), 1);

    let fetched = data_of(h.cli(
        "statamic.entries",
        json!({"action": "get", "id": "s1", "collection": "secret"}),
    ));
    assert_eq!(fetched["slug"], "plans");
}

#[test]
fn granting_super_or_roles_needs_superuser() {
    let h = Harness::with_policy(web_policy());

    let renamed = data_of(h.web(
        "mgr",
        "statamic.users",
        json!({"action": "update", "type": "user", "id": "ed", "data": {"name": "Ed"}}),
    ));
    assert_eq!(renamed["name"], "Ed");

    let err = error_of(&h.web(
        "mgr",
        "statamic.users",
        json!({"action": "update", "type": "user", "id": "mgr", "data": {"super": true}}),
    ));
    assert_eq!(err, "Permission denied: requires 'super'");

    let err = error_of(&h.web(
        "mgr",
        "statamic.users",
        json!({"action": "create", "type": "user",
               "data": {"email": "new@example.test", "roles": ["editor"]}}),
    ));
    assert_eq!(err, "Permission denied: requires 'super'");

    // Still not a superuser: role deletion stays gated.
    let err = error_of(&h.web(
        "mgr",
        "statamic.users",
        json!({"action": "delete", "type": "role", "handle": "editor"}),
    ));
    assert_eq!(err, "Permission denied: requires 'super'");

    let promoted = data_of(h.web(
        "admin",
        "statamic.users",
        json!({"action": "update", "type": "user", "id": "mgr", "data": {"super": true}}),
    ));
    assert_eq!(promoted["super"], true);
}

#[test]
fn cli_context_skips_permission_checks() {
    let h = Harness::new();
    let envelope = h.cli(
        "statamic.users",
        json!({"action": "delete", "type": "role", "handle": "editor"}),
    );
    // Refused for data reasons, not permissions.
    assert_eq!(
        error_of(&envelope),
        "Role 'editor' is assigned to 1 user(s); reassign them first"
    );
}

// --- Structures ---

#[test]
fn referenced_taxonomy_is_not_deleted() {
    let h = Harness::new();
    data_of(h.cli(
        "statamic.structures",
        json!({"action": "update", "type": "collection", "handle": "articles",
               "data": {"taxonomies": ["tags"]}}),
    ));
    let err = error_of(&h.cli(
        "statamic.structures",
        json!({"action": "delete", "type": "taxonomy", "handle": "tags"}),
    ));
    assert_eq!(
        err,
        "Taxonomy 'tags' is used by collection(s) articles; detach it first"
    );
}

#[test]
fn site_deletion_keeps_references_intact() {
    let h = Harness::new();
    data_of(h.cli(
        "statamic.structures",
        json!({"action": "create", "type": "site", "handle": "fr", "data": {"locale": "fr_FR"}}),
    ));

    let err = error_of(&h.cli(
        "statamic.structures",
        json!({"action": "delete", "type": "site", "handle": "default"}),
    ));
    assert_eq!(err, "Cannot delete site 'default': it is the default site");

    data_of(h.cli(
        "statamic.structures",
        json!({"action": "update", "type": "collection", "handle": "articles",
               "data": {"sites": ["default", "fr"]}}),
    ));
    let err = error_of(&h.cli(
        "statamic.structures",
        json!({"action": "delete", "type": "site", "handle": "fr"}),
    ));
    assert_eq!(
        err,
        "Site 'fr' is used by collection(s) articles; remove it from them first"
    );

    data_of(h.cli(
        "statamic.structures",
        json!({"action": "update", "type": "collection", "handle": "articles",
               "data": {"sites": ["default"]}}),
    ));
    data_of(h.cli(
        "statamic.entries",
        json!({"action": "create", "collection": "articles", "site": "fr",
               "data": {"title": "Bonjour"}}),
    ));
    let err = error_of(&h.cli(
        "statamic.structures",
        json!({"action": "delete", "type": "site", "handle": "fr"}),
    ));
    assert_eq!(err, "Site 'fr' still has 1 entries; delete them first");
}

// --- Registry-wide properties ---

#[test]
fn every_example_payload_names_a_registered_action() {
    let registry = builtin_registry();
    for name in registry.names() {
        let tool = registry.get(name).unwrap();
        for spec in tool.actions() {
            assert!(
                !spec.descriptor.examples.is_empty(),
                "{name} {} has no example",
                spec.name
            );
            for example in spec.descriptor.examples {
                let payload: Value = serde_json::from_str(example)
                    .unwrap_or_else(|e| panic!("{name} example does not parse: {e}: {example}"));
                let request = ToolRequest::from_value(payload).unwrap();
                let resolved = tool.resolve(&request).unwrap();
                assert_eq!(resolved.name, spec.name, "{name}: {example}");
                assert_eq!(resolved.target, spec.target, "{name}: {example}");
            }
        }
    }
}

#[test]
fn every_action_resolves_to_a_non_empty_permission_set() {
    let registry = builtin_registry();
    let resolver = PermissionResolver::default();
    for name in registry.names() {
        let tool = registry.get(name).unwrap();
        for spec in tool.actions() {
            let request = ToolRequest::from_value(json!({"action": spec.name})).unwrap();
            let required = resolver.resolve(tool.domain(), spec.target, spec.name, &request);
            assert!(!required.is_empty(), "{name} {}", spec.name);
        }
    }
}

#[test]
fn registry_lists_all_builtin_tools() {
    let registry = builtin_registry();
    assert_eq!(
        registry.names(),
        vec![
            "statamic.assets",
            "statamic.blueprints",
            "statamic.entries",
            "statamic.globals",
            "statamic.structures",
            "statamic.system",
            "statamic.terms",
            "statamic.users",
        ]
    );
    for definition in registry.tool_definitions() {
        assert_eq!(definition["input_schema"]["type"], "object");
    }
}
