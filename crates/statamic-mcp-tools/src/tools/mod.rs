// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The built-in content tools.

use std::sync::Arc;

use crate::tool::{Tool, ToolRegistry};

pub mod assets;
pub mod blueprints;
pub mod entries;
pub mod globals;
pub mod structures;
pub mod support;
pub mod system;
pub mod terms;
pub mod users;

pub use assets::AssetsTool;
pub use blueprints::BlueprintsTool;
pub use entries::EntriesTool;
pub use globals::GlobalsTool;
pub use structures::StructuresTool;
pub use system::SystemTool;
pub use terms::TermsTool;
pub use users::UsersTool;

/// Every built-in tool.
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(EntriesTool),
        Arc::new(TermsTool),
        Arc::new(GlobalsTool),
        Arc::new(BlueprintsTool),
        Arc::new(AssetsTool),
        Arc::new(UsersTool),
        Arc::new(StructuresTool),
        Arc::new(SystemTool),
    ]
}

/// A registry holding every built-in tool.
pub fn builtin_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in builtin_tools() {
        registry.register(tool);
    }
    registry
}
