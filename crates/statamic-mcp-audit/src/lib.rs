// SPDX-FileCopyrightText: 2026 Statamic MCP Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audit trail for tool invocations.
//!
//! Every domain handler runs inside [`Auditor::run`], which writes a started
//! record and a finished record to an [`AuditSink`]. Arguments are sanitized
//! before they are recorded.

pub mod auditor;
pub mod error;
pub mod record;
pub mod sink;

pub use auditor::Auditor;
pub use error::AuditError;
pub use record::{AuditRecord, Invocation, Outcome};
pub use sink::{
    AuditSink, FanoutAuditSink, JsonlAuditSink, MemoryAuditSink, NoopAuditSink, TracingAuditSink,
};
