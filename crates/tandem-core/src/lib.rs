//! # tandem-core
//!
//! Value types shared by every Tandem crate.
//!
//! This crate provides:
//! - [`Evidence`] with the provenance invariants enforced at construction
//! - [`MetricClaim`], one agent's assertion about a single metric
//! - [`VerificationStatus`] and [`VerificationResult`], the consensus output
//! - [`LogEntry`] and [`VerificationSummary`] for per-document bookkeeping
//! - Cross-cutting error types

pub mod claim;
pub mod enums;
pub mod errors;
pub mod evidence;
pub mod log;
pub mod result;

pub use claim::MetricClaim;
pub use enums::VerificationStatus;
pub use errors::CoreError;
pub use evidence::Evidence;
pub use log::{LogEntry, VerificationSummary};
pub use result::VerificationResult;
