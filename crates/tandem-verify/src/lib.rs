//! # tandem-verify
//!
//! Dual-agent evidence-chain verification of machine-extracted metrics.
//!
//! ```text
//! page text + industry ─► ExtractionAgent ─► [MetricClaim]
//!                                               │ per claim
//!                                               ▼
//!                          VerificationAgent ─► Option<MetricClaim>
//!                                               │
//!                                               ▼
//!                          consensus::resolve ─► VerificationResult ─► log
//! ```
//!
//! No stage raises on bad oracle output: invalid candidates are dropped,
//! failed verifications become `uncertain`, disagreements become `disputed`.

pub mod candidate;
pub mod consensus;
mod error;
pub mod extraction;
pub mod industry;
pub mod orchestrator;
pub mod prompts;
pub mod verification;

#[cfg(test)]
pub(crate) mod testing;

pub use error::VerifyError;
pub use extraction::ExtractionAgent;
pub use orchestrator::{PageInput, VerificationOrchestrator};
pub use verification::VerificationAgent;
