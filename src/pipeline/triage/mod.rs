//! Symptom triage core.
//!
//! Text → phrases (`extract`) → criticality (`criticality`) → department
//! scores (`scoring`) → routing decision (`routing`) → doctor and condition
//! labels (`labels`). `orchestrator` chains the stages. Everything here is
//! pure: no I/O, no shared mutable state.

pub mod criticality;
pub mod extract;
pub mod labels;
pub mod orchestrator;
pub mod routing;
pub mod scoring;
pub mod types;

pub use orchestrator::{classify, classify_translated};
pub use types::{
    ClassificationResult, DepartmentScoreboard, PipelineResult, SymptomPhrase, TriageStatus,
};
