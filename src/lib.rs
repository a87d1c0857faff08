pub mod api; // HTTP surface over the triage service
pub mod config;
pub mod knowledge; // Keyword and label tables loaded from JSON
pub mod pipeline;
pub mod service;

pub use knowledge::{KnowledgeBase, KnowledgeError};
pub use pipeline::triage::{classify, PipelineResult, TriageStatus};
pub use service::TriageService;
