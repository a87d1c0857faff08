pub mod language;
pub mod speech;
pub mod triage;
