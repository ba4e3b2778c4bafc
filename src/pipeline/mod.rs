pub mod orchestrator;
pub mod publish;
pub mod render;
pub mod retrieve;

pub use orchestrator::generate_report;
