pub mod assembler;
pub mod orchestrator;

pub use assembler::assemble;
pub use orchestrator::SyncOrchestrator;
