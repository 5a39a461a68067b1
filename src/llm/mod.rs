pub mod classifier;
pub mod gemini;
pub mod heuristics;
pub mod parser;
pub mod prompts;
pub mod provider;

pub use classifier::Classifier;
pub use gemini::GeminiProvider;
pub use provider::Summarizer;
