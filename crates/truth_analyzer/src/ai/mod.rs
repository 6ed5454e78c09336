mod client;
mod parse;
mod prompt;

pub use client::{ChatPrompt, OpenAiClient, TextGenerator};
pub use parse::{parse_analysis, AnalysisResult};
pub use prompt::build_analysis_prompt;
