mod error;
pub mod http;
mod llm;
pub mod media;
mod pipeline;
pub mod stt;
pub mod tracing;
mod workspace;

pub use error::PipelineError;
pub use llm::gemini;
pub use llm::summarizer::{Summarizer, SummaryResponse};
pub use pipeline::{builder::SummaryPipelineBuilder, SummaryPipeline};
pub use stt::{TranscribeResponse, Transcriber};
pub use workspace::RequestWorkspace;
