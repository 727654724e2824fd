//! Upload-to-document pipeline: extract, generate, write.

pub mod extract;
pub mod generate;
pub mod llm;
pub mod writer;

pub use extract::extract_text;
pub use generate::generate_sections;
pub use llm::{ChatClient, LlmError, SamplingParams, TextCompleter, install_crypto_provider};
pub use writer::write_docx;
