pub mod exam_exporter;
pub mod exam_parser;
pub mod llm_service;
pub mod prompt_builder;
pub mod text_extractor;

pub use exam_exporter::ExamExporter;
pub use exam_parser::parse;
pub use llm_service::{FileAttachment, LlmService};
pub use prompt_builder::build_prompt;
pub use text_extractor::TextExtractor;
