// file: src/prompts/mod.rs
// description: prompt builders for keyword extraction and answering
// reference: internal module structure

pub mod answer;
pub mod keyword;

pub use answer::AnswerPrompt;
pub use keyword::KeywordPrompt;
