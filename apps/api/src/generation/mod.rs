// Message generation: labels, style tables, relationship classifier, prompt assembly,
// writer backends and the request pipelines.
// Model calls go through llm_client via GeminiWriter only.

pub mod generator;
pub mod handlers;
pub mod labels;
pub mod prompt_builder;
pub mod prompts;
pub mod relationship;
pub mod style;
pub mod templates;
pub mod tone;
pub mod writer;
