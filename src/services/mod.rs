pub mod llm;
pub mod store;
