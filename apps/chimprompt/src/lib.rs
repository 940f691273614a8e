pub mod cli;
pub mod config;
pub mod conversion;
pub mod errors;
pub mod grammar;
pub mod llm_client;
