pub mod api;
pub mod config;
pub mod data_models;
pub mod error;
pub mod gemini;
pub mod orchestrator;
pub mod prompts;
pub mod session;
pub mod view;
