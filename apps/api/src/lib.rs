pub mod config;
pub mod document;
pub mod errors;
pub mod llm_client;
pub mod report;
pub mod routes;
pub mod scores;
pub mod search;
pub mod session;
pub mod state;
pub mod stt;
pub mod tts;
