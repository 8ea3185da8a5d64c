// Domain models for Assistant Service
pub mod chat;
pub mod tts;

pub use chat::*;
pub use tts::*;
