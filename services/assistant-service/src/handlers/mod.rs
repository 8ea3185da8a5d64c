// HTTP handlers for Assistant Service
pub mod chat;
pub mod health;
pub mod languages;
pub mod tts;
