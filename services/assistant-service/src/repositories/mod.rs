// Repository modules for Assistant Service
pub mod chat_repo;

pub use chat_repo::*;
