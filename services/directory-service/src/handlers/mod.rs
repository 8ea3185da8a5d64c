// HTTP handlers for Directory Service
pub mod categories;
pub mod documents;
pub mod health;
pub mod lawyers;
pub mod search;
pub mod templates;
