// Shared library for VidhiSahayak services: legal knowledge base, auth, db and http helpers
pub mod db;
pub mod legal;
pub mod models;
pub mod utils;
