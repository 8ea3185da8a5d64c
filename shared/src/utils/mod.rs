pub mod auth_middleware;
pub mod env;
pub mod http_client;
pub mod http_layers;
pub mod jwt;
pub mod rate_limit;
pub mod token_extraction;
pub mod validation;
