pub mod auth;
pub mod category;
pub mod config;
pub mod error;
pub mod geo;
pub mod pagination;
pub mod report;
pub mod tracing;
pub mod transaction;
pub mod user;
