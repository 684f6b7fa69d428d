// Library for the binary and the integration tests

pub mod catalog;
pub mod cluster_source;
pub mod config;
pub mod engine;
pub mod models;
pub mod routes;
pub mod version;
