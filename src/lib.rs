//! Library exports for benchboard, shared between the binary and tests.

pub mod api;
pub mod config;
pub mod models;
pub mod routes;
pub mod session;
pub mod utils;
