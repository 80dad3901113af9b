//! Shared library surface for the EcoRoute server and its tests.

pub mod api;
pub mod config;
pub mod health_advisor;
pub mod route_finder;
pub mod state;
