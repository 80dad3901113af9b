//! EcoRoute CLI - client helpers for the route API.

pub mod client;

pub use client::{format_route, RouteClient};
