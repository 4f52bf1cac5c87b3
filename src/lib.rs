//! Library exports for gymtron, shared between the app shell and tests.

pub mod api;
pub mod client;
pub mod config;
pub mod credentials;
pub mod events;
pub mod models;
pub mod payments;
pub mod session;
pub mod state;
pub mod utils;
