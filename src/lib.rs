//! Gatekit - web application security toolkit
//!
//! CSRF token issuance and verification, security response headers and
//! favicon generation for web applications.
//! This library exposes modules for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod favicon;
pub mod security;
pub mod server;
