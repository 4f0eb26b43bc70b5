//! Shared types, errors, and configuration for Tranzero.
//!
//! This crate provides common types used across all other crates:
//! - Currency handling and money formatting
//! - Typed IDs for type-safe entity references
//! - The caller context threaded through every mutation
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::RequestContext;
