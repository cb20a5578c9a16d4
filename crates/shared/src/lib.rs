//! Shared configuration and error types for Agora.
//!
//! This crate provides what every other crate needs:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::AppError;
