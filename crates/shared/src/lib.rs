//! Shared types, errors, and configuration for Atrium.
//!
//! This crate provides common types used across all other crates:
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - JWT claims and token services
//! - Configuration management
//! - Transactional email delivery

pub mod auth;
pub mod config;
pub mod email;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use email::EmailService;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
