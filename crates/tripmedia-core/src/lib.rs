//! Tripmedia Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! upload restriction policy shared across the tripmedia components.

pub mod config;
pub mod error;
pub mod models;
pub mod restrictions;

// Re-export commonly used types
pub use config::HandshakeConfig;
pub use error::AppError;
pub use models::{
    Theme, TripId, UploadAuthorizationRequest, UploadCompletion, UploadDescriptor, UploadFile,
    UploadMeta, UploadMethod,
};
pub use restrictions::UploadRestrictions;
