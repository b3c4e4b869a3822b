//! Domain models shared across the tripmedia crates.

pub mod theme;
pub mod upload;

pub use theme::Theme;
pub use upload::{
    TripId, UploadAuthorizationRequest, UploadCompletion, UploadDescriptor, UploadFile, UploadMeta,
    UploadMethod,
};
