// File: syncboard-common/src/models/mod.rs
pub mod integration;
pub mod status;

pub use integration::Integration;
pub use status::{DisplayStatus, LinkLabel, LinkTarget, SyncStatus};
