//! Configuration management for pdfreflow
//!
//! Two pieces:
//! - **profile**: the `Profile` data model (named margin fractions + layout flags)
//! - **store**: the persisted `Config` and the `ProfileStore` that owns it

pub mod profile;
pub mod store;

pub use profile::Profile;
pub use store::{Config, ProfileStore, Value};
