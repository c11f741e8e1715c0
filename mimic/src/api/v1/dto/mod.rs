//! v1 API Data Transfer Objects.
//!
//! These types define the wire format for the v1 REST API. They are kept
//! separate from the internal domain models in `src/models/`.

pub mod clone;
pub mod profile;

pub use clone::*;
pub use profile::*;
