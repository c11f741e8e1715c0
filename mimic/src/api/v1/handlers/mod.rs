pub mod clone;
pub(crate) mod health;
pub mod profile;

pub use health::health_check;
