mod analysis;
mod post;
mod profile;

pub use analysis::*;
pub use post::*;
pub use profile::*;
