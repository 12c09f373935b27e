//! Core data model: profiles, properties, media and the feature bag

mod features;
mod profile;
mod property;

pub use features::*;
pub use profile::*;
pub use property::*;
