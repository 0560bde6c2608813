//! Measure registry and the dispatch surface.
//!
//! Callers hand over a [`Config`] on every call and never need to know
//! which primitive in [`crate::measures`] ends up doing the work.
pub mod config;
pub use config::*;

pub mod direction;
pub use direction::*;

pub mod measure;
pub use measure::*;

pub mod phi;
pub use phi::*;

pub mod validate;
