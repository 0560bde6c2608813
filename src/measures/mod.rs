//! Primitive distances between repertoires of matching shape.
//!
//! Every function here is pure. None of them check shapes;
//! that is left to the dispatchers in [`crate::dispatch`].
pub mod divergence;
pub use divergence::*;

pub mod emd;
pub use emd::*;

pub mod l1;
pub use l1::*;

pub mod quadratic;
pub use quadratic::*;
