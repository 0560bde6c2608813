mod coupling;
mod density;
mod measure;
mod network;
mod support;

pub use coupling::*;
pub use density::*;
pub use measure::*;
pub use network::*;
pub use support::*;
