pub mod distribution;
pub use distribution::*;

pub mod parse;
pub use parse::*;

pub mod states;
pub use states::*;
