mod common;
mod frame;
mod ops;

#[cfg(feature = "bench")]
pub mod bench;
pub mod prelude;

pub use prelude::*;
