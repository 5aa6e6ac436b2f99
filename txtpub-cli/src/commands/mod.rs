//! CLI command implementations

mod batch;
mod convert;
mod inspect;

pub use batch::batch;
pub use convert::convert;
pub use inspect::inspect;
