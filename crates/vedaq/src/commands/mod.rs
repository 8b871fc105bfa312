//! CLI command implementations for vedaq

mod common;
mod explore;
mod rank;
mod serve;

pub use explore::explore;
pub use rank::rank;
pub use serve::serve;
