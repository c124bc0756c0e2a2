mod error;
mod traits;

pub mod filesystem;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
#[cfg(feature = "redis")]
pub mod redis;

pub use error::StoreError;
pub use traits::{BackendKind, HackathonStore};
