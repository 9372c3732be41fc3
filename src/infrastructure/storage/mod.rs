//! Key-value storage traits and implementations

mod file;
mod memory;
mod traits;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
pub use traits::KeyValueStore;
