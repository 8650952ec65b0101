//! Device-local key-value storage

pub mod file_store;
pub mod memory;

pub use file_store::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
