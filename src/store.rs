pub use self::error::StoreError;
pub use self::memory::MemoryEventStore;
pub use self::traits::EventStore;

pub mod error;
pub mod memory;
pub mod traits;
