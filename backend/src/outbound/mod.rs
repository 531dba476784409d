//! Outbound adapters implementing the driven ports.

mod memory;

pub use memory::InMemoryStudyStore;
