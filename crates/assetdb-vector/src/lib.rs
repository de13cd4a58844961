//! `CandidateStore` implementations.
//!
//! Two interchangeable variants, selected by deployment configuration:
//! an in-memory vector table scanned in full per query, and a LanceDB
//! table that delegates ranking and hard filtering to the store's native
//! ANN search with predicate pushdown.

pub mod memory;
pub mod schema;
pub mod store;
pub mod writer;

pub use memory::MemoryStore;
pub use store::LanceStore;
pub use writer::LanceWriter;
