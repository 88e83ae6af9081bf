//! Persistent, content-addressed embedding cache.
//!
//! Maps normalized text ([`CacheKey`]) to its embedding vector. The whole map lives in
//! memory and is rewritten to a single JSON file on every [`EmbeddingCache::put`]
//! (write-through), so a crash after a successful provider call never loses that vector.
//!
//! Entries are never evicted.

pub mod error;
pub mod key;
pub mod store;


pub use error::{CacheError, CacheResult};
pub use key::CacheKey;
pub use store::EmbeddingCache;
