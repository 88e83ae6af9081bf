//! Job listings and resume input.

pub mod error;
mod record;
mod source;


pub use error::{CorpusError, CorpusResult};
pub use record::JobRecord;
pub use source::{CorpusSource, FileCorpus, InMemoryCorpus};
