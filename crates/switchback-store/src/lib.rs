//! Persistence primitives: the key/value contract plus file helpers

mod error;
mod io;
mod kv;
mod paths;
mod value;

pub use error::{Result, StoreError};
pub use io::{append_jsonl, atomic_write, read_jsonl};
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use paths::{Paths, HOME_ENV};
pub use value::StoreValue;
