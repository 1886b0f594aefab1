//! Disk persistence for the vector store.
//!
//! The store round-trips through two logically coupled artifacts:
//!
//! - the **index artifact**: a binary file holding the raw vector data, and
//! - the **metadata artifact**: a JSON file holding the identifier list.
//!
//! The pair is only meaningful together; the codec refuses to load one half
//! that disagrees with the other and falls back to an empty store instead.
//! Availability over durability: on any corruption the service starts over
//! rather than failing startup.

pub mod codec;
pub mod error;

pub use codec::{IndexCodec, LoadOutcome};
pub use error::{PersistenceError, PersistenceResult};
