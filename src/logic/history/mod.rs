//! History Module - Append-only scan log
//!
//! - `types.rs` - ScanRecord, ScanStats
//! - `store.rs` - JSON array file, rewritten in full on every append

pub mod store;
pub mod types;


pub use store::ScanStore;
pub use types::{ScanRecord, ScanStats};
