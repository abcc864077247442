//! Request routing subsystem.
//!
//! Holds the ordered prefix table built from config at startup. The table
//! is the only shared state in the proxy and never changes after
//! construction, so it is shared via `Arc` with no locking.

pub mod table;

pub use table::{PrefixTable, ResolvedTarget, RouteEntry};
