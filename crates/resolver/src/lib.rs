//! Code Resolution Pipeline
//!
//! Given a raw user-entered code string and optional vehicle context,
//! produces a normalized diagnostic record or a typed fallback record,
//! consulting the session cache before the external knowledge source and
//! persisting successful external lookups back into the cache plus a
//! bounded recent-history list.

mod pipeline;
mod store;

pub use pipeline::{Resolver, ResolverConfig};
pub use store::{HistoryEntry, SessionStore, HISTORY_CAPACITY};
