//! PropertyMap — the raw key/value content of one link descriptor.

use std::collections::BTreeMap;

/// Property names mapped to their unsigned values, ordered by name.
pub type PropertyMap = BTreeMap<String, u64>;

// Required keys
pub const TYPE: &str = "type";
pub const NODE_FROM: &str = "node_from";
pub const NODE_TO: &str = "node_to";
pub const WEIGHT: &str = "weight";

// Optional keys reported by the driver, kept uninterpreted
pub const VERSION_MAJOR: &str = "version_major";
pub const VERSION_MINOR: &str = "version_minor";
pub const MIN_LATENCY: &str = "min_latency";
pub const MAX_LATENCY: &str = "max_latency";
pub const MIN_BANDWIDTH: &str = "min_bandwidth";
pub const MAX_BANDWIDTH: &str = "max_bandwidth";
pub const RECOMMENDED_TRANSFER_SIZE: &str = "recommended_transfer_size";
pub const FLAGS: &str = "flags";
