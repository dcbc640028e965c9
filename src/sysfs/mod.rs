//! # Sysfs Topology Source
//!
//! Everything that touches the filesystem lives here:
//!
//! | Module | Role |
//! |--------|------|
//! | (this) | `TopologyConfig` and the pure `TopologyPaths` resolver |
//! | `dir` | numeric directory enumeration with explicit handle close |
//! | `properties` | descriptor reading and `key value` parsing |
//!
//! The tree is read-only and reflects hardware state fixed at boot, so
//! nothing here caches, locks or retries.

pub mod dir;
pub mod properties;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{LinkIndex, NodeIndex};

/// Where the kernel publishes KFD topology nodes.
pub const KFD_NODES_ROOT: &str = "/sys/class/kfd/kfd/topology/nodes";

/// Per-node subdirectory holding link directories.
pub const IO_LINKS_DIR: &str = "io_links";

/// Descriptor file inside each link directory.
pub const PROPERTIES_FILE: &str = "properties";

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for locating the topology tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Directory whose numeric entries are node directories.
    pub root: PathBuf,
}

impl TopologyConfig {
    /// Point discovery at an arbitrary tree (a synthetic one in tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self::with_root(KFD_NODES_ROOT)
    }
}

// ============================================================================
// Path resolution
// ============================================================================

/// Builds tree locations from node/link indices. Never checks existence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyPaths {
    root: PathBuf,
}

impl TopologyPaths {
    pub fn new(config: &TopologyConfig) -> Self {
        Self { root: config.root.clone() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<node>/io_links`
    pub fn io_links_dir(&self, node: NodeIndex) -> PathBuf {
        self.root.join(node.0.to_string()).join(IO_LINKS_DIR)
    }

    /// `<root>/<node>/io_links/<link>`
    pub fn io_link_dir(&self, node: NodeIndex, link: LinkIndex) -> PathBuf {
        self.io_links_dir(node).join(link.0.to_string())
    }

    /// `<root>/<node>/io_links/<link>/properties`
    pub fn properties_file(&self, node: NodeIndex, link: LinkIndex) -> PathBuf {
        self.io_link_dir(node, link).join(PROPERTIES_FILE)
    }
}
