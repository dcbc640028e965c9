//! # kfd-topology — IO-link discovery over the KFD sysfs tree
//!
//! Walks the read-only topology tree the kernel exposes for compute nodes
//! (`/sys/class/kfd/kfd/topology/nodes`) and turns every
//! `nodes/<n>/io_links/<l>/properties` descriptor into an [`IoLink`].
//!
//! ## Design Principles
//!
//! 1. **Filter generously, validate strictly**: odd directory entries are skipped,
//!    malformed descriptor content is an error
//! 2. **All or nothing**: discovery returns a complete link map or an error, never a partial map
//! 3. **Injected root**: the tree location is configuration, so tests run against synthetic trees
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kfd_topology::{LinkMap, Topology};
//!
//! # fn example() -> kfd_topology::Result<()> {
//! let topology = Topology::host();
//!
//! let mut links = LinkMap::new();
//! topology.discover_io_links(&mut links)?;
//!
//! for ((from, to), link) in &links {
//!     println!("{from} -> {to}: type {} weight {}", link.link_type(), link.weight());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Tree Layout
//!
//! | Path | Content |
//! |------|---------|
//! | `<root>/<node>` | one directory per node index |
//! | `<root>/<node>/io_links/<link>` | one directory per link index |
//! | `<root>/<node>/io_links/<link>/properties` | `key value` lines |

use std::path::PathBuf;

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod sysfs;
pub mod discovery;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{IoLink, LinkIndex, LinkType, NodeIndex, PropertyMap};

// ============================================================================
// Re-exports: Sysfs + Discovery
// ============================================================================

pub use sysfs::{TopologyConfig, TopologyPaths};
pub use discovery::{LinkMap, NodeLinkMap};

// ============================================================================
// Top-level Topology handle
// ============================================================================

/// The primary entry point. A `Topology` wraps a resolved tree root and
/// runs discovery against it.
#[derive(Debug, Clone)]
pub struct Topology {
    paths: TopologyPaths,
}

impl Topology {
    /// Create a Topology from the given configuration.
    pub fn new(config: &TopologyConfig) -> Self {
        Self { paths: TopologyPaths::new(config) }
    }

    /// Topology rooted at the host's KFD tree.
    pub fn host() -> Self {
        Self::new(&TopologyConfig::default())
    }

    /// Discover every link of every node, keyed by `(node_from, node_to)`.
    ///
    /// `links` must be empty.
    pub fn discover_io_links(&self, links: &mut LinkMap) -> Result<()> {
        discovery::discover_io_links(&self.paths, links)
    }

    /// Discover the links of one node, keyed by `node_to`.
    ///
    /// `links` must be empty.
    pub fn discover_io_links_per_node(
        &self,
        node: NodeIndex,
        links: &mut NodeLinkMap,
    ) -> Result<()> {
        discovery::discover_io_links_per_node(&self.paths, node, links)
    }

    /// Node indices present under the root, ascending.
    pub fn node_indices(&self) -> Result<Vec<NodeIndex>> {
        Ok(sysfs::dir::numeric_entries(self.paths.root())?
            .into_iter()
            .map(NodeIndex)
            .collect())
    }

    /// Load a single link descriptor.
    pub fn io_link(&self, node: NodeIndex, link: LinkIndex) -> Result<IoLink> {
        IoLink::initialize(&self.paths, node, link)
    }

    /// Access the resolved paths (for advanced use).
    pub fn paths(&self) -> &TopologyPaths {
        &self.paths
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed descriptor {} at line {line}: {message}", path.display())]
    MalformedDescriptor {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Missing field '{key}'")]
    MissingField { key: String },

    #[error("Field '{key}' out of range: {value}")]
    FieldOutOfRange { key: String, value: u64 },

    #[error("Failed to close directory {}: {source}", path.display())]
    DirectoryClose {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
