//! # Link Discovery
//!
//! Two traversals over the tree:
//!
//! ```text
//! discover_io_links:           <root>/*/io_links/*  → LinkMap     keyed (node_from, node_to)
//! discover_io_links_per_node:  <root>/N/io_links/*  → NodeLinkMap keyed node_to
//! ```
//!
//! Both require an empty output map, build into a local map, and only hand
//! it over once every link loaded. Any failure aborts the traversal and
//! leaves the caller's map untouched.

use std::collections::BTreeMap;

use crate::model::{IoLink, LinkIndex, NodeIndex};
use crate::sysfs::{dir, TopologyPaths};
use crate::{Error, Result};

/// Every discovered link, keyed by `(node_from, node_to)`.
pub type LinkMap = BTreeMap<(NodeIndex, NodeIndex), IoLink>;

/// One node's links, keyed by `node_to`.
pub type NodeLinkMap = BTreeMap<NodeIndex, IoLink>;

/// Discover all links of all nodes under the root.
///
/// A duplicate `(node_from, node_to)` pair keeps the last link read.
pub fn discover_io_links(paths: &TopologyPaths, links: &mut LinkMap) -> Result<()> {
    ensure_empty(links.len())?;

    let mut found = LinkMap::new();
    for node in dir::numeric_entries(paths.root())? {
        let node = NodeIndex(node);
        for link in load_node_links(paths, node)? {
            if let Some(prev) = found.insert((link.node_from(), link.node_to()), link) {
                tracing::debug!(
                    from = %prev.node_from(),
                    to = %prev.node_to(),
                    "duplicate io link replaced"
                );
            }
        }
    }

    tracing::debug!(root = %paths.root().display(), links = found.len(), "discovered io links");
    *links = found;
    Ok(())
}

/// Discover the links of a single node.
///
/// A node without an `io_links` directory is an error, not an empty map.
pub fn discover_io_links_per_node(
    paths: &TopologyPaths,
    node: NodeIndex,
    links: &mut NodeLinkMap,
) -> Result<()> {
    ensure_empty(links.len())?;

    let mut found = NodeLinkMap::new();
    for link in load_node_links(paths, node)? {
        found.insert(link.node_to(), link);
    }

    tracing::debug!(node = %node, links = found.len(), "discovered node io links");
    *links = found;
    Ok(())
}

/// Load every numeric link under `<root>/<node>/io_links`, in index order.
fn load_node_links(paths: &TopologyPaths, node: NodeIndex) -> Result<Vec<IoLink>> {
    dir::numeric_entries(&paths.io_links_dir(node))?
        .into_iter()
        .map(|link| IoLink::initialize(paths, node, LinkIndex(link)))
        .collect()
}

fn ensure_empty(len: usize) -> Result<()> {
    if len != 0 {
        return Err(Error::InvalidArgument(format!(
            "link map must be empty, found {len} entries"
        )));
    }
    Ok(())
}
