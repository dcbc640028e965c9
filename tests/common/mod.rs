//! Synthetic topology trees for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use kfd_topology::{Topology, TopologyConfig};
use tempfile::TempDir;

/// A throwaway `nodes/` tree on disk.
pub struct FakeTopology {
    dir: TempDir,
}

impl FakeTopology {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn topology(&self) -> Topology {
        Topology::new(&TopologyConfig::with_root(self.root()))
    }

    pub fn io_links_dir(&self, node: u32) -> PathBuf {
        self.root().join(node.to_string()).join("io_links")
    }

    /// Node directory with an empty `io_links`.
    pub fn node(&self, node: u32) -> &Self {
        fs::create_dir_all(self.io_links_dir(node)).unwrap();
        self
    }

    /// Link descriptor with raw file contents.
    pub fn link_raw(&self, node: u32, link: u32, contents: &str) -> &Self {
        let dir = self.io_links_dir(node).join(link.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("properties"), contents).unwrap();
        self
    }

    /// Well-formed link descriptor.
    pub fn link(&self, node: u32, link: u32, ty: u64, to: u32, weight: u64) -> &Self {
        self.link_raw(node, link, &descriptor(ty, node, to, weight))
    }

    /// Arbitrary directory relative to the root.
    pub fn junk_dir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.root().join(rel)).unwrap();
        self
    }

    /// Arbitrary file relative to the root.
    pub fn junk_file(&self, rel: &str) -> &Self {
        let path = self.root().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "junk\n").unwrap();
        self
    }
}

/// Descriptor text in the order the driver writes it.
pub fn descriptor(ty: u64, from: u32, to: u32, weight: u64) -> String {
    format!(
        "type {ty}\n\
         version_major 0\n\
         version_minor 0\n\
         node_from {from}\n\
         node_to {to}\n\
         weight {weight}\n\
         min_latency 0\n\
         max_latency 0\n\
         min_bandwidth 312\n\
         max_bandwidth 64000\n\
         recommended_transfer_size 0\n\
         flags 1\n"
    )
}
