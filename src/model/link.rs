//! IoLink — one directed link between two nodes.

use serde::Serialize;

use super::property_map::{self, PropertyMap};
use super::{LinkIndex, LinkType, NodeIndex};
use crate::sysfs::{properties, TopologyPaths};
use crate::{Error, Result};

/// A validated link descriptor.
///
/// Only [`IoLink::initialize`] and [`IoLink::from_properties`] build one, and
/// both fail unless `type`, `node_from`, `node_to` and `weight` are present.
/// The record is a snapshot of boot-time hardware state and is never re-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IoLink {
    node_index: NodeIndex,
    link_index: LinkIndex,
    link_type: u64,
    node_from: NodeIndex,
    node_to: NodeIndex,
    weight: u64,
    properties: PropertyMap,
}

impl IoLink {
    /// Read and validate the descriptor at `(node, link)`.
    pub fn initialize(paths: &TopologyPaths, node: NodeIndex, link: LinkIndex) -> Result<Self> {
        let file = paths.properties_file(node, link);
        let lines = properties::read_descriptor_lines(&file)?;
        let props = properties::parse_properties(&file, &lines)?;

        let io_link = Self::from_properties(node, link, props)?;
        tracing::trace!(
            node = %node,
            link = %link,
            from = %io_link.node_from,
            to = %io_link.node_to,
            "loaded io link"
        );
        Ok(io_link)
    }

    /// Validate an already parsed property map.
    pub fn from_properties(
        node_index: NodeIndex,
        link_index: LinkIndex,
        properties: PropertyMap,
    ) -> Result<Self> {
        let link_type = required(&properties, property_map::TYPE)?;
        let node_from = endpoint(&properties, property_map::NODE_FROM)?;
        let node_to = endpoint(&properties, property_map::NODE_TO)?;
        let weight = required(&properties, property_map::WEIGHT)?;

        Ok(Self {
            node_index,
            link_index,
            link_type,
            node_from,
            node_to,
            weight,
            properties,
        })
    }

    /// Look up any property the descriptor reported.
    pub fn get_property_value(&self, key: &str) -> Result<u64> {
        required(&self.properties, key)
    }

    /// Like [`get_property_value`](Self::get_property_value), but absence is not an error.
    pub fn property(&self, key: &str) -> Option<u64> {
        self.properties.get(key).copied()
    }

    /// Node whose `io_links` directory held this descriptor.
    pub fn node_index(&self) -> NodeIndex {
        self.node_index
    }

    /// Position of this descriptor within its node's `io_links`.
    pub fn link_index(&self) -> LinkIndex {
        self.link_index
    }

    /// Raw `type` value (hardware link class).
    pub fn link_type(&self) -> u64 {
        self.link_type
    }

    /// Origin node of the link.
    pub fn node_from(&self) -> NodeIndex {
        self.node_from
    }

    /// Destination node of the link.
    pub fn node_to(&self) -> NodeIndex {
        self.node_to
    }

    /// Relative cost of the link; lower is closer.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Every property the descriptor reported, required ones included.
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// The `type` value as a link class.
    pub fn kind(&self) -> LinkType {
        LinkType::from_raw(self.link_type)
    }

    // ========================================================================
    // Optional hardware properties
    // ========================================================================

    /// `(version_major, version_minor)`, if both are reported.
    pub fn version(&self) -> Option<(u64, u64)> {
        Some((
            self.property(property_map::VERSION_MAJOR)?,
            self.property(property_map::VERSION_MINOR)?,
        ))
    }

    pub fn min_latency(&self) -> Option<u64> {
        self.property(property_map::MIN_LATENCY)
    }

    pub fn max_latency(&self) -> Option<u64> {
        self.property(property_map::MAX_LATENCY)
    }

    pub fn min_bandwidth(&self) -> Option<u64> {
        self.property(property_map::MIN_BANDWIDTH)
    }

    pub fn max_bandwidth(&self) -> Option<u64> {
        self.property(property_map::MAX_BANDWIDTH)
    }

    pub fn flags(&self) -> Option<u64> {
        self.property(property_map::FLAGS)
    }

    pub fn recommended_transfer_size(&self) -> Option<u64> {
        self.property(property_map::RECOMMENDED_TRANSFER_SIZE)
    }
}

fn required(properties: &PropertyMap, key: &str) -> Result<u64> {
    properties
        .get(key)
        .copied()
        .ok_or_else(|| Error::MissingField { key: key.to_string() })
}

fn endpoint(properties: &PropertyMap, key: &str) -> Result<NodeIndex> {
    let value = required(properties, key)?;
    u32::try_from(value)
        .map(NodeIndex)
        .map_err(|_| Error::FieldOutOfRange { key: key.to_string(), value })
}
