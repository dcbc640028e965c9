//! Hardware link class carried in a descriptor's `type` property.

use serde::{Deserialize, Serialize};

/// Typed view of the raw `type` value (CRAT io-link classes).
///
/// The raw integer stays authoritative on [`super::IoLink`]; this is a
/// convenience for callers that want to match on the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    Undefined,
    HyperTransport,
    PciExpress,
    Amba,
    Mipi,
    Qpi11,
    RapidIo,
    InfiniBand,
    Xgmi,
    Xgop,
    Gz,
    EthernetRdma,
    RdmaOther,
    Other,
    /// Reserved or not yet known value.
    Unknown(u64),
}

impl LinkType {
    pub fn from_raw(raw: u64) -> Self {
        match raw {
            0 => LinkType::Undefined,
            1 => LinkType::HyperTransport,
            2 => LinkType::PciExpress,
            3 => LinkType::Amba,
            4 => LinkType::Mipi,
            5 => LinkType::Qpi11,
            8 => LinkType::RapidIo,
            9 => LinkType::InfiniBand,
            11 => LinkType::Xgmi,
            12 => LinkType::Xgop,
            13 => LinkType::Gz,
            14 => LinkType::EthernetRdma,
            15 => LinkType::RdmaOther,
            16 => LinkType::Other,
            other => LinkType::Unknown(other),
        }
    }

    pub fn as_raw(&self) -> u64 {
        match self {
            LinkType::Undefined => 0,
            LinkType::HyperTransport => 1,
            LinkType::PciExpress => 2,
            LinkType::Amba => 3,
            LinkType::Mipi => 4,
            LinkType::Qpi11 => 5,
            LinkType::RapidIo => 8,
            LinkType::InfiniBand => 9,
            LinkType::Xgmi => 11,
            LinkType::Xgop => 12,
            LinkType::Gz => 13,
            LinkType::EthernetRdma => 14,
            LinkType::RdmaOther => 15,
            LinkType::Other => 16,
            LinkType::Unknown(raw) => *raw,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LinkType::Undefined => "UNDEFINED",
            LinkType::HyperTransport => "HYPERTRANSPORT",
            LinkType::PciExpress => "PCIE",
            LinkType::Amba => "AMBA",
            LinkType::Mipi => "MIPI",
            LinkType::Qpi11 => "QPI_1_1",
            LinkType::RapidIo => "RAPID_IO",
            LinkType::InfiniBand => "INFINIBAND",
            LinkType::Xgmi => "XGMI",
            LinkType::Xgop => "XGOP",
            LinkType::Gz => "GZ",
            LinkType::EthernetRdma => "ETHERNET_RDMA",
            LinkType::RdmaOther => "RDMA_OTHER",
            LinkType::Other => "OTHER",
            LinkType::Unknown(_) => "UNKNOWN",
        }
    }
}

impl From<u64> for LinkType {
    fn from(raw: u64) -> Self {
        LinkType::from_raw(raw)
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::Unknown(raw) => write!(f, "UNKNOWN({raw})"),
            known => f.write_str(known.name()),
        }
    }
}
