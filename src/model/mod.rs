//! # IO-Link Model
//!
//! DTOs for the discovered topology: node/link coordinates, the raw
//! property map, and the validated [`IoLink`] record.
//!
//! Design rule: the model never touches paths directly. Reading goes
//! through `crate::sysfs`.

pub mod node;
pub mod link;
pub mod link_type;
pub mod property_map;

pub use node::{NodeIndex, LinkIndex};
pub use link::IoLink;
pub use link_type::LinkType;
pub use property_map::PropertyMap;
