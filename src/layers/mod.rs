//! Layer Model Module
//!
//! The typed tree persisted in `.vik` files:
//! - Kinds and their static parameter tables
//! - Parameter types and values
//! - Nodes, with the capability seam for kind-specific data blocks

mod kind;
mod node;
mod params;

pub use kind::{Containment, LayerKind};
pub use node::{
    DataBlockOutcome, DefaultFactory, LayerBehavior, LayerFactory, LayerNode, LayerSummary,
    NoDataBlock, ParamEntry, RawDataBlock, GPS_CHILD_NAMES,
};
pub use params::{
    find_by_id, find_by_key, ParamDefault, ParamDescriptor, ParamId, ParamType, ParamValue, Rgb,
};
