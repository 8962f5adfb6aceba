//! Layer nodes and the per-kind capability seam
//!
//! A [`LayerNode`] carries the parts of a layer the file format understands
//! (kind, name, visibility, parameters, children). Everything kind-specific
//! that the format treats as opaque lives behind [`LayerBehavior`].

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use super::kind::{Containment, LayerKind};
use super::params::{self, ParamDescriptor, ParamId, ParamValue};
use crate::error::{Result, VikError};
use crate::format::lines::LineSource;
use crate::format::END_LAYER_DATA;

/// Names of the children every GPS layer is created with.
pub const GPS_CHILD_NAMES: [&str; 3] = ["GPS Download", "GPS Upload", "GPS Realtime Tracking"];

/// Result of handing a `~LayerData` block to a layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataBlockOutcome {
    /// Block consumed up to and including `~EndLayerData`.
    Success,
    /// Block consumed (as far as possible) but its content was bad.
    Error(String),
    /// The layer has no data-block format and consumed nothing.
    Unrecognized,
}

/// Kind-specific behavior the file format delegates to.
///
/// `read_data_block` is called right after the `~LayerData` line. When it
/// returns `Unrecognized` it must not have consumed any line.
pub trait LayerBehavior: fmt::Debug + Send {
    /// Whether the writer should emit a `~LayerData` block for this layer.
    fn has_data_block(&self) -> bool {
        false
    }

    fn read_data_block(
        &mut self,
        _lines: &mut dyn LineSource,
        _dir: Option<&Path>,
    ) -> io::Result<DataBlockOutcome> {
        Ok(DataBlockOutcome::Unrecognized)
    }

    /// Write the block body. The surrounding markers are written by the caller.
    fn write_data_block(&self, _out: &mut dyn Write, _dir: Option<&Path>) -> io::Result<()> {
        Ok(())
    }

    /// Called once a layer read from a file has been attached to an
    /// aggregate parent.
    fn post_read(&mut self, _params: &[ParamValue]) {}

    /// Clone the behavior into a boxed trait object
    fn box_clone(&self) -> Box<dyn LayerBehavior>;
}

impl Clone for Box<dyn LayerBehavior> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Behavior of kinds with no data block.
#[derive(Debug, Clone, Default)]
pub struct NoDataBlock;

impl LayerBehavior for NoDataBlock {
    fn box_clone(&self) -> Box<dyn LayerBehavior> {
        Box::new(self.clone())
    }
}

/// Keeps the data block as raw lines and writes them back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDataBlock {
    pub lines: Vec<String>,
}

impl LayerBehavior for RawDataBlock {
    fn has_data_block(&self) -> bool {
        true
    }

    fn read_data_block(
        &mut self,
        lines: &mut dyn LineSource,
        _dir: Option<&Path>,
    ) -> io::Result<DataBlockOutcome> {
        self.lines.clear();
        while let Some(line) = lines.next_line()? {
            if line.trim_end() == END_LAYER_DATA {
                return Ok(DataBlockOutcome::Success);
            }
            self.lines.push(line);
        }
        Ok(DataBlockOutcome::Error(
            "data block not terminated by ~EndLayerData".to_string(),
        ))
    }

    fn write_data_block(&self, out: &mut dyn Write, _dir: Option<&Path>) -> io::Result<()> {
        for line in &self.lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn LayerBehavior> {
        Box::new(self.clone())
    }
}

fn default_behavior(kind: LayerKind) -> Box<dyn LayerBehavior> {
    match kind {
        LayerKind::Trw => Box::new(RawDataBlock::default()),
        _ => Box::new(NoDataBlock),
    }
}

/// One element of the persisted layer tree.
#[derive(Debug, Clone)]
pub struct LayerNode {
    kind: LayerKind,
    name: String,
    visible: bool,
    params: Vec<ParamValue>,
    children: Vec<LayerNode>,
    behavior: Box<dyn LayerBehavior>,
    /// Next pre-built child to hand out while reading.
    prebuilt_cursor: usize,
}

impl LayerNode {
    /// Create a layer with default parameters and the kind's default behavior.
    pub fn new(kind: LayerKind) -> Self {
        Self::with_behavior(kind, default_behavior(kind))
    }

    /// Create a layer with default parameters and a custom behavior.
    pub fn with_behavior(kind: LayerKind, behavior: Box<dyn LayerBehavior>) -> Self {
        let children = match kind.containment() {
            Some(Containment::Prebuilt) => GPS_CHILD_NAMES
                .iter()
                .map(|name| {
                    let mut child = LayerNode::new(LayerKind::Trw);
                    child.set_name(*name);
                    child
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            kind,
            name: kind.wire_name().to_string(),
            visible: true,
            params: kind.descriptors().iter().map(|d| d.default.value()).collect(),
            children,
            behavior,
            prebuilt_cursor: 0,
        }
    }

    /// Builder-style rename
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the parameter table without type checks.
    #[cfg(test)]
    pub(crate) fn with_unchecked_params(mut self, params: Vec<ParamValue>) -> Self {
        self.params = params;
        self
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn descriptors(&self) -> &'static [ParamDescriptor] {
        self.kind.descriptors()
    }

    /// Current parameter values, in descriptor order.
    pub fn params(&self) -> &[ParamValue] {
        &self.params
    }

    pub fn param(&self, id: ParamId) -> Option<&ParamValue> {
        self.params.get(id as usize)
    }

    pub fn param_by_name(&self, name: &str) -> Option<&ParamValue> {
        params::find_by_key(self.descriptors(), name).and_then(|d| self.param(d.id))
    }

    /// Set a parameter. The value must have the descriptor's declared type.
    pub fn set_param(&mut self, id: ParamId, value: ParamValue) -> Result<()> {
        let desc = params::find_by_id(self.descriptors(), id).ok_or(VikError::UnknownParam {
            kind: self.kind,
            id,
        })?;
        if value.param_type() != desc.param_type {
            return Err(VikError::ParamTypeMismatch {
                kind: self.kind,
                name: desc.name,
                expected: desc.param_type,
                found: value.param_type(),
            });
        }
        self.params[id as usize] = value;
        Ok(())
    }

    pub fn children(&self) -> &[LayerNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [LayerNode] {
        &mut self.children
    }

    /// Append a child to a container that constructs its children.
    pub fn add_child(&mut self, child: LayerNode) -> Result<()> {
        match self.kind.containment() {
            Some(Containment::Construct) => {
                self.children.push(child);
                Ok(())
            }
            _ => Err(VikError::NotAContainer { kind: self.kind }),
        }
    }

    /// Take the next pre-built child out of the node, with the slot it came from.
    ///
    /// The child must be given back with [`LayerNode::restore_child`] before the
    /// next one is taken.
    pub fn take_prebuilt_child(&mut self) -> Option<(usize, LayerNode)> {
        if self.kind.containment() != Some(Containment::Prebuilt) {
            return None;
        }
        let slot = self.prebuilt_cursor;
        if slot >= self.children.len() {
            return None;
        }
        Some((slot, self.children.remove(slot)))
    }

    /// Put a child taken with [`LayerNode::take_prebuilt_child`] back in its slot.
    pub fn restore_child(&mut self, slot: usize, child: LayerNode) {
        let slot = slot.min(self.children.len());
        self.children.insert(slot, child);
        self.prebuilt_cursor = slot + 1;
    }

    /// Attach a child read from a file. Crate-internal: bypasses the
    /// containment check because the reader has already made it.
    pub(crate) fn attach_child(&mut self, child: LayerNode) {
        self.children.push(child);
    }

    pub fn behavior(&self) -> &dyn LayerBehavior {
        self.behavior.as_ref()
    }

    pub fn behavior_mut(&mut self) -> &mut dyn LayerBehavior {
        self.behavior.as_mut()
    }

    pub(crate) fn post_read(&mut self) {
        self.behavior.post_read(&self.params);
    }

    /// Total number of layers in this subtree, this one included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(LayerNode::count).sum::<usize>()
    }

    /// Serializable view of the subtree.
    pub fn summary(&self) -> LayerSummary {
        LayerSummary {
            kind: self.kind,
            name: self.name.clone(),
            visible: self.visible,
            params: self
                .descriptors()
                .iter()
                .zip(&self.params)
                .map(|(desc, value)| ParamEntry {
                    name: desc.name,
                    value: value.clone(),
                })
                .collect(),
            children: self.children.iter().map(LayerNode::summary).collect(),
        }
    }
}

/// Nodes compare equal when everything the file format stores matches.
/// Behaviors are not compared.
impl PartialEq for LayerNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.visible == other.visible
            && self.params == other.params
            && self.children == other.children
    }
}

/// Create layers while a file is read.
pub trait LayerFactory {
    fn kind_from_name(&self, name: &str) -> Option<LayerKind> {
        LayerKind::from_name(name)
    }

    fn construct_default(&self, kind: LayerKind) -> LayerNode {
        LayerNode::new(kind)
    }
}

/// Factory producing each kind's built-in behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFactory;

impl LayerFactory for DefaultFactory {}

/// Named parameter value in a [`LayerSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct ParamEntry {
    pub name: &'static str,
    pub value: ParamValue,
}

/// Serializable snapshot of a layer subtree.
#[derive(Debug, Clone, Serialize)]
pub struct LayerSummary {
    pub kind: LayerKind,
    pub name: String,
    pub visible: bool,
    pub params: Vec<ParamEntry>,
    pub children: Vec<LayerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::lines::LineReader;
    use crate::layers::params::Rgb;

    #[test]
    fn test_new_layer_uses_defaults() {
        let coord = LayerNode::new(LayerKind::Coord);
        assert_eq!(coord.name(), "Coord");
        assert!(coord.is_visible());
        assert_eq!(coord.params().len(), 3);
        assert_eq!(coord.param_by_name("min_inc"), Some(&ParamValue::Double(1.0)));
    }

    #[test]
    fn test_set_param_checks_type() {
        let mut coord = LayerNode::new(LayerKind::Coord);
        coord.set_param(2, ParamValue::Int(5)).unwrap();
        assert_eq!(coord.param(2), Some(&ParamValue::Int(5)));

        let err = coord.set_param(2, ParamValue::Double(5.0)).unwrap_err();
        assert!(matches!(err, VikError::ParamTypeMismatch { name: "line_thickness", .. }));

        let err = coord.set_param(9, ParamValue::Int(1)).unwrap_err();
        assert!(matches!(err, VikError::UnknownParam { id: 9, .. }));
    }

    #[test]
    fn test_add_child_only_on_aggregate() {
        let mut top = LayerNode::new(LayerKind::Aggregate);
        top.add_child(LayerNode::new(LayerKind::Trw)).unwrap();
        assert_eq!(top.children().len(), 1);

        let mut trw = LayerNode::new(LayerKind::Trw);
        assert!(trw.add_child(LayerNode::new(LayerKind::Map)).is_err());

        let mut gps = LayerNode::new(LayerKind::Gps);
        assert!(gps.add_child(LayerNode::new(LayerKind::Trw)).is_err());
    }

    #[test]
    fn test_gps_hands_out_prebuilt_children_in_order() {
        let mut gps = LayerNode::new(LayerKind::Gps);
        assert_eq!(gps.children().len(), 3);

        let (slot, child) = gps.take_prebuilt_child().unwrap();
        assert_eq!(slot, 0);
        assert_eq!(child.name(), "GPS Download");
        gps.restore_child(slot, child.named("Downloaded"));

        let (slot, child) = gps.take_prebuilt_child().unwrap();
        assert_eq!((slot, child.name()), (1, "GPS Upload"));
        gps.restore_child(slot, child);

        let (slot, child) = gps.take_prebuilt_child().unwrap();
        gps.restore_child(slot, child);
        assert!(gps.take_prebuilt_child().is_none());

        let names: Vec<_> = gps.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Downloaded", "GPS Upload", "GPS Realtime Tracking"]);
    }

    #[test]
    fn test_aggregate_has_no_prebuilt_children() {
        let mut top = LayerNode::new(LayerKind::Aggregate);
        top.add_child(LayerNode::new(LayerKind::Trw)).unwrap();
        assert!(top.take_prebuilt_child().is_none());
    }

    #[test]
    fn test_equality_ignores_behavior() {
        let mut a = LayerNode::new(LayerKind::Trw);
        let b = LayerNode::with_behavior(LayerKind::Trw, Box::new(NoDataBlock));
        assert_eq!(a, b);
        a.set_param(4, ParamValue::Color(Rgb::new(1, 2, 3))).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_raw_data_block_reads_to_terminator() {
        let input = "type=\"trackpoint\" latitude=\"1.0\"\n~EndLayerData\nname=after\n";
        let mut lines = LineReader::new(input.as_bytes());
        let mut block = RawDataBlock::default();

        let outcome = block.read_data_block(&mut lines, None).unwrap();
        assert_eq!(outcome, DataBlockOutcome::Success);
        assert_eq!(block.lines, ["type=\"trackpoint\" latitude=\"1.0\""]);
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("name=after"));
    }

    #[test]
    fn test_raw_data_block_reports_missing_terminator() {
        let mut lines = LineReader::new("a\nb\n".as_bytes());
        let mut block = RawDataBlock::default();
        let outcome = block.read_data_block(&mut lines, None).unwrap();
        assert!(matches!(outcome, DataBlockOutcome::Error(_)));
    }

    #[test]
    fn test_summary_names_params() {
        let summary = LayerNode::new(LayerKind::Dem).named("Hills").summary();
        assert_eq!(summary.name, "Hills");
        assert_eq!(summary.params[0].name, "files");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["kind"], "Dem");
        assert_eq!(json["params"][0]["value"]["type"], "StringList");
    }
}
