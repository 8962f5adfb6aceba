//! Tag dispatcher: reads a `.vik` stream into a layer tree
//!
//! The reader is a line-at-a-time state machine over an explicit
//! [`LayerStack`]. The caller's root is the bottom frame. Every other frame
//! owns a node opened by `~Layer`; the node is linked into its parent when
//! the frame is closed, provided a `name=` line was seen for it (pre-built
//! children of a GPS layer are linked unconditionally).
//!
//! Structural problems are recorded in a [`StatusLog`] and reading carries on;
//! only I/O errors end a read early.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::mem;
use std::path::Path;

use super::codec;
use super::header::{read_header, HeaderInfo};
use super::lines::{LineReader, LineSource};
use super::stack::{LayerStack, Slot};
use super::status::{ErrorPolicy, ParseError, ParseErrorKind, ParseStatus, StatusLog};
use super::END_LAYER_DATA;
use crate::error::Result;
use crate::layers::{
    find_by_key, Containment, DataBlockOutcome, DefaultFactory, LayerFactory, LayerNode, ParamId,
    ParamType, ParamValue,
};
use crate::view::ViewState;

/// Reader configuration.
#[derive(Clone, Copy)]
pub struct ReadOptions<'a> {
    pub error_policy: ErrorPolicy,
    pub factory: &'a dyn LayerFactory,
    /// Directory of the file being read, for data blocks with relative paths.
    pub dir: Option<&'a Path>,
}

impl Default for ReadOptions<'static> {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            factory: &DefaultFactory,
            dir: None,
        }
    }
}

/// What a read produced besides the mutated tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    pub status: ParseStatus,
    /// Every error recorded, in file order.
    pub errors: Vec<ParseError>,
    pub header: HeaderInfo,
    /// Layers opened successfully, whether or not they ended up attached.
    pub layers_read: usize,
}

impl ReadOutcome {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Read a `.vik` stream into `root` with default options.
pub fn read_vik<R: BufRead>(
    input: R,
    root: &mut LayerNode,
    view: &mut dyn ViewState,
) -> Result<ReadOutcome> {
    read_vik_with(input, root, view, &ReadOptions::default())
}

/// Read a `.vik` stream into `root`.
///
/// The header updates `view`; the centre is applied only when both `lat` and
/// `lon` were valid. Layers are added below `root`, which is never replaced.
pub fn read_vik_with<R: BufRead>(
    input: R,
    root: &mut LayerNode,
    view: &mut dyn ViewState,
    options: &ReadOptions<'_>,
) -> Result<ReadOutcome> {
    let mut lines = LineReader::new(input);
    let mut status = StatusLog::new(options.error_policy);

    let header = read_header(&mut lines, root, view, &mut status)?;
    if let Some((lat, lon)) = header.center {
        view.set_center(lat, lon);
    }

    let mut cursor = ParseCursor::new(lines, root, status, options);
    cursor.run()?;

    let layers_read = cursor.layers_read;
    let (status, errors) = cursor.status.into_parts();
    Ok(ReadOutcome {
        status,
        errors,
        header,
        layers_read,
    })
}

/// How a frame's node is linked into its parent when the frame closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attach {
    /// No `name=` seen yet; the node is dropped if the frame closes now.
    Pending,
    Append,
    /// Pre-built child; goes back into the slot it was taken from.
    Slot(usize),
}

enum Frame<'a> {
    Root(&'a mut LayerNode),
    Opened { node: LayerNode, attach: Attach },
}

impl Frame<'_> {
    fn node(&self) -> &LayerNode {
        match self {
            Frame::Root(node) => node,
            Frame::Opened { node, .. } => node,
        }
    }

    fn node_mut(&mut self) -> &mut LayerNode {
        match self {
            Frame::Root(node) => node,
            Frame::Opened { node, .. } => node,
        }
    }

    fn mark_named(&mut self) {
        if let Frame::Opened { attach, .. } = self {
            if *attach == Attach::Pending {
                *attach = Attach::Append;
            }
        }
    }
}

/// Per-read state. Nothing is shared between cursors.
struct ParseCursor<'a, R> {
    lines: LineReader<R>,
    stack: LayerStack<Frame<'a>>,
    /// StringList values collected for the top layer, flushed when it closes.
    pending_lists: BTreeMap<ParamId, Vec<String>>,
    status: StatusLog,
    factory: &'a dyn LayerFactory,
    dir: Option<&'a Path>,
    layers_read: usize,
}

impl<'a, R: BufRead> ParseCursor<'a, R> {
    fn new(
        lines: LineReader<R>,
        root: &'a mut LayerNode,
        status: StatusLog,
        options: &ReadOptions<'a>,
    ) -> Self {
        let mut stack = LayerStack::new();
        stack.push(Frame::Root(root));
        Self {
            lines,
            stack,
            pending_lists: BTreeMap::new(),
            status,
            factory: options.factory,
            dir: options.dir,
            layers_read: 0,
        }
    }

    fn run(&mut self) -> Result<()> {
        while let Some(raw) = self.lines.next_line()? {
            let line = raw.trim_start_matches([' ', '\t']);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.strip_prefix('~') {
                Some(command) => self.tilde_command(command)?,
                None => self.parameter_line(line),
            }
        }
        self.unwind();
        Ok(())
    }

    fn line_no(&self) -> usize {
        self.lines.line_number()
    }

    fn tilde_command(&mut self, command: &str) -> Result<()> {
        let command = command.trim_end();
        let (word, arg) = command
            .split_once(char::is_whitespace)
            .unwrap_or((command, ""));
        match word {
            "Layer" => self.open_layer(arg.trim()),
            "EndLayer" => self.end_layer(),
            "LayerData" => self.layer_data()?,
            _ => self.status.record(
                self.lines.line_number(),
                ParseErrorKind::Structural,
                format!("Unknown tilde command '~{}'", command),
            ),
        }
        Ok(())
    }

    fn open_layer(&mut self, kind_name: &str) {
        let line = self.line_no();

        let containment = match self.stack.top() {
            Some(Slot::Node(frame)) => match frame.node().kind().containment() {
                Some(containment) => containment,
                None => {
                    let parent = frame.node().kind();
                    self.fail_open(line, format!("Layer command inside non-container {} layer", parent));
                    return;
                }
            },
            Some(Slot::Invalid) => {
                self.fail_open(line, "Layer command inside an invalid layer".to_string());
                return;
            }
            None => {
                self.fail_open(line, "Layer command outside of any layer".to_string());
                return;
            }
        };

        let Some(kind) = self.factory.kind_from_name(kind_name) else {
            self.fail_open(line, format!("Unknown layer type '{}'", kind_name));
            return;
        };

        let frame = match containment {
            Containment::Construct => Frame::Opened {
                node: self.factory.construct_default(kind),
                attach: Attach::Pending,
            },
            Containment::Prebuilt => {
                let taken = self
                    .stack
                    .top_mut()
                    .and_then(Slot::node_mut)
                    .and_then(|parent| parent.node_mut().take_prebuilt_child());
                let Some((slot, node)) = taken else {
                    self.fail_open(line, "No pre-built child layer left to read into".to_string());
                    return;
                };
                if node.kind() != kind {
                    tracing::debug!(line, requested = %kind, found = %node.kind(), "pre-built child kind differs");
                }
                Frame::Opened {
                    node,
                    attach: Attach::Slot(slot),
                }
            }
        };

        tracing::trace!(line, %kind, "layer opened");
        self.stack.push(frame);
        self.layers_read += 1;
    }

    fn fail_open(&mut self, line: usize, message: String) {
        self.status.record(line, ParseErrorKind::Structural, message);
        self.stack.push_invalid();
    }

    fn end_layer(&mut self) {
        let line = self.line_no();
        if self.stack.len() < 2 {
            self.mismatched_end_layer(line);
            return;
        }
        if let Some(slot) = self.stack.pop() {
            self.close(slot, line, true);
        }
    }

    fn mismatched_end_layer(&mut self, line: usize) {
        self.status.record(
            line,
            ParseErrorKind::Structural,
            "Mismatched ~EndLayer command",
        );
    }

    /// Close a popped frame: flush pending lists and link it into its parent.
    ///
    /// With `explicit` unset (end of stream) a missing node or parent is not
    /// reported again.
    fn close(&mut self, slot: Slot<Frame<'a>>, line: usize, explicit: bool) {
        let (mut node, attach) = match slot {
            Slot::Node(Frame::Opened { node, attach }) => (node, attach),
            Slot::Node(Frame::Root(_)) | Slot::Invalid => {
                if explicit {
                    self.mismatched_end_layer(line);
                }
                return;
            }
        };
        if self.stack.top().and_then(Slot::node).is_none() {
            if explicit {
                self.mismatched_end_layer(line);
            }
            tracing::debug!(line, name = node.name(), "layer closed under an invalid parent, dropped");
            return;
        }

        for (id, values) in mem::take(&mut self.pending_lists) {
            if let Err(err) = node.set_param(id, ParamValue::StringList(values)) {
                tracing::error!(line, %err, "could not store string list");
            }
        }

        let Some(parent) = self.stack.top_mut().and_then(Slot::node_mut) else {
            return;
        };
        let parent = parent.node_mut();

        match (attach, parent.kind().containment()) {
            (Attach::Pending, _) => {
                tracing::debug!(line, kind = %node.kind(), "layer closed without a name= line, not attached");
            }
            (Attach::Slot(slot), _) => parent.restore_child(slot, node),
            (Attach::Append, Some(Containment::Construct)) => {
                node.post_read();
                parent.attach_child(node);
            }
            (Attach::Append, Some(Containment::Prebuilt)) => parent.attach_child(node),
            (Attach::Append, None) => {
                let parent_kind = parent.kind();
                self.status.record(
                    line,
                    ParseErrorKind::Structural,
                    format!("EndLayer command inside non-container {} layer", parent_kind),
                );
            }
        }
    }

    fn layer_data(&mut self) -> Result<()> {
        let line = self.line_no();
        let Some(frame) = self.stack.top_mut().and_then(Slot::node_mut) else {
            return self.skip_data_block(line);
        };
        let node = frame.node_mut();
        let outcome = node
            .behavior_mut()
            .read_data_block(&mut self.lines, self.dir)?;

        match outcome {
            DataBlockOutcome::Success => Ok(()),
            DataBlockOutcome::Error(reason) => {
                let message = format!(
                    "Error reading data of {} layer '{}': {}",
                    node.kind(),
                    node.name(),
                    reason
                );
                self.status.record(line, ParseErrorKind::Structural, message);
                Ok(())
            }
            DataBlockOutcome::Unrecognized => self.skip_data_block(line),
        }
    }

    /// Skip raw lines through `~EndLayerData`.
    fn skip_data_block(&mut self, start: usize) -> Result<()> {
        while let Some(raw) = self.lines.next_line()? {
            if raw.trim() == END_LAYER_DATA {
                return Ok(());
            }
        }
        self.status.record(
            start,
            ParseErrorKind::Structural,
            "~LayerData block not terminated by ~EndLayerData",
        );
        Ok(())
    }

    fn parameter_line(&mut self, line: &str) {
        let line_no = self.lines.line_number();
        let Some((top, parent)) = self.stack.top_pair_mut() else {
            tracing::debug!(line = line_no, "parameter line outside any layer dropped");
            return;
        };
        let (Slot::Node(frame), Slot::Node(_)) = (top, parent) else {
            return;
        };

        let Some((key, value)) = line.split_once('=') else {
            tracing::debug!(line = line_no, text = line, "line without '=' ignored");
            return;
        };

        if key.eq_ignore_ascii_case("name") {
            frame.node_mut().set_name(value);
            frame.mark_named();
            return;
        }
        let node = frame.node_mut();
        if key.eq_ignore_ascii_case("visible") {
            node.set_visible(codec::decode_bool(value));
            return;
        }

        let Some(desc) = find_by_key(node.descriptors(), key) else {
            tracing::debug!(line = line_no, key, kind = %node.kind(), "unknown parameter ignored");
            return;
        };

        if desc.param_type == ParamType::StringList {
            self.pending_lists
                .entry(desc.id)
                .or_default()
                .push(value.to_string());
            return;
        }
        if let Some(decoded) = codec::decode(value, desc.param_type) {
            if let Err(err) = node.set_param(desc.id, decoded) {
                tracing::error!(line = line_no, %err, "decoded value rejected");
            }
        }
    }

    /// Close every frame left open at end of stream.
    fn unwind(&mut self) {
        let line = self.line_no();
        let unclosed = self.stack.len().saturating_sub(1);
        if unclosed > 0 {
            self.status.record(
                line,
                ParseErrorKind::Structural,
                format!("{} layer(s) not closed by ~EndLayer at end of file", unclosed),
            );
        }
        while self.stack.len() > 1 {
            if let Some(slot) = self.stack.pop() {
                self.close(slot, line, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{LayerKind, Rgb};
    use crate::view::{ViewMode, ViewSettings};
    use pretty_assertions::assert_eq;

    fn read(input: &str) -> (LayerNode, ViewSettings, ReadOutcome) {
        let mut root = LayerNode::new(LayerKind::Aggregate);
        let mut view = ViewSettings::default();
        let outcome = read_vik(input.as_bytes(), &mut root, &mut view).unwrap();
        (root, view, outcome)
    }

    fn names(node: &LayerNode) -> Vec<&str> {
        node.children().iter().map(LayerNode::name).collect()
    }

    #[test]
    fn test_reads_nested_layers() {
        let input = "FILE_VERSION=1\n\
                     ~Layer Aggregate\n\
                     name=Top\n\
                     ~Layer TRW\n\
                     name=Trip\n\
                     visible=f\n\
                     trackcolor=#ff0000\n\
                     line_thickness=3\n\
                     ~EndLayer\n\
                     ~Layer Coord\n\
                     name=Grid\n\
                     ~EndLayer\n\
                     ~EndLayer\n";
        let (root, _, outcome) = read(input);

        assert!(outcome.is_success(), "{:?}", outcome.errors);
        assert_eq!(outcome.layers_read, 3);
        assert_eq!(names(&root), ["Top"]);
        let top = &root.children()[0];
        assert_eq!(names(top), ["Trip", "Grid"]);

        let trip = &top.children()[0];
        assert_eq!(trip.kind(), LayerKind::Trw);
        assert!(!trip.is_visible());
        assert_eq!(
            trip.param_by_name("trackcolor"),
            Some(&ParamValue::Color(Rgb::new(255, 0, 0)))
        );
        assert_eq!(trip.param_by_name("line_thickness"), Some(&ParamValue::Int(3)));
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let input = "~Layer Coord\nNAME=Grid\nMin_Inc=0.5\nVisible=f\n~EndLayer\n";
        let (root, _, outcome) = read(input);
        assert!(outcome.is_success());
        let grid = &root.children()[0];
        assert_eq!(grid.name(), "Grid");
        assert!(!grid.is_visible());
        assert_eq!(grid.param_by_name("min_inc"), Some(&ParamValue::Double(0.5)));
    }

    #[test]
    fn test_string_list_accumulates_across_interleaved_lines() {
        let input = "~Layer DEM\n\
                     name=Hills\n\
                     files=a.hgt\n\
                     color=#00ff00\n\
                     files=b.hgt\n\
                     min_elev=10\n\
                     files=c.hgt\n\
                     ~EndLayer\n";
        let (root, _, outcome) = read(input);

        assert!(outcome.is_success());
        let dem = &root.children()[0];
        assert_eq!(
            dem.param_by_name("files"),
            Some(&ParamValue::StringList(vec![
                "a.hgt".into(),
                "b.hgt".into(),
                "c.hgt".into()
            ]))
        );
        assert_eq!(dem.param_by_name("min_elev"), Some(&ParamValue::Double(10.0)));
    }

    #[test]
    fn test_unknown_parameter_is_not_an_error() {
        let (root, _, outcome) = read("~Layer Coord\nname=Grid\nretired_option=3\n~EndLayer\n");
        assert!(outcome.is_success());
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_mismatched_end_layer_is_reported_and_reading_continues() {
        let input = "~EndLayer\n~Layer Coord\nname=Grid\n~EndLayer\n";
        let (root, _, outcome) = read(input);

        let err = outcome.status.error().unwrap();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, ParseErrorKind::Structural);
        assert_eq!(err.message, "Mismatched ~EndLayer command");
        assert_eq!(names(&root), ["Grid"]);
    }

    #[test]
    fn test_unknown_kind_swallows_its_span() {
        let input = "~Layer Aggregate\n\
                     name=Top\n\
                     ~Layer Foo\n\
                     name=Ghost\n\
                     visible=f\n\
                     ~EndLayer\n\
                     visible=f\n\
                     ~EndLayer\n";
        let (root, _, outcome) = read(input);

        let messages: Vec<(usize, &str)> = outcome
            .errors
            .iter()
            .map(|e| (e.line, e.message.as_str()))
            .collect();
        assert_eq!(
            messages,
            [
                (3, "Unknown layer type 'Foo'"),
                (6, "Mismatched ~EndLayer command")
            ]
        );
        assert_eq!(outcome.status.error().map(|e| e.line), Some(6));

        let top = &root.children()[0];
        assert_eq!(top.name(), "Top");
        assert!(top.children().is_empty());
        assert!(!top.is_visible(), "line after the invalid span applies to the parent");
    }

    #[test]
    fn test_layer_under_non_container_is_structural() {
        let input = "~Layer TRW\nname=T\n~Layer Coord\nname=C\n~EndLayer\n~EndLayer\n";
        let (root, _, outcome) = read(input);

        assert_eq!(
            outcome.errors[0].message,
            "Layer command inside non-container TRW layer"
        );
        // Closing the unusable layer is itself a mismatch.
        assert_eq!(
            outcome.status.error().map(|e| (e.line, e.message.as_str())),
            Some((5, "Mismatched ~EndLayer command"))
        );
        assert_eq!(names(&root), ["T"]);
        assert!(root.children()[0].children().is_empty());
    }

    #[test]
    fn test_end_layer_of_unknown_kind_is_mismatched() {
        let (root, _, outcome) = read("~Layer Foo\nname=x\n~EndLayer\n");

        assert_eq!(outcome.errors.len(), 2);
        let err = outcome.status.error().unwrap();
        assert_eq!((err.line, err.kind), (3, ParseErrorKind::Structural));
        assert_eq!(err.message, "Mismatched ~EndLayer command");
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_invalid_child_keeps_parent_string_list() {
        let input = "~Layer DEM\n\
                     name=Hills\n\
                     files=a.hgt\n\
                     ~Layer Coord\n\
                     name=Stray\n\
                     ~EndLayer\n\
                     files=b.hgt\n\
                     ~EndLayer\n";
        let (root, _, outcome) = read(input);

        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(names(&root), ["Hills"]);
        assert_eq!(
            root.children()[0].param_by_name("files"),
            Some(&ParamValue::StringList(vec!["a.hgt".into(), "b.hgt".into()]))
        );
    }

    #[test]
    fn test_latin1_name_is_read_and_later_layers_survive() {
        let input: &[u8] = b"~Layer Coord\nname=Caf\xE9\n~EndLayer\n~Layer Coord\nname=After\n~EndLayer\n";
        let mut root = LayerNode::new(LayerKind::Aggregate);
        let mut view = ViewSettings::default();
        let outcome = read_vik(input, &mut root, &mut view).unwrap();

        assert!(outcome.is_success(), "{:?}", outcome.errors);
        assert_eq!(names(&root), ["Caf\u{e9}", "After"]);
    }

    #[test]
    fn test_layer_without_name_is_not_attached() {
        let (root, _, outcome) = read("~Layer Coord\nmin_inc=2\n~EndLayer\n");
        assert!(outcome.is_success());
        assert_eq!(outcome.layers_read, 1);
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_gps_children_are_reused() {
        let input = "~Layer GPS\n\
                     name=Receiver\n\
                     gps_port=/dev/ttyUSB0\n\
                     ~Layer TRW\n\
                     name=Downloaded\n\
                     ~LayerData\n\
                     type=\"track\" name=\"morning\"\n\
                     ~EndLayerData\n\
                     ~EndLayer\n\
                     ~Layer TRW\n\
                     name=Uploaded\n\
                     ~EndLayer\n\
                     ~EndLayer\n";
        let (root, _, outcome) = read(input);

        assert!(outcome.is_success(), "{:?}", outcome.errors);
        let gps = &root.children()[0];
        assert_eq!(gps.kind(), LayerKind::Gps);
        assert_eq!(
            gps.param_by_name("gps_port"),
            Some(&ParamValue::String("/dev/ttyUSB0".into()))
        );
        assert_eq!(names(gps), ["Downloaded", "Uploaded", "GPS Realtime Tracking"]);
    }

    #[test]
    fn test_gps_out_of_children() {
        let mut input = String::from("~Layer GPS\nname=R\n");
        for _ in 0..4 {
            input.push_str("~Layer TRW\nname=x\n~EndLayer\n");
        }
        input.push_str("~EndLayer\n");
        let (root, _, outcome) = read(&input);

        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(outcome.errors[0].line, 12, "fourth child has nowhere to go");
        assert_eq!(outcome.errors[1].line, 14);
        assert_eq!(root.children()[0].children().len(), 3);
    }

    #[test]
    fn test_unrecognized_data_block_is_skipped() {
        let input = "~Layer Map\n\
                     name=Tiles\n\
                     ~LayerData\n\
                     alpha=1\n\
                     ~Layer Foo\n\
                     ~EndLayerData\n\
                     alpha=128\n\
                     ~EndLayer\n";
        let (root, _, outcome) = read(input);

        assert!(outcome.is_success(), "{:?}", outcome.errors);
        assert_eq!(root.children()[0].param_by_name("alpha"), Some(&ParamValue::Int(128)));
    }

    #[test]
    fn test_unterminated_data_block_is_reported() {
        let (_, _, outcome) = read("~Layer Map\nname=Tiles\n~LayerData\nstuff\n");
        assert!(outcome
            .errors
            .iter()
            .any(|e| e.message.contains("not terminated") && e.line == 3));
    }

    #[test]
    fn test_unknown_tilde_command() {
        let (_, _, outcome) = read("~Layer Coord\nname=G\n~Frobnicate now\n~EndLayer\n");
        let err = outcome.status.error().unwrap();
        assert_eq!((err.line, err.message.as_str()), (3, "Unknown tilde command '~Frobnicate now'"));
    }

    #[test]
    fn test_unclosed_layers_are_attached_at_end_of_stream() {
        let (root, _, outcome) = read("~Layer Aggregate\nname=Top\n~Layer DEM\nname=D\nfiles=x.hgt\n");

        assert_eq!(
            outcome.status.error().map(|e| e.message.as_str()),
            Some("2 layer(s) not closed by ~EndLayer at end of file")
        );
        let dem = &root.children()[0].children()[0];
        assert_eq!(
            dem.param_by_name("files"),
            Some(&ParamValue::StringList(vec!["x.hgt".into()]))
        );
    }

    #[test]
    fn test_first_wins_policy() {
        let mut root = LayerNode::new(LayerKind::Aggregate);
        let mut view = ViewSettings::default();
        let options = ReadOptions {
            error_policy: ErrorPolicy::FirstWins,
            ..ReadOptions::default()
        };
        let outcome =
            read_vik_with("~EndLayer\n~Bogus\n".as_bytes(), &mut root, &mut view, &options).unwrap();

        assert_eq!(outcome.status.error().map(|e| e.line), Some(1));
        assert_eq!(outcome.errors.len(), 2);
    }

    #[test]
    fn test_header_center_applied() {
        let (_, view, outcome) = read("lat=10.0\nlon=20.0\nmode=latlon\n");
        assert!(outcome.is_success());
        assert_eq!(view.center(), (10.0, 20.0));
        assert_eq!(view.mode, ViewMode::LatLon);
    }

    #[test]
    fn test_comments_blank_and_indented_lines() {
        let input = "# saved by hand\n\
                     ~Layer Coord\n\
                     \n\
                     \tname=Grid\n\
                     # note\n\
                     \x20\x20line_thickness=7\n\
                     ~EndLayer\n";
        let (root, _, outcome) = read(input);
        assert!(outcome.is_success());
        assert_eq!(root.children()[0].param_by_name("line_thickness"), Some(&ParamValue::Int(7)));
    }
}
