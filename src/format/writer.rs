//! Tree serializer: writes a layer tree as a `.vik` stream
//!
//! The traversal is pre-order and non-recursive. It keeps a stack of sibling
//! slices; a layer's `~EndLayer` is written once its last child is done, so
//! every layer below the root gets exactly one, and the root none.

use std::io::Write;
use std::path::Path;

use super::codec;
use super::header::write_header;
use super::{END_LAYER_DATA, VIK_MAGIC_LINE};
use crate::error::{Result, VikError};
use crate::layers::LayerNode;
use crate::view::ViewState;

/// Write `root` and `view` as a complete `.vik` document.
///
/// `dir` is handed to data-block writers for resolving relative paths.
///
/// # Errors
/// * `ParamTypeMismatch` - a layer holds a value of the wrong type for its
///   descriptor; nothing after that layer's parameters is written
/// * `Io` - the output failed
pub fn write_vik<W: Write>(
    mut out: W,
    root: &LayerNode,
    view: &dyn ViewState,
    dir: Option<&Path>,
) -> Result<()> {
    writeln!(out, "{}", VIK_MAGIC_LINE)?;
    write_header(&mut out, root, view)?;

    let mut levels: Vec<&[LayerNode]> = vec![root.children()];
    while let Some(level) = levels.last_mut() {
        let current = *level;
        let Some((node, rest)) = current.split_first() else {
            levels.pop();
            continue;
        };
        *level = rest;

        write_layer(&mut out, node, dir)?;

        if !node.children().is_empty() {
            levels.push(node.children());
            continue;
        }
        writeln!(out, "~EndLayer")?;

        while levels.last().is_some_and(|siblings| siblings.is_empty()) {
            levels.pop();
            if !levels.is_empty() {
                writeln!(out, "~EndLayer")?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Everything for one layer except its children and `~EndLayer`.
fn write_layer(out: &mut dyn Write, node: &LayerNode, dir: Option<&Path>) -> Result<()> {
    writeln!(out, "~Layer {}", node.kind().wire_name())?;
    writeln!(out, "name={}", codec::encode_text(node.name()))?;
    if !node.is_visible() {
        writeln!(out, "visible=f")?;
    }

    for (desc, value) in node.descriptors().iter().zip(node.params()) {
        if value.param_type() != desc.param_type {
            let err = VikError::ParamTypeMismatch {
                kind: node.kind(),
                name: desc.name,
                expected: desc.param_type,
                found: value.param_type(),
            };
            tracing::error!(%err, layer = node.name(), "refusing to write inconsistent layer");
            return Err(err);
        }
        for text in codec::encode(value) {
            writeln!(out, "{}={}", desc.name, text)?;
        }
    }

    let behavior = node.behavior();
    if behavior.has_data_block() {
        writeln!(out, "~LayerData")?;
        behavior.write_data_block(out, dir)?;
        writeln!(out, "{}", END_LAYER_DATA)?;
    }
    Ok(())
}
