//! vikfile - Reader and writer for `.vik` layer project files
//!
//! A `.vik` file stores a view header and a tree of typed layers, each with a
//! parameter table and an optional data block. This crate provides:
//! 1. The layer model - kinds, parameter descriptors, nodes and their
//!    data-block capabilities
//! 2. The format - a forgiving reader and a strict writer
//!
//! # Architecture
//!
//! - `layers`: layer kinds, parameters and the [`LayerNode`] tree
//! - `view`: the view state carried in the file header
//! - `format`: codecs, the tag dispatcher and the tree serializer
//! - `project`: file-level load/save with magic check and working directory

pub mod cli;
pub mod error;
pub mod format;
pub mod layers;
pub mod project;
pub mod view;

pub use error::{Result, VikError};
pub use format::{read_vik, read_vik_with, write_vik, ErrorPolicy, ParseStatus, ReadOptions};
pub use layers::{LayerKind, LayerNode, ParamValue};
pub use project::{load_file, save_file, VikProject};
pub use view::{ViewMode, ViewSettings, ViewState};
