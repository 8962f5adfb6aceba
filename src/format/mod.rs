//! The `.vik` text format
//!
//! A file is a header of `key=value` lines followed by a tree of layers:
//!
//! ```text
//! #VIKING GPS Data file http://viking.sf.net/
//! FILE_VERSION=1
//!
//! xmpp=4.000000
//! mode=mercator
//! ~Layer Aggregate
//! name=Top
//! ~Layer TRW
//! name=Trip
//! ~LayerData
//! ...
//! ~EndLayerData
//! ~EndLayer
//! ~EndLayer
//! ```
//!
//! Reading is forgiving: problems are recorded in a [`ParseStatus`] and the
//! scan continues. Writing is strict.

pub mod codec;
pub mod header;
pub mod lines;
pub mod reader;
pub mod stack;
pub mod status;
pub mod writer;

pub use header::HeaderInfo;
pub use lines::{LineReader, LineSource};
pub use reader::{read_vik, read_vik_with, ReadOptions, ReadOutcome};
pub use stack::{LayerStack, Slot};
pub use status::{ErrorPolicy, ParseError, ParseErrorKind, ParseStatus, StatusLog};
pub use writer::write_vik;

/// Prefix every `.vik` file starts with.
pub const VIK_MAGIC: &str = "#VIK";

/// Comment line written at the top of saved files.
pub const VIK_MAGIC_LINE: &str = "#VIKING GPS Data file http://viking.sf.net/";

/// Newest `FILE_VERSION` this crate reads and the one it writes.
pub const VIK_FILE_VERSION: i32 = 1;

pub(crate) const END_LAYER_DATA: &str = "~EndLayerData";
