//! Line scanner over a buffered stream

use std::io::{self, BufRead};

/// A source of text lines, as seen by data-block readers.
pub trait LineSource {
    /// Next line without its terminator, or `None` at end of stream.
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// 1-based number of the line most recently returned.
    fn line_number(&self) -> usize;
}

/// Line reader with one line of push-back.
pub struct LineReader<R> {
    inner: R,
    line_number: usize,
    pushed_back: Option<String>,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line_number: 0,
            pushed_back: None,
        }
    }

    /// Return a line so the next call to `next_line` yields it again.
    pub fn push_back(&mut self, line: String) {
        debug_assert!(self.pushed_back.is_none(), "only one line of push-back");
        self.line_number = self.line_number.saturating_sub(1);
        self.pushed_back = Some(line);
    }
}

impl<R: BufRead> LineSource for LineReader<R> {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.pushed_back.take() {
            self.line_number += 1;
            return Ok(Some(line));
        }

        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        while buf.ends_with(b"\n") || buf.ends_with(b"\r") {
            buf.pop();
        }
        self.line_number += 1;
        Ok(Some(decode_line(buf, self.line_number)))
    }

    fn line_number(&self) -> usize {
        self.line_number
    }
}

/// Text of one line. Bytes that are not UTF-8 are read as Latin-1, which
/// older files use for names.
fn decode_line(bytes: Vec<u8>, line: usize) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(line, "line is not valid UTF-8, reading it as Latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    }
}
