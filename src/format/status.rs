//! Parse status and non-fatal reader errors

use std::fmt;

use serde::Serialize;

/// Category of a problem found while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseErrorKind {
    /// Bad tag nesting or ordering, or an unknown layer kind.
    Structural,
    /// `FILE_VERSION` newer than this reader.
    FormatVersion,
    /// Unknown or malformed header key.
    Header,
}

/// One problem found while reading, with the line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

/// Overall outcome of a read.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum ParseStatus {
    #[default]
    Success,
    Error(ParseError),
}

impl ParseStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseStatus::Success)
    }

    pub fn error(&self) -> Option<&ParseError> {
        match self {
            ParseStatus::Success => None,
            ParseStatus::Error(err) => Some(err),
        }
    }
}

/// Which recorded error the final status reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// A later error replaces an earlier one.
    #[default]
    LastWins,
    /// The first error sticks.
    FirstWins,
}

/// Collects errors during a read without interrupting it.
#[derive(Debug, Default)]
pub struct StatusLog {
    policy: ErrorPolicy,
    status: ParseStatus,
    errors: Vec<ParseError>,
}

impl StatusLog {
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn record(&mut self, line: usize, kind: ParseErrorKind, message: impl Into<String>) {
        let err = ParseError {
            line,
            kind,
            message: message.into(),
        };
        tracing::warn!(line, ?kind, "{}", err.message);

        let replace = match self.policy {
            ErrorPolicy::LastWins => true,
            ErrorPolicy::FirstWins => self.status.is_success(),
        };
        if replace {
            self.status = ParseStatus::Error(err.clone());
        }
        self.errors.push(err);
    }

    pub fn status(&self) -> &ParseStatus {
        &self.status
    }

    /// Every error recorded, in file order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_parts(self) -> (ParseStatus, Vec<ParseError>) {
        (self.status, self.errors)
    }
}
