//! Field path parsing.
//!
//! A field path addresses a value inside a nested document using dotted
//! fields and bracketed array indices, e.g. `spec.containers[0].name`.
//! Field names containing `.` or `[` are not addressable.

use std::fmt;
use std::str::FromStr;

use crate::error::{DocumentError, DocumentResult};

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A field of a mapping.
    Field(String),
    /// An index into an array.
    Index(usize),
}

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parse a dotted/bracketed path.
    pub fn parse(path: &str) -> DocumentResult<Self> {
        let err = |reason: &str| DocumentError::ParsePath {
            path: path.to_string(),
            reason: reason.to_string(),
        };
        if path.is_empty() {
            return Err(err("path is empty"));
        }

        let mut segments = Vec::new();
        let mut rest = path;
        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let end = after.find(']').ok_or_else(|| err("unterminated index"))?;
                let index: usize = after[..end]
                    .parse()
                    .map_err(|_| err("index is not a number"))?;
                segments.push(Segment::Index(index));
                rest = &after[end + 1..];
                match rest.strip_prefix('.') {
                    Some("") => return Err(err("trailing separator")),
                    Some(next) => rest = next,
                    None if rest.is_empty() || rest.starts_with('[') => {}
                    None => return Err(err("expected '.' or '[' after index")),
                }
            } else {
                let cut = rest.find(|c| c == '.' || c == '[').unwrap_or(rest.len());
                if cut == 0 {
                    return Err(err("empty field segment"));
                }
                segments.push(Segment::Field(rest[..cut].to_string()));
                match rest[cut..].strip_prefix('.') {
                    Some("") => return Err(err("trailing separator")),
                    Some(next) => rest = next,
                    None => rest = &rest[cut..],
                }
            }
        }
        Ok(Self { segments })
    }

    /// The parsed segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl FromStr for FieldPath {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
