//! Wildcard version template parsing and expansion

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

/// Marker that gets replaced with a random number during expansion.
pub const WILDCARD: &str = "*";

/// Inclusive upper bound for generated wildcard segments.
pub const WILDCARD_MAX: u32 = 255;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,

    #[error("template '{0}' contains an empty segment")]
    EmptySegment(String),
}

/// A single template segment
///
/// Literal segments are copied into generated versions byte-identical;
/// their content is not validated here. A segment equal to [`WILDCARD`]
/// is replaced on every expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Wildcard,
}

/// An ordered, dot-separated sequence of segments. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTemplate {
    segments: Vec<Segment>,
}

impl VersionTemplate {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Expand the template into one concrete version string.
    ///
    /// Each wildcard segment is independently replaced with a uniform
    /// integer in `[0, WILDCARD_MAX]`; literal segments are copied
    /// unchanged and segment order is preserved.
    pub fn expand<R: Rng>(&self, rng: &mut R) -> String {
        let parts: Vec<String> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => literal.clone(),
                Segment::Wildcard => rng.gen_range(0..=WILDCARD_MAX).to_string(),
            })
            .collect();
        parts.join(".")
    }
}

impl FromStr for VersionTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TemplateError::Empty);
        }

        let segments = s
            .split('.')
            .map(|part| {
                if part.is_empty() {
                    Err(TemplateError::EmptySegment(s.to_string()))
                } else if part == WILDCARD {
                    Ok(Segment::Wildcard)
                } else {
                    Ok(Segment::Literal(part.to_string()))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }
}

impl fmt::Display for VersionTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => literal.as_str(),
                Segment::Wildcard => WILDCARD,
            })
            .collect();
        write!(f, "{}", parts.join("."))
    }
}
