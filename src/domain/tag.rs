use crate::error::{Result, VerinfoError};
use regex::Regex;

/// Default version tag format
pub const DEFAULT_TAG_FORMAT: &str = "v0.0.0";

/// Represents a git tag and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub target: git2::Oid,
}

impl Tag {
    /// Create a new tag reference
    pub fn new(name: impl Into<String>, target: git2::Oid) -> Self {
        Tag {
            name: name.into(),
            target,
        }
    }
}

/// Matcher derived from a version tag format such as "v0.0.0".
///
/// Every ASCII digit in the format stands for one or more digits, `.` is a literal
/// dot and any other character matches itself. Matching is by containment, so
/// "release-v1.2.3" is accepted by "v0.0.0".
#[derive(Debug, Clone)]
pub struct TagPattern {
    format: String,
    regex: Regex,
}

impl TagPattern {
    /// Compile a tag format into a matcher.
    ///
    /// The format must not be empty; callers check this before compiling.
    pub fn compile(format: &str) -> Result<Self> {
        let mut source = String::with_capacity(format.len() * 3);
        for c in format.chars() {
            if c.is_ascii_digit() {
                source.push_str(r"\d+");
            } else {
                source.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
            }
        }

        let regex = Regex::new(&source).map_err(|e| {
            VerinfoError::argument(format!("Invalid version tag format '{}': {}", format, e))
        })?;

        Ok(TagPattern {
            format: format.to_string(),
            regex,
        })
    }

    /// The format this pattern was compiled from
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The generated regular expression
    pub fn as_regex_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Check whether a tag name contains something shaped like the format
    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }
}
