//! Placeholder values derived from a tag resolution

use crate::domain::VersionNumber;
use crate::resolver::ResolutionResult;
use crate::template::{Value, ValueMap};
use chrono::Datelike;

/// Placeholder names produced by [VersionContextBuilder]
pub mod keys {
    pub const YEAR: &str = "Year";
    pub const BRANCH: &str = "Branch";
    pub const COMMIT_HASH_SHORT: &str = "CommitHashShort";
    pub const COMMIT_HASH_LONG: &str = "CommitHashLong";
    pub const TAG_DISTANCE: &str = "TagDistance";
    pub const VERSION_TAG: &str = "VersionTag";
    pub const VERSION_TAG_NUMBER: &str = "VersionTagNumber";
    pub const VERSION_TAG_MAJOR: &str = "VersionTagMajor";
    pub const VERSION_TAG_MINOR: &str = "VersionTagMinor";
    pub const VERSION_TAG_BUILD: &str = "VersionTagBuild";
    pub const VERSION_TAG_REVISION: &str = "VersionTagRevision";

    /// Every key, in documentation order
    pub const ALL: [&str; 11] = [
        YEAR,
        BRANCH,
        COMMIT_HASH_SHORT,
        COMMIT_HASH_LONG,
        TAG_DISTANCE,
        VERSION_TAG,
        VERSION_TAG_NUMBER,
        VERSION_TAG_MAJOR,
        VERSION_TAG_MINOR,
        VERSION_TAG_BUILD,
        VERSION_TAG_REVISION,
    ];
}

const SHORT_HASH_LEN: usize = 8;

/// Builds the value map handed to the template engine
#[derive(Debug, Clone)]
pub struct VersionContextBuilder {
    fallback_format: String,
    year: Option<i32>,
}

impl VersionContextBuilder {
    /// `fallback_format` stands in for the tag when no tag matched
    pub fn new(fallback_format: impl Into<String>) -> Self {
        VersionContextBuilder {
            fallback_format: fallback_format.into(),
            year: None,
        }
    }

    /// Use a fixed year instead of the current local year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn build(&self, result: &ResolutionResult) -> ValueMap {
        let year = self
            .year
            .unwrap_or_else(|| chrono::Local::now().year());
        let long_hash = result.commit.map(|oid| oid.to_string()).unwrap_or_default();
        let short_hash = if long_hash.is_empty() {
            "0".repeat(SHORT_HASH_LEN)
        } else {
            long_hash.chars().take(SHORT_HASH_LEN).collect()
        };
        let tag = result
            .tag
            .clone()
            .unwrap_or_else(|| self.fallback_format.clone());
        let version = VersionNumber::parse(&tag);

        let mut values = ValueMap::new();
        values.insert(keys::YEAR.to_string(), Value::from(year));
        values.insert(keys::BRANCH.to_string(), Value::from(result.branch.as_str()));
        values.insert(keys::COMMIT_HASH_SHORT.to_string(), Value::from(short_hash));
        values.insert(keys::COMMIT_HASH_LONG.to_string(), Value::from(long_hash));
        values.insert(keys::TAG_DISTANCE.to_string(), Value::from(result.distance));
        values.insert(keys::VERSION_TAG.to_string(), Value::from(tag));
        values.insert(keys::VERSION_TAG_NUMBER.to_string(), Value::from(version.number));
        values.insert(keys::VERSION_TAG_MAJOR.to_string(), Value::from(version.major));
        values.insert(keys::VERSION_TAG_MINOR.to_string(), Value::from(version.minor));
        values.insert(keys::VERSION_TAG_BUILD.to_string(), Value::from(version.build));
        values.insert(
            keys::VERSION_TAG_REVISION.to_string(),
            Value::from(version.revision),
        );
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Oid;

    fn text(values: &ValueMap, key: &str) -> String {
        values[key].to_string()
    }

    #[test]
    fn test_all_keys_present() {
        let values = VersionContextBuilder::new("v0.0.0").build(&ResolutionResult::unborn());
        for key in keys::ALL {
            assert!(values.contains_key(key), "missing key {}", key);
        }
        assert_eq!(values.len(), keys::ALL.len());
    }

    #[test]
    fn test_unborn_uses_fallbacks() {
        let values = VersionContextBuilder::new("v0.0.0")
            .with_year(2024)
            .build(&ResolutionResult::unborn());

        assert_eq!(values[keys::YEAR], Value::Integer(2024));
        assert_eq!(text(&values, keys::BRANCH), "no branch");
        assert_eq!(text(&values, keys::COMMIT_HASH_SHORT), "00000000");
        assert_eq!(text(&values, keys::COMMIT_HASH_LONG), "");
        assert_eq!(values[keys::TAG_DISTANCE], Value::Integer(0));
        assert_eq!(text(&values, keys::VERSION_TAG), "v0.0.0");
        assert_eq!(text(&values, keys::VERSION_TAG_NUMBER), "0.0.0");
        assert_eq!(text(&values, keys::VERSION_TAG_MAJOR), "0");
        assert_eq!(text(&values, keys::VERSION_TAG_REVISION), "");
    }

    #[test]
    fn test_resolved_tag() {
        let commit = Oid::from_str("0123456789abcdef0123456789abcdef01234567").unwrap();
        let result = ResolutionResult {
            tag: Some("v2.10".to_string()),
            matched_commit: Some(commit),
            commit: Some(commit),
            distance: 3,
            branch: "develop".to_string(),
        };
        let values = VersionContextBuilder::new("v0.0.0").build(&result);

        assert_eq!(text(&values, keys::COMMIT_HASH_SHORT), "01234567");
        assert_eq!(
            text(&values, keys::COMMIT_HASH_LONG),
            "0123456789abcdef0123456789abcdef01234567"
        );
        assert_eq!(values[keys::TAG_DISTANCE], Value::Integer(3));
        assert_eq!(text(&values, keys::BRANCH), "develop");
        assert_eq!(text(&values, keys::VERSION_TAG), "v2.10");
        assert_eq!(text(&values, keys::VERSION_TAG_MAJOR), "2");
        assert_eq!(text(&values, keys::VERSION_TAG_MINOR), "10");
        assert_eq!(text(&values, keys::VERSION_TAG_BUILD), "");
        assert_eq!(text(&values, keys::VERSION_TAG_REVISION), "");
    }

    #[test]
    fn test_current_year_by_default() {
        let values = VersionContextBuilder::new("v0.0.0").build(&ResolutionResult::unborn());
        match values[keys::YEAR] {
            Value::Integer(year) => assert!(year >= 2024),
            ref other => panic!("Year should be an integer, got {:?}", other),
        }
    }
}
