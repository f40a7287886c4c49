use regex::Regex;

/// Numeric components parsed from a tag in the shape
/// `major(.minor)?(.build)?(.revision)?`.
///
/// Components that are not present are empty strings, never zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionNumber {
    /// The whole matched text, e.g. "1.2.3" for "v1.2.3-beta"
    pub number: String,
    pub major: String,
    pub minor: String,
    pub build: String,
    pub revision: String,
}

impl VersionNumber {
    /// Parse the first `major(.minor)?(.build)?(.revision)?` run in `text`.
    ///
    /// # Example
    /// ```
    /// # use git_verinfo::domain::VersionNumber;
    /// let version = VersionNumber::parse("v2.10");
    /// assert_eq!(version.major, "2");
    /// assert_eq!(version.minor, "10");
    /// assert_eq!(version.build, "");
    /// ```
    pub fn parse(text: &str) -> Self {
        let Some(captures) = Regex::new(
            r"(?P<major>\d+)(\.(?P<minor>\d+))?(\.(?P<build>\d+))?(\.(?P<revision>\d+))?",
        )
        .ok()
        .and_then(|re| re.captures(text)) else {
            return VersionNumber::default();
        };

        let group = |name: &str| {
            captures
                .name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        VersionNumber {
            number: captures
                .get(0)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            major: group("major"),
            minor: group("minor"),
            build: group("build"),
            revision: group("revision"),
        }
    }
}
