use std::fmt;

/// Non-fatal conditions met while generating version info.
/// The workflow carries on and these are reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The repository could not be opened or read; fallback values were used
    RepositoryUnavailable { path: String, reason: String },
    /// No tag reachable from the start commit matches the format
    NoMatchingTag { format: String, walked: usize },
    /// The template exists but could not be read
    TemplateUnreadable { path: String, reason: String },
    /// The rendered output could not be written
    OutputNotWritten { path: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::RepositoryUnavailable { path, reason } => {
                write!(
                    f,
                    "Repository at '{}' is unavailable, using fallback values: {}",
                    path, reason
                )
            }
            BoundaryWarning::NoMatchingTag { format, walked } => {
                write!(
                    f,
                    "No tag matching '{}' found in {} commit(s)",
                    format, walked
                )
            }
            BoundaryWarning::TemplateUnreadable { path, reason } => {
                write!(f, "Cannot read template '{}': {}", path, reason)
            }
            BoundaryWarning::OutputNotWritten { path, reason } => {
                write!(f, "Cannot write output '{}': {}", path, reason)
            }
        }
    }
}
