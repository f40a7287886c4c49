//! Generate workflow orchestration logic
//!
//! Reads the template, resolves the nearest version tag, renders and writes the
//! output. This keeps the command line binary down to argument parsing and
//! reporting, and lets the workflow be called programmatically without clap.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use git2::Oid;
use log::{debug, info, warn};

use crate::boundary::BoundaryWarning;
use crate::context::VersionContextBuilder;
use crate::domain::TagPattern;
use crate::error::{Result, VerinfoError};
use crate::git::{Git2Repository, Traversal};
use crate::resolver::{ResolutionResult, TagResolver};
use crate::template;

/// Arguments for the generate workflow
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Directory inside the repository to describe
    pub repository_dir: PathBuf,

    /// Template to render
    pub template_file: PathBuf,

    /// File the rendered template is written to
    pub output_file: PathBuf,

    /// Version tag format, e.g. "v0.0.0"
    pub version_tag_format: String,

    /// Revision to resolve from instead of HEAD
    pub start_revision: Option<String>,

    /// Ancestry walk used to find the nearest tag
    pub traversal: Traversal,

    /// Render without writing the output file
    pub dry_run: bool,
}

/// Result of a generate workflow that did not fail
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Rendered output, absent when the template could not be read
    pub rendered: Option<String>,

    /// Whether the output file was (re)written
    pub written: bool,

    /// Resolution the output was rendered from
    pub resolution: ResolutionResult,

    /// Non-fatal problems met on the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Main generate workflow
///
/// 1. Validate the tag format and read the template
/// 2. Open the repository (falling back to default values if unavailable)
/// 3. Resolve the nearest matching tag
/// 4. Render the template
/// 5. Write the output if its content changed
///
/// # Returns
/// * `Ok(WorkflowResult)` - Possibly with warnings
/// * `Err` - Missing template, invalid tag format or start revision, or a
///   malformed template
pub fn run_generate_workflow(args: &GenerateArgs) -> Result<WorkflowResult> {
    if args.version_tag_format.is_empty() {
        return Err(VerinfoError::argument("Version tag format must not be empty"));
    }
    let pattern = TagPattern::compile(&args.version_tag_format)?;

    if !args.template_file.is_file() {
        return Err(VerinfoError::argument(format!(
            "Could not find template file '{}'",
            args.template_file.display()
        )));
    }

    let mut warnings = Vec::new();

    let template = match fs::read_to_string(&args.template_file) {
        Ok(template) => template,
        Err(e) => {
            warn!("Cannot read template: {}", e);
            warnings.push(BoundaryWarning::TemplateUnreadable {
                path: args.template_file.display().to_string(),
                reason: e.to_string(),
            });
            return Ok(WorkflowResult {
                rendered: None,
                written: false,
                resolution: ResolutionResult::unborn(),
                warnings,
            });
        }
    };

    let resolution = match resolve_repository(args, pattern) {
        Ok(resolution) => resolution,
        Err(e) if e.is_recoverable() => {
            warn!("{}", e);
            warnings.push(BoundaryWarning::RepositoryUnavailable {
                path: args.repository_dir.display().to_string(),
                reason: e.to_string(),
            });
            ResolutionResult::unborn()
        }
        Err(e) => return Err(e),
    };

    if resolution.tag.is_none() && resolution.commit.is_some() {
        warnings.push(BoundaryWarning::NoMatchingTag {
            format: args.version_tag_format.clone(),
            walked: resolution.distance,
        });
    }

    let values = VersionContextBuilder::new(args.version_tag_format.as_str()).build(&resolution);
    let rendered = template::render(&template, &values)?;

    let written = if args.dry_run {
        debug!("Dry run, not writing '{}'", args.output_file.display());
        false
    } else {
        match write_if_changed(&args.output_file, &rendered) {
            Ok(written) => written,
            Err(e) => {
                warn!("Cannot write output: {}", e);
                warnings.push(BoundaryWarning::OutputNotWritten {
                    path: args.output_file.display().to_string(),
                    reason: e.to_string(),
                });
                false
            }
        }
    };

    Ok(WorkflowResult {
        rendered: Some(rendered),
        written,
        resolution,
        warnings,
    })
}

fn resolve_repository(args: &GenerateArgs, pattern: TagPattern) -> Result<ResolutionResult> {
    let repo = Git2Repository::open(&args.repository_dir)?;

    let start: Option<Oid> = match &args.start_revision {
        Some(revision) => Some(repo.resolve_revision(revision)?),
        None => None,
    };

    let resolution = TagResolver::new(pattern)
        .with_traversal(args.traversal)
        .resolve(&repo, start)?;
    info!(
        "Resolved tag {:?} at distance {} on '{}'",
        resolution.tag, resolution.distance, resolution.branch
    );
    Ok(resolution)
}

/// Read a file's bytes, treating a missing file or directory as empty
fn read_existing(path: &Path) -> io::Result<Vec<u8>> {
    match fs::read(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Write `content` unless the file already holds exactly those bytes, so
/// downstream build steps are not triggered needlessly.
///
/// Returns whether the file was written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    let existing = read_existing(path)?;
    if existing == content.as_bytes() && path.exists() {
        debug!("'{}' is up to date", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    info!("Wrote '{}'", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_if_changed_skips_identical_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        assert!(write_if_changed(&path, "1.0").unwrap());
        assert!(!write_if_changed(&path, "1.0").unwrap());
        assert!(write_if_changed(&path, "1.1").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "1.1");
    }

    #[test]
    fn test_write_if_changed_creates_empty_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("empty.txt");

        assert!(write_if_changed(&path, "").unwrap());
        assert!(path.exists());
        assert!(!write_if_changed(&path, "").unwrap());
    }

    #[test]
    fn test_read_existing_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_existing(&dir.path().join("missing")).unwrap().is_empty());
    }

    #[test]
    fn test_write_if_changed_replaces_non_utf8_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();

        assert!(write_if_changed(&path, "1.0").unwrap());
        assert_eq!(fs::read(&path).unwrap(), b"1.0");
        assert!(!write_if_changed(&path, "1.0").unwrap());
    }

    #[test]
    fn test_write_if_changed_reports_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();

        let err = write_if_changed(&blocker.join("out.txt"), "1.0").unwrap_err();
        assert!(matches!(err, VerinfoError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
