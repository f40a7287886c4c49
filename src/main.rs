use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use git_verinfo::boundary::BoundaryWarning;
use git_verinfo::cli::{run_generate_workflow, GenerateArgs};
use git_verinfo::{config, logger, ui};

#[derive(clap::Parser)]
#[command(
    name = "git-verinfo",
    version,
    about = "Render version information from git tags into a template"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Directory inside the git repository")]
    repository: Option<PathBuf>,

    #[arg(short, long, help = "Template file to render")]
    template: Option<PathBuf>,

    #[arg(short, long, help = "Output file to write")]
    output: Option<PathBuf>,

    #[arg(long, help = "Version tag format, digits match any number (default: v0.0.0)")]
    tag_format: Option<String>,

    #[arg(long, help = "Resolve from this revision instead of HEAD")]
    commit: Option<String>,

    #[arg(long, help = "Only follow first parents when searching for a tag")]
    first_parent: bool,

    #[arg(long, help = "Print the rendered output without writing it")]
    dry_run: bool,

    #[arg(long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logger::init_logger(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let template_file = args
        .template
        .or(config.template_file)
        .context("No template file given (use --template or template_file in verinfo.toml)")?;
    let output_file = match args.output.or(config.output_file) {
        Some(path) => path,
        None if args.dry_run => PathBuf::new(),
        None => anyhow::bail!("No output file given (use --output or output_file in verinfo.toml)"),
    };

    let mut traversal_config = config.traversal;
    traversal_config.first_parent |= args.first_parent;

    let generate_args = GenerateArgs {
        repository_dir: args.repository.unwrap_or(config.repository_directory),
        template_file,
        output_file,
        version_tag_format: args.tag_format.unwrap_or(config.version_tag_format),
        start_revision: args.commit,
        traversal: traversal_config.traversal(),
        dry_run: args.dry_run,
    };

    let result = match run_generate_workflow(&generate_args) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }

    if args.dry_run {
        if let Some(rendered) = &result.rendered {
            print!("{}", rendered);
        }
        return Ok(());
    }

    ui::display_resolution(&result.resolution);
    if result.written {
        ui::display_success(&format!(
            "Wrote {}",
            generate_args.output_file.display()
        ));
    } else if result.rendered.is_some()
        && !result
            .warnings
            .iter()
            .any(|w| matches!(w, BoundaryWarning::OutputNotWritten { .. }))
    {
        ui::display_status(&format!(
            "{} is up to date",
            generate_args.output_file.display()
        ));
    }

    Ok(())
}
