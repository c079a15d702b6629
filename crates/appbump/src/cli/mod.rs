//! CLI definition and command handling

pub mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use appbump_core::config::{load_config_or_default, Config};
use appbump_core::output::StdoutReporter;
use appbump_core::types::Bump;
use appbump_files::{from_host_config, BumpFlags, BumpReport, HostConfig};

/// appbump - bump app versions across iOS, Android and package.json
#[derive(Debug, Parser)]
#[command(name = "appbump")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Release type: major, minor or patch
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub release_type: Option<String>,

    /// Explicit version to set, overrides --type
    #[arg(long)]
    pub semver: Option<String>,

    /// Platforms whose version name is left alone (android, ios, all)
    #[arg(long, value_name = "PLATFORMS")]
    pub skip_semver_for: Option<String>,

    /// Platforms whose build number is left alone (android, ios, all)
    #[arg(long, value_name = "PLATFORMS")]
    pub skip_code_for: Option<String>,

    /// Write a JSON summary to this path under the project root
    #[arg(short, long, value_name = "PATH")]
    pub output_file: Option<String>,

    /// Project root, defaults to the working directory
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Host configuration JSON describing the native projects
    #[arg(long, value_name = "FILE")]
    pub host_config: Option<PathBuf>,

    /// Compute the changes without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long)]
    pub directory: Option<PathBuf>,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("failed to change directory to {}", dir.display()))?;
        }

        let cwd = std::env::current_dir()?;
        info!(
            dir = %cwd.display(),
            dry_run = self.dry_run,
            "executing bump command"
        );

        let host = self.host_config(&cwd)?;

        let (config, config_path) = load_config_or_default(&config_dir(&host, &cwd))?;
        if let Some(path) = &config_path {
            debug!(path = %path.display(), "using config file");
        }

        let flags = self.flags(&config);
        debug!(?flags, "merged flags");

        let reporter = StdoutReporter::quiet(self.quiet || self.format == OutputFormat::Json);
        let Some(mut bumper) = from_host_config(&host, &flags, reporter)? else {
            return Ok(());
        };

        if self.dry_run {
            bumper.dry_run()?;
            self.print_report(bumper.report())?;
            return Ok(());
        }

        bumper.run()?;

        match self.format {
            OutputFormat::Json => self.print_report(bumper.report())?,
            OutputFormat::Text => {
                if !self.quiet {
                    let message = match &bumper.report().target_version {
                        Some(version) => format!(
                            "Bumped to {}",
                            output::version_style().apply_to(version)
                        ),
                        None => "Bumped build numbers".to_string(),
                    };
                    output::success(&message);
                }
            }
        }

        Ok(())
    }

    /// Host configuration from `--host-config`, or the detected default layout
    fn host_config(&self, cwd: &Path) -> anyhow::Result<HostConfig> {
        let root = self.root.as_ref().map(|root| cwd.join(root));

        let mut host = match &self.host_config {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read host config {}", path.display()))?;
                let host: HostConfig = serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse host config {}", path.display()))?;
                host
            }
            None => HostConfig::detect(root.as_deref().unwrap_or(cwd)),
        };

        if root.is_some() {
            host.root = root;
        }
        Ok(host)
    }

    /// Command-line values first, then config file defaults
    fn flags(&self, config: &Config) -> BumpFlags {
        fn non_empty(set: &appbump_core::SkipSet) -> Option<String> {
            (!set.is_empty()).then(|| set.to_string())
        }

        BumpFlags {
            release_type: self
                .release_type
                .clone()
                .or_else(|| config.release_type.map(|r| r.to_string())),
            semver: self.semver.clone(),
            skip_semver_for: self
                .skip_semver_for
                .clone()
                .or_else(|| non_empty(&config.skip_semver_for)),
            skip_code_for: self
                .skip_code_for
                .clone()
                .or_else(|| non_empty(&config.skip_code_for)),
            output_file: self.output_file.clone().or_else(|| {
                config
                    .output_file
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string())
            }),
        }
    }

    fn print_report(&self, report: &BumpReport) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(report)?);
            }
            OutputFormat::Text => {
                if self.quiet {
                    return Ok(());
                }
                println!("{}", output::header("Planned changes"));
                if let Some(version) = &report.target_version {
                    println!(
                        "{}",
                        output::key_value(
                            "Target version",
                            &output::version_style().apply_to(version).to_string()
                        )
                    );
                }
                print_bump("iOS build number", report.codes.ios.as_ref());
                print_bump("Android build number", report.codes.android.as_ref());
                if let Some(semver) = &report.semver {
                    print_bump("iOS version", semver.ios.as_ref());
                    print_bump("Android version", semver.android.as_ref());
                    print_bump("package.json version", Some(&semver.manifest));
                }
                println!();
                println!("Dry run: no files were written");
            }
        }
        Ok(())
    }
}

/// Where the config file search starts: the project root, else `cwd`
fn config_dir(host: &HostConfig, cwd: &Path) -> PathBuf {
    match &host.root {
        Some(root) if !root.as_os_str().is_empty() => cwd.join(root),
        _ => cwd.to_path_buf(),
    }
}

fn print_bump<T: std::fmt::Display>(label: &str, bump: Option<&Bump<T>>) {
    if let Some(bump) = bump {
        println!(
            "{}",
            output::key_value(label, &format!("{} -> {}", bump.previous, bump.next))
        );
    }
}
