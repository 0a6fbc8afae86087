//! Command line argument parsing and validation.
//!
//! Task names match the build script they replace, so existing habits and
//! CI invocations keep working: `copySystem`, `copyDist`, `--update=<v>`.

use crate::project::ProjectLayout;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build, deploy and release tooling for tabletop system and module packages
#[derive(Parser, Debug)]
#[command(
    name = "foundry_release",
    version,
    about = "Build, deploy and release tooling for tabletop system and module packages",
    long_about = "Build, deploy and release a package whose sources live in src/.

Usage:
  foundry_release build
  foundry_release deploy
  foundry_release update --update=minor
  foundry_release package --clean
  foundry_release publish -u=1.4.0"
)]
pub struct Args {
    /// Project root containing src/, dist/ and package.json
    #[arg(long, global = true, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Show detailed progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Task to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available tasks
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Remove built files from dist/
    Clean,

    /// Compile and copy on every change under src/
    Watch {
        /// Quiet period in milliseconds before a batch of changes triggers a rebuild
        #[arg(long, default_value_t = 200, value_name = "MS")]
        debounce: u64,
    },

    /// Zip dist/ into package/{name}-v{version}.zip
    Package {
        /// Remove package/ instead of packaging
        #[arg(short, long)]
        clean: bool,
    },

    /// Bump the manifest and package.json version and rewrite URLs
    Update {
        /// Exact MAJOR.MINOR.PATCH, or major, minor or patch
        #[arg(short = 'u', long = "update", value_name = "VERSION")]
        update: Option<String>,
    },

    /// Copy dist/ into the host's user data folder
    #[command(name = "copySystem")]
    CopySystem {
        /// Remove the deployed copy instead
        #[arg(short, long)]
        clean: bool,
    },

    /// Copy static files from src/ to dist/
    #[command(name = "copyDist")]
    CopyDist,

    /// clean, compile, copyDist
    Build,

    /// build, then copySystem
    Deploy,

    /// clean, build, update, package, commit and tag
    Publish {
        /// Exact MAJOR.MINOR.PATCH, or major, minor or patch
        #[arg(short = 'u', long = "update", value_name = "VERSION")]
        update: Option<String>,
    },
}

impl Command {
    /// Task name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Command::Clean => "clean",
            Command::Watch { .. } => "watch",
            Command::Package { .. } => "package",
            Command::Update { .. } => "update",
            Command::CopySystem { .. } => "copySystem",
            Command::CopyDist => "copyDist",
            Command::Build => "build",
            Command::Deploy => "deploy",
            Command::Publish { .. } => "publish",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.root.is_dir() {
            return Err(format!("Project root {} is not a directory", self.root.display()));
        }
        if let Command::Watch { debounce: 0 } = self.command {
            return Err("Watch debounce must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
    /// Project paths
    layout: ProjectLayout,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(output: super::OutputManager, layout: ProjectLayout) -> Self {
        Self { output, layout }
    }

    /// Build from parsed arguments
    pub fn from_args(args: &Args) -> std::io::Result<Self> {
        Ok(Self::new(
            super::OutputManager::new(args.verbose, args.quiet),
            ProjectLayout::new(&args.root)?,
        ))
    }

    /// Project paths
    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print info message
    pub fn info_println(&self, message: &str) {
        let _ = self.output.info(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        let _ = self.output.section(title);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Check if quiet output is enabled
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}
