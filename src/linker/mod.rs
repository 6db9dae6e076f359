//! External linking tool (GNU Stow by default).
//!
//! The rest of the crate only relies on the [`Linker`] contract: in link mode
//! it mirrors a package's tree into the target directory as symlinks, in
//! unlink mode it removes exactly those symlinks.

mod gateway;

use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;
use std::process::Command;

pub use gateway::{BatchReport, LinkOutcome, LinkerGateway, PackageOutcome};

/// Default program used as the linker.
pub const DEFAULT_LINKER: &str = "stow";

/// Whether a package is being linked or unlinked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkAction {
    Enable,
    Disable,
}

impl LinkAction {
    pub fn from_enable(enable: bool) -> Self {
        if enable {
            LinkAction::Enable
        } else {
            LinkAction::Disable
        }
    }

    /// "enable" / "disable"
    pub fn verb(&self) -> &'static str {
        match self {
            LinkAction::Enable => "enable",
            LinkAction::Disable => "disable",
        }
    }

    /// "Enabled" / "Disabled"
    pub fn past_tense(&self) -> &'static str {
        match self {
            LinkAction::Enable => "Enabled",
            LinkAction::Disable => "Disabled",
        }
    }
}

/// One linker invocation for one package.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRequest {
    /// Directory holding all packages; the linker runs with it as working directory.
    pub package_root: PathBuf,
    pub package: String,
    /// Directory the symlinks are created in (the home directory).
    pub target: PathBuf,
    pub action: LinkAction,
}

/// Exit status and error stream of a finished linker run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinkerOutput {
    pub success: bool,
    pub stderr: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait Linker {
    /// Program name, for messages.
    fn program(&self) -> String;

    /// Whether the tool can be launched at all.
    fn is_available(&self) -> bool;

    /// Run the tool once. `Err` means it could not be launched.
    fn invoke(&self, request: &LinkRequest) -> Result<LinkerOutput>;
}

/// [`Linker`] backed by GNU Stow (or any program with the same flags).
pub struct StowLinker {
    program: String,
}

impl StowLinker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for one request: `[-D] -d <root> -t <target> <package>`.
    pub fn args(request: &LinkRequest) -> Vec<std::ffi::OsString> {
        let mut args = Vec::new();
        if request.action == LinkAction::Disable {
            args.push("-D".into());
        }
        args.push("-d".into());
        args.push(request.package_root.clone().into_os_string());
        args.push("-t".into());
        args.push(request.target.clone().into_os_string());
        args.push(request.package.clone().into());
        args
    }
}

impl Default for StowLinker {
    fn default() -> Self {
        Self::new(DEFAULT_LINKER)
    }
}

impl Linker for StowLinker {
    fn program(&self) -> String {
        self.program.clone()
    }

    #[tracing::instrument(skip(self))]
    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .ok()
            .is_some_and(|output| output.status.success())
    }

    #[tracing::instrument(skip(self))]
    fn invoke(&self, request: &LinkRequest) -> Result<LinkerOutput> {
        let args = Self::args(request);
        debug!("Running {} {:?} in {:?}", self.program, args, request.package_root);

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(&request.package_root)
            .output()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        Ok(LinkerOutput {
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        })
    }
}

/// Per-platform hints shown when the linker program is missing.
pub fn install_hints() -> &'static [(&'static str, &'static str)] {
    &[
        ("debian", "sudo apt install stow"),
        ("fedora", "sudo dnf install stow"),
        ("arch", "sudo pacman -S stow"),
        ("macos", "brew install stow"),
    ]
}
