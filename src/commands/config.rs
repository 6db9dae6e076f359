use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::StowmanError;
use crate::linker::{DEFAULT_LINKER, Linker, LinkerGateway};
use crate::package::PackageRepository;
use crate::runtime::Runtime;

/// Package root used when neither `--root` nor `STOWMAN_ROOT` is given,
/// relative to the current directory.
pub const DEFAULT_PACKAGE_ROOT: &str = "packages";

/// Settings resolved once per invocation from flags, environment and runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Absolute directory holding one subdirectory per package.
    pub package_root: PathBuf,
    /// Link target and parent of the config directory.
    pub home: PathBuf,
    /// Program invoked to link and unlink packages.
    pub linker: String,
}

impl Config {
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(
        runtime: &R,
        package_root: Option<PathBuf>,
        linker: Option<String>,
    ) -> Result<Self> {
        let home = runtime.home_dir().ok_or(StowmanError::HomeDirUnavailable)?;

        let root = package_root.unwrap_or_else(|| PathBuf::from(DEFAULT_PACKAGE_ROOT));
        let package_root = if root.is_absolute() {
            root
        } else {
            let cwd = runtime
                .current_dir()
                .context("Failed to determine the current directory")?;
            cwd.join(strip_current_dir(&root))
        };

        let linker = linker
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LINKER.to_string());

        debug!(
            "Using package root {:?}, home {:?}, linker {}",
            package_root, home, linker
        );

        Ok(Self {
            package_root,
            home,
            linker,
        })
    }

    pub fn repository<'a, R: Runtime>(&self, runtime: &'a R) -> PackageRepository<'a, R> {
        PackageRepository::new(runtime, self.package_root.clone(), self.home.clone())
    }

    /// Gateway linking packages from the package root into the home directory.
    pub fn gateway<'a, L: Linker>(&self, linker: &'a L) -> LinkerGateway<'a, L> {
        LinkerGateway::new(linker, self.package_root.clone(), self.home.clone())
    }
}

/// `./packages` -> `packages`, so the root keeps a clean last segment.
fn strip_current_dir(path: &Path) -> &Path {
    let mut path = path;
    while let Ok(rest) = path.strip_prefix(".") {
        path = rest;
    }
    path
}
