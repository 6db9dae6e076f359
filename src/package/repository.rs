//! Package repository for stow-style package trees.
//!
//! A package is an immediate subdirectory of the package root. Its status is
//! never stored: it is derived from the symlinks found in the watched
//! directories every time it is asked for.

use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::error::StowmanError;
use crate::runtime::Runtime;

use super::Package;

/// A symlink found in a watched directory, with its raw (unresolved) target.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedLink {
    pub path: PathBuf,
    pub target: PathBuf,
}

impl WatchedLink {
    /// File name of the link itself, e.g. `nvim` for `~/.config/nvim`.
    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// Repository for the packages under one package root.
pub struct PackageRepository<'a, R: Runtime> {
    runtime: &'a R,
    package_root: PathBuf,
    home: PathBuf,
}

impl<'a, R: Runtime> PackageRepository<'a, R> {
    pub fn new(runtime: &'a R, package_root: PathBuf, home: PathBuf) -> Self {
        Self {
            runtime,
            package_root,
            home,
        }
    }

    pub fn runtime(&self) -> &'a R {
        self.runtime
    }

    pub fn package_root(&self) -> &Path {
        &self.package_root
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Returns: `<home>/.config`
    pub fn config_dir(&self) -> PathBuf {
        self.home.join(".config")
    }

    /// Returns: `<package_root>/<name>`
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.package_root.join(name)
    }

    /// Directories scanned for evidence of installation, in scan order.
    pub fn watched_dirs(&self) -> [PathBuf; 2] {
        [self.home.clone(), self.config_dir()]
    }

    /// Last component of the package root, e.g. `packages`.
    fn root_segment(&self) -> String {
        self.package_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Sorted names of all packages, without looking at their status.
    pub fn available_names(&self) -> Result<Vec<String>> {
        if !self.runtime.is_dir(&self.package_root) {
            return Err(StowmanError::not_found("Directory", &self.package_root).into());
        }

        let mut names = Vec::new();
        for entry in self.runtime.read_dir(&self.package_root)? {
            if let Some(name) = entry.file_name().and_then(|n| n.to_str())
                && self.runtime.is_dir(&entry)
            {
                names.push(name.to_string());
            }
        }
        names.sort();

        Ok(names)
    }

    /// All packages with their installation status, sorted by name.
    pub fn list_packages(&self) -> Result<Vec<Package>> {
        let names = self.available_names()?;
        let links = self.watched_links();

        debug!(
            "Found {} package(s) and {} watched symlink(s)",
            names.len(),
            links.len()
        );

        Ok(names
            .into_iter()
            .map(|name| {
                let installed = self.is_installed_in(&name, &links);
                Package { name, installed }
            })
            .collect())
    }

    /// Check whether any watched directory holds a symlink into this package.
    pub fn is_installed(&self, name: &str) -> bool {
        self.is_installed_in(name, &self.watched_links())
    }

    fn is_installed_in(&self, name: &str, links: &[WatchedLink]) -> bool {
        let needle = format!("{}/{}/", self.root_segment(), name);
        links
            .iter()
            .any(|link| link.target.to_string_lossy().contains(&needle))
    }

    /// Fail unless every requested name is a known package.
    pub fn verify_exist(&self, names: &[String]) -> Result<()> {
        let available = self.available_names()?;
        let mut invalid: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|name| !available.iter().any(|a| a == name))
            .collect();

        if invalid.is_empty() {
            return Ok(());
        }

        invalid.sort();
        invalid.dedup();
        Err(StowmanError::validation(format!(
            "The following packages do not exist: {}\nAvailable packages are: {}",
            invalid.join(", "),
            available.join(", ")
        ))
        .into())
    }

    /// Name of the package a link target points into, if any.
    ///
    /// `../../packages/nvim/.config/nvim` yields `nvim` for a root named `packages`.
    pub fn owning_package(&self, target: &Path) -> Option<String> {
        let target = target.to_string_lossy();
        let prefix = format!("{}/", self.root_segment());

        target.match_indices(&prefix).find_map(|(index, _)| {
            let rest = &target[index + prefix.len()..];
            let (name, _) = rest.split_once('/')?;
            (!name.is_empty()).then(|| name.to_string())
        })
    }

    /// Symlinks directly inside every watched directory.
    ///
    /// A missing watched directory is skipped; one that cannot be read is
    /// reported as a warning and the scan continues with partial results.
    pub fn watched_links(&self) -> Vec<WatchedLink> {
        self.watched_dirs()
            .iter()
            .flat_map(|dir| self.links_in(dir))
            .collect()
    }

    /// Symlinks directly inside one directory, with the same error policy as
    /// [`Self::watched_links`].
    pub fn links_in(&self, dir: &Path) -> Vec<WatchedLink> {
        if !self.runtime.exists(dir) {
            debug!("Watched directory {:?} does not exist, skipping", dir);
            return vec![];
        }

        let entries = match self.runtime.read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("Warning: Could not access {}: {}", dir.display(), e);
                return vec![];
            }
        };

        entries
            .into_iter()
            .filter(|entry| self.runtime.is_symlink(entry))
            .filter_map(|entry| match self.runtime.read_link(&entry) {
                Ok(target) => Some(WatchedLink {
                    path: entry,
                    target,
                }),
                Err(e) => {
                    debug!("Cannot read symlink {:?}: {}", entry, e);
                    None
                }
            })
            .collect()
    }
}
