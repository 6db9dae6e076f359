//! Import of live configuration directories into the package root, and the
//! reverse.
//!
//! Importing `~/.config/<name>` moves it to `<root>/<name>/.config/<name>` and
//! links the package, so the live path becomes a symlink into the package.
//! De-importing moves the stored tree back and drops the package directory.

mod entry;

use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::StowmanError;
use crate::linker::{LinkOutcome, Linker, LinkerGateway};
use crate::package::PackageRepository;
use crate::runtime::Runtime;

pub use entry::{ConfigEntry, EntryKind, EntryLocation};

/// Name of the structural sub-path for entries living under `~/.config`.
const CONFIG_SUBDIR: &str = ".config";

pub struct ConfigImporter<'a, R: Runtime, L: Linker> {
    packages: PackageRepository<'a, R>,
    gateway: LinkerGateway<'a, L>,
}

impl<'a, R: Runtime, L: Linker> ConfigImporter<'a, R, L> {
    pub fn new(packages: PackageRepository<'a, R>, gateway: LinkerGateway<'a, L>) -> Self {
        Self { packages, gateway }
    }

    pub fn packages(&self) -> &PackageRepository<'a, R> {
        &self.packages
    }

    fn runtime(&self) -> &'a R {
        self.packages.runtime()
    }

    /// True for anything present at `path`, dangling symlinks included.
    fn is_present(&self, path: &Path) -> bool {
        self.runtime().is_symlink(path) || self.runtime().exists(path)
    }

    /// Every entry the import menu offers, unique by name and sorted by label.
    ///
    /// Returns an empty list when `~/.config` does not exist.
    #[tracing::instrument(skip(self))]
    pub fn list_importable(&self) -> Result<Vec<ConfigEntry>> {
        let runtime = self.runtime();
        let config_dir = self.packages.config_dir();
        if !runtime.is_dir(&config_dir) {
            debug!("No config directory at {:?}", config_dir);
            return Ok(vec![]);
        }

        let available: BTreeSet<String> = self.packages.available_names()?.into_iter().collect();
        let mut entries: BTreeMap<String, EntryKind> = BTreeMap::new();

        let managed_owner = |target: &Path| {
            self.packages
                .owning_package(target)
                .filter(|owner| available.contains(owner))
        };

        let config_paths = match runtime.read_dir(&config_dir) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Warning: Could not access {}: {}", config_dir.display(), e);
                vec![]
            }
        };

        for path in config_paths {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if runtime.is_symlink(&path) {
                let owner = runtime
                    .read_link(&path)
                    .ok()
                    .and_then(|target| managed_owner(&target));
                match owner {
                    Some(owner) => {
                        entries
                            .entry(owner)
                            .or_insert(EntryKind::Imported(EntryLocation::Config));
                    }
                    None => {
                        entries.entry(name.to_string()).or_insert(EntryKind::Unmanaged);
                    }
                }
            } else if runtime.is_dir(&path) {
                entries.entry(name.to_string()).or_insert(EntryKind::Unmanaged);
            }
        }

        for link in self.packages.links_in(self.packages.home()) {
            if let Some(owner) = managed_owner(&link.target) {
                entries
                    .entry(owner)
                    .or_insert(EntryKind::Imported(EntryLocation::Home));
            }
        }

        for name in available {
            entries.entry(name).or_insert(EntryKind::KnownButAbsent);
        }

        let mut entries: Vec<ConfigEntry> = entries
            .into_iter()
            .map(|(name, kind)| ConfigEntry::new(name, kind))
            .collect();
        entries.sort_by_key(ConfigEntry::label);

        Ok(entries)
    }

    /// Live path of an unmanaged entry, looked up in `~/.config` then `~`.
    fn live_source(&self, name: &str) -> Result<(PathBuf, EntryLocation)> {
        let config_candidate = self.packages.config_dir().join(name);
        if self.is_present(&config_candidate) {
            return Ok((config_candidate, EntryLocation::Config));
        }

        let home_candidate = self.packages.home().join(name);
        if self.is_present(&home_candidate) {
            return Ok((home_candidate, EntryLocation::Home));
        }

        Err(StowmanError::not_found("Configuration", config_candidate).into())
    }

    /// Move a live entry into the package root and link it back.
    ///
    /// The move has happened once this returns `Ok`, whatever the link outcome.
    #[tracing::instrument(skip(self))]
    pub fn import_entry(&self, name: &str) -> Result<LinkOutcome> {
        let runtime = self.runtime();
        let (source, location) = self.live_source(name)?;

        let package_dir = self.packages.package_dir(name);
        let store_dir = match location {
            EntryLocation::Config => package_dir.join(CONFIG_SUBDIR),
            EntryLocation::Home => package_dir.clone(),
        };
        let dest = store_dir.join(name);

        if self.is_present(&dest) {
            return Err(StowmanError::Conflict { path: dest }.into());
        }

        let package_existed = self.is_present(&package_dir);
        let store_existed = self.is_present(&store_dir);
        runtime
            .create_dir_all(&store_dir)
            .with_context(|| format!("Failed to create {:?}", store_dir))?;

        if let Err(e) = runtime.move_path(&source, &dest) {
            if !store_existed {
                self.discard_if_empty(&store_dir);
            }
            if !package_existed {
                self.discard_if_empty(&package_dir);
            }
            return Err(e);
        }
        info!("Moved {:?} to {:?}", source, dest);

        Ok(self.gateway.apply(name, true))
    }

    /// Move a package's stored tree back to its live location and remove the
    /// package directory.
    #[tracing::instrument(skip(self))]
    pub fn deimport_entry(&self, name: &str) -> Result<()> {
        let runtime = self.runtime();
        let package_dir = self.packages.package_dir(name);
        let nested = package_dir.join(CONFIG_SUBDIR);

        let (stored, live) = if runtime.exists(&nested) {
            (nested.join(name), self.packages.config_dir().join(name))
        } else {
            (package_dir.join(name), self.packages.home().join(name))
        };

        if !self.is_present(&stored) {
            return Err(StowmanError::not_found("Stored configuration", stored).into());
        }

        if runtime.is_symlink(&live) {
            debug!("Removing symlink {:?}", live);
            runtime.remove_symlink(&live)?;
        } else if runtime.exists(&live) {
            return Err(StowmanError::Conflict { path: live }.into());
        }

        if let Some(parent) = live.parent()
            && !runtime.exists(parent)
        {
            runtime.create_dir_all(parent)?;
        }
        runtime.move_path(&stored, &live)?;
        info!("Moved {:?} back to {:?}", stored, live);

        self.remove_if_empty(&nested)?;
        self.remove_if_empty(&package_dir)?;
        Ok(())
    }

    /// Best-effort removal of a directory left empty by a failed import.
    fn discard_if_empty(&self, dir: &Path) {
        let runtime = self.runtime();
        if !runtime.is_dir(dir) {
            return;
        }
        match runtime.read_dir(dir) {
            Ok(entries) if entries.is_empty() => {
                if let Err(e) = runtime.remove_dir_all(dir) {
                    debug!("Cannot remove {:?}: {}", dir, e);
                }
            }
            Ok(_) => {}
            Err(e) => debug!("Cannot read {:?}: {}", dir, e),
        }
    }

    fn remove_if_empty(&self, dir: &Path) -> Result<()> {
        let runtime = self.runtime();
        if !runtime.is_dir(dir) {
            return Ok(());
        }
        if runtime.read_dir(dir)?.is_empty() {
            runtime.remove_dir_all(dir)?;
        } else {
            eprintln!(
                "Warning: {} still has other files, leaving it in place",
                dir.display()
            );
        }
        Ok(())
    }
}
