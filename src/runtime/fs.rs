//! File system operations (directory listing, moves, removal).

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn read_dir_impl(&self, path: &Path) -> Result<Vec<PathBuf>> {
        fs::read_dir(path)?.map(|entry| Ok(entry?.path())).collect()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn create_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).context("Failed to create directory")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn remove_dir_all_impl(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).context("Failed to remove directory and its contents")?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn move_path_impl(&self, from: &Path, to: &Path) -> Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                debug!("{:?} and {:?} are on different devices, copying", from, to);
                copy_tree(from, to)
                    .with_context(|| format!("Failed to copy {:?} to {:?}", from, to))?;
                remove_any(from).with_context(|| format!("Failed to remove {:?}", from))
            }
            Err(e) => {
                Err(e).with_context(|| format!("Failed to move {:?} to {:?}", from, to))
            }
        }
    }
}

/// Copy a file, symlink or directory tree without following symlinks.
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from)?;
        let dest = if relative.as_os_str().is_empty() {
            to.to_path_buf()
        } else {
            to.join(relative)
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&dest)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

fn copy_symlink(link: &Path, dest: &Path) -> Result<()> {
    let target = fs::read_link(link)?;
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&target, dest)?;
    }
    #[cfg(windows)]
    {
        if link.is_dir() {
            std::os::windows::fs::symlink_dir(&target, dest)?;
        } else {
            std::os::windows::fs::symlink_file(&target, dest)?;
        }
    }
    Ok(())
}

fn remove_any(path: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::copy_tree;
    use crate::runtime::{RealRuntime, Runtime};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_dir_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("sub/nested");

        // Test create_dir_all
        runtime.create_dir_all(&sub_dir).unwrap();
        assert!(runtime.exists(&sub_dir));
        assert!(runtime.is_dir(&sub_dir));

        // Test read_dir
        let parent = dir.path().join("sub");
        let entries = runtime.read_dir(&parent).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].ends_with("nested"));

        // Test remove_dir_all
        runtime.remove_dir_all(&parent).unwrap();
        assert!(!runtime.exists(&parent));
    }

    #[test]
    fn test_move_path_moves_directory_tree() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let src = dir.path().join("nvim");
        fs::create_dir_all(src.join("lua")).unwrap();
        fs::write(src.join("init.lua"), "-- init").unwrap();
        fs::write(src.join("lua/plugins.lua"), "return {}").unwrap();

        let dest = dir.path().join("packages/nvim/.config/nvim");
        fs::create_dir_all(dest.parent().unwrap()).unwrap();

        runtime.move_path(&src, &dest).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dest.join("init.lua")).unwrap(), "-- init");
        assert!(dest.join("lua/plugins.lua").is_file());
    }

    #[test]
    fn test_move_path_missing_source_fails() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();

        let result = runtime.move_path(&dir.path().join("missing"), &dir.path().join("dest"));
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_tree_preserves_symlinks() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("real.conf"), "x").unwrap();
        std::os::unix::fs::symlink("real.conf", src.join("alias.conf")).unwrap();

        let dest = dir.path().join("dest");
        copy_tree(&src, &dest).unwrap();

        let alias = dest.join("alias.conf");
        assert!(fs::symlink_metadata(&alias).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&alias).unwrap(), std::path::Path::new("real.conf"));
        assert_eq!(fs::read_to_string(dest.join("real.conf")).unwrap(), "x");
    }
}
