//! Runtime abstraction for system operations.
//!
//! This module provides a trait-based abstraction over system operations,
//! enabling dependency injection and testability.
//!
//! # Structure
//!
//! - `env` - Home and working directories
//! - `fs` - File system operations (directory listing, moves, removal)
//! - `symlink` - Symlink operations (read, detect, remove)
//! - `terminal` - Raw mode guard for single-key input
//! - `user` - User interaction (yes/no questions, Enter-to-confirm prompts)

mod env;
mod fs;
mod symlink;
pub mod terminal;
mod user;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use terminal::RawModeGuard;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime {
    // File System
    fn exists(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Move a file, directory or symlink. Falls back to copy-then-delete when
    /// `from` and `to` live on different filesystems.
    fn move_path(&self, from: &Path, to: &Path) -> Result<()>;

    // Symlinks
    fn is_symlink(&self, path: &Path) -> bool;
    fn read_link(&self, path: &Path) -> Result<PathBuf>;
    fn remove_symlink(&self, path: &Path) -> Result<()>;

    // Directories
    fn home_dir(&self) -> Option<PathBuf>;
    fn current_dir(&self) -> Result<PathBuf>;

    // User interaction
    /// Ask a yes/no question until the user answers. EOF counts as "no".
    fn ask_yes_no(&self, prompt: &str) -> Result<bool>;

    /// Print `prompt` and block until Enter (true) or Ctrl+C (false).
    fn wait_for_enter(&self, prompt: &str) -> Result<bool>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.is_dir_impl(path)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        self.read_dir_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.remove_dir_all_impl(path)
    }

    fn move_path(&self, from: &Path, to: &Path) -> Result<()> {
        self.move_path_impl(from, to)
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.is_symlink_impl(path)
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        self.read_link_impl(path)
    }

    fn remove_symlink(&self, path: &Path) -> Result<()> {
        self.remove_symlink_impl(path)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_dir_impl()
    }

    fn current_dir(&self) -> Result<PathBuf> {
        self.current_dir_impl()
    }

    fn ask_yes_no(&self, prompt: &str) -> Result<bool> {
        self.ask_yes_no_impl(prompt)
    }

    fn wait_for_enter(&self, prompt: &str) -> Result<bool> {
        self.wait_for_enter_impl(prompt)
    }
}
