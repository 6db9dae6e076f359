pub mod changeset;
pub mod commands;
pub mod error;
pub mod import;
pub mod linker;
pub mod package;
pub mod runtime;
pub mod selector;
pub mod snapshot;

/// Test utilities for cross-platform path handling.
#[cfg(test)]
pub mod test_utils {
    use crate::commands::Config;
    use crate::runtime::{MockRuntime, RealRuntime, Runtime};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Returns a test home directory path based on the platform.
    /// - Unix: `/home/user`
    /// - Windows: `C:\Users\user`
    pub fn test_home() -> PathBuf {
        #[cfg(not(windows))]
        {
            PathBuf::from("/home/user")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\Users\user")
        }
    }

    /// Returns the test package root, `<home>/dotfiles/packages`.
    pub fn test_package_root() -> PathBuf {
        test_home().join("dotfiles").join("packages")
    }

    /// Configure a mock runtime with common defaults for tests.
    /// - home dir set to [`test_home`]
    /// - current_dir set to `<home>/dotfiles`
    pub fn configure_mock_runtime_basics(runtime: &mut MockRuntime) {
        runtime.expect_home_dir().returning(|| Some(test_home()));
        runtime
            .expect_current_dir()
            .returning(|| Ok(test_home().join("dotfiles")));
    }

    /// A mock runtime whose filesystem operations hit the real filesystem.
    /// Prompt expectations are left to the test.
    pub fn mock_runtime_on_real_fs() -> MockRuntime {
        let mut runtime = MockRuntime::new();
        configure_real_fs(&mut runtime);
        runtime
            .expect_move_path()
            .returning(|from, to| RealRuntime.move_path(from, to));
        runtime
    }

    /// Delegate every filesystem and symlink operation except `move_path` to
    /// the real filesystem.
    pub fn configure_real_fs(runtime: &mut MockRuntime) {
        runtime.expect_exists().returning(|p| RealRuntime.exists(p));
        runtime.expect_is_dir().returning(|p| RealRuntime.is_dir(p));
        runtime.expect_read_dir().returning(|p| RealRuntime.read_dir(p));
        runtime
            .expect_create_dir_all()
            .returning(|p| RealRuntime.create_dir_all(p));
        runtime
            .expect_remove_dir_all()
            .returning(|p| RealRuntime.remove_dir_all(p));
        runtime
            .expect_is_symlink()
            .returning(|p| RealRuntime.is_symlink(p));
        runtime
            .expect_read_link()
            .returning(|p| RealRuntime.read_link(p));
        runtime
            .expect_remove_symlink()
            .returning(|p| RealRuntime.remove_symlink(p));
    }

    /// A temporary home with `.config`, and a package root at
    /// `<tmp>/dotfiles/packages` holding one empty directory per name.
    pub struct TempPackages {
        _dir: TempDir,
        pub home: PathBuf,
        pub root: PathBuf,
    }

    impl TempPackages {
        pub fn new(names: &[&str]) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let home = dir.path().join("home");
            let root = dir.path().join("dotfiles").join("packages");
            fs::create_dir_all(home.join(".config")).unwrap();
            fs::create_dir_all(&root).unwrap();
            for name in names {
                fs::create_dir_all(root.join(name)).unwrap();
            }
            Self {
                _dir: dir,
                home,
                root,
            }
        }

        pub fn config_dir(&self) -> PathBuf {
            self.home.join(".config")
        }

        pub fn config(&self) -> Config {
            Config {
                package_root: self.root.clone(),
                home: self.home.clone(),
                linker: "stow".into(),
            }
        }

        /// Create an unmanaged `~/.config/<name>` directory.
        pub fn write_config(&self, name: &str) {
            fs::create_dir_all(self.config_dir().join(name)).unwrap();
        }

        /// Store `<name>` under the package and link `~/.config/<name>` to it.
        #[cfg(unix)]
        pub fn link_config(&self, name: &str) {
            let stored = self.root.join(name).join(".config").join(name);
            fs::create_dir_all(&stored).unwrap();
            std::os::unix::fs::symlink(&stored, self.config_dir().join(name)).unwrap();
        }
    }
}
