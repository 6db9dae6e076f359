use anyhow::{Context, Result};
use crossterm::style::Stylize;
use log::debug;

use crate::linker::{DEFAULT_LINKER, Linker, install_hints};
use crate::runtime::Runtime;

use super::config::Config;

const IMPORT_QUESTION: &str = "Would you like to import configurations from $HOME/.config?";

/// Fail with installation hints unless the linker can be launched.
#[tracing::instrument(skip(linker))]
pub fn check_linker<L: Linker>(linker: &L) -> Result<()> {
    if linker.is_available() {
        return Ok(());
    }
    anyhow::bail!(linker_missing_message(&linker.program()))
}

pub fn linker_missing_message(program: &str) -> String {
    if program != DEFAULT_LINKER {
        return format!("{} is not installed or not found in PATH.", program);
    }

    let mut message = String::from(
        "GNU Stow is not installed or not found in PATH.\n\
         Please install it using your package manager:",
    );
    for (platform, command) in install_hints() {
        message.push_str(&format!("\n  - {}: {}", platform, command));
    }
    message
}

/// Create the package root if it does not exist yet.
///
/// Returns true when the directory was created.
#[tracing::instrument(skip(runtime, config))]
pub fn ensure_package_root<R: Runtime>(runtime: &R, config: &Config) -> Result<bool> {
    let root = &config.package_root;
    if runtime.exists(root) {
        return Ok(false);
    }

    runtime
        .create_dir_all(root)
        .with_context(|| format!("Failed to create packages directory {:?}", root))?;
    println!("Created packages directory: {}", root.display());
    Ok(true)
}

/// What to do once the package root is known to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupChoice {
    /// The root has content; run the requested action.
    Proceed,
    /// The root was empty and the user asked to import first.
    Import,
    /// The root was empty and the user declined to import.
    Exit,
}

/// When the package root is empty, ask whether to import first.
#[tracing::instrument(skip(runtime, config))]
pub fn offer_import_if_empty<R: Runtime>(runtime: &R, config: &Config) -> Result<StartupChoice> {
    let root = &config.package_root;
    let entries = runtime
        .read_dir(root)
        .with_context(|| format!("Failed to read packages directory {:?}", root))?;
    if !entries.is_empty() {
        return Ok(StartupChoice::Proceed);
    }

    debug!("Package root {:?} is empty", root);
    println!("{}", "No packages found to manage.".yellow());
    Ok(if runtime.ask_yes_no(IMPORT_QUESTION)? {
        StartupChoice::Import
    } else {
        StartupChoice::Exit
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::MockLinker;
    use crate::runtime::MockRuntime;
    use crate::test_utils::{test_home, test_package_root};
    use mockall::predicate::eq;

    fn config() -> Config {
        Config {
            package_root: test_package_root(),
            home: test_home(),
            linker: "stow".into(),
        }
    }

    #[test]
    fn test_check_linker_available() {
        let mut linker = MockLinker::new();
        linker.expect_is_available().returning(|| true);
        assert!(check_linker(&linker).is_ok());
    }

    #[test]
    fn test_check_linker_missing_lists_hints() {
        let mut linker = MockLinker::new();
        linker.expect_is_available().returning(|| false);
        linker.expect_program().returning(|| "stow".into());

        let message = check_linker(&linker).unwrap_err().to_string();

        assert!(message.starts_with("GNU Stow is not installed or not found in PATH."));
        assert!(message.contains("  - debian: sudo apt install stow"));
        assert!(message.contains("  - macos: brew install stow"));
    }

    #[test]
    fn test_missing_custom_linker_has_no_stow_hints() {
        let message = linker_missing_message("xstow");
        assert_eq!(message, "xstow is not installed or not found in PATH.");
    }

    #[test]
    fn test_ensure_package_root_creates_missing() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_exists()
            .with(eq(test_package_root()))
            .returning(|_| false);
        runtime
            .expect_create_dir_all()
            .with(eq(test_package_root()))
            .times(1)
            .returning(|_| Ok(()));

        assert!(ensure_package_root(&runtime, &config()).unwrap());
    }

    #[test]
    fn test_ensure_package_root_keeps_existing() {
        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime.expect_create_dir_all().never();

        assert!(!ensure_package_root(&runtime, &config()).unwrap());
    }

    #[test]
    fn test_offer_import_skipped_when_root_has_entries() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_dir()
            .returning(|p| Ok(vec![p.join("nvim")]));
        runtime.expect_ask_yes_no().never();

        assert_eq!(
            offer_import_if_empty(&runtime, &config()).unwrap(),
            StartupChoice::Proceed
        );
    }

    #[test]
    fn test_offer_import_on_empty_root_asks() {
        let mut runtime = MockRuntime::new();
        runtime.expect_read_dir().returning(|_| Ok(vec![]));
        runtime
            .expect_ask_yes_no()
            .with(eq(IMPORT_QUESTION))
            .times(1)
            .returning(|_| Ok(true));

        assert_eq!(
            offer_import_if_empty(&runtime, &config()).unwrap(),
            StartupChoice::Import
        );
    }

    #[test]
    fn test_offer_import_declined() {
        let mut runtime = MockRuntime::new();
        runtime.expect_read_dir().returning(|_| Ok(vec![]));
        runtime.expect_ask_yes_no().returning(|_| Ok(false));

        assert_eq!(
            offer_import_if_empty(&runtime, &config()).unwrap(),
            StartupChoice::Exit
        );
    }
}
