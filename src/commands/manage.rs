use anyhow::Result;
use log::debug;

use crate::changeset::ChangeSet;
use crate::linker::{BatchReport, Linker};
use crate::runtime::Runtime;

use super::config::Config;

/// Link the named packages. Unknown names fail before anything is linked.
#[tracing::instrument(skip(runtime, linker, config))]
pub fn install<R: Runtime, L: Linker>(
    runtime: &R,
    linker: &L,
    config: &Config,
    names: &[String],
) -> Result<BatchReport> {
    config.repository(runtime).verify_exist(names)?;

    let change_set = ChangeSet {
        to_enable: names.iter().cloned().collect(),
        ..Default::default()
    };
    apply(linker, config, &change_set)
}

/// Unlink the named packages. Unknown names fail before anything is unlinked.
#[tracing::instrument(skip(runtime, linker, config))]
pub fn remove<R: Runtime, L: Linker>(
    runtime: &R,
    linker: &L,
    config: &Config,
    names: &[String],
) -> Result<BatchReport> {
    config.repository(runtime).verify_exist(names)?;

    let change_set = ChangeSet {
        to_disable: names.iter().cloned().collect(),
        ..Default::default()
    };
    apply(linker, config, &change_set)
}

/// Run a change set and log the tally. Per-package failures are already
/// printed by the gateway and do not fail the command.
pub(super) fn apply<L: Linker>(
    linker: &L,
    config: &Config,
    change_set: &ChangeSet,
) -> Result<BatchReport> {
    let report = config.gateway(linker).apply_change_set(change_set);
    debug!(
        "{} package(s) changed, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StowmanError;
    use crate::linker::{LinkAction, LinkOutcome, LinkerOutput, MockLinker};
    use crate::runtime::RealRuntime;
    use crate::test_utils::TempPackages;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_install_links_each_package_once() {
        let packages = TempPackages::new(&["nvim", "tmux"]);
        let mut linker = MockLinker::new();
        linker.expect_program().returning(|| "stow".into());
        linker
            .expect_invoke()
            .withf(|req| req.action == LinkAction::Enable)
            .times(2)
            .returning(|_| {
                Ok(LinkerOutput {
                    success: true,
                    stderr: String::new(),
                })
            });

        let report = install(
            &RealRuntime,
            &linker,
            &packages.config(),
            &names(&["tmux", "nvim", "tmux"]),
        )
        .unwrap();

        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.outcomes[0].name, "nvim");
    }

    #[test]
    fn test_install_unknown_package_links_nothing() {
        let packages = TempPackages::new(&["nvim", "tmux"]);
        let mut linker = MockLinker::new();
        linker.expect_invoke().never();

        let err = install(
            &RealRuntime,
            &linker,
            &packages.config(),
            &names(&["doesnotexist"]),
        )
        .unwrap_err();

        let Some(StowmanError::Validation { message }) = err.downcast_ref::<StowmanError>() else {
            panic!("expected a validation error, got {:?}", err);
        };
        assert_eq!(
            message,
            "The following packages do not exist: doesnotexist\nAvailable packages are: nvim, tmux"
        );
    }

    #[test]
    fn test_remove_keeps_going_after_a_failure() {
        let packages = TempPackages::new(&["git", "nvim"]);
        let mut linker = MockLinker::new();
        linker.expect_program().returning(|| "stow".into());
        linker
            .expect_invoke()
            .withf(|req| req.action == LinkAction::Disable)
            .returning(|req| {
                Ok(LinkerOutput {
                    success: req.package != "git",
                    stderr: "not stowed".into(),
                })
            });

        let report = remove(
            &RealRuntime,
            &linker,
            &packages.config(),
            &names(&["git", "nvim"]),
        )
        .unwrap();

        assert_eq!(report.succeeded(), 1);
        assert_eq!(
            report.outcomes[0].outcome,
            LinkOutcome::Failed {
                stderr: "not stowed".into()
            }
        );
    }
}
