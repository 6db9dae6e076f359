use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use stowman::commands::{self, Action, Config, ListFilter};
use stowman::linker::StowLinker;
use stowman::runtime::RealRuntime;

/// stowman - GNU Stow package manager
///
/// Enable and disable dotfile packages kept under one package root, or import
/// existing ~/.config directories into it.
///
/// Without flags, opens an interactive menu.
///
/// Examples:
///   stowman                 # Toggle packages interactively
///   stowman -i nvim tmux    # Enable nvim and tmux
///   stowman --list-all      # Show every package with its status
#[derive(Parser, Debug)]
#[command(author, version = env!("STOWMAN_VERSION"), about)]
#[command(group(
    ArgGroup::new("mode")
        .args(["install", "remove", "list_enabled", "list_disabled", "list_all", "import"])
        .multiple(false)
))]
struct Cli {
    /// Enable the given packages
    #[arg(short = 'i', long, value_name = "PACKAGE", num_args = 1..)]
    install: Vec<String>,

    /// Disable the given packages
    #[arg(short = 'r', long, value_name = "PACKAGE", num_args = 1..)]
    remove: Vec<String>,

    /// List enabled packages
    #[arg(long, visible_alias = "le")]
    list_enabled: bool,

    /// List disabled packages
    #[arg(long, visible_alias = "ld")]
    list_disabled: bool,

    /// List all packages grouped by status
    #[arg(long, visible_alias = "la")]
    list_all: bool,

    /// Import configurations from ~/.config into the package root
    #[arg(long)]
    import: bool,

    /// Package root directory (defaults to ./packages; also via STOWMAN_ROOT)
    #[arg(long = "root", env = "STOWMAN_ROOT", value_name = "PATH")]
    package_root: Option<PathBuf>,

    /// Program used to link packages (defaults to stow; also via STOWMAN_LINKER)
    #[arg(long, env = "STOWMAN_LINKER", value_name = "PROGRAM")]
    linker: Option<String>,
}

impl Cli {
    fn action(&self) -> Action {
        if !self.install.is_empty() {
            Action::Install(self.install.clone())
        } else if !self.remove.is_empty() {
            Action::Remove(self.remove.clone())
        } else if self.list_enabled {
            Action::List(ListFilter::Enabled)
        } else if self.list_disabled {
            Action::List(ListFilter::Disabled)
        } else if self.list_all {
            Action::List(ListFilter::All)
        } else if self.import {
            Action::Import
        } else {
            Action::Interactive
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let runtime = RealRuntime;
    let config = Config::load(&runtime, cli.package_root.clone(), cli.linker.clone())?;
    let linker = StowLinker::new(config.linker.clone());

    commands::run(&runtime, &linker, &config, cli.action())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_flags_is_interactive() {
        let cli = Cli::try_parse_from(["stowman"]).unwrap();
        assert_eq!(cli.action(), Action::Interactive);
    }

    #[test]
    fn test_cli_install_parsing() {
        let cli = Cli::try_parse_from(["stowman", "-i", "nvim", "tmux"]).unwrap();
        assert_eq!(
            cli.action(),
            Action::Install(vec!["nvim".into(), "tmux".into()])
        );
    }

    #[test]
    fn test_cli_remove_parsing() {
        let cli = Cli::try_parse_from(["stowman", "--remove", "git"]).unwrap();
        assert_eq!(cli.action(), Action::Remove(vec!["git".into()]));
    }

    #[test]
    fn test_cli_install_requires_a_name() {
        assert!(Cli::try_parse_from(["stowman", "-i"]).is_err());
    }

    #[test]
    fn test_cli_list_aliases() {
        let cli = Cli::try_parse_from(["stowman", "--le"]).unwrap();
        assert_eq!(cli.action(), Action::List(ListFilter::Enabled));

        let cli = Cli::try_parse_from(["stowman", "--ld"]).unwrap();
        assert_eq!(cli.action(), Action::List(ListFilter::Disabled));

        let cli = Cli::try_parse_from(["stowman", "--list-all"]).unwrap();
        assert_eq!(cli.action(), Action::List(ListFilter::All));
    }

    #[test]
    fn test_cli_import_parsing() {
        let cli = Cli::try_parse_from(["stowman", "--import"]).unwrap();
        assert_eq!(cli.action(), Action::Import);
    }

    #[test]
    fn test_cli_modes_are_exclusive() {
        assert!(Cli::try_parse_from(["stowman", "--import", "--la"]).is_err());
        assert!(Cli::try_parse_from(["stowman", "-i", "nvim", "-r", "tmux"]).is_err());
    }

    #[test]
    fn test_cli_root_and_linker_parsing() {
        let cli = Cli::try_parse_from([
            "stowman",
            "--root",
            "/tmp/packages",
            "--linker",
            "xstow",
            "--le",
        ])
        .unwrap();
        assert_eq!(cli.package_root, Some(PathBuf::from("/tmp/packages")));
        assert_eq!(cli.linker.as_deref(), Some("xstow"));
    }
}
