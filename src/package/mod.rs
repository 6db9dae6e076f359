//! Package management module
//!
//! A package is one directory under the package root whose tree mirrors what
//! should appear under the home directory once linked.

mod repository;

pub use repository::{PackageRepository, WatchedLink};

/// A package and whether it is currently linked into a watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub installed: bool,
}

/// Split packages into (enabled, disabled) names, keeping their order.
pub fn partition_by_status(packages: &[Package]) -> (Vec<&str>, Vec<&str>) {
    let (enabled, disabled): (Vec<&Package>, Vec<&Package>) =
        packages.iter().partition(|p| p.installed);
    (
        enabled.into_iter().map(|p| p.name.as_str()).collect(),
        disabled.into_iter().map(|p| p.name.as_str()).collect(),
    )
}
