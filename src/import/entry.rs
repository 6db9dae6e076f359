/// Which watched directory a live entry was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLocation {
    /// `~/.config`
    Config,
    /// `~`
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A live directory or symlink not backed by a package.
    Unmanaged,
    /// A live symlink pointing into the package root.
    Imported(EntryLocation),
    /// A package with no live entry in any watched directory.
    KnownButAbsent,
}

/// A configuration entry as offered by the import menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl ConfigEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Whether the entry currently lives in the package root.
    pub fn is_managed(&self) -> bool {
        !matches!(self.kind, EntryKind::Unmanaged)
    }

    /// Display text. Never parsed back; use `name` for lookups.
    pub fn label(&self) -> String {
        match self.kind {
            EntryKind::Unmanaged => self.name.clone(),
            EntryKind::Imported(EntryLocation::Config) => format!("{} (enabled)", self.name),
            EntryKind::Imported(EntryLocation::Home) => {
                format!("{} (enabled) $HOME dir", self.name)
            }
            EntryKind::KnownButAbsent => format!("{} (disabled)", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(ConfigEntry::new("fish", EntryKind::Unmanaged).label(), "fish");
        assert_eq!(
            ConfigEntry::new("nvim", EntryKind::Imported(EntryLocation::Config)).label(),
            "nvim (enabled)"
        );
        assert_eq!(
            ConfigEntry::new("zsh", EntryKind::Imported(EntryLocation::Home)).label(),
            "zsh (enabled) $HOME dir"
        );
        assert_eq!(
            ConfigEntry::new("tmux", EntryKind::KnownButAbsent).label(),
            "tmux (disabled)"
        );
    }

    #[test]
    fn test_is_managed() {
        assert!(!ConfigEntry::new("fish", EntryKind::Unmanaged).is_managed());
        assert!(ConfigEntry::new("nvim", EntryKind::Imported(EntryLocation::Home)).is_managed());
        assert!(ConfigEntry::new("tmux", EntryKind::KnownButAbsent).is_managed());
    }
}
