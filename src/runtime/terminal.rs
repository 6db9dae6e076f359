//! Raw terminal mode, scoped to a guard.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::debug;

/// Keeps the terminal in raw mode (no echo, no line buffering, no signal keys)
/// until dropped.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enable() -> Result<Self> {
        enable_raw_mode().context("Failed to switch terminal to raw mode")?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            debug!("Failed to restore terminal mode: {}", e);
        }
    }
}
