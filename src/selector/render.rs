use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::Write;

use crate::snapshot::SelectionItem;

pub const CONTROLS: &str =
    "↑/k/p: Up | ↓/j/n: Down | Space: Toggle | Enter: Confirm | q: Quit";

/// `"> [*] label"` for the row under the cursor, `"  [ ] label"` otherwise.
pub fn menu_line(item: &SelectionItem, active: bool) -> String {
    let cursor = if active { "> " } else { "  " };
    let mark = if item.selected { "[*]" } else { "[ ]" };
    format!("{}{} {}", cursor, mark, item.label)
}

/// Clear the screen and draw the whole menu.
pub fn render_menu<W: Write>(
    out: &mut W,
    title: &str,
    items: &[SelectionItem],
    active: usize,
) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(out, "{}\n", title)?;

    for (index, item) in items.iter().enumerate() {
        writeln!(out, "{}", menu_line(item, index == active))?;
    }

    writeln!(out, "\nControls:")?;
    writeln!(out, "{}", CONTROLS)?;
    out.flush()?;
    Ok(())
}
