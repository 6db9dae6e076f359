//! User interaction operations (yes/no questions, Enter-to-confirm prompts).

use anyhow::Result;

use super::RealRuntime;
use super::terminal::RawModeGuard;

use std::io::{self, BufRead, IsTerminal, Read, Write};

const CTRL_C: u8 = 0x03;
const CTRL_D: u8 = 0x04;

/// Core, testable implementation that reads from any BufRead and writes to any Write.
/// Re-asks until the answer is y/yes or n/no; EOF is treated as "no".
pub(crate) fn ask_yes_no_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    loop {
        write!(output, "{} (y/n): ", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(false);
        }

        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(output, "Please answer 'y' or 'n'")?,
        }
    }
}

/// Waits for Enter (returns true) or Ctrl+C / Ctrl+D / EOF (returns false).
/// Other bytes are ignored. Expects `input` to be unbuffered, e.g. a raw-mode terminal.
pub(crate) fn wait_for_enter_with_io<R: Read, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    writeln!(output, "{}", prompt)?;
    output.flush()?;

    let mut byte = [0u8; 1];
    loop {
        if input.read(&mut byte)? == 0 {
            return Ok(false);
        }
        match byte[0] {
            b'\r' | b'\n' => return Ok(true),
            CTRL_C | CTRL_D => return Ok(false),
            _ => {}
        }
    }
}

impl RealRuntime {
    pub(crate) fn ask_yes_no_impl(&self, prompt: &str) -> Result<bool> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stdin_lock = stdin.lock();
        ask_yes_no_with_io(prompt, &mut stdin_lock, &mut stdout)
    }

    pub(crate) fn wait_for_enter_impl(&self, prompt: &str) -> Result<bool> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        // Raw mode turns Ctrl+C into a plain byte instead of SIGINT.
        writeln!(stdout, "{}", prompt)?;
        stdout.flush()?;
        let _guard = if stdin.is_terminal() {
            Some(RawModeGuard::enable()?)
        } else {
            None
        };
        let mut stdin_lock = stdin.lock();
        wait_for_enter_with_io("", &mut stdin_lock, &mut io::sink())
    }
}
