use std::io::{self, BufRead, Write};

use crate::i18n::t;

/// Blocks until a line (or EOF) arrives on `input`, so a console window
/// opened by double-click stays up long enough to read the error.
pub fn wait_for_enter<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    writeln!(output, "\n{}", t!("prompt.press_enter"))?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}
