//! Interactive overwrite confirmation
//!
//! The library never asks; the CLI turns the user's answer into an
//! [`OverwriteBehavior`] before building the plotting surface.

use butterfly_view::{Error, OverwriteBehavior, Result};
use std::io::{BufRead, Write};
use std::path::Path;

/// Ask whether `path` may be overwritten, when it exists
///
/// Returns `Force` on a yes, `NeverOverwrite` when there is nothing to
/// overwrite, and [`Error::OutputExists`] on any other answer.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<OverwriteBehavior> {
    if !path.exists() {
        return Ok(OverwriteBehavior::NeverOverwrite);
    }

    writeln!(output, "⚠️  File already exists: {}", path.display())?;
    write!(output, "Overwrite? [y/N]: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => {
            writeln!(output, "✅ Overwriting file")?;
            Ok(OverwriteBehavior::Force)
        }
        _ => {
            writeln!(output, "❌ Rendering cancelled")?;
            Err(Error::OutputExists(path.to_path_buf()))
        }
    }
}
