//! Interactive route file menu
//!
//! Lists the candidates with 1-based numbers and reads the user's choice.

use butterfly_view::{Result, Selection};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Show the numbered candidate list on `output` and read a choice from `input`
pub fn prompt_selection<R: BufRead, W: Write>(
    candidates: &[PathBuf],
    input: &mut R,
    output: &mut W,
) -> Result<Selection> {
    writeln!(output, "Choose a route file to display:")?;
    for (i, path) in candidates.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        writeln!(output, "{}. {}", i + 1, name)?;
    }
    write!(output, "Choice: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    answer.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn candidates() -> Vec<PathBuf> {
        vec![
            PathBuf::from("out/rutas_base.txt"),
            PathBuf::from("out/rutas_grasp.txt"),
        ]
    }

    #[test]
    fn test_prompt_lists_candidates() {
        let mut output = Vec::new();
        let selection =
            prompt_selection(&candidates(), &mut Cursor::new("2\n"), &mut output).unwrap();

        assert_eq!(selection, Selection::Index(2));
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("1. rutas_base.txt"));
        assert!(shown.contains("2. rutas_grasp.txt"));
        assert!(shown.ends_with("Choice: "));
    }

    #[test]
    fn test_prompt_accepts_name() {
        let selection = prompt_selection(
            &candidates(),
            &mut Cursor::new("rutas_grasp.txt\n"),
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(selection, Selection::Name("rutas_grasp.txt".to_string()));
    }

    #[test]
    fn test_prompt_empty_answer() {
        // EOF on stdin leaves the answer empty
        let result = prompt_selection(&candidates(), &mut Cursor::new(""), &mut Vec::new());
        assert!(result.is_err());
    }
}
