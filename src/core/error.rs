//! Error types for butterfly-view
//!
//! One typed error enum covers the whole pipeline: reading route files, selecting
//! a candidate, and rendering. Fuzzy "did you mean" support for candidate names
//! lives here as well, next to the error that carries it.

use std::path::PathBuf;
use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

/// Main error type for butterfly-view operations
#[derive(Debug, Error)]
pub enum Error {
    /// The route file (or the directory being scanned) could not be opened or read
    #[error("Source '{}' is unavailable: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data line lacks tokens or carries a non-numeric / non-finite coordinate
    #[error("Malformed data line {line} ('{content}'): {reason}")]
    MalformedDataLine {
        line: usize,
        content: String,
        reason: String,
    },

    /// A route with no points reached the renderer
    #[error("Route {index} is empty and cannot be plotted")]
    EmptyRoute { index: usize },

    /// No route files matched the naming convention
    #[error("No route files found in '{}'", dir.display())]
    NoCandidates { dir: PathBuf },

    /// The menu choice or file name does not designate a candidate
    #[error("Invalid selection '{selection}': {reason}")]
    InvalidSelection { selection: String, reason: String },

    /// Destination image exists and overwriting was refused
    #[error("Output file already exists: {} (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),

    /// Invalid configuration or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Plotting backend failure
    #[error("Render error: {0}")]
    Render(String),

    /// Stream I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for butterfly-view operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimum combined similarity for a suggestion to be offered
const MIN_SUGGESTION_SCORE: f64 = 0.65;

/// Suggest the closest candidate file name for a mistyped selection
///
/// Candidates usually share the same prefix and extension (`rutas_*.txt`), which
/// would make every name look similar. Both sides are therefore compared on their
/// distinguishing stem only.
pub fn suggest_candidate(input: &str, candidates: &[String]) -> Option<String> {
    let prefix = common_prefix(candidates);
    let input_stem = distinguishing_stem(input, &prefix);

    let mut best_match = None;
    let mut best_score = 0.0f64;

    for candidate in candidates {
        let candidate_stem = distinguishing_stem(candidate, &prefix);

        if candidate_stem == input_stem {
            return Some(candidate.clone());
        }

        // Jaro-Winkler dominates; Levenshtein catches deletion-heavy typos
        let score = jaro_winkler(&input_stem, &candidate_stem) * 0.7
            + normalized_levenshtein(&input_stem, &candidate_stem) * 0.3;

        if score > best_score {
            best_score = score;
            best_match = Some(candidate.clone());
        }
    }

    if best_score >= MIN_SUGGESTION_SCORE {
        best_match
    } else {
        None
    }
}

fn common_prefix(candidates: &[String]) -> String {
    // A single candidate has no meaningful shared prefix
    let [first, ..] = candidates else {
        return String::new();
    };
    if candidates.len() == 1 {
        return String::new();
    }

    let mut len = first.len();
    for candidate in &candidates[1..] {
        len = first
            .char_indices()
            .zip(candidate.chars())
            .take_while(|((_, a), b)| a == b)
            .map(|((i, a), _)| i + a.len_utf8())
            .last()
            .unwrap_or(0)
            .min(len);
    }

    first[..len].to_string()
}

fn distinguishing_stem(name: &str, prefix: &str) -> String {
    let lower = name.to_lowercase();
    let stripped = lower.strip_prefix(&prefix.to_lowercase()).unwrap_or(&lower);
    stripped
        .strip_suffix(".txt")
        .unwrap_or(stripped)
        .to_string()
}
