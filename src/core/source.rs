//! Source discovery and selection for butterfly-view
//!
//! Route files follow a fixed naming convention (`rutas_*.txt`). Discovery
//! lists them; selection resolves a menu number or a file name to one of them.

use log::debug;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::error::{suggest_candidate, Error, Result};

/// Naming convention for route files
pub struct SourceConfig {
    /// File name prefix
    pub prefix: String,

    /// File name suffix, including the dot
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            prefix: "rutas_".to_string(),
            extension: ".txt".to_string(),
        }
    }
}

impl SourceConfig {
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.prefix) && file_name.ends_with(&self.extension)
    }
}

/// List route files in `dir`, sorted by file name
pub fn discover_candidates(dir: &Path, config: &SourceConfig) -> Result<Vec<PathBuf>> {
    let unavailable = |source: std::io::Error| Error::SourceUnavailable {
        path: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(unavailable)? {
        let entry = entry.map_err(unavailable)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| config.matches(name))
        {
            candidates.push(path);
        }
    }

    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!("Found {} route files in {}", candidates.len(), dir.display());
    Ok(candidates)
}

/// A user's choice among candidates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 1-based position in the candidate list
    Index(usize),
    /// File name of the candidate
    Name(String),
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidSelection {
                selection: String::new(),
                reason: "no choice given".to_string(),
            });
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            let index = s.parse().map_err(|_| Error::InvalidSelection {
                selection: s.to_string(),
                reason: "number out of range".to_string(),
            })?;
            return Ok(Selection::Index(index));
        }
        Ok(Selection::Name(s.to_string()))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Index(i) => write!(f, "{i}"),
            Selection::Name(name) => f.write_str(name),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Resolve `selection` against `candidates`
pub fn select_candidate<'a>(candidates: &'a [PathBuf], selection: &Selection) -> Result<&'a Path> {
    if candidates.is_empty() {
        return Err(Error::InvalidSelection {
            selection: selection.to_string(),
            reason: "no candidates".to_string(),
        });
    }

    match selection {
        Selection::Index(index) => {
            if *index == 0 || *index > candidates.len() {
                return Err(Error::InvalidSelection {
                    selection: selection.to_string(),
                    reason: format!("choose a number between 1 and {}", candidates.len()),
                });
            }
            Ok(&candidates[index - 1])
        }
        Selection::Name(name) => {
            if let Some(found) = candidates
                .iter()
                .find(|path| file_name(path) == *name || path.as_path() == Path::new(name))
            {
                return Ok(found);
            }

            let names: Vec<String> = candidates.iter().map(|p| file_name(p)).collect();
            let reason = match suggest_candidate(name, &names) {
                Some(suggestion) => format!("no such route file, did you mean '{suggestion}'?"),
                None => "no such route file".to_string(),
            };
            Err(Error::InvalidSelection {
                selection: name.clone(),
                reason,
            })
        }
    }
}

/// Plot title used when none is supplied
pub fn default_title(path: &Path) -> String {
    format!("Visualization of {}", file_name(path))
}
