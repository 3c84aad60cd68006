//! Route file parser
//!
//! Reconstructs a [`RouteSet`] from the line-oriented route format:
//!
//! ```text
//! Ruta 1
//! 0 0.0 0.0
//! 1 1.5 2.3
//! Ruta 2
//! 0 3.0 3.0
//! ```
//!
//! Marker lines (`Ruta ...`) close the route being accumulated, data lines are
//! `<label> <x> <y>` and blank lines are ignored. Empty segments are dropped
//! silently while malformed data lines abort the whole parse.

use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::error::{Error, Result};
use crate::core::model::{Point, Route, RouteSet};

/// Literal that starts every marker line
pub const ROUTE_MARKER: &str = "Ruta";

/// Classification of a single source line
#[derive(Debug, PartialEq)]
enum Line {
    Marker,
    Blank,
    Data(Point),
}

/// Single-pass route accumulator
#[derive(Debug, Default)]
struct RouteAccumulator {
    finished: Vec<Route>,
    current: Route,
}

impl RouteAccumulator {
    fn push(&mut self, point: Point) {
        self.current.push(point);
    }

    /// Close the current route; an empty accumulator emits nothing
    fn finalize(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let route = std::mem::take(&mut self.current);
        debug!(
            "Finalized route {} with {} points",
            self.finished.len() + 1,
            route.len()
        );
        self.finished.push(route);
    }

    fn finish(mut self) -> RouteSet {
        self.finalize();
        RouteSet::from(self.finished)
    }
}

fn classify(line_no: usize, raw: &str) -> Result<Line> {
    let trimmed = raw.trim();

    if trimmed.starts_with(ROUTE_MARKER) {
        return Ok(Line::Marker);
    }
    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }

    let malformed = |reason: String| Error::MalformedDataLine {
        line: line_no,
        content: trimmed.to_string(),
        reason,
    };

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() < 3 {
        return Err(malformed(format!(
            "expected at least 3 tokens, found {}",
            tokens.len()
        )));
    }

    let x = parse_coordinate(tokens[1], "x").map_err(&malformed)?;
    let y = parse_coordinate(tokens[2], "y").map_err(&malformed)?;

    Ok(Line::Data(Point::new(x, y)))
}

fn parse_coordinate(token: &str, axis: &str) -> std::result::Result<f64, String> {
    let value: f64 = token
        .parse()
        .map_err(|_| format!("{axis} coordinate '{token}' is not a number"))?;

    if !value.is_finite() {
        return Err(format!("{axis} coordinate '{token}' is not finite"));
    }
    Ok(value)
}

/// Parse routes from any buffered reader
pub fn parse_reader<R: BufRead>(reader: R) -> Result<RouteSet> {
    let mut acc = RouteAccumulator::default();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        match classify(i + 1, &line)? {
            Line::Marker => acc.finalize(),
            Line::Blank => {}
            Line::Data(point) => acc.push(point),
        }
    }

    Ok(acc.finish())
}

/// Parse routes from an in-memory string
pub fn parse_str(text: &str) -> Result<RouteSet> {
    parse_reader(text.as_bytes())
}

/// Load routes from a file on disk
///
/// The file handle lives only for the duration of this call and is closed on
/// every exit path, including parse failures.
pub fn load_routes<P: AsRef<Path>>(path: P) -> Result<RouteSet> {
    let path = path.as_ref();
    let unavailable = |source: std::io::Error| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(unavailable)?;
    let routes = parse_reader(BufReader::new(file)).map_err(|e| match e {
        Error::Io(source) => unavailable(source),
        other => other,
    })?;

    info!(
        "Loaded {} routes ({} points) from {}",
        routes.len(),
        routes.total_points(),
        path.display()
    );
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn coords(routes: &RouteSet) -> Vec<Vec<(f64, f64)>> {
        routes
            .routes()
            .iter()
            .map(|r| r.points().iter().map(|p| (p.x(), p.y())).collect())
            .collect()
    }

    #[test]
    fn test_single_route() {
        let routes = parse_str("Ruta 1\n0 0.0 0.0\n1 1.0 1.0\n").unwrap();
        assert_eq!(coords(&routes), vec![vec![(0.0, 0.0), (1.0, 1.0)]]);
    }

    #[test]
    fn test_two_routes() {
        let routes = parse_str("Ruta 1\n0 0.0 0.0\nRuta 2\n0 5.0 5.0\n1 6.0 6.0\n").unwrap();
        assert_eq!(
            coords(&routes),
            vec![vec![(0.0, 0.0)], vec![(5.0, 5.0), (6.0, 6.0)]]
        );
    }

    #[test]
    fn test_empty_segment_dropped() {
        let routes = parse_str("Ruta 1\nRuta 2\n0 1.0 1.0\n").unwrap();
        assert_eq!(coords(&routes), vec![vec![(1.0, 1.0)]]);
    }

    #[test]
    fn test_no_marker_yields_single_route() {
        let routes = parse_str("0 1.0 1.0\n1 2.0 2.0\n").unwrap();
        assert_eq!(coords(&routes), vec![vec![(1.0, 1.0), (2.0, 2.0)]]);
    }

    #[test]
    fn test_route_count_matches_non_empty_markers() {
        let text = "Ruta 1\n0 1 1\nRuta 2\nRuta 3\n0 2 2\n1 3 3\nRuta 4\n0 4 4\nRuta 5\n";
        let routes = parse_str(text).unwrap();
        assert_eq!(routes.len(), 3);
        assert!(routes.routes().iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_order_preserved() {
        let text = "Ruta 1\n0 9 9\n1 1 1\n2 5 5\nRuta 2\n0 -1 -2\n";
        let routes = parse_str(text).unwrap();
        assert_eq!(
            coords(&routes),
            vec![
                vec![(9.0, 9.0), (1.0, 1.0), (5.0, 5.0)],
                vec![(-1.0, -2.0)]
            ]
        );
    }

    #[test]
    fn test_trailing_segment_without_marker() {
        let routes = parse_str("Ruta 1\n0 1 1\nRuta 2\n0 2 2\n1 3 3").unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes.routes()[1].len(), 2);
    }

    #[test]
    fn test_blank_lines_do_not_change_result() {
        let plain = "Ruta 1\n0 0.0 0.0\n1 1.0 1.0\nRuta 2\n0 5.0 5.0\n";
        let padded = "\n\nRuta 1\n   \n0 0.0 0.0\n\n1 1.0 1.0\n\t\nRuta 2\n\n0 5.0 5.0\n\n\n";
        assert_eq!(parse_str(plain).unwrap(), parse_str(padded).unwrap());
    }

    #[test]
    fn test_whitespace_and_extra_tokens() {
        let routes = parse_str("  Ruta 7 (cost 12.5)\n\t3   1.5\t-2.25  extra 99\r\n").unwrap();
        assert_eq!(coords(&routes), vec![vec![(1.5, -2.25)]]);
    }

    #[test]
    fn test_scientific_notation() {
        let routes = parse_str("0 1e3 -2.5E-1\n").unwrap();
        assert_eq!(coords(&routes), vec![vec![(1000.0, -0.25)]]);
    }

    #[test]
    fn test_too_few_tokens_fails() {
        let err = parse_str("Ruta 1\n0 0.0 0.0\n1 2.0\n").unwrap_err();
        match err {
            Error::MalformedDataLine { line, content, .. } => {
                assert_eq!(line, 3);
                assert_eq!(content, "1 2.0");
            }
            other => panic!("Expected MalformedDataLine, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_coordinate_fails() {
        let err = parse_str("Ruta 1\n0 abc 1.0\n").unwrap_err();
        assert!(matches!(err, Error::MalformedDataLine { line: 2, .. }));

        let err = parse_str("0 1.0 north\n").unwrap_err();
        match err {
            Error::MalformedDataLine { reason, .. } => assert!(reason.contains("y coordinate")),
            other => panic!("Expected MalformedDataLine, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_coordinate_fails() {
        assert!(matches!(
            parse_str("0 NaN 1.0\n"),
            Err(Error::MalformedDataLine { .. })
        ));
        assert!(matches!(
            parse_str("0 1.0 inf\n"),
            Err(Error::MalformedDataLine { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("Ruta 1\nRuta 2\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_load_routes_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Ruta 1\n0 0.0 0.0\n1 3.0 4.0\nRuta 2\n0 1.0 1.0\n").unwrap();

        let routes = load_routes(file.path()).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes.routes()[0].length(), 5.0);
    }

    #[test]
    fn test_load_routes_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("rutas_missing.txt");

        match load_routes(&missing).unwrap_err() {
            Error::SourceUnavailable { path, .. } => assert_eq!(path, missing),
            other => panic!("Expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_load_routes_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Ruta 1\n0 \xff\xfe 1.0\n").unwrap();

        assert!(matches!(
            load_routes(file.path()),
            Err(Error::SourceUnavailable { .. })
        ));
    }
}
