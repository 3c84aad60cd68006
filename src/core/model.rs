//! Route data model
//!
//! A [`RouteSet`] is built once per invocation by the parser and handed to the
//! renderer. Nothing mutates it after construction.

use serde::Serialize;

/// A 2D point
///
/// The parser only ever builds points with finite coordinates. Points built
/// directly through [`Point::new`] or `From<(f64, f64)>` are not checked; the
/// plotting surface rejects non-finite ones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An ordered sequence of points, in traversal order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    points: Vec<Point>,
}

impl Route {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Length of the polyline through all points
    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }

    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }
}

impl From<Vec<Point>> for Route {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl FromIterator<(f64, f64)> for Route {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(Point::from).collect(),
        }
    }
}

/// All routes parsed from one source, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn total_points(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Bounding box over every point, `None` when there are no points
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.routes.iter().flat_map(|r| r.points().iter());
        let first = points.next()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(points.fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        }))
    }

    pub fn summary(&self) -> RouteSummary {
        let routes: Vec<RouteStats> = self
            .routes
            .iter()
            .enumerate()
            .map(|(i, route)| RouteStats {
                index: i + 1,
                points: route.len(),
                length: route.length(),
            })
            .collect();

        RouteSummary {
            route_count: routes.len(),
            point_count: self.total_points(),
            total_length: routes.iter().map(|r| r.length).sum(),
            bounds: self.bounds(),
            routes,
        }
    }
}

impl From<Vec<Route>> for RouteSet {
    fn from(routes: Vec<Route>) -> Self {
        Self { routes }
    }
}

impl<'a> IntoIterator for &'a RouteSet {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

/// Per-route statistics, 1-based index as in the source file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStats {
    pub index: usize,
    pub points: usize,
    pub length: f64,
}

/// Reporting summary of a route set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    pub route_count: usize,
    pub point_count: usize,
    pub total_length: f64,
    pub bounds: Option<Bounds>,
    pub routes: Vec<RouteStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RouteSet {
        RouteSet::from(vec![
            [(0.0, 0.0), (3.0, 4.0)].into_iter().collect::<Route>(),
            [(-1.0, 2.0), (-1.0, 5.0), (2.0, 5.0)]
                .into_iter()
                .collect::<Route>(),
        ])
    }

    #[test]
    fn test_route_length() {
        let routes = sample();
        assert_eq!(routes.routes()[0].length(), 5.0);
        assert_eq!(routes.routes()[1].length(), 6.0);

        let single: Route = [(1.0, 1.0)].into_iter().collect();
        assert_eq!(single.length(), 0.0);
    }

    #[test]
    fn test_bounds() {
        let bounds = sample().bounds().unwrap();
        assert_eq!(bounds.min_x, -1.0);
        assert_eq!(bounds.max_x, 3.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 5.0);
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.center(), (1.0, 2.5));

        assert!(RouteSet::default().bounds().is_none());
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary.route_count, 2);
        assert_eq!(summary.point_count, 5);
        assert_eq!(summary.total_length, 11.0);
        assert_eq!(summary.routes[1].index, 2);
        assert_eq!(summary.routes[1].points, 3);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["route_count"], 2);
        assert_eq!(json["bounds"]["max_y"], 5.0);
    }

    #[test]
    fn test_point_accessors() {
        let point = Point::from((1.5, -2.0));
        assert_eq!((point.x(), point.y()), (1.5, -2.0));
        assert!(point.is_finite());

        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }
}
