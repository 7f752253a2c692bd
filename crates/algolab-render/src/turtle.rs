use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Straight pen stroke between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// Headless turtle: tracks pose and pen state, records a [`Segment`] for
/// every pen-down move instead of driving a window.
///
/// Headings are degrees, counterclockwise, 0 pointing along +x.
#[derive(Debug, Clone)]
pub struct Turtle {
    position: Point,
    heading: f64,
    pen_down: bool,
    segments: Vec<Segment>,
}

impl Default for Turtle {
    fn default() -> Self {
        Self::new()
    }
}

impl Turtle {
    pub fn new() -> Self {
        Self {
            position: Point::ORIGIN,
            heading: 0.0,
            pen_down: true,
            segments: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn pen_up(&mut self) {
        self.pen_down = false;
    }

    pub fn pen_down(&mut self) {
        self.pen_down = true;
    }

    /// Moves `distance` along the current heading, recording a segment when
    /// the pen is down.
    pub fn forward(&mut self, distance: f64) {
        let radians = self.heading.to_radians();
        let end = Point::new(
            self.position.x + distance * radians.cos(),
            self.position.y + distance * radians.sin(),
        );
        if self.pen_down {
            self.segments.push(Segment {
                start: self.position,
                end,
            });
        }
        self.position = end;
    }

    pub fn left(&mut self, degrees: f64) {
        self.heading += degrees;
    }

    pub fn right(&mut self, degrees: f64) {
        self.heading -= degrees;
    }

    /// Jumps to `target`, drawing on the way only when the pen is down.
    pub fn goto(&mut self, target: Point) {
        if self.pen_down {
            self.segments.push(Segment {
                start: self.position,
                end: target,
            });
        }
        self.position = target;
    }

    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = degrees;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_records_a_segment() {
        let mut t = Turtle::new();
        t.forward(10.0);
        assert_eq!(t.segments().len(), 1);
        assert_abs_diff_eq!(t.position().x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.position().y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn pen_up_moves_silently() {
        let mut t = Turtle::new();
        t.pen_up();
        t.forward(5.0);
        t.goto(Point::new(1.0, 1.0));
        assert!(t.segments().is_empty());
    }

    #[test]
    fn turns_compose() {
        let mut t = Turtle::new();
        t.left(90.0);
        t.forward(2.0);
        assert_abs_diff_eq!(t.position().x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.position().y, 2.0, epsilon = 1e-9);
        t.right(90.0);
        assert_abs_diff_eq!(t.heading(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn square_walk_returns_home() {
        let mut t = Turtle::new();
        for _ in 0..4 {
            t.forward(3.0);
            t.left(90.0);
        }
        assert_eq!(t.segments().len(), 4);
        assert_abs_diff_eq!(t.position().x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.position().y, 0.0, epsilon = 1e-9);
    }
}
