use crate::{Point, Segment, Turtle};
use std::f64::consts::SQRT_2;
use tracing::debug;

/// Side length of the root square when no explicit size is given.
///
/// The tree's height is roughly the geometric series
/// `side * (sqrt(2)^level - 1) / (sqrt(2) - 1)`; the side is solved from the
/// usable canvas height (0.4 of the full height keeps a margin on both
/// sides) and clamped to a sane range.
pub fn initial_side_for(level: u32, canvas_height: f64) -> f64 {
    if level == 0 {
        return 100.0;
    }
    let usable_height = canvas_height * 0.4;
    let height_ratio = (SQRT_2.powi(level as i32) - 1.0) / (SQRT_2 - 1.0);
    (usable_height / height_ratio).clamp(10.0, 200.0)
}

/// Generates the Pythagoras-tree stroke set.
///
/// Each level draws a square, shrinks the side by 1/sqrt(2), then branches
/// from the square's far corners at 45 degrees left and right, restoring the
/// pose afterwards. Level 0 draws nothing.
pub fn generate(level: u32, initial_side: f64) -> Vec<Segment> {
    let mut turtle = Turtle::new();
    turtle.pen_up();
    turtle.goto(Point::new(-initial_side / 2.0, 0.0));
    turtle.set_heading(0.0);
    turtle.pen_down();

    branch(&mut turtle, initial_side, level);

    let segments = turtle.into_segments();
    debug!(level, segments = segments.len(), "generated pythagoras tree");
    segments
}

fn branch(turtle: &mut Turtle, side: f64, level: u32) {
    if level == 0 {
        return;
    }

    draw_square(turtle, side);

    let new_side = side / SQRT_2;
    let position = turtle.position();
    let heading = turtle.heading();

    // walk along the square to the first branch corner
    turtle.forward(side);
    turtle.left(90.0);
    turtle.forward(side);
    turtle.right(90.0);

    let corner = turtle.position();
    let corner_heading = turtle.heading();

    turtle.left(45.0);
    branch(turtle, new_side, level - 1);

    turtle.pen_up();
    turtle.goto(corner);
    turtle.set_heading(corner_heading);
    turtle.pen_down();

    // one side further along to the second branch corner
    turtle.forward(side);
    turtle.right(45.0);
    branch(turtle, new_side, level - 1);

    turtle.pen_up();
    turtle.goto(position);
    turtle.set_heading(heading);
    turtle.pen_down();
}

fn draw_square(turtle: &mut Turtle, side: f64) {
    for _ in 0..4 {
        turtle.forward(side);
        turtle.left(90.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Each level contributes the 4 square strokes plus 3 corner-walk
    // strokes, twice per recursion below it: s(L) = 7 * (2^L - 1).
    fn expected_segments(level: u32) -> usize {
        7 * (2usize.pow(level) - 1)
    }

    #[test]
    fn level_zero_draws_nothing() {
        assert!(generate(0, 100.0).is_empty());
    }

    #[test]
    fn segment_count_follows_the_recursion() {
        for level in 1..=5 {
            assert_eq!(generate(level, 100.0).len(), expected_segments(level));
        }
    }

    #[test]
    fn root_square_is_centered_on_the_origin() {
        let segments = generate(1, 80.0);
        // first stroke runs along the bottom edge from -side/2
        assert_abs_diff_eq!(segments[0].start.x, -40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(segments[0].start.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(segments[0].end.x, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn deeper_levels_shrink_the_initial_side() {
        let shallow = initial_side_for(2, 900.0);
        let deep = initial_side_for(10, 900.0);
        assert!(deep < shallow);
        assert!((10.0..=200.0).contains(&deep));
        assert!((10.0..=200.0).contains(&shallow));
    }

    #[test]
    fn level_zero_side_falls_back_to_default() {
        assert_abs_diff_eq!(initial_side_for(0, 900.0), 100.0);
    }
}
