use algolab_core::Rgb;

/// Dark end of the traversal gradient.
pub const GRADIENT_START: Rgb = Rgb::new(27, 20, 100); // #1B1464
/// Light end of the traversal gradient.
pub const GRADIENT_END: Rgb = Rgb::new(232, 244, 255); // #E8F4FF

/// Linear interpolation between two colors over `steps` entries.
///
/// A single step yields the start color; zero steps yield nothing.
pub fn gradient_between(start: Rgb, end: Rgb, steps: usize) -> Vec<Rgb> {
    let denominator = steps.saturating_sub(1).max(1) as f64;
    (0..steps)
        .map(|i| {
            let ratio = i as f64 / denominator;
            Rgb::new(
                lerp(start.r, end.r, ratio),
                lerp(start.g, end.g, ratio),
                lerp(start.b, end.b, ratio),
            )
        })
        .collect()
}

/// The default dark-to-light gradient used to color visit orders.
pub fn color_gradient(steps: usize) -> Vec<Rgb> {
    gradient_between(GRADIENT_START, GRADIENT_END, steps)
}

fn lerp(start: u8, end: u8, ratio: f64) -> u8 {
    (f64::from(start) + (f64::from(end) - f64::from(start)) * ratio) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let colors = color_gradient(5);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], GRADIENT_START);
        assert_eq!(colors[4], GRADIENT_END);
    }

    #[test]
    fn gradient_is_monotone_per_channel() {
        let colors = color_gradient(16);
        for pair in colors.windows(2) {
            assert!(pair[0].r <= pair[1].r);
            assert!(pair[0].g <= pair[1].g);
            assert!(pair[0].b <= pair[1].b);
        }
    }

    #[test]
    fn single_step_is_the_start_color() {
        assert_eq!(color_gradient(1), vec![GRADIENT_START]);
    }

    #[test]
    fn zero_steps_yield_nothing() {
        assert!(color_gradient(0).is_empty());
    }

    #[test]
    fn custom_endpoints() {
        let colors = gradient_between(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), 3);
        assert_eq!(colors[1], Rgb::new(127, 127, 127));
    }
}
