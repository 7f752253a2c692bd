pub mod dice_chart;
pub mod fractal;
pub mod fractal_chart;
pub mod gradient;
pub mod layout;
pub mod tree_chart;
pub mod turtle;

pub use dice_chart::*;
pub use fractal::*;
pub use fractal_chart::*;
pub use gradient::*;
pub use layout::*;
pub use tree_chart::*;
pub use turtle::*;

use algolab_core::AlgoLabError;

/// Plotters error types are generic over the backend; flatten them into the
/// workspace error.
pub(crate) fn render_err(err: impl std::fmt::Display) -> AlgoLabError {
    AlgoLabError::Render(err.to_string())
}
