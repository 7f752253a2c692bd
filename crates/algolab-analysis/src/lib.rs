pub mod dice;
pub mod knapsack;

pub use dice::*;
pub use knapsack::*;
