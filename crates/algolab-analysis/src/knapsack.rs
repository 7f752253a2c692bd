use algolab_core::{AlgoLabError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Purchasable item: a name, a unit cost, and the calories one unit brings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub cost: u32,
    pub calories: u32,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, cost: u32, calories: u32) -> Self {
        Self {
            name: name.into(),
            cost,
            calories,
        }
    }

    /// Calories per unit of cost, the greedy ranking key.
    pub fn calorie_ratio(&self) -> f64 {
        self.calories as f64 / self.cost as f64
    }
}

/// The canonical six-item menu.
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("pizza", 50, 300),
        MenuItem::new("hamburger", 40, 250),
        MenuItem::new("hot-dog", 30, 200),
        MenuItem::new("pepsi", 10, 100),
        MenuItem::new("cola", 15, 220),
        MenuItem::new("potato", 25, 350),
    ]
}

/// Quantities picked per item plus the resulting totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub quantities: BTreeMap<String, u32>,
    pub total_cost: u32,
    pub total_calories: u32,
}

impl Selection {
    fn from_quantities(items: &[MenuItem], quantities: BTreeMap<String, u32>) -> Self {
        let mut total_cost = 0;
        let mut total_calories = 0;
        for item in items {
            if let Some(&quantity) = quantities.get(&item.name) {
                total_cost += item.cost * quantity;
                total_calories += item.calories * quantity;
            }
        }
        Self {
            quantities,
            total_cost,
            total_calories,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}

fn validate_items(items: &[MenuItem]) -> Result<()> {
    for item in items {
        if item.cost == 0 {
            return Err(AlgoLabError::InvalidOperation(format!(
                "item {} has zero cost",
                item.name
            )));
        }
    }
    Ok(())
}

/// Greedy selection: rank items by descending calorie/cost ratio, then buy
/// as many units of each as the remaining budget allows. Fast but not
/// always optimal.
pub fn greedy_selection(items: &[MenuItem], budget: u32) -> Result<Selection> {
    validate_items(items)?;

    let mut ranked: Vec<&MenuItem> = items.iter().collect();
    ranked.sort_by(|a, b| {
        b.calorie_ratio()
            .partial_cmp(&a.calorie_ratio())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut quantities = BTreeMap::new();
    let mut remaining = budget;
    for item in ranked {
        let quantity = remaining / item.cost;
        if quantity > 0 {
            quantities.insert(item.name.clone(), quantity);
            remaining -= quantity * item.cost;
        }
    }

    let selection = Selection::from_quantities(items, quantities);
    debug!(
        budget,
        calories = selection.total_calories,
        "greedy selection done"
    );
    Ok(selection)
}

/// Optimal selection via unbounded-knapsack dynamic programming.
///
/// `best[w]` is the maximum calorie total achievable with budget `w`;
/// `choice[w]` remembers the item that last improved the cell, which is
/// enough to walk the quantities back from `best[budget]`.
pub fn optimal_selection(items: &[MenuItem], budget: u32) -> Result<Selection> {
    validate_items(items)?;

    let budget_idx = budget as usize;
    let mut best = vec![0u32; budget_idx + 1];
    let mut choice: Vec<Option<usize>> = vec![None; budget_idx + 1];

    for w in 1..=budget_idx {
        for (index, item) in items.iter().enumerate() {
            let cost = item.cost as usize;
            if cost <= w {
                let candidate = best[w - cost] + item.calories;
                if candidate > best[w] {
                    best[w] = candidate;
                    choice[w] = Some(index);
                }
            }
        }
    }

    let mut quantities: BTreeMap<String, u32> = BTreeMap::new();
    let mut w = budget_idx;
    while w > 0 {
        match choice[w] {
            Some(index) => {
                let item = &items[index];
                *quantities.entry(item.name.clone()).or_insert(0) += 1;
                w -= item.cost as usize;
            }
            // best[w] is zero here: nothing fits in the remaining budget.
            None => break,
        }
    }

    let selection = Selection::from_quantities(items, quantities);
    debug!(
        budget,
        calories = selection.total_calories,
        "optimal selection done"
    );
    Ok(selection)
}
