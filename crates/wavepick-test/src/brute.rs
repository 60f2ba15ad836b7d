//! Exhaustive reference search.

use wavepick_core::{ProblemInstance, WaveSelection};

/// Best wave found by exhaustive search.
#[derive(Debug, Clone, PartialEq)]
pub struct BruteForceBest {
    pub ratio: f64,
    pub selection: WaveSelection,
}

/// Tries every order subset against every non-empty aisle subset.
///
/// Returns `None` when no feasible wave exists. Only usable for instances
/// with a handful of orders and aisles.
pub fn brute_force_best(instance: &ProblemInstance) -> Option<BruteForceBest> {
    search(instance, |_| true)
}

/// Like [`brute_force_best`], but every selected order must itself have a
/// unit count within the instance bounds.
pub fn brute_force_best_per_order(instance: &ProblemInstance) -> Option<BruteForceBest> {
    let range = instance.lower_bound()..=instance.upper_bound();
    search(instance, |order| range.contains(&instance.order_units(order)))
}

fn search(
    instance: &ProblemInstance,
    order_allowed: impl Fn(usize) -> bool,
) -> Option<BruteForceBest> {
    let orders = instance.order_count();
    let aisles = instance.aisle_count();
    assert!(
        orders + aisles <= 20,
        "instance too large for exhaustive search"
    );

    let mut best: Option<BruteForceBest> = None;
    for aisle_mask in 1u32..(1 << aisles) {
        for order_mask in 1u32..(1 << orders) {
            if !members(order_mask, orders).all(&order_allowed) {
                continue;
            }
            let selection =
                WaveSelection::new(members(order_mask, orders), members(aisle_mask, aisles));
            if !instance.is_feasible(&selection) {
                continue;
            }
            let ratio = instance.evaluate(&selection).ratio;
            if best.as_ref().map_or(true, |b| ratio > b.ratio) {
                best = Some(BruteForceBest { ratio, selection });
            }
        }
    }
    best
}

fn members(mask: u32, len: usize) -> impl Iterator<Item = usize> {
    (0..len).filter(move |&i| mask & (1 << i) != 0)
}
