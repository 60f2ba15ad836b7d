//! Wave selections and their evaluation against an instance.

use std::fmt;

use crate::instance::ProblemInstance;

/// A selected set of orders together with the aisles visited to pick them.
///
/// Indices are kept sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveSelection {
    orders: Vec<usize>,
    aisles: Vec<usize>,
}

impl WaveSelection {
    pub fn new(
        orders: impl IntoIterator<Item = usize>,
        aisles: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self {
            orders: sorted_unique(orders),
            aisles: sorted_unique(aisles),
        }
    }

    pub fn orders(&self) -> &[usize] {
        &self.orders
    }

    pub fn aisles(&self) -> &[usize] {
        &self.aisles
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() || self.aisles.is_empty()
    }
}

fn sorted_unique(indices: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut v: Vec<usize> = indices.into_iter().collect();
    v.sort_unstable();
    v.dedup();
    v
}

/// Units, aisles and resulting ratio of a selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveEvaluation {
    /// Units picked across the selected orders.
    pub units_picked: u64,
    /// Number of aisles visited.
    pub aisles_visited: usize,
    /// `units_picked / aisles_visited`, or 0 when no aisle is visited.
    pub ratio: f64,
}

/// Reason a selection is not a valid wave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infeasibility {
    /// No order or no aisle was selected.
    Empty,
    /// An order index is outside the instance.
    UnknownOrder(usize),
    /// An aisle index is outside the instance.
    UnknownAisle(usize),
    /// The wave's unit total falls outside `[lower_bound, upper_bound]`.
    WaveSizeOutOfRange {
        units: u64,
        lower: u64,
        upper: u64,
    },
    /// The visited aisles do not stock enough of an item.
    StockShortfall {
        item: usize,
        demand: u64,
        stock: u64,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::Empty => write!(f, "no orders or no aisles selected"),
            Infeasibility::UnknownOrder(o) => write!(f, "order {} does not exist", o),
            Infeasibility::UnknownAisle(a) => write!(f, "aisle {} does not exist", a),
            Infeasibility::WaveSizeOutOfRange {
                units,
                lower,
                upper,
            } => write!(f, "wave of {} units outside [{}, {}]", units, lower, upper),
            Infeasibility::StockShortfall {
                item,
                demand,
                stock,
            } => write!(
                f,
                "item {} demands {} units but visited aisles stock {}",
                item, demand, stock
            ),
        }
    }
}

impl ProblemInstance {
    /// Computes units picked, aisles visited and the ratio of `selection`.
    ///
    /// Indices outside the instance are ignored.
    pub fn evaluate(&self, selection: &WaveSelection) -> WaveEvaluation {
        let units_picked = selection
            .orders()
            .iter()
            .filter(|&&o| o < self.order_count())
            .map(|&o| self.order_units(o))
            .sum();
        let aisles_visited = selection
            .aisles()
            .iter()
            .filter(|&&a| a < self.aisle_count())
            .count();
        let ratio = if aisles_visited == 0 {
            0.0
        } else {
            units_picked as f64 / aisles_visited as f64
        };
        WaveEvaluation {
            units_picked,
            aisles_visited,
            ratio,
        }
    }

    /// Checks that `selection` is a valid wave for this instance.
    ///
    /// A valid wave is non-empty, its unit total lies within the bounds, and
    /// for every item the visited aisles stock at least what the selected
    /// orders request.
    pub fn check_feasibility(&self, selection: &WaveSelection) -> Result<(), Infeasibility> {
        if selection.is_empty() {
            return Err(Infeasibility::Empty);
        }
        let (orders, aisles) = (self.order_count(), self.aisle_count());
        if let Some(&o) = selection.orders().iter().find(|&&o| o >= orders) {
            return Err(Infeasibility::UnknownOrder(o));
        }
        if let Some(&a) = selection.aisles().iter().find(|&&a| a >= aisles) {
            return Err(Infeasibility::UnknownAisle(a));
        }

        let mut picked = vec![0u64; self.item_count()];
        for &o in selection.orders() {
            for &(item, qty) in self.order_items(o) {
                picked[item] += u64::from(qty);
            }
        }
        let mut available = vec![0u64; self.item_count()];
        for &a in selection.aisles() {
            for &(item, qty) in self.aisle_items(a) {
                available[item] += u64::from(qty);
            }
        }

        let units: u64 = picked.iter().sum();
        if units < self.lower_bound() || units > self.upper_bound() {
            return Err(Infeasibility::WaveSizeOutOfRange {
                units,
                lower: self.lower_bound(),
                upper: self.upper_bound(),
            });
        }

        for (item, (&demand, &stock)) in picked.iter().zip(&available).enumerate() {
            if demand > stock {
                return Err(Infeasibility::StockShortfall {
                    item,
                    demand,
                    stock,
                });
            }
        }
        Ok(())
    }

    /// Returns true if `selection` is a valid wave.
    pub fn is_feasible(&self, selection: &WaveSelection) -> bool {
        self.check_feasibility(selection).is_ok()
    }
}

#[cfg(test)]
#[path = "wave_tests.rs"]
mod tests;
