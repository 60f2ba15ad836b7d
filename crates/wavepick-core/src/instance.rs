//! Problem instance: orders, aisles and the admissible wave size.

use crate::error::{Result, WavePickError};

/// A quantity of one item, as `(item index, units)`.
pub type ItemQuantity = (usize, u32);

/// Immutable description of one wave-selection problem.
///
/// Orders and aisles are stored sparsely as lists of [`ItemQuantity`].
/// Per-item views (which orders demand an item, which aisles stock it) and
/// per-order unit totals are derived once at construction.
///
/// # Example
///
/// ```
/// use wavepick_core::ProblemInstance;
///
/// let instance = ProblemInstance::builder(2)
///     .order([(0, 2)])
///     .order([(1, 3)])
///     .aisle([(0, 5), (1, 1)])
///     .aisle([(1, 4)])
///     .bounds(1, 5)
///     .build()
///     .unwrap();
///
/// assert_eq!(instance.order_count(), 2);
/// assert_eq!(instance.aisle_count(), 2);
/// assert_eq!(instance.order_units(1), 3);
/// assert_eq!(instance.stock_of(1), 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    item_count: usize,
    orders: Vec<Vec<ItemQuantity>>,
    aisles: Vec<Vec<ItemQuantity>>,
    lower_bound: u64,
    upper_bound: u64,
    order_units: Vec<u64>,
    orders_by_item: Vec<Vec<(usize, u32)>>,
    aisles_by_item: Vec<Vec<(usize, u32)>>,
}

impl ProblemInstance {
    /// Starts building an instance over `item_count` distinct items.
    pub fn builder(item_count: usize) -> ProblemInstanceBuilder {
        ProblemInstanceBuilder::new(item_count)
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn aisle_count(&self) -> usize {
        self.aisles.len()
    }

    /// Smallest admissible number of units in a wave.
    pub fn lower_bound(&self) -> u64 {
        self.lower_bound
    }

    /// Largest admissible number of units in a wave.
    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }

    /// Items requested by order `o`, merged per item.
    pub fn order_items(&self, order: usize) -> &[ItemQuantity] {
        &self.orders[order]
    }

    /// Items stocked in aisle `a`, merged per item.
    pub fn aisle_items(&self, aisle: usize) -> &[ItemQuantity] {
        &self.aisles[aisle]
    }

    /// Total units requested by order `o` across all items.
    pub fn order_units(&self, order: usize) -> u64 {
        self.order_units[order]
    }

    /// Orders requesting item `i`, as `(order, units)`.
    pub fn orders_demanding(&self, item: usize) -> &[(usize, u32)] {
        &self.orders_by_item[item]
    }

    /// Aisles stocking item `i`, as `(aisle, units)`.
    pub fn aisles_stocking(&self, item: usize) -> &[(usize, u32)] {
        &self.aisles_by_item[item]
    }

    /// Units of item `i` requested by order `o`.
    pub fn items_per_order(&self, order: usize, item: usize) -> u32 {
        lookup(&self.orders[order], item)
    }

    /// Units of item `i` available in aisle `a`.
    pub fn items_per_aisle(&self, item: usize, aisle: usize) -> u32 {
        lookup(&self.aisles[aisle], item)
    }

    /// Units of item `i` requested across all orders.
    pub fn demand_of(&self, item: usize) -> u64 {
        self.orders_by_item[item]
            .iter()
            .map(|&(_, qty)| u64::from(qty))
            .sum()
    }

    /// Units of item `i` stocked across all aisles.
    pub fn stock_of(&self, item: usize) -> u64 {
        self.aisles_by_item[item]
            .iter()
            .map(|&(_, qty)| u64::from(qty))
            .sum()
    }

    /// Units requested across all orders.
    pub fn total_demand(&self) -> u64 {
        self.order_units.iter().sum()
    }

    /// Units stocked across all aisles.
    pub fn total_stock(&self) -> u64 {
        (0..self.item_count).map(|item| self.stock_of(item)).sum()
    }

    /// Lower end of the ratio domain, `lower_bound / aisle_count`.
    pub fn min_ratio(&self) -> f64 {
        self.lower_bound as f64 / self.aisle_count() as f64
    }

    /// Upper end of the ratio domain, `upper_bound`.
    pub fn max_ratio(&self) -> f64 {
        self.upper_bound as f64
    }

    /// Re-checks the structural invariants.
    ///
    /// Always holds for instances produced by the builder or the loader.
    pub fn validate(&self) -> Result<()> {
        validate_shape(
            self.item_count,
            self.orders.len(),
            self.aisles.len(),
            self.lower_bound,
            self.upper_bound,
        )
    }
}

fn lookup(entries: &[ItemQuantity], item: usize) -> u32 {
    entries
        .iter()
        .find(|&&(i, _)| i == item)
        .map_or(0, |&(_, qty)| qty)
}

fn validate_shape(
    item_count: usize,
    order_count: usize,
    aisle_count: usize,
    lower_bound: u64,
    upper_bound: u64,
) -> Result<()> {
    if item_count == 0 {
        return Err(WavePickError::invalid("instance has no items"));
    }
    if order_count == 0 {
        return Err(WavePickError::invalid("instance has no orders"));
    }
    if aisle_count == 0 {
        return Err(WavePickError::invalid("instance has no aisles"));
    }
    if lower_bound > upper_bound {
        return Err(WavePickError::invalid(format!(
            "lower bound {} exceeds upper bound {}",
            lower_bound, upper_bound
        )));
    }
    Ok(())
}

/// Builder for [`ProblemInstance`].
///
/// Quantities for the same item within one order or aisle are summed.
/// Zero quantities are dropped.
#[derive(Debug, Clone, Default)]
pub struct ProblemInstanceBuilder {
    item_count: usize,
    orders: Vec<Vec<ItemQuantity>>,
    aisles: Vec<Vec<ItemQuantity>>,
    bounds: Option<(u64, u64)>,
}

impl ProblemInstanceBuilder {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            ..Self::default()
        }
    }

    /// Adds an order requesting the given item quantities.
    pub fn order(mut self, items: impl IntoIterator<Item = ItemQuantity>) -> Self {
        self.orders.push(items.into_iter().collect());
        self
    }

    /// Adds an aisle stocking the given item quantities.
    pub fn aisle(mut self, items: impl IntoIterator<Item = ItemQuantity>) -> Self {
        self.aisles.push(items.into_iter().collect());
        self
    }

    /// Sets the admissible wave size range, inclusive.
    pub fn bounds(mut self, lower_bound: u64, upper_bound: u64) -> Self {
        self.bounds = Some((lower_bound, upper_bound));
        self
    }

    /// Validates and freezes the instance.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInstance` if bounds are missing or inconsistent, if
    /// any of the three dimensions is empty, or if an item index is out of
    /// range.
    pub fn build(self) -> Result<ProblemInstance> {
        let (lower_bound, upper_bound) = self
            .bounds
            .ok_or_else(|| WavePickError::invalid("wave size bounds were not set"))?;
        validate_shape(
            self.item_count,
            self.orders.len(),
            self.aisles.len(),
            lower_bound,
            upper_bound,
        )?;

        let orders = normalize_all(self.orders, self.item_count, "order")?;
        let aisles = normalize_all(self.aisles, self.item_count, "aisle")?;

        let order_units = orders
            .iter()
            .map(|items| items.iter().map(|&(_, qty)| u64::from(qty)).sum())
            .collect();
        let orders_by_item = transpose(&orders, self.item_count);
        let aisles_by_item = transpose(&aisles, self.item_count);

        Ok(ProblemInstance {
            item_count: self.item_count,
            orders,
            aisles,
            lower_bound,
            upper_bound,
            order_units,
            orders_by_item,
            aisles_by_item,
        })
    }
}

fn normalize_all(
    rows: Vec<Vec<ItemQuantity>>,
    item_count: usize,
    kind: &str,
) -> Result<Vec<Vec<ItemQuantity>>> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| normalize(row, item_count, kind, index))
        .collect()
}

fn normalize(
    mut row: Vec<ItemQuantity>,
    item_count: usize,
    kind: &str,
    index: usize,
) -> Result<Vec<ItemQuantity>> {
    if let Some(&(item, _)) = row.iter().find(|&&(item, _)| item >= item_count) {
        return Err(WavePickError::invalid(format!(
            "{} {} references item {} but the instance has {} items",
            kind, index, item, item_count
        )));
    }
    row.sort_unstable_by_key(|&(item, _)| item);
    let mut merged: Vec<ItemQuantity> = Vec::with_capacity(row.len());
    for (item, qty) in row {
        match merged.last_mut() {
            Some(last) if last.0 == item => {
                last.1 = last.1.checked_add(qty).ok_or_else(|| {
                    WavePickError::invalid(format!(
                        "{} {} quantity of item {} exceeds {}",
                        kind,
                        index,
                        item,
                        u32::MAX
                    ))
                })?;
            }
            _ => merged.push((item, qty)),
        }
    }
    merged.retain(|&(_, qty)| qty > 0);
    Ok(merged)
}

fn transpose(rows: &[Vec<ItemQuantity>], item_count: usize) -> Vec<Vec<(usize, u32)>> {
    let mut by_item = vec![Vec::new(); item_count];
    for (row, items) in rows.iter().enumerate() {
        for &(item, qty) in items {
            by_item[item].push((row, qty));
        }
    }
    by_item
}

#[cfg(test)]
#[path = "instance_tests.rs"]
mod tests;
