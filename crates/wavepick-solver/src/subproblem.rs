//! Subproblem construction: one scalar parameter in, one linear model out.
//!
//! Every subproblem shares the wave-size and stock constraints. The
//! parameter then adds either a fixed aisle count with a "maximize units"
//! objective, or a ratio threshold with the Dinkelbach objective
//! `k · aisles − units`, whose optimal value is non-positive exactly when a
//! wave with ratio at least `k` exists.

use std::fmt;

use wavepick_config::{SearchConfig, WaveSizeRule};
use wavepick_core::{ProblemInstance, WaveSelection};

use crate::adapter::SolverAdapter;
use crate::error::{SearchError, SolverError};
use crate::model::{LinearConstraint, LinearExpr, Sense, VarId};

/// The scalar that parametrizes one subproblem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parameter {
    /// Exactly this many aisles are opened.
    AisleCount(usize),
    /// Only waves with ratio at least this value are admissible.
    RatioThreshold(f64),
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::AisleCount(a) => write!(f, "a*={}", a),
            Parameter::RatioThreshold(k) => write!(f, "k={:.6}", k),
        }
    }
}

/// A decision variable of the wave model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionVar {
    /// 1 if the order joins the wave.
    Order(usize),
    /// 1 if the aisle is visited.
    Aisle(usize),
}

impl DecisionVar {
    fn name(self) -> String {
        match self {
            DecisionVar::Order(o) => format!("W_{}", o),
            DecisionVar::Aisle(a) => format!("A_{}", a),
        }
    }
}

/// A complete linear integer model for one parameter value.
///
/// Built fresh by [`SubproblemBuilder::build`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Subproblem {
    parameter: Parameter,
    order_count: usize,
    aisle_count: usize,
    constraints: Vec<LinearConstraint<DecisionVar>>,
    objective: LinearExpr<DecisionVar>,
    sense: Sense,
}

impl Subproblem {
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    pub fn constraints(&self) -> &[LinearConstraint<DecisionVar>] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr<DecisionVar> {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Number of binary variables, one per order and one per aisle.
    pub fn variable_count(&self) -> usize {
        self.order_count + self.aisle_count
    }

    /// Returns true if every constraint holds for `selection`.
    pub fn is_satisfied_by(&self, selection: &WaveSelection) -> bool {
        let value = |var: DecisionVar| {
            let chosen = match var {
                DecisionVar::Order(o) => selection.orders().binary_search(&o).is_ok(),
                DecisionVar::Aisle(a) => selection.aisles().binary_search(&a).is_ok(),
            };
            if chosen {
                1.0
            } else {
                0.0
            }
        };
        self.constraints.iter().all(|c| c.is_satisfied(value, 1e-9))
    }

    /// Declares the variables and registers constraints and objective on
    /// `adapter`.
    pub fn install<A: SolverAdapter + ?Sized>(&self, adapter: &mut A) -> InstalledSubproblem {
        let orders: Vec<VarId> = (0..self.order_count)
            .map(|o| adapter.declare_binary(&DecisionVar::Order(o).name()))
            .collect();
        let aisles: Vec<VarId> = (0..self.aisle_count)
            .map(|a| adapter.declare_binary(&DecisionVar::Aisle(a).name()))
            .collect();

        let handle = |var: DecisionVar| match var {
            DecisionVar::Order(o) => orders[o],
            DecisionVar::Aisle(a) => aisles[a],
        };
        for constraint in &self.constraints {
            adapter.add_constraint(
                constraint.expr.map_vars(handle),
                constraint.comparator,
                constraint.rhs,
            );
        }
        adapter.set_objective(self.objective.map_vars(handle), self.sense);

        InstalledSubproblem {
            parameter: self.parameter,
            orders,
            aisles,
        }
    }
}

/// Variable handles of a subproblem installed on an adapter.
#[derive(Debug, Clone)]
pub struct InstalledSubproblem {
    parameter: Parameter,
    orders: Vec<VarId>,
    aisles: Vec<VarId>,
}

impl InstalledSubproblem {
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    /// Reads the selected orders and aisles from the adapter's solution.
    pub fn read_selection<A: SolverAdapter + ?Sized>(
        &self,
        adapter: &A,
    ) -> Result<WaveSelection, SolverError> {
        let chosen = |handles: &[VarId]| -> Result<Vec<usize>, SolverError> {
            let mut out = Vec::new();
            for (index, &var) in handles.iter().enumerate() {
                if adapter.variable_value(var).ok_or(SolverError::MissingSolution)? {
                    out.push(index);
                }
            }
            Ok(out)
        };
        Ok(WaveSelection::new(chosen(&self.orders)?, chosen(&self.aisles)?))
    }
}

/// Interpreted result of one solved subproblem.
#[derive(Debug, Clone, PartialEq)]
pub enum SubproblemOutcome {
    /// The solver returned a solution.
    Solved {
        objective: f64,
        selection: WaveSelection,
        proven_optimal: bool,
    },
    /// No order/aisle assignment satisfies the constraints.
    Infeasible,
}

/// Builds subproblems for one instance.
///
/// # Example
///
/// ```
/// use wavepick_config::SearchConfig;
/// use wavepick_core::ProblemInstance;
/// use wavepick_solver::{Parameter, Sense, SubproblemBuilder};
///
/// let instance = ProblemInstance::builder(1)
///     .order([(0, 2)])
///     .aisle([(0, 2)])
///     .aisle([(0, 1)])
///     .bounds(1, 4)
///     .build()
///     .unwrap();
///
/// let builder = SubproblemBuilder::new(&instance, &SearchConfig::default()).unwrap();
/// let subproblem = builder.build(Parameter::AisleCount(1)).unwrap();
///
/// assert_eq!(subproblem.sense(), Sense::Maximize);
/// assert_eq!(subproblem.variable_count(), 3);
/// assert!(builder.build(Parameter::AisleCount(3)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SubproblemBuilder<'a> {
    instance: &'a ProblemInstance,
    epsilon: f64,
    wave_size_rule: WaveSizeRule,
    big_m: f64,
}

impl<'a> SubproblemBuilder<'a> {
    /// Creates a builder, validating the instance first.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Instance` if `lower_bound > upper_bound` or the
    /// instance has no aisles.
    pub fn new(instance: &'a ProblemInstance, config: &SearchConfig) -> Result<Self, SearchError> {
        instance.validate()?;

        let largest_order = (0..instance.order_count())
            .map(|o| instance.order_units(o))
            .max()
            .unwrap_or(0);
        let big_m = config
            .big_m
            .unwrap_or(instance.total_demand() as f64)
            .max(largest_order as f64)
            .max(instance.lower_bound() as f64);

        Ok(Self {
            instance,
            epsilon: config.epsilon,
            wave_size_rule: config.wave_size_rule,
            big_m,
        })
    }

    pub fn instance(&self) -> &'a ProblemInstance {
        self.instance
    }

    /// The big-M constant used for per-order gating.
    pub fn big_m(&self) -> f64 {
        self.big_m
    }

    /// Builds the subproblem for `parameter`.
    pub fn build(&self, parameter: Parameter) -> Result<Subproblem, SearchError> {
        self.check_parameter(parameter)?;

        let mut constraints = self.common_constraints();
        let aisles_opened = self.aisles_opened();
        let units = self.units_picked();

        let (objective, sense) = match parameter {
            Parameter::AisleCount(target) => {
                constraints.push(LinearConstraint::eq(aisles_opened, target as f64));
                (units, Sense::Maximize)
            }
            Parameter::RatioThreshold(k) => {
                constraints.push(LinearConstraint::ge(aisles_opened.clone(), 1.0));

                // units - k * aisles >= -epsilon
                let mut band = units.clone();
                band.add_scaled(&aisles_opened, -k);
                constraints.push(LinearConstraint::ge(band, -self.epsilon));

                // minimize k * aisles - units
                let mut objective = LinearExpr::new();
                objective.add_scaled(&aisles_opened, k);
                objective.add_scaled(&units, -1.0);
                (objective, Sense::Minimize)
            }
        };

        Ok(Subproblem {
            parameter,
            order_count: self.instance.order_count(),
            aisle_count: self.instance.aisle_count(),
            constraints,
            objective,
            sense,
        })
    }

    fn check_parameter(&self, parameter: Parameter) -> Result<(), SearchError> {
        match parameter {
            Parameter::AisleCount(a) if a == 0 || a > self.instance.aisle_count() => {
                Err(SearchError::InvalidParameter(format!(
                    "aisle count {} outside [1, {}]",
                    a,
                    self.instance.aisle_count()
                )))
            }
            Parameter::RatioThreshold(k)
                if !k.is_finite()
                    || k < self.instance.min_ratio()
                    || k > self.instance.max_ratio() =>
            {
                Err(SearchError::InvalidParameter(format!(
                    "ratio threshold {} outside [{}, {}]",
                    k,
                    self.instance.min_ratio(),
                    self.instance.max_ratio()
                )))
            }
            _ => Ok(()),
        }
    }

    /// `Σ_o units(o) · W_o`
    fn units_picked(&self) -> LinearExpr<DecisionVar> {
        LinearExpr::from_terms(
            (0..self.instance.order_count())
                .map(|o| (DecisionVar::Order(o), self.instance.order_units(o) as f64)),
        )
    }

    /// `Σ_a A_a`
    fn aisles_opened(&self) -> LinearExpr<DecisionVar> {
        LinearExpr::from_terms(
            (0..self.instance.aisle_count()).map(|a| (DecisionVar::Aisle(a), 1.0)),
        )
    }

    fn common_constraints(&self) -> Vec<LinearConstraint<DecisionVar>> {
        let instance = self.instance;
        let lower = instance.lower_bound() as f64;
        let upper = instance.upper_bound() as f64;
        let mut constraints = Vec::new();

        let units = self.units_picked();
        constraints.push(LinearConstraint::ge(units.clone(), lower));
        constraints.push(LinearConstraint::le(units, upper));

        if self.wave_size_rule == WaveSizeRule::PerOrder {
            let m = self.big_m;
            for o in 0..instance.order_count() {
                let size = instance.order_units(o) as f64;
                let gate = || LinearExpr::from_terms([(DecisionVar::Order(o), m)]);
                // size <= upper + M (1 - W_o)
                constraints.push(LinearConstraint::le(gate(), upper + m - size));
                // size >= lower - M (1 - W_o)
                constraints.push(LinearConstraint::le(gate(), m + size - lower));
            }
        }

        for item in 0..instance.item_count() {
            let demand = instance.orders_demanding(item);
            if demand.is_empty() {
                continue;
            }
            let mut balance = LinearExpr::from_terms(
                demand
                    .iter()
                    .map(|&(o, qty)| (DecisionVar::Order(o), f64::from(qty))),
            );
            for &(a, qty) in instance.aisles_stocking(item) {
                balance.add_term(DecisionVar::Aisle(a), -f64::from(qty));
            }
            constraints.push(LinearConstraint::le(balance, 0.0));
        }

        constraints
    }
}

#[cfg(test)]
#[path = "subproblem_tests.rs"]
mod tests;
