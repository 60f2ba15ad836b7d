//! Hand-built instances.

use wavepick_core::ProblemInstance;

/// The three-order scenario in the challenge text format.
///
/// Orders 0 and 1 need item 0 (2 units each), all stocked by aisle 0.
/// Order 2 needs one unit of item 1, stocked only by aisle 1. With bounds
/// `[1, 5]` the best wave is orders 0 and 1 from aisle 0: ratio 4.0, against
/// 2.5 when both aisles are opened.
pub const SCENARIO_TEXT: &str = "\
# orders items aisles
3 2 2
1 0 2
1 0 2
1 1 1
1 0 4
1 1 1
1 5
";

/// Builds the instance described by [`SCENARIO_TEXT`].
pub fn scenario_instance() -> ProblemInstance {
    ProblemInstance::builder(2)
        .order([(0, 2)])
        .order([(0, 2)])
        .order([(1, 1)])
        .aisle([(0, 4)])
        .aisle([(1, 1)])
        .bounds(1, 5)
        .build()
        .expect("scenario instance is valid")
}

/// Demands 100 to 200 units while only 10 units are stocked in total.
pub fn infeasible_instance() -> ProblemInstance {
    ProblemInstance::builder(2)
        .order([(0, 6)])
        .order([(1, 6), (0, 2)])
        .order([(1, 3)])
        .aisle([(0, 4), (1, 2)])
        .aisle([(1, 4)])
        .bounds(100, 200)
        .build()
        .expect("infeasible instance is structurally valid")
}

/// Wave size must be exactly 5 units.
///
/// Orders carry 2, 3 and 4 units, so only orders {0, 1} make a valid wave.
pub fn point_bounds_instance() -> ProblemInstance {
    ProblemInstance::builder(3)
        .order([(0, 2)])
        .order([(1, 3)])
        .order([(2, 4)])
        .aisle([(0, 2), (2, 4)])
        .aisle([(1, 3)])
        .aisle([(0, 1), (1, 1), (2, 1)])
        .bounds(5, 5)
        .build()
        .expect("point bounds instance is valid")
}

/// Six orders over four items and five aisles, small enough for
/// [`brute_force_best`](crate::brute_force_best).
pub fn mixed_instance() -> ProblemInstance {
    ProblemInstance::builder(4)
        .order([(0, 3), (1, 1)])
        .order([(1, 2)])
        .order([(2, 4)])
        .order([(0, 1), (3, 2)])
        .order([(3, 5)])
        .order([(1, 1), (2, 1)])
        .aisle([(0, 4), (1, 1)])
        .aisle([(1, 3), (2, 2)])
        .aisle([(2, 5), (3, 1)])
        .aisle([(3, 7)])
        .aisle([(0, 1), (1, 1), (2, 1), (3, 1)])
        .bounds(4, 12)
        .build()
        .expect("mixed instance is valid")
}
