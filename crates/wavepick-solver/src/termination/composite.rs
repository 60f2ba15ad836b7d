//! OR-composition of termination conditions.
//!
//! Uses macro-generated tuple implementations.

use super::Termination;
use crate::stats::SearchStats;

/// Terminates when ANY wrapped condition terminates.
///
/// # Example
///
/// ```
/// use wavepick_solver::{OrTermination, SubproblemCountTermination, TimeTermination};
///
/// // Stop after 30 seconds or 50 subproblems
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     SubproblemCountTermination::new(50),
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, stats: &SearchStats) -> bool {
                $((self.0).$idx.is_terminated(stats))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
