use itertools::Itertools;

use crate::problem::{CustomerIndex, Quantity};

/// A subset of the customer set, treated as a single assignable unit.
///
/// Members are stored in increasing index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    members: Vec<CustomerIndex>,
}

impl Pattern {
    /// The customers in this pattern, in increasing index order
    pub fn members(&self) -> &[CustomerIndex] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the given customer is a member of this pattern
    pub fn contains(&self, customer: CustomerIndex) -> bool {
        self.members.binary_search(&customer).is_ok()
    }

    /// The total demand of the pattern's members
    pub fn demand(&self, demands: &[Quantity]) -> Quantity {
        self.members.iter().map(|&j| demands[j]).sum()
    }
}

impl From<Vec<CustomerIndex>> for Pattern {
    fn from(members: Vec<CustomerIndex>) -> Pattern {
        Pattern { members }
    }
}

/// All `2^n` subsets of the customer index set `0..n`, starting with the
/// empty set and grouped by increasing size. Deterministic across calls.
pub fn powerset(n: usize) -> Vec<Pattern> {
    (0..n).powerset().map(Pattern::from).collect()
}
