use crate::patterns::{powerset, Pattern};
use crate::problem::{Cost, CustomerIndex, FacilityIndex, Problem, Quantity};

pub type PatternIndex = usize;

/// Index sets for the pattern assignment model
#[allow(non_snake_case)]
pub struct Sets {
    /// Set of facilities
    pub I: Vec<FacilityIndex>,
    /// Set of customers
    pub J: Vec<CustomerIndex>,
    /// Set of patterns: all subsets of J, the empty set first
    pub K: Vec<Pattern>,
}

impl Sets {
    pub fn new(problem: &Problem) -> Sets {
        Sets {
            I: (0..problem.num_facilities()).collect(),
            J: (0..problem.num_customers()).collect(),
            K: powerset(problem.num_customers()),
        }
    }
}

/// Parameters for the pattern assignment model
#[allow(non_snake_case)]
pub struct Parameters {
    /// Cost of facility i serving exactly the customers of pattern k, indexed (i, k).
    /// Zero for the empty pattern, otherwise the opening cost of i plus the
    /// connection costs from i to every member of k.
    pub C: Vec<Vec<Cost>>,
    /// Total demand of pattern k
    pub D: Vec<Quantity>,
    /// Capacity of facility i
    pub Q: Vec<Quantity>,
}

#[allow(non_snake_case)]
impl Parameters {
    pub fn new(problem: &Problem, sets: &Sets) -> Parameters {
        let C = sets
            .I
            .iter()
            .map(|&i| {
                sets.K
                    .iter()
                    .map(|k| Self::pattern_cost(problem, i, k))
                    .collect()
            })
            .collect();

        let D = sets.K.iter().map(|k| k.demand(problem.demands())).collect();

        let Q = sets.I.iter().map(|&i| problem.capacity(i)).collect();

        Parameters { C, D, Q }
    }

    /// The cost of assigning the whole pattern to the given facility
    pub fn pattern_cost(problem: &Problem, facility: FacilityIndex, pattern: &Pattern) -> Cost {
        if pattern.is_empty() {
            return 0.0;
        }

        problem.opening_cost(facility)
            + pattern
                .members()
                .iter()
                .map(|&j| problem.connection_cost(facility, j))
                .sum::<Cost>()
    }

    /// Whether pattern k fits within the capacity of facility i
    pub fn feasible(&self, i: FacilityIndex, k: PatternIndex) -> bool {
        self.D[k] <= self.Q[i]
    }
}
