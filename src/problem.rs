use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The type used for demand and capacity
pub type Quantity = u64;
/// The type used for cost
pub type Cost = f64;

pub type FacilityIndex = usize;
pub type CustomerIndex = usize;

/// A capacitated facility location instance.
///
/// Facilities and customers are identified by their index. All data is
/// declared once at construction and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawProblem")]
pub struct Problem {
    /// The cost of opening each facility. Ordered by facility index
    opening_costs: Vec<Cost>,
    /// The service capacity of each facility. Ordered by facility index
    capacities: Vec<Quantity>,
    /// The demand of each customer. Ordered by customer index
    demands: Vec<Quantity>,
    /// The cost of connecting a customer to a facility, indexed (facility, customer)
    connection_costs: Vec<Vec<Cost>>,
}

impl Problem {
    pub fn new(
        opening_costs: Vec<Cost>,
        capacities: Vec<Quantity>,
        demands: Vec<Quantity>,
        connection_costs: Vec<Vec<Cost>>,
    ) -> Result<Problem, ProblemConstructionError> {
        use ProblemConstructionError::*;

        if opening_costs.is_empty() {
            return Err(NoFacilities);
        }

        if demands.is_empty() {
            return Err(NoCustomers);
        }

        let facilities = opening_costs.len();
        let customers = demands.len();

        if capacities.len() != facilities {
            return Err(CapacitySizeMismatch {
                expected: facilities,
                actual: capacities.len(),
            });
        }

        if connection_costs.len() != facilities {
            return Err(ConnectionCostSizeMismatch {
                expected: (facilities, customers),
                actual: (
                    connection_costs.len(),
                    connection_costs.first().map(|r| r.len()).unwrap_or(0),
                ),
            });
        }

        for row in &connection_costs {
            if row.len() != customers {
                return Err(ConnectionCostSizeMismatch {
                    expected: (facilities, customers),
                    actual: (connection_costs.len(), row.len()),
                });
            }
        }

        for (i, &cost) in opening_costs.iter().enumerate() {
            if !(cost >= 0.0) {
                return Err(InvalidOpeningCost { facility: i, cost });
            }
        }

        for (i, row) in connection_costs.iter().enumerate() {
            for (j, &cost) in row.iter().enumerate() {
                if !(cost >= 0.0) {
                    return Err(InvalidConnectionCost {
                        facility: i,
                        customer: j,
                        cost,
                    });
                }
            }
        }

        Ok(Problem {
            opening_costs,
            capacities,
            demands,
            connection_costs,
        })
    }

    /// The number of facilities
    pub fn num_facilities(&self) -> usize {
        self.opening_costs.len()
    }

    /// The number of customers
    pub fn num_customers(&self) -> usize {
        self.demands.len()
    }

    /// The cost of opening the given facility
    pub fn opening_cost(&self, facility: FacilityIndex) -> Cost {
        self.opening_costs[facility]
    }

    /// The service capacity of the given facility
    pub fn capacity(&self, facility: FacilityIndex) -> Quantity {
        self.capacities[facility]
    }

    /// The demand of the given customer
    pub fn demand(&self, customer: CustomerIndex) -> Quantity {
        self.demands[customer]
    }

    /// The demands of all customers. Ordered by customer index
    pub fn demands(&self) -> &[Quantity] {
        &self.demands
    }

    /// The cost of connecting `customer` to `facility`
    pub fn connection_cost(&self, facility: FacilityIndex, customer: CustomerIndex) -> Cost {
        self.connection_costs[facility][customer]
    }

    /// The total demand over all customers
    pub fn total_demand(&self) -> Quantity {
        self.demands.iter().sum()
    }

    /// The total capacity over all facilities
    pub fn total_capacity(&self) -> Quantity {
        self.capacities.iter().sum()
    }
}

#[derive(Debug, Display)]
pub enum ProblemConstructionError {
    /// There must be at least one facility
    #[display(fmt = "there must be at least one facility")]
    NoFacilities,
    /// There must be at least one customer
    #[display(fmt = "there must be at least one customer")]
    NoCustomers,
    /// The number of capacities does not match the number of facilities
    #[display(fmt = "expected {} capacities, got {}", expected, actual)]
    CapacitySizeMismatch { expected: usize, actual: usize },
    /// The size of the connection cost matrix is not as expected
    #[display(
        fmt = "connection cost matrix has shape {:?}, expected {:?}",
        actual,
        expected
    )]
    ConnectionCostSizeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    /// Opening cost is negative (or NaN)
    #[display(
        fmt = "opening cost of facility {} is not a non-negative number: {}",
        facility,
        cost
    )]
    InvalidOpeningCost { facility: FacilityIndex, cost: Cost },
    /// Connection cost is negative (or NaN)
    #[display(
        fmt = "connection cost ({}, {}) is not a non-negative number: {}",
        facility,
        customer,
        cost
    )]
    InvalidConnectionCost {
        facility: FacilityIndex,
        customer: CustomerIndex,
        cost: Cost,
    },
}

impl std::error::Error for ProblemConstructionError {}

/// The raw, unvalidated form of a problem instance. Every deserialized
/// instance passes through `Problem::new`.
#[derive(Deserialize)]
struct RawProblem {
    opening_costs: Vec<Cost>,
    capacities: Vec<Quantity>,
    demands: Vec<Quantity>,
    connection_costs: Vec<Vec<Cost>>,
}

impl TryFrom<RawProblem> for Problem {
    type Error = ProblemConstructionError;

    fn try_from(raw: RawProblem) -> Result<Problem, ProblemConstructionError> {
        Problem::new(
            raw.opening_costs,
            raw.capacities,
            raw.demands,
            raw.connection_costs,
        )
    }
}
