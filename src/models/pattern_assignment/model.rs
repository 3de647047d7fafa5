use itertools::iproduct;
use log::{debug, info};

use super::sets_and_parameters::{Parameters, PatternIndex, Sets};
use crate::milp::{
    ConstrSense, LpSum, MipSolver, Model, Sense, Solution, SolveError, Status, Var,
};
use crate::models::utils::{AddVars, ConvertVars};
use crate::problem::FacilityIndex;

pub struct PatternAssignmentSolver {}

#[allow(non_snake_case)]
impl PatternAssignmentSolver {
    /// builds the pattern assignment model
    pub fn build(sets: &Sets, parameters: &Parameters) -> (Model, Variables) {
        info!("Building pattern assignment model");

        let mut model = Model::new("pattern_assignment");

        let I = sets.I.len();
        let K = sets.K.len();

        //*************CREATE VARIABLES*************//

        // 1 if facility i serves exactly the customers of pattern k
        let x: Vec<Vec<Var>> = (I, K).binary(&mut model, "x");

        // ******************** ADD CONSTRAINTS ********************

        // a pattern whose demand exceeds the capacity of the facility can never be selected
        for (i, k) in iproduct!(0..I, 0..K) {
            if !parameters.feasible(i, k) {
                model.fix(&format!("capacity_{}_{}", i, k), x[i][k], 0.0);
            }
        }

        // every facility selects exactly one pattern (possibly the empty one)
        for i in 0..I {
            let lhs = (0..K).map(|k| x[i][k]).lp_sum();
            model.add_constr(&format!("one_pattern_{}", i), lhs, ConstrSense::Equal, 1.0);
        }

        // every customer is served by exactly one selected pattern
        for j in &sets.J {
            let lhs = iproduct!(0..I, 0..K)
                .filter(|&(_, k)| sets.K[k].contains(*j))
                .map(|(i, k)| x[i][k])
                .lp_sum();
            model.add_constr(&format!("cover_{}", j), lhs, ConstrSense::Equal, 1.0);
        }

        // objective: the total cost of the selected patterns
        let cost = iproduct!(0..I, 0..K)
            .map(|(i, k)| (x[i][k], parameters.C[i][k]))
            .lp_sum();
        model.set_objective(cost, Sense::Minimize);

        info!(
            "Successfully built pattern assignment model: {} variables, {} constraints",
            model.num_vars(),
            model.num_constrs()
        );

        (model, Variables { x })
    }

    pub fn solve(
        sets: &Sets,
        parameters: &Parameters,
        solver: &dyn MipSolver,
    ) -> Result<PatternAssignmentResult, SolveError> {
        let (model, variables) = Self::build(sets, parameters);

        info!("Solving pattern assignment model with {}", solver.name());
        let solution = solver.optimize(&model)?;
        info!("Finished optimizing: {:?}", solution.status);

        Ok(PatternAssignmentResult::new(sets, &variables, &solution))
    }
}

pub struct Variables {
    /// 1 if facility i serves exactly the customers of pattern k, indexed (i, k)
    pub x: Vec<Vec<Var>>,
}

pub struct PatternAssignmentResult {
    pub status: Status,
    /// The optimal objective value. NaN unless the status is optimal
    pub objective: f64,
    /// Value of x, indexed (i, k). Empty unless the status is optimal
    pub x: Vec<Vec<f64>>,
    /// The pattern selected by each facility. Empty unless the status is optimal
    pub selected: Vec<PatternIndex>,
}

impl PatternAssignmentResult {
    fn new(sets: &Sets, variables: &Variables, solution: &Solution) -> PatternAssignmentResult {
        if !solution.is_optimal() {
            return PatternAssignmentResult {
                status: solution.status,
                objective: f64::NAN,
                x: Vec::new(),
                selected: Vec::new(),
            };
        }

        let x = variables.x.convert(solution);

        // exactly one pattern per facility is selected in any feasible solution
        let selected = sets
            .I
            .iter()
            .map(|&i| {
                x[i].iter()
                    .position(|&v| v > 0.5)
                    .unwrap_or_else(|| panic!("facility {} selected no pattern", i))
            })
            .collect();

        debug!("Selected patterns: {:?}", selected);

        PatternAssignmentResult {
            status: solution.status,
            objective: solution.objective,
            x,
            selected,
        }
    }

    /// The facility serving each customer, in customer index order
    pub fn assignment(&self, sets: &Sets) -> Vec<FacilityIndex> {
        sets.J
            .iter()
            .map(|&j| {
                sets.I
                    .iter()
                    .position(|&i| sets.K[self.selected[i]].contains(j))
                    .unwrap_or_else(|| panic!("customer {} is not covered", j))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::Constr;
    use crate::problem::Problem;

    fn example() -> Problem {
        Problem::new(
            vec![5.0, 11.0, 9.0],
            vec![10, 20, 20],
            vec![5, 7, 10, 14, 11],
            vec![
                vec![9.0, 8.0, 3.0, 9.0, 9.0],
                vec![2.0, 6.0, 7.0, 5.0, 5.0],
                vec![4.0, 4.0, 8.0, 8.0, 3.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn one_variable_per_facility_pattern_pair() {
        let problem = example();
        let sets = Sets::new(&problem);
        let parameters = Parameters::new(&problem, &sets);
        let (model, variables) = PatternAssignmentSolver::build(&sets, &parameters);

        assert_eq!(model.num_vars(), 3 * 32);
        assert_eq!(variables.x.len(), 3);
        assert_eq!(variables.x[0].len(), 32);
    }

    #[test]
    fn infeasible_pairs_are_fixed_to_zero() {
        let problem = example();
        let sets = Sets::new(&problem);
        let parameters = Parameters::new(&problem, &sets);
        let (model, variables) = PatternAssignmentSolver::build(&sets, &parameters);

        let fixed: Vec<&Constr> = model
            .constrs()
            .iter()
            .filter(|c| c.name.starts_with("capacity_"))
            .collect();

        // facility 0 (capacity 10) admits only patterns of demand <= 10:
        // {}, {0}, {1}, {2} -> 28 of its 32 patterns are fixed
        let fixed_for_0 = fixed
            .iter()
            .filter(|c| c.name.starts_with("capacity_0_"))
            .count();
        assert_eq!(fixed_for_0, 28);

        for (i, k) in iproduct!(0..sets.I.len(), 0..sets.K.len()) {
            let is_fixed = fixed
                .iter()
                .any(|c| c.expr.coefficient(variables.x[i][k]) != 0.0);
            assert_eq!(is_fixed, parameters.D[k] > parameters.Q[i]);
        }
    }

    #[test]
    fn every_facility_and_customer_gets_an_equality() {
        let problem = example();
        let sets = Sets::new(&problem);
        let parameters = Parameters::new(&problem, &sets);
        let (model, _) = PatternAssignmentSolver::build(&sets, &parameters);

        let one_pattern = model
            .constrs()
            .iter()
            .filter(|c| c.name.starts_with("one_pattern_"))
            .count();
        let cover = model
            .constrs()
            .iter()
            .filter(|c| c.name.starts_with("cover_"))
            .count();

        assert_eq!(one_pattern, 3);
        assert_eq!(cover, 5);
        assert!(model
            .constrs()
            .iter()
            .all(|c| c.sense == ConstrSense::Equal));
    }

    #[test]
    fn objective_carries_the_pattern_costs() {
        let problem = example();
        let sets = Sets::new(&problem);
        let parameters = Parameters::new(&problem, &sets);
        let (model, variables) = PatternAssignmentSolver::build(&sets, &parameters);

        for (i, k) in iproduct!(0..sets.I.len(), 0..sets.K.len()) {
            assert_eq!(
                model.objective().coefficient(variables.x[i][k]),
                parameters.C[i][k]
            );
        }
    }

    #[test]
    fn building_twice_yields_identical_models() {
        let problem = example();
        let sets = Sets::new(&problem);
        let parameters = Parameters::new(&problem, &sets);

        let (first, _) = PatternAssignmentSolver::build(&sets, &parameters);
        let (second, _) = PatternAssignmentSolver::build(&sets, &parameters);

        assert_eq!(first, second);
    }
}
