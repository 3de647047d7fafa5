use ::highs::{Col, HighsModelStatus, RowProblem, Sense as HighsSense};
use log::{debug, info};

use super::{ConstrSense, MipSolver, Model, Sense, Solution, SolveError, Status, VarType};

/// MILP solver backed by the HiGHS library
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }

    fn convert_status(status: HighsModelStatus) -> Status {
        match status {
            HighsModelStatus::Optimal => Status::Optimal,
            HighsModelStatus::Infeasible => Status::Infeasible,
            HighsModelStatus::Unbounded => Status::Unbounded,
            HighsModelStatus::UnboundedOrInfeasible => Status::Unbounded,
            HighsModelStatus::ReachedTimeLimit => Status::TimeLimit,
            _ => Status::Undefined,
        }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MipSolver for HighsSolver {
    fn optimize(&self, model: &Model) -> Result<Solution, SolveError> {
        info!(
            "Optimizing model {} with HiGHS: {} variables, {} constraints",
            model.name(),
            model.num_vars(),
            model.num_constrs()
        );

        let mut problem = RowProblem::new();

        // columns carry their objective coefficient in HiGHS
        let obj_coeffs = model.objective_coefficients();
        let cols: Vec<Col> = model
            .vars()
            .iter()
            .zip(&obj_coeffs)
            .map(|(def, &obj)| match def.vtype {
                VarType::Binary => problem.add_integer_column(obj, def.lb..=def.ub),
                VarType::Continuous => problem.add_column(obj, def.lb..=def.ub),
            })
            .collect();

        for constr in model.constrs() {
            let terms: Vec<(Col, f64)> = constr
                .expr
                .terms()
                .iter()
                .map(|&(var, coeff)| (cols[var.index()], coeff))
                .collect();

            match constr.sense {
                ConstrSense::Equal => problem.add_row(constr.rhs..=constr.rhs, terms),
                ConstrSense::LessEqual => problem.add_row(..=constr.rhs, terms),
                ConstrSense::GreaterEqual => problem.add_row(constr.rhs.., terms),
            };
        }

        let sense = match model.sense() {
            Sense::Minimize => HighsSense::Minimise,
            Sense::Maximize => HighsSense::Maximise,
        };

        let solved = problem.optimise(sense).solve();
        let status = Self::convert_status(solved.status());
        debug!("HiGHS finished with status {:?}", status);

        match status {
            Status::Optimal => {
                let values = solved.get_solution().columns().to_vec();
                let objective = obj_coeffs
                    .iter()
                    .zip(&values)
                    .map(|(coeff, value)| coeff * value)
                    .sum();

                Ok(Solution {
                    status,
                    objective,
                    values,
                })
            }
            _ => Ok(Solution {
                status,
                objective: f64::NAN,
                values: Vec::new(),
            }),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
