use grb::prelude::*;
use log::{debug, info};

use super::{ConstrSense, MipSolver, Sense, Solution, SolveError, Status, VarType};

/// MILP solver backed by Gurobi. Requires a licensed Gurobi installation.
pub struct GurobiSolver;

impl GurobiSolver {
    pub fn new() -> Self {
        GurobiSolver
    }

    fn convert_status(status: grb::Status) -> Status {
        match status {
            grb::Status::Optimal => Status::Optimal,
            grb::Status::Infeasible => Status::Infeasible,
            grb::Status::InfOrUnbd | grb::Status::Unbounded => Status::Unbounded,
            grb::Status::TimeLimit => Status::TimeLimit,
            _ => Status::Undefined,
        }
    }
}

impl Default for GurobiSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MipSolver for GurobiSolver {
    fn optimize(&self, model: &super::Model) -> Result<Solution, SolveError> {
        info!(
            "Optimizing model {} with Gurobi: {} variables, {} constraints",
            model.name(),
            model.num_vars(),
            model.num_constrs()
        );

        let backend = || -> grb::Result<Solution> {
            let mut m = Model::new(model.name())?;
            m.set_param(param::OutputFlag, 0)?;

            let vars: Vec<Var> = model
                .vars()
                .iter()
                .map(|def| {
                    let vtype = match def.vtype {
                        VarType::Binary => grb::VarType::Binary,
                        VarType::Continuous => grb::VarType::Continuous,
                    };
                    m.add_var(&def.name, vtype, 0.0, def.lb, def.ub, std::iter::empty())
                })
                .collect::<grb::Result<_>>()?;
            m.update()?;

            for constr in model.constrs() {
                let mut lhs = grb::expr::LinExpr::new();
                for &(var, coeff) in constr.expr.terms() {
                    lhs.add_term(coeff, vars[var.index()]);
                }

                let rhs = constr.rhs;
                match constr.sense {
                    ConstrSense::Equal => m.add_constr(&constr.name, c!(lhs == rhs))?,
                    ConstrSense::LessEqual => m.add_constr(&constr.name, c!(lhs <= rhs))?,
                    ConstrSense::GreaterEqual => m.add_constr(&constr.name, c!(lhs >= rhs))?,
                };
            }

            let mut objective = grb::expr::LinExpr::new();
            for &(var, coeff) in model.objective().terms() {
                objective.add_term(coeff, vars[var.index()]);
            }
            let sense = match model.sense() {
                Sense::Minimize => ModelSense::Minimize,
                Sense::Maximize => ModelSense::Maximize,
            };
            m.set_objective(objective, sense)?;

            m.optimize()?;
            let status = Self::convert_status(m.status()?);
            debug!("Gurobi finished with status {:?}", status);

            match status {
                Status::Optimal => {
                    let mut values = Vec::with_capacity(vars.len());
                    for var in &vars {
                        values.push(m.get_obj_attr(attr::X, var)?);
                    }

                    Ok(Solution {
                        status,
                        objective: m.get_attr(attr::ObjVal)?,
                        values,
                    })
                }
                _ => Ok(Solution {
                    status,
                    objective: f64::NAN,
                    values: Vec::new(),
                }),
            }
        };

        backend().map_err(|e| SolveError::Backend(e.to_string()))
    }

    fn name(&self) -> &str {
        "Gurobi"
    }
}
