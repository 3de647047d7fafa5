//! A minimal mixed-integer linear programming interface.
//!
//! The model is an explicit, passed object rather than a shared singleton,
//! and is independent of any particular solver library. Backends implement
//! [`MipSolver`].

use derive_more::Display;

pub mod highs;

#[cfg(feature = "gurobi-solver")]
pub mod gurobi;

pub use self::highs::HighsSolver;

#[cfg(feature = "gurobi-solver")]
pub use self::gurobi::GurobiSolver;

/// A handle to a decision variable of a [`Model`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(usize);

impl Var {
    /// The position of the variable in its model
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Binary,
    Continuous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub name: String,
    pub vtype: VarType,
    pub lb: f64,
    pub ub: f64,
}

/// A linear expression over the variables of a model.
///
/// Terms referring to the same variable are merged, so two expressions built
/// from the same data compare equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinExpr {
    terms: Vec<(Var, f64)>,
}

impl LinExpr {
    pub fn new() -> LinExpr {
        LinExpr::default()
    }

    pub fn add_term(&mut self, var: Var, coeff: f64) {
        match self.terms.iter_mut().find(|(v, _)| *v == var) {
            Some((_, c)) => *c += coeff,
            None => self.terms.push((var, coeff)),
        }
    }

    pub fn terms(&self) -> &[(Var, f64)] {
        &self.terms
    }

    /// The coefficient of the given variable (zero if absent)
    pub fn coefficient(&self, var: Var) -> f64 {
        self.terms
            .iter()
            .find(|(v, _)| *v == var)
            .map(|(_, c)| *c)
            .unwrap_or(0.0)
    }
}

/// Conversion into a single linear term. Lets [`LpSum::lp_sum`] accept plain
/// variables as well as (variable, coefficient) pairs.
pub trait IntoTerm {
    fn into_term(self) -> (Var, f64);
}

impl IntoTerm for Var {
    fn into_term(self) -> (Var, f64) {
        (self, 1.0)
    }
}

impl IntoTerm for (Var, f64) {
    fn into_term(self) -> (Var, f64) {
        self
    }
}

/// Sums an iterator of terms into a [`LinExpr`]
pub trait LpSum {
    fn lp_sum(self) -> LinExpr;
}

impl<I> LpSum for I
where
    I: IntoIterator,
    I::Item: IntoTerm,
{
    fn lp_sum(self) -> LinExpr {
        let mut expr = LinExpr::new();
        for item in self {
            let (var, coeff) = item.into_term();
            expr.add_term(var, coeff);
        }
        expr
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstrSense {
    Equal,
    LessEqual,
    GreaterEqual,
}

/// A linear constraint `expr (<=|=|>=) rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct Constr {
    pub name: String,
    pub expr: LinExpr,
    pub sense: ConstrSense,
    pub rhs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// A named container for variables, constraints and a linear objective
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    vars: Vec<VarDef>,
    constrs: Vec<Constr>,
    objective: LinExpr,
    sense: Sense,
}

impl Model {
    pub fn new(name: &str) -> Model {
        Model {
            name: name.to_string(),
            vars: Vec::new(),
            constrs: Vec::new(),
            objective: LinExpr::new(),
            sense: Sense::Minimize,
        }
    }

    pub fn add_var(&mut self, name: &str, vtype: VarType, lb: f64, ub: f64) -> Var {
        let var = Var(self.vars.len());
        self.vars.push(VarDef {
            name: name.to_string(),
            vtype,
            lb,
            ub,
        });
        var
    }

    pub fn add_constr(&mut self, name: &str, expr: LinExpr, sense: ConstrSense, rhs: f64) {
        self.constrs.push(Constr {
            name: name.to_string(),
            expr,
            sense,
            rhs,
        });
    }

    /// Fixes a variable to a constant through an equality constraint
    pub fn fix(&mut self, name: &str, var: Var, value: f64) {
        let expr = std::iter::once(var).lp_sum();
        self.add_constr(name, expr, ConstrSense::Equal, value);
    }

    pub fn set_objective(&mut self, expr: LinExpr, sense: Sense) {
        self.objective = expr;
        self.sense = sense;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vars(&self) -> &[VarDef] {
        &self.vars
    }

    pub fn constrs(&self) -> &[Constr] {
        &self.constrs
    }

    pub fn objective(&self) -> &LinExpr {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn num_constrs(&self) -> usize {
        self.constrs.len()
    }

    /// The objective coefficient of every variable, in variable order
    pub fn objective_coefficients(&self) -> Vec<f64> {
        let mut coeffs = vec![0.0; self.vars.len()];
        for &(var, coeff) in self.objective.terms() {
            coeffs[var.index()] += coeff;
        }
        coeffs
    }
}

/// Status reported by a solver after optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Optimal,
    Infeasible,
    Unbounded,
    TimeLimit,
    Undefined,
}

/// The outcome of a blocking optimize call.
///
/// `objective` and `values` are only meaningful when `status` is
/// [`Status::Optimal`]; otherwise `values` is empty.
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: Status,
    pub objective: f64,
    pub values: Vec<f64>,
}

impl Solution {
    pub fn value(&self, var: Var) -> f64 {
        self.values[var.index()]
    }

    pub fn is_optimal(&self) -> bool {
        self.status == Status::Optimal
    }
}

#[derive(Debug, Display)]
pub enum SolveError {
    /// The solver library reported a failure
    #[display(fmt = "solver failure: {}", _0)]
    Backend(String),
}

impl std::error::Error for SolveError {}

/// A generic MILP solver collaborator
pub trait MipSolver {
    /// Optimizes the model, blocking until the solver returns. Non-optimal
    /// outcomes (infeasible, unbounded, ...) are reported through
    /// [`Solution::status`], not as errors.
    fn optimize(&self, model: &Model) -> Result<Solution, SolveError>;

    /// The solver name for logging
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expressions_merge_duplicate_terms() {
        let mut model = Model::new("m");
        let x = model.add_var("x", VarType::Binary, 0.0, 1.0);
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0);

        let expr = [(x, 1.0), (y, 2.0), (x, 3.0)].into_iter().lp_sum();
        assert_eq!(expr.coefficient(x), 4.0);
        assert_eq!(expr.coefficient(y), 2.0);
        assert_eq!(expr.terms().len(), 2);
    }

    #[test]
    fn fixing_a_variable_adds_an_equality() {
        let mut model = Model::new("m");
        let x = model.add_var("x", VarType::Binary, 0.0, 1.0);
        model.fix("fix_x", x, 0.0);

        let constr = &model.constrs()[0];
        assert_eq!(constr.sense, ConstrSense::Equal);
        assert_eq!(constr.rhs, 0.0);
        assert_eq!(constr.expr.coefficient(x), 1.0);
    }

    #[test]
    fn objective_coefficients_follow_variable_order() {
        let mut model = Model::new("m");
        let x = model.add_var("x", VarType::Binary, 0.0, 1.0);
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0);
        let obj = [(y, 3.5), (x, 1.5)].into_iter().lp_sum();
        model.set_objective(obj, Sense::Minimize);

        assert_eq!(model.objective_coefficients(), vec![1.5, 3.5]);
    }
}
