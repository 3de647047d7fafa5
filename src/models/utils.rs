use std::ops::Range;

use crate::milp::{Model, Solution, Var, VarType};

/// Bulk creation of identically-typed variables over index sets.
///
/// Implemented for `usize` (a vector of variables) and pairs of `usize`
/// (a matrix of variables). Variables are named `{base_name}_{indices}`.
pub trait AddVars {
    type Out;

    /// Create a variable for any type
    fn vars(&self, model: &mut Model, base_name: &str, vtype: VarType, bounds: &Range<f64>)
        -> Self::Out;

    /// Binary variables
    fn binary(&self, model: &mut Model, base_name: &str) -> Self::Out {
        self.vars(model, base_name, VarType::Binary, &(0.0..1.0))
    }

    /// A continuous non-negative variable
    fn cont(&self, model: &mut Model, base_name: &str) -> Self::Out {
        self.vars(model, base_name, VarType::Continuous, &(0.0..f64::INFINITY))
    }
}

impl AddVars for usize {
    type Out = Vec<Var>;

    fn vars(
        &self,
        model: &mut Model,
        base_name: &str,
        vtype: VarType,
        bounds: &Range<f64>,
    ) -> Self::Out {
        let mut vec = Vec::with_capacity(*self);
        for i in 0..*self {
            vec.push(model.add_var(
                &format!("{}_{}", base_name, i),
                vtype,
                bounds.start,
                bounds.end,
            ));
        }

        vec
    }
}

impl AddVars for (usize, usize) {
    type Out = Vec<<usize as AddVars>::Out>;

    fn vars(
        &self,
        model: &mut Model,
        base_name: &str,
        vtype: VarType,
        bounds: &Range<f64>,
    ) -> Self::Out {
        let mut out = Vec::with_capacity(self.0);
        for i in 0..self.0 {
            out.push(
                self.1
                    .vars(model, &format!("{}_{}", base_name, i), vtype, bounds),
            )
        }

        out
    }
}

/// Trait that converts solved variables to their values
pub trait ConvertVars {
    type Out;
    fn convert(&self, solution: &Solution) -> Self::Out;
}

impl<T: ConvertVars> ConvertVars for Vec<T> {
    type Out = Vec<T::Out>;

    fn convert(&self, solution: &Solution) -> Self::Out {
        self.iter().map(|e| e.convert(solution)).collect()
    }
}

impl ConvertVars for Var {
    type Out = f64;

    fn convert(&self, solution: &Solution) -> Self::Out {
        solution.value(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::milp::Status;

    #[test]
    fn variable_grid_is_created_in_row_major_order() {
        let mut model = Model::new("m");
        let x: Vec<Vec<Var>> = (2, 3).binary(&mut model, "x");

        assert_eq!(model.num_vars(), 6);
        assert_eq!(x[1][2].index(), 5);
        assert_eq!(model.vars()[5].name, "x_1_2");
        assert_eq!(model.vars()[0].vtype, VarType::Binary);
    }

    #[test]
    fn convert_extracts_values_by_index() {
        let mut model = Model::new("m");
        let x: Vec<Vec<Var>> = (2, 2).binary(&mut model, "x");
        let solution = Solution {
            status: Status::Optimal,
            objective: 0.0,
            values: vec![1.0, 0.0, 0.0, 1.0],
        };

        assert_eq!(x.convert(&solution), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }
}
