//! A pattern (column) formulation of the capacitated facility location
//! problem.
//!
//! The crate enumerates every subset of the customer set, prices each
//! (facility, pattern) pair, assembles a binary program selecting one pattern
//! per facility such that every customer is covered exactly once, and hands
//! the program to an external MILP solver.

pub mod milp;
pub mod models;
pub mod patterns;
pub mod problem;
