use std::path::PathBuf;

use clap::Parser;
use log::info;

use flp_patterns::milp::{HighsSolver, MipSolver, Status};
use flp_patterns::models::pattern_assignment::{Parameters, PatternAssignmentSolver, Sets};
use flp_patterns::problem::Problem;

/// Solve a facility location instance with the pattern formulation
#[derive(Parser)]
struct Args {
    /// Path to a JSON problem instance
    instance: PathBuf,
    /// The MILP solver to use
    #[clap(long, default_value = "highs")]
    solver: String,
}

fn solver_by_name(name: &str) -> Result<Box<dyn MipSolver>, Box<dyn std::error::Error>> {
    match name {
        "highs" => Ok(Box::new(HighsSolver::new())),
        #[cfg(feature = "gurobi-solver")]
        "gurobi" => Ok(Box::new(flp_patterns::milp::GurobiSolver::new())),
        _ => Err(format!("unknown solver: {}", name).into()),
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::open(&args.instance)?;
    let reader = std::io::BufReader::new(file);
    let problem: Problem = serde_json::from_reader(reader)?;

    info!(
        "Loaded instance with {} facilities and {} customers",
        problem.num_facilities(),
        problem.num_customers()
    );

    let solver = solver_by_name(&args.solver)?;

    let sets = Sets::new(&problem);
    let parameters = Parameters::new(&problem, &sets);
    let result = PatternAssignmentSolver::solve(&sets, &parameters, solver.as_ref())?;

    match result.status {
        Status::Optimal => {
            println!("Optimal cost: {}", result.objective);
            for (i, &k) in result.selected.iter().enumerate() {
                let pattern = &sets.K[k];
                if pattern.is_empty() {
                    println!("Facility {}: closed", i);
                } else {
                    println!("Facility {}: serves customers {:?}", i, pattern.members());
                }
            }
        }
        status => println!("No optimal solution found: {:?}", status),
    }

    Ok(())
}

pub fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
