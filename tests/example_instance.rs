use flp_patterns::milp::{HighsSolver, Status};
use flp_patterns::models::pattern_assignment::{Parameters, PatternAssignmentSolver, Sets};
use flp_patterns::problem::Problem;

fn example() -> Problem {
    serde_json::from_str(include_str!("../instances/example.json")).unwrap()
}

#[test]
fn example_instance_solves_to_42() {
    let problem = example();
    let sets = Sets::new(&problem);
    let parameters = Parameters::new(&problem, &sets);

    let result = PatternAssignmentSolver::solve(&sets, &parameters, &HighsSolver::new()).unwrap();

    assert_eq!(result.status, Status::Optimal);
    assert!((result.objective - 42.0).abs() < 1e-6);
}

#[test]
fn optimal_solution_covers_every_customer_exactly_once() {
    let problem = example();
    let sets = Sets::new(&problem);
    let parameters = Parameters::new(&problem, &sets);

    let result = PatternAssignmentSolver::solve(&sets, &parameters, &HighsSolver::new()).unwrap();
    assert_eq!(result.status, Status::Optimal);

    // exactly one pattern per facility
    assert_eq!(result.selected.len(), problem.num_facilities());
    for i in &sets.I {
        let chosen = result.x[*i].iter().filter(|&&v| v > 0.5).count();
        assert_eq!(chosen, 1);
    }

    // each customer appears in exactly one selected pattern
    for j in &sets.J {
        let covering = result
            .selected
            .iter()
            .filter(|&&k| sets.K[k].contains(*j))
            .count();
        assert_eq!(covering, 1);
    }

    // selected patterns respect the capacities
    for (i, &k) in result.selected.iter().enumerate() {
        assert!(parameters.D[k] <= parameters.Q[i]);
    }

    // the tight instance admits a single optimal layout: facility 0 takes
    // customer 2, facility 1 takes {0, 3} and facility 2 takes {1, 4}
    assert_eq!(result.assignment(&sets), vec![1, 2, 0, 1, 2]);
}

#[test]
fn undersized_instance_is_reported_infeasible() {
    // total capacity 15 < total demand 20; no precheck, the solver reports it
    let problem = Problem::new(
        vec![5.0, 7.0],
        vec![10, 5],
        vec![12, 8],
        vec![vec![1.0, 2.0], vec![3.0, 4.0]],
    )
    .unwrap();

    let sets = Sets::new(&problem);
    let parameters = Parameters::new(&problem, &sets);

    let result = PatternAssignmentSolver::solve(&sets, &parameters, &HighsSolver::new()).unwrap();
    assert_eq!(result.status, Status::Infeasible);
    assert!(result.objective.is_nan());
    assert!(result.selected.is_empty());
}

#[test]
fn solving_is_deterministic() {
    let problem = example();
    let sets = Sets::new(&problem);
    let parameters = Parameters::new(&problem, &sets);

    let solver = HighsSolver::new();
    let first = PatternAssignmentSolver::solve(&sets, &parameters, &solver).unwrap();
    let second = PatternAssignmentSolver::solve(&sets, &parameters, &solver).unwrap();

    assert_eq!(first.status, second.status);
    assert_eq!(first.objective, second.objective);
    assert_eq!(first.selected, second.selected);
}
