//! A basic example for how to use the solver.
use seidel::{Config, System, max_abs_residual, report::unknown_label, solve, verify};

fn main() {
    // Define the system as its augmented matrix A|b.
    // Each row is the coefficients of x_1..x_n, then the constant on the right-hand side.
    let system = System::from_rows(&[
        vec![4.0, 1.0, 1.0, 7.0],
        vec![1.0, 3.0, 1.0, 6.0],
        vec![1.0, 1.0, 5.0, 8.0],
    ])
    .expect("this system is well-formed");

    // Stop once every unknown changes by less than 0.01% between iterations,
    // and over-relax slightly.
    let config = Config::default()
        .with_tolerance_percent(0.01)
        .with_relaxation_factor(1.1);

    // Run the solver!
    let outcome = match solve(&system, config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("seidel could not solve this system: {e}");
            return;
        }
    };

    // Check the outcome.
    println!(
        "{:?} after {} iterations",
        outcome.termination(),
        outcome.history().len()
    );
    for (i, x) in outcome.solution().iter().enumerate() {
        println!("{} = {x}", unknown_label(i));
    }
    let residuals = verify(&system, outcome.solution()).expect("solution has one value per row");
    println!("Largest residual: {:e}", max_abs_residual(&residuals));
}
