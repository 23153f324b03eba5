use std::{
    fs::File,
    io::{self, BufRead, BufWriter, Read, Write},
    path::PathBuf,
    str::FromStr,
    time::{Duration, Instant},
};

use anyhow::{Context, bail};
use clap::Parser;
use seidel::{
    Config, SolveOutcome, System, Termination, Warning,
    config::{DEFAULT_MAX_ITERATIONS, DEFAULT_RELAXATION_FACTOR, DEFAULT_TOLERANCE_PERCENT},
    max_abs_residual,
    report::{unknown_label, write_report},
};

mod visualize;

/// Exit code when the solver stopped without converging.
const EXIT_NOT_CONVERGED: i32 = 2;

#[derive(Parser)]
#[command(name = "seidel", version, about, long_about = None)]
struct Cli {
    /// Path to the augmented matrix A|b, one row per line.
    /// Use '-' for stdin.
    #[arg(short = 'f', long)]
    filepath: PathBuf,

    /// Stop once every unknown's relative error (percent) is below this.
    #[arg(short = 't', long, default_value_t = DEFAULT_TOLERANCE_PERCENT)]
    tolerance: f64,

    /// Maximum number of iterations.
    #[arg(short = 'm', long = "max-iterations", default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Relaxation factor. 1 is plain Gauss-Seidel, above 1 over-relaxes.
    #[arg(short = 'w', long, default_value_t = DEFAULT_RELAXATION_FACTOR)]
    relaxation: f64,

    /// Ask for the tolerance, iteration budget and relaxation factor on the terminal.
    #[arg(short = 'i', long, default_value_t = false)]
    interactive: bool,

    /// Write the convergence history, solution and residuals to this CSV file.
    #[arg(short = 'o', long = "report")]
    report_path: Option<PathBuf>,

    /// Save a convergence plot as a PNG.
    #[arg(long = "plot")]
    plot_path: Option<PathBuf>,

    /// Print every iteration's values and relative errors.
    #[arg(long = "show-history")]
    show_history: bool,

    /// Log every iteration to stderr.
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Disable colored output.
    #[arg(long = "no-color", default_value_t = false)]
    no_color: bool,
}

impl Cli {
    fn chart_name(&self) -> String {
        if self.filepath.display().to_string() == "-" {
            "stdin".to_owned()
        } else {
            self.filepath.display().to_string()
        }
    }

    fn config(&self) -> Config {
        Config::default()
            .with_tolerance_percent(self.tolerance)
            .with_max_iterations(self.max_iterations)
            .with_relaxation_factor(self.relaxation)
    }
}

/// Everything needed to print a finished run.
struct Run {
    outcome: SolveOutcome,
    residuals: Vec<f64>,
    config: Config,
    duration: Duration,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);
    if cli.no_color {
        colored::control::set_override(false);
    }
    let run = match main_inner(&cli) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };
    if let Err(e) = handle_output(&run, &cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    if run.outcome.termination() != Termination::Converged {
        std::process::exit(EXIT_NOT_CONVERGED);
    }
}

fn init_logging(debug: bool) {
    let filter = if debug {
        tracing_subscriber::EnvFilter::new("seidel=debug")
    } else {
        tracing_subscriber::EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main_inner(cli: &Cli) -> anyhow::Result<Run> {
    if cli.interactive && cli.filepath == PathBuf::from("-") {
        bail!("--interactive reads answers from stdin, so the system must come from a file");
    }
    let txt = read_problem(cli)?;
    let system = System::from_str(&txt)
        .with_context(|| format!("could not load a system from {}", cli.chart_name()))?;

    let config = if cli.interactive {
        let stdin = io::stdin();
        let stdout = io::stdout();
        ask_config(&mut stdin.lock(), &mut stdout.lock(), cli.config())?
    } else {
        cli.config()
    };

    let now = Instant::now();
    let outcome = seidel::solve(&system, config)?;
    let duration = now.elapsed();
    let residuals = seidel::verify(&system, outcome.solution())?;
    Ok(Run {
        outcome,
        residuals,
        config,
        duration,
    })
}

fn handle_output(run: &Run, cli: &Cli) -> anyhow::Result<()> {
    print_output(run, cli.show_history);
    if let Some(ref p) = cli.report_path {
        let file =
            File::create(p).with_context(|| format!("could not create {}", p.display()))?;
        write_report(BufWriter::new(file), &run.outcome, &run.residuals)
            .with_context(|| format!("could not write report to {}", p.display()))?;
        println!("Report saved to {}", p.display());
    }
    if let Some(ref p) = cli.plot_path {
        visualize::save_png(cli, &run.outcome, run.config.tolerance_percent, p)?;
    }
    Ok(())
}

/// Prompt for each run parameter, keeping the current value when the answer is blank.
fn ask_config<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    defaults: Config,
) -> anyhow::Result<Config> {
    let tolerance = ask(
        input,
        output,
        "Enter desired percentage relative error",
        defaults.tolerance_percent,
    )?;
    let max_iterations = ask(
        input,
        output,
        "Enter number of iterations",
        defaults.max_iterations,
    )?;
    let relaxation = ask(
        input,
        output,
        "Enter relaxation factor",
        defaults.relaxation_factor,
    )?;
    Ok(defaults
        .with_tolerance_percent(tolerance)
        .with_max_iterations(max_iterations)
        .with_relaxation_factor(relaxation))
}

fn ask<T, R, W>(input: &mut R, output: &mut W, question: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr + std::fmt::Display,
    T::Err: std::error::Error + Send + Sync + 'static,
    R: BufRead,
    W: Write,
{
    write!(output, "{question} [{default}]: ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    answer
        .parse()
        .with_context(|| format!("'{answer}' is not a valid answer to \"{question}\""))
}

/// Prints the output nicely to stdout.
fn print_output(run: &Run, show_history: bool) {
    let Run {
        outcome,
        residuals,
        config,
        duration,
    } = run;
    print_warnings(outcome.warnings());
    println!("Problem size: {} unknowns", outcome.num_unknowns());
    print_termination(outcome, config);
    println!("Solved in {}μs", duration.as_micros());
    if show_history {
        print_history(outcome);
    }
    println!("Solution:");
    for (i, x) in outcome.solution().iter().enumerate() {
        println!("\t{}: {x}", unknown_label(i));
    }
    println!("Residuals (should all be close to zero):");
    for (i, r) in residuals.iter().enumerate() {
        println!("\trow {}: {r:e}", i + 1);
    }
    println!("Largest residual: {:e}", max_abs_residual(residuals));
}

fn print_termination(outcome: &SolveOutcome, config: &Config) {
    use colored::Colorize;
    let iterations = outcome.history().len();
    match outcome.termination() {
        Termination::Converged => println!(
            "{} after {iterations} iterations (tolerance {}%)",
            "Converged".green(),
            config.tolerance_percent
        ),
        Termination::IterationsExhausted => println!(
            "{} after {iterations} iterations without every unknown settling below {}%",
            "Did not converge".red(),
            config.tolerance_percent
        ),
        Termination::Cancelled => {
            println!("{} after {iterations} iterations", "Cancelled".red());
        }
    }
}

fn print_history(outcome: &SolveOutcome) {
    let n = outcome.num_unknowns();
    let labels: Vec<String> = (0..n).map(unknown_label).collect();
    println!("History:");
    println!("\titer\t{}\t(relative error %)", labels.join("\t"));
    for record in outcome.history() {
        let values: Vec<String> = record.values().iter().map(|v| format!("{v:.6}")).collect();
        let errors = match record.relative_errors() {
            Some(errors) => errors
                .iter()
                .map(|e| {
                    if e.is_nan() {
                        "-".to_owned()
                    } else {
                        format!("{e:.4}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\t"),
            None => "-".to_owned(),
        };
        println!(
            "\t{}\t{}\t({errors})",
            record.iteration() + 1,
            values.join("\t")
        );
    }
}

fn print_warnings(warnings: &[Warning]) {
    use colored::Colorize;
    if warnings.is_empty() {
        return;
    }
    println!("Warnings:");
    for warning in warnings {
        println!("\t{}", warning.content.to_string().yellow());
    }
}

/// Read the system from a file or stdin, depending on user args.
/// They pass a filename, or '-' for stdin.
fn read_problem(cli: &Cli) -> anyhow::Result<String> {
    // Read from file
    if cli.filepath != PathBuf::from("-") {
        return std::fs::read_to_string(&cli.filepath)
            .with_context(|| format!("could not read {}", cli.filepath.display()));
    }

    // Read from stdin
    let mut txt = String::with_capacity(100);
    io::stdin()
        .read_to_string(&mut txt)
        .context("could not read stdin")?;
    Ok(txt)
}
