use std::io::{self, Write};

use crate::{SolveOutcome, Termination};

/// Label for the unknown at this 0-indexed position, e.g. `x_1` for 0.
pub fn unknown_label(index: usize) -> String {
    format!("x_{}", index + 1)
}

/// Write the convergence history, solution and residuals as CSV.
///
/// Layout:
/// - a header row: `iteration`, `x_1..x_n`, `rel_err_x_1..rel_err_x_n`
/// - one row per executed iteration, numbered from 1. Relative errors which
///   don't exist (the first iteration) or are undefined are left empty.
/// - a blank line, then `termination`, `solution` and `residual` rows.
pub fn write_report<W: Write>(
    out: W,
    outcome: &SolveOutcome,
    residuals: &[f64],
) -> io::Result<()> {
    let n = outcome.num_unknowns();
    // Trailer rows are narrower than the history.
    let mut builder = csv::WriterBuilder::new();
    builder.flexible(true);
    let mut wtr = builder.from_writer(out);

    let header = std::iter::once("iteration".to_owned())
        .chain((0..n).map(unknown_label))
        .chain((0..n).map(|i| format!("rel_err_{}", unknown_label(i))));
    wtr.write_record(header)?;

    for record in outcome.history() {
        let values = record.values().iter().map(|v| v.to_string());
        let errors: Vec<String> = match record.relative_errors() {
            Some(errors) => errors.iter().map(|e| format_defined(*e)).collect(),
            None => vec![String::new(); n],
        };
        let row = std::iter::once((record.iteration() + 1).to_string())
            .chain(values)
            .chain(errors);
        wtr.write_record(row)?;
    }

    // An empty csv record would be written as `""`, so the separator goes straight to the sink.
    let mut out = wtr.into_inner().map_err(|e| e.into_error())?;
    out.write_all(b"\n")?;
    let mut wtr = builder.from_writer(out);

    wtr.write_record(["termination", termination_name(outcome.termination())])?;
    wtr.write_record(labelled_row("solution", outcome.solution()))?;
    wtr.write_record(labelled_row("residual", residuals))?;
    wtr.flush()
}

fn termination_name(termination: Termination) -> &'static str {
    match termination {
        Termination::Converged => "converged",
        Termination::IterationsExhausted => "iterations exhausted",
        Termination::Cancelled => "cancelled",
    }
}

fn format_defined(x: f64) -> String {
    if x.is_nan() {
        String::new()
    } else {
        x.to_string()
    }
}

fn labelled_row<'a>(label: &'a str, xs: &'a [f64]) -> impl Iterator<Item = String> + 'a {
    std::iter::once(label.to_owned()).chain(xs.iter().map(|x| x.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, System, solve, verify};

    #[test]
    fn labels_are_one_based() {
        assert_eq!(unknown_label(0), "x_1");
        assert_eq!(unknown_label(9), "x_10");
    }

    #[test]
    fn report_layout() {
        let system = System::from_rows(&[vec![2.0, 0.0, 4.0], vec![0.0, 4.0, 2.0]]).unwrap();
        let outcome = solve(&system, Config::default().with_max_iterations(2)).unwrap();
        let residuals = verify(&system, outcome.solution()).unwrap();

        let mut buf = Vec::new();
        write_report(&mut buf, &outcome, &residuals).unwrap();
        let report = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(
            lines,
            vec![
                "iteration,x_1,x_2,rel_err_x_1,rel_err_x_2",
                "1,2,0.5,,",
                "2,2,0.5,0,0",
                "",
                "termination,converged",
                "solution,2,0.5",
                "residual,0,0",
            ]
        );
    }

    #[test]
    fn undefined_errors_are_blank() {
        // The solution is exactly zero, so its relative error never exists.
        let system = System::from_rows(&[vec![1.0, 0.0]]).unwrap();
        let outcome = solve(&system, Config::default().with_max_iterations(2)).unwrap();
        let mut buf = Vec::new();
        write_report(&mut buf, &outcome, &[0.0]).unwrap();
        let report = String::from_utf8(buf).unwrap();
        assert!(report.contains("\n2,0,\n"), "{report}");
        assert!(report.contains("termination,iterations exhausted"), "{report}");
    }

    #[test]
    fn report_reads_back_as_csv() {
        let system = System::from_rows(&[
            vec![4.0, 1.0, 1.0, 7.0],
            vec![1.0, 3.0, 1.0, 6.0],
            vec![1.0, 1.0, 5.0, 8.0],
        ])
        .unwrap();
        let outcome = solve(&system, Config::default().with_tolerance_percent(1.0)).unwrap();
        let residuals = verify(&system, outcome.solution()).unwrap();
        let mut buf = Vec::new();
        write_report(&mut buf, &outcome, &residuals).unwrap();

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(buf.as_slice());
        assert_eq!(rdr.headers().unwrap().len(), 7);
        let records: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        // History rows, then the three trailer rows. The blank line is skipped by the reader.
        assert_eq!(records.len(), outcome.history().len() + 3);
        assert_eq!(&records[records.len() - 3][1], "converged");
        let solution: Vec<f64> = records[records.len() - 2]
            .iter()
            .skip(1)
            .map(|cell| cell.parse().unwrap())
            .collect();
        assert_eq!(solution, outcome.solution());
    }
}
