//! Printing evaluation results.

use std::io::{ self, Write };
use serde::Serialize;

use crate::sim::*;

/// Header line for [write_csv].
pub const CSV_HEADER: &str = "benchmark,scheme,total,correct,accuracy,hw_bits";

/// Results of one evaluation in a form suitable for serialization.
#[derive(Clone, Debug, Serialize)]
pub struct ResultDocument<'a> {
    pub benchmark: &'a str,
    pub trace: &'a str,
    pub results: &'a [SchemeResult],
}

fn write_entry(w: &mut impl Write, r: &SchemeResult) -> io::Result<()> {
    writeln!(w, "{}", r.scheme)?;
    writeln!(w, "  Total branches:   {}", r.total)?;
    writeln!(w, "  Correct predicts: {}", r.correct)?;
    writeln!(w, "  Accuracy:         {:.2} %", r.accuracy * 100.0)?;
    if !r.baseline {
        writeln!(w, "  HW cost (approx): {} bits", r.hw_bits)?;
    }
    writeln!(w)
}

/// Write a human-readable summary: two-level schemes first, then the
/// baselines.
pub fn write_summary(w: &mut impl Write, trace: &str, benchmark: &str,
    results: &[SchemeResult]) -> io::Result<()>
{
    writeln!(w, "Trace file: {}", trace)?;
    writeln!(w, "Benchmark:  {}", benchmark)?;
    writeln!(w)?;

    writeln!(w, "=== Two-Level Adaptive Training (AT) Schemes ===")?;
    writeln!(w)?;
    for r in results.iter().filter(|r| !r.baseline) {
        write_entry(w, r)?;
    }

    writeln!(w, "=== Baseline Predictors ===")?;
    writeln!(w)?;
    for r in results.iter().filter(|r| r.baseline) {
        write_entry(w, r)?;
    }
    Ok(())
}

/// Format a single CSV row. Accuracy is a percentage.
pub fn csv_row(benchmark: &str, r: &SchemeResult) -> String {
    format!("{},{},{},{},{:.2},{}",
        benchmark, r.scheme, r.total, r.correct, r.accuracy * 100.0,
        if r.baseline { 0 } else { r.hw_bits })
}

/// Write results as CSV, preceded by [CSV_HEADER].
pub fn write_csv(w: &mut impl Write, benchmark: &str, results: &[SchemeResult])
    -> io::Result<()>
{
    writeln!(w, "{}", CSV_HEADER)?;
    for r in results {
        writeln!(w, "{}", csv_row(benchmark, r))?;
    }
    Ok(())
}

/// Write a [ResultDocument] as pretty-printed JSON and flush the writer.
pub fn write_json(w: &mut impl Write, doc: &ResultDocument) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, doc)?;
    w.flush()
}

/// Write the branches with the most mispredictions for each predictor.
pub fn write_worst_branches(w: &mut impl Write, eval: &Evaluation, n: usize)
    -> io::Result<()>
{
    for c in eval.candidates() {
        writeln!(w, "{}: low hit-rate branches", c.predictor.name())?;
        for (pc, data) in c.stats.worst_branches(n) {
            writeln!(w, "  {:016x} {:8}/{:8} {:.4}",
                pc, data.hits, data.occ, data.hit_rate())?;
        }
        writeln!(w)?;
    }
    Ok(())
}
