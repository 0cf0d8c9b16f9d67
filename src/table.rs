// SPDX: CC0-1.0

use crate::{Number, Series};
use core::fmt::{self, Write};
use thiserror::Error;

/// Decimal places of every number in the table.
pub const PRECISION: usize = 4;

const COLUMN_WIDTH: usize = 12;
const RULE_WIDTH: usize = 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableErr {
    #[error("cannot tabulate an empty series")]
    EmptySeries,

    #[error("failed to format table")]
    Fmt(#[from] fmt::Error),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    pub count: usize,
    pub x_min: Number,
    pub x_max: Number,
    pub y_min: Number,
    pub y_max: Number,
    pub y_mean: Number,
}

impl Stats {
    pub fn compute(series: &Series) -> Option<Self> {
        if series.is_empty() {
            return None;
        }

        let min = |vals: &[Number]| vals.iter().copied().fold(Number::INFINITY, Number::min);
        let max = |vals: &[Number]| {
            vals.iter()
                .copied()
                .fold(Number::NEG_INFINITY, Number::max)
        };

        let count = series.len();
        Some(Self {
            count,
            x_min: min(series.xs()),
            x_max: max(series.xs()),
            y_min: min(series.ys()),
            y_max: max(series.ys()),
            y_mean: series.ys().iter().sum::<Number>() / count as Number,
        })
    }
}

pub fn format(series: &Series) -> Result<String, TableErr> {
    let mut out = String::new();
    write(&mut out, series)?;
    Ok(out)
}

/// Writes the value table of `series` followed by its statistics.
pub fn write<W: Write>(out: &mut W, series: &Series) -> Result<(), TableErr> {
    let stats = Stats::compute(series).ok_or(TableErr::EmptySeries)?;
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{rule}")?;
    writeln!(out, "FUNCTION VALUE TABLE")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{:^w$} | {:^w$}", "X", "Y", w = COLUMN_WIDTH)?;
    writeln!(out, "{}", "-".repeat(2 * COLUMN_WIDTH + 6))?;
    for point in series.points() {
        writeln!(
            out,
            "{x:^w$.p$} | {y:^w$.p$}",
            x = point.x,
            y = point.y,
            w = COLUMN_WIDTH,
            p = PRECISION
        )?;
    }
    writeln!(out, "{rule}")?;

    writeln!(out)?;
    writeln!(out, "STATISTICS:")?;
    writeln!(out, "  Points: {}", stats.count)?;
    writeln!(
        out,
        "  X: from {:.p$} to {:.p$}",
        stats.x_min,
        stats.x_max,
        p = PRECISION
    )?;
    writeln!(
        out,
        "  Y: from {:.p$} to {:.p$}",
        stats.y_min,
        stats.y_max,
        p = PRECISION
    )?;
    writeln!(out, "  Mean Y: {:.p$}", stats.y_mean, p = PRECISION)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn series(points: &[(Number, Number)]) -> Series {
        points.iter().map(|&(x, y)| Point { x, y }).collect()
    }

    #[test]
    fn linear_table() {
        let text = format(&series(&[(0.0, 3.0), (0.5, 4.0), (1.0, 5.0)])).unwrap();
        assert!(text.contains("Points: 3"));
        assert!(text.contains("Mean Y: 4.0000"));
        assert!(text.contains("X: from 0.0000 to 1.0000"));
        assert!(text.contains("Y: from 3.0000 to 5.0000"));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "     X       |      Y      ");
        assert_eq!(lines[4], "-".repeat(30));
        assert_eq!(lines[5], "   0.0000    |   3.0000   ");
        assert_eq!(lines[7], "   1.0000    |   5.0000   ");
    }

    #[test]
    fn stats_of_unsorted_values() {
        let stats =
            Stats::compute(&series(&[(-1.0, 2.0), (0.0, -4.0), (1.0, -2.0)])).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!((stats.x_min, stats.x_max), (-1.0, 1.0));
        assert_eq!((stats.y_min, stats.y_max), (-4.0, 2.0));
        assert!((stats.y_mean + 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_series_fails_fast() {
        assert_eq!(Stats::compute(&Series::default()), None);
        assert_eq!(format(&Series::default()), Err(TableErr::EmptySeries));
    }
}
