// SPDX: CC0-1.0

//! One analysis run: prompt, sample, tabulate, and optionally plot.

use crate::{
    config::Settings,
    decorate,
    observe::Observer,
    plot::Plotter,
    registry::{self, FunctionEntry, FunctionKey, NotFound},
    sample::{self, RangeErrTyp, SampleErr},
    shell,
    table::{self, TableErr},
    Interval, Number, Series,
};
use core::{num::NonZeroUsize, str::FromStr};
use std::io::{BufRead, Write};
use thiserror::Error;

/// Failures that end a run but leave the shell running.
#[derive(Debug, Error)]
pub enum RunErr {
    #[error("no value given for {field}")]
    MissingInput { field: &'static str },

    #[error("{field} must be {expected}")]
    InvalidInput {
        field: &'static str,
        expected: &'static str,
        text: String,
    },

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error(transparent)]
    Sample(#[from] SampleErr),

    #[error(transparent)]
    Table(#[from] TableErr),

    #[error("plotting failed: {0:#}")]
    Plot(anyhow::Error),
}

#[derive(Debug)]
pub struct Analysis {
    pub entry: &'static FunctionEntry,
    pub interval: Interval,
    pub series: Series,
    pub plotted: bool,
}

macro_rules! attempt {
    ($res:expr) => {
        match $res {
            Ok(val) => val,
            Err(err) => return Ok(Err(err.into())),
        }
    };
}

fn read_value<R, W, T>(
    src: &mut R,
    out: W,
    prompt: &str,
    field: &'static str,
    expected: &'static str,
) -> anyhow::Result<Result<T, RunErr>>
where
    R: BufRead,
    W: Write,
    T: FromStr,
{
    let text = match shell::input(src, out, prompt)? {
        Some(text) if !text.is_empty() => text,
        _ => return Ok(Err(RunErr::MissingInput { field })),
    };
    Ok(text.parse::<T>().map_err(|_| RunErr::InvalidInput {
        field,
        expected,
        text,
    }))
}

/// Runs one analysis, reading answers from `src`.
///
/// The outer result carries terminal I/O failures, the inner one the
/// failures the user can recover from by starting another run.
pub fn run_analysis<R, W, P, O>(
    src: &mut R,
    mut out: W,
    settings: &Settings,
    plotter: &mut P,
    observer: &mut O,
) -> anyhow::Result<Result<Analysis, RunErr>>
where
    R: BufRead,
    W: Write,
    P: Plotter + ?Sized,
    O: Observer + ?Sized,
{
    let number: i64 = attempt!(read_value(
        src,
        &mut out,
        "choose a function (1-5): ",
        "function number",
        "an integer",
    )?);
    let entry = attempt!(registry::lookup(number));

    writeln!(out)?;
    writeln!(out, "enter parameters:")?;
    let mut bounds: [Number; 3] = [0.0; 3];
    for (dst, (prompt, field)) in bounds.iter_mut().zip([
        ("  interval start (a): ", "interval start"),
        ("  interval end (b): ", "interval end"),
        ("  step (h): ", "step"),
    ]) {
        *dst = attempt!(read_value(src, &mut out, prompt, field, "a number")?);
    }
    let [start, end, step] = bounds;
    let interval = Interval { start, end, step };

    writeln!(out)?;
    writeln!(out, "computing {}...", entry.label())?;
    // keep evaluation records behind the line above
    out.flush()?;
    log::debug!("sampling `{}` over {interval}", entry.name());
    let series = attempt!(sample::sample(
        entry,
        &interval,
        settings.max_samples.get(),
        observer
    ));

    shell::heading(&mut out, "RESULTS")?;
    let text = attempt!(table::format(&series));
    write!(out, "{text}")?;

    writeln!(out)?;
    let answer = shell::input(src, &mut out, "plot the graph? (yes/no): ")?;
    let mut plotted = false;
    if answer.as_deref().is_some_and(shell::is_affirmative) {
        if settings.plot {
            attempt!(plotter.plot(&series, entry.label()).map_err(RunErr::Plot));
            plotted = true;
            writeln!(out, "plot opened")?;
        } else {
            writeln!(out, "plotting is disabled in settings")?;
        }
    } else {
        writeln!(out, "plot skipped")?;
    }

    decorate::demo(&mut out)?;

    writeln!(out)?;
    writeln!(out, "analysis complete")?;

    Ok(Ok(Analysis {
        entry,
        interval,
        series,
        plotted,
    }))
}

/// Explains a failed run to the user.
pub fn report<W: Write>(mut out: W, err: &RunErr) -> anyhow::Result<()> {
    writeln!(out)?;
    if let RunErr::InvalidInput { text, .. } = err {
        shell::underline(&mut out, text)?;
    }
    writeln!(out, "error: {err}")?;

    match err {
        RunErr::MissingInput { .. } => {}

        RunErr::InvalidInput { text, .. } => {
            if text.contains(',') {
                writeln!(out, "note: use '.' as the decimal separator")?;
            }
        }

        RunErr::NotFound(_) => {
            writeln!(out, r#"note: try "list" to see the available functions"#)?;
        }

        RunErr::Sample(err) => match err {
            SampleErr::InvalidRange(RangeErrTyp::StepTooFine) => {
                writeln!(out, "note: use a larger step or an interval closer to 0")?;
            }
            SampleErr::InvalidRange(_) => {}
            SampleErr::TooManySamples { .. } => {
                writeln!(
                    out,
                    r#"note: use a larger step or raise the limit with "settings""#
                )?;
            }
            SampleErr::Domain { key, .. } => {
                if let FunctionKey::Logarithmic = key {
                    writeln!(out, "note: ln(x + 1) is only defined for x > -1")?;
                } else {
                    writeln!(out, "note: the result does not fit in a floating point number")?;
                }
            }
        },

        RunErr::Table(_) => {}

        RunErr::Plot(_) => {
            writeln!(out, r#"note: plotting can be turned off with "settings""#)?;
        }
    }

    log::warn!("run failed: {err}");
    Ok(())
}

/// Edits `settings` interactively, keeping a value when its answer is blank.
pub fn edit_settings<R: BufRead, W: Write>(
    src: &mut R,
    mut out: W,
    settings: &mut Settings,
) -> anyhow::Result<()> {
    writeln!(out, "settings = {settings:#}")?;
    writeln!(out)?;
    writeln!(out, "note: leave blank to skip")?;

    writeln!(out, "note: the sample limit must be a nonzero integer")?;
    match shell::read_fromstr::<_, _, NonZeroUsize>(
        src,
        &mut out,
        format_args!("?max samples (is {cur}) = ", cur = settings.max_samples),
        true,
    )? {
        Ok(Some(new)) => settings.max_samples = new,
        Ok(None) => {}
        Err(_) => return Ok(()),
    }

    if let Some(new) = shell::input(
        src,
        &mut out,
        format_args!("?gnuplot (is {cur}) = ", cur = settings.gnuplot),
    )? {
        if !new.is_empty() {
            settings.gnuplot = new;
        }
    }

    writeln!(out, "note: plotting is either true or false")?;
    match shell::read_fromstr::<_, _, bool>(
        src,
        &mut out,
        format_args!("?plotting (is {cur}) = ", cur = settings.plot),
        true,
    )? {
        Ok(Some(new)) => settings.plot = new,
        Ok(None) => {}
        Err(_) => return Ok(()),
    }

    log::debug!("settings changed: {settings}");
    Ok(())
}
