// SPDX: CC0-1.0

use crate::{
    observe::Observer,
    registry::{FunctionEntry, FunctionKey},
    Interval, Number, Point, Series,
};
use core::fmt;
use thiserror::Error;

/// Fractional digits kept on every sample point after the first.
pub const ROUND_DIGITS: i32 = 10;

// upper bound on the up-front allocation; larger series grow as they go
const PREALLOC: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeErrTyp {
    NonFinite,
    NonPositiveStep,
    Reversed,
    StepTooFine,
}

impl fmt::Display for RangeErrTyp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "bounds and step must be finite numbers"),
            Self::NonPositiveStep => write!(f, "step must be greater than 0"),
            Self::Reversed => write!(f, "start of the interval must be less than its end"),
            Self::StepTooFine => write!(
                f,
                "step is too small to advance past the previous sample point"
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SampleErr {
    #[error("invalid range: {0}")]
    InvalidRange(RangeErrTyp),

    #[error("the interval holds about {expected} sample points, but the limit is {limit}")]
    TooManySamples { expected: u64, limit: usize },

    #[error("function `{}` is undefined at x={x}", .key.name())]
    Domain { key: FunctionKey, x: Number },
}

/// Rounds `x` to `digits` fractional decimal digits, ties to even.
pub fn round(x: Number, digits: i32) -> Number {
    // 2^52: from here on every f64 is already an integer
    const EXACT: Number = 4_503_599_627_370_496.0;

    let scale = Number::powi(10.0, digits);
    let scaled = x * scale;
    if !scaled.is_finite() || scaled.abs() >= EXACT {
        return x;
    }
    let mut rounded = scaled.round();
    if (scaled - rounded).abs() == 0.5 {
        rounded = 2.0 * (scaled / 2.0).round();
    }
    rounded / scale
}

fn validate(interval: &Interval) -> Result<(), RangeErrTyp> {
    let Interval { start, end, step } = *interval;
    if !(start.is_finite() && end.is_finite() && step.is_finite()) {
        Err(RangeErrTyp::NonFinite)
    } else if step <= 0.0 {
        Err(RangeErrTyp::NonPositiveStep)
    } else if start >= end {
        Err(RangeErrTyp::Reversed)
    } else {
        Ok(())
    }
}

/// Evaluates `entry` at `start`, `start + step`, ... up to and including
/// `end`.
///
/// Sample `i` sits at `start + i * step` rounded to [`ROUND_DIGITS`], so the
/// last sample lands exactly on `end` when the step divides the interval.
/// The observer sees every evaluation. Sampling stops at the first point
/// where the function is undefined and no partial series is returned.
pub fn sample<O>(
    entry: &FunctionEntry,
    interval: &Interval,
    limit: usize,
    observer: &mut O,
) -> Result<Series, SampleErr>
where
    O: Observer + ?Sized,
{
    validate(interval).map_err(SampleErr::InvalidRange)?;
    let Interval { start, end, step } = *interval;

    // rounded like the sample points, so a step that divides the interval
    // counts its last point on `end`
    let expected = round((end - start) / step, ROUND_DIGITS).floor() + 1.0;
    if expected > limit as Number {
        return Err(SampleErr::TooManySamples {
            // saturating
            expected: expected as u64,
            limit,
        });
    }

    let mut series = Series::with_capacity((expected as usize).min(PREALLOC));
    for i in 0_u64.. {
        let x = if i == 0 {
            start
        } else {
            round(start + i as Number * step, ROUND_DIGITS)
        };
        if x > end {
            break;
        }
        if series.xs().last().is_some_and(|&last| x <= last) {
            return Err(SampleErr::InvalidRange(RangeErrTyp::StepTooFine));
        }
        if series.len() == limit {
            return Err(SampleErr::TooManySamples {
                expected: (expected as u64).max((limit as u64).saturating_add(1)),
                limit,
            });
        }

        observer.before(entry.name(), x);
        let y = entry.eval(x).ok_or(SampleErr::Domain { key: entry.key, x })?;
        observer.after(y);

        series.push(Point { x, y });
    }

    Ok(series)
}
