// SPDX: CC0-1.0

pub mod config;
pub mod decorate;
pub mod observe;
pub mod plot;
pub mod registry;
pub mod sample;
pub mod session;
pub mod shell;
pub mod table;

use core::fmt;

pub type Number = f64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

/// Closed interval `[start, end]` swept with a fixed `step`.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval {
    pub start: Number,
    pub end: Number,
    pub step: Number,
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{start}, {end}] step {step}",
            start = self.start,
            end = self.end,
            step = self.step
        )
    }
}

/// Parallel X and Y sequences produced by one sampling run.
///
/// Both sequences always have the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    xs: Vec<Number>,
    ys: Vec<Number>,
}

impl Series {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            xs: Vec::with_capacity(capacity),
            ys: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, Point { x, y }: Point<Number>) {
        self.xs.push(x);
        self.ys.push(y);
    }

    #[inline]
    pub fn xs(&self) -> &[Number] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[Number] {
        &self.ys
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = Point<Number>> + '_ {
        self.xs
            .iter()
            .zip(&self.ys)
            .map(|(&x, &y)| Point { x, y })
    }
}

impl FromIterator<Point<Number>> for Series {
    fn from_iter<I: IntoIterator<Item = Point<Number>>>(iter: I) -> Self {
        let mut series = Series::default();
        for point in iter {
            series.push(point);
        }
        series
    }
}
