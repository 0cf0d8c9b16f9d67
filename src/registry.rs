// SPDX: CC0-1.0

use crate::Number;
use core::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionKey {
    Linear,
    Quadratic,
    Sine,
    Exponential,
    Logarithmic,
}

impl FunctionKey {
    pub const fn exhaustive() -> &'static [FunctionKey] {
        &[
            Self::Linear,
            Self::Quadratic,
            Self::Sine,
            Self::Exponential,
            Self::Logarithmic,
        ]
    }

    /// Number the user types to select this function.
    pub const fn number(&self) -> i64 {
        match self {
            Self::Linear => 1,
            Self::Quadratic => 2,
            Self::Sine => 3,
            Self::Exponential => 4,
            Self::Logarithmic => 5,
        }
    }

    /// Identifier used in evaluation log records.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::Sine => "sine",
            Self::Exponential => "exponential",
            Self::Logarithmic => "logarithmic",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Linear => "Linear: y = 2x + 3",
            Self::Quadratic => "Quadratic: y = x² - 4",
            Self::Sine => "Sine: y = sin(x)",
            Self::Exponential => "Exponential: y = e^x / 10",
            Self::Logarithmic => "Logarithmic: y = ln(x + 1)",
        }
    }

    pub fn entry(&self) -> &'static FunctionEntry {
        // FUNCTIONS is ordered by number
        &FUNCTIONS[(self.number() - 1) as usize]
    }
}

impl TryFrom<i64> for FunctionKey {
    type Error = NotFound;

    fn try_from(number: i64) -> Result<Self, Self::Error> {
        Self::exhaustive()
            .iter()
            .find(|key| key.number() == number)
            .copied()
            .ok_or(NotFound(number))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("there is no function number {0}")]
pub struct NotFound(pub i64);

#[derive(Debug)]
pub struct FunctionEntry {
    pub key: FunctionKey,
    fun: fn(Number) -> Number,
}

impl FunctionEntry {
    const fn new(key: FunctionKey, fun: fn(Number) -> Number) -> Self {
        Self { key, fun }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.key.name()
    }

    #[inline]
    pub const fn label(&self) -> &'static str {
        self.key.label()
    }

    /// Evaluates the function at `x`, or returns `None` where it has no
    /// finite value.
    pub fn eval(&self, x: Number) -> Option<Number> {
        let y = (self.fun)(x);
        y.is_finite().then_some(y)
    }
}

impl fmt::Display for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.key.number(), self.label())
    }
}

static FUNCTIONS: [FunctionEntry; 5] = [
    FunctionEntry::new(FunctionKey::Linear, linear),
    FunctionEntry::new(FunctionKey::Quadratic, quadratic),
    FunctionEntry::new(FunctionKey::Sine, sine),
    FunctionEntry::new(FunctionKey::Exponential, exponential),
    FunctionEntry::new(FunctionKey::Logarithmic, logarithmic),
];

/// All functions in selection order.
pub fn entries() -> &'static [FunctionEntry] {
    &FUNCTIONS
}

pub fn lookup(number: i64) -> Result<&'static FunctionEntry, NotFound> {
    FunctionKey::try_from(number).map(|key| key.entry())
}

pub fn linear(x: Number) -> Number {
    2.0 * x + 3.0
}

pub fn quadratic(x: Number) -> Number {
    x.powi(2) - 4.0
}

pub fn sine(x: Number) -> Number {
    x.sin()
}

// scaled down to keep the table readable
pub fn exponential(x: Number) -> Number {
    x.exp() / 10.0
}

pub fn logarithmic(x: Number) -> Number {
    (x + 1.0).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_at_zero() {
        let expected = [3.0, -4.0, 0.0, 0.1, 0.0];
        for (number, want) in (1..=5).zip(expected) {
            let entry = lookup(number).unwrap();
            let got = entry.eval(0.0).unwrap();
            assert!(
                (got - want).abs() < 1e-12,
                "{} at 0: got {got}, want {want}",
                entry.name()
            );
        }
    }

    #[test]
    fn out_of_range_keys() {
        assert_eq!(lookup(0).unwrap_err(), NotFound(0));
        assert_eq!(lookup(6).unwrap_err(), NotFound(6));
        assert_eq!(lookup(-1).unwrap_err(), NotFound(-1));
        assert_eq!(NotFound(6).to_string(), "there is no function number 6");
    }

    #[test]
    fn entries_are_in_number_order() {
        for (idx, entry) in entries().iter().enumerate() {
            assert_eq!(entry.key.number(), idx as i64 + 1);
            assert!(core::ptr::eq(entry, entry.key.entry()));
        }
        assert_eq!(entries()[0].to_string(), "1. Linear: y = 2x + 3");
    }

    #[test]
    fn logarithm_undefined_left_of_minus_one() {
        let log = FunctionKey::Logarithmic.entry();
        assert_eq!(log.eval(-1.0), None);
        assert_eq!(log.eval(-2.0), None);
        assert!(log.eval(-0.5).is_some());
    }

    #[test]
    fn overflow_is_undefined() {
        assert_eq!(FunctionKey::Exponential.entry().eval(1000.0), None);
        assert!(FunctionKey::Sine.entry().eval(1e300).is_some());
    }
}
