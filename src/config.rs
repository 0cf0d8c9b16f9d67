// SPDX: CC0-1.0

use core::{
    fmt,
    num::{NonZeroUsize, ParseIntError},
};
use thiserror::Error;

pub const MAX_SAMPLES_VAR: &str = "FUNC_TABLE_MAX_SAMPLES";
pub const GNUPLOT_VAR: &str = "FUNC_TABLE_GNUPLOT";
pub const NO_PLOT_VAR: &str = "FUNC_TABLE_NO_PLOT";

pub const DEFAULT_MAX_SAMPLES: NonZeroUsize = match NonZeroUsize::new(1_000_000) {
    Some(n) => n,
    None => panic!("sample limit must be nonzero"),
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigErr {
    #[error("{var} must be a nonzero integer")]
    MaxSamples {
        var: &'static str,
        source: ParseIntError,
    },

    #[error("{var} must name a program")]
    EmptyProgram { var: &'static str },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub max_samples: NonZeroUsize,
    /// Program spawned to render plots.
    pub gnuplot: String,
    pub plot: bool,
    pub output_res: [u32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_samples: DEFAULT_MAX_SAMPLES,
            gnuplot: String::from("gnuplot"),
            plot: true,
            output_res: [1920, 1080],
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    /// Applies overrides from `get` on top of the defaults.
    pub fn from_vars<F>(get: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(val) = get(MAX_SAMPLES_VAR) {
            settings.max_samples =
                val.trim()
                    .parse()
                    .map_err(|source| ConfigErr::MaxSamples {
                        var: MAX_SAMPLES_VAR,
                        source,
                    })?;
        }

        if let Some(val) = get(GNUPLOT_VAR) {
            let program = val.trim();
            if program.is_empty() {
                return Err(ConfigErr::EmptyProgram { var: GNUPLOT_VAR });
            }
            settings.gnuplot = program.to_string();
        }

        if let Some(val) = get(NO_PLOT_VAR) {
            let val = val.trim();
            settings.plot = val.is_empty() || val == "0";
        }

        Ok(settings)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [width, height] = self.output_res;
        f.debug_struct("Settings")
            .field("max samples", &self.max_samples)
            .field("gnuplot", &self.gnuplot)
            .field("plotting", &self.plot)
            .field("output resolution", &format_args!("{width}x{height}"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Settings, ConfigErr> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_vars(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(from_pairs(&[]), Ok(Settings::default()));
        assert_eq!(Settings::default().max_samples.get(), 1_000_000);
    }

    #[test]
    fn overrides() {
        let settings = from_pairs(&[
            (MAX_SAMPLES_VAR, " 500 "),
            (GNUPLOT_VAR, "/opt/bin/gnuplot"),
            (NO_PLOT_VAR, "1"),
        ])
        .unwrap();
        assert_eq!(settings.max_samples.get(), 500);
        assert_eq!(settings.gnuplot, "/opt/bin/gnuplot");
        assert!(!settings.plot);

        assert!(from_pairs(&[(NO_PLOT_VAR, "0")]).unwrap().plot);
        assert!(from_pairs(&[(NO_PLOT_VAR, "")]).unwrap().plot);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            from_pairs(&[(MAX_SAMPLES_VAR, "0")]),
            Err(ConfigErr::MaxSamples { .. })
        ));
        assert!(matches!(
            from_pairs(&[(MAX_SAMPLES_VAR, "lots")]),
            Err(ConfigErr::MaxSamples { .. })
        ));
        assert_eq!(
            from_pairs(&[(GNUPLOT_VAR, "  ")]),
            Err(ConfigErr::EmptyProgram { var: GNUPLOT_VAR })
        );
    }

    #[test]
    fn display_lists_fields() {
        let text = format!("{:#}", Settings::default());
        assert!(text.contains("max samples: 1000000"));
        assert!(text.contains("output resolution: 1920x1080"));
    }
}
