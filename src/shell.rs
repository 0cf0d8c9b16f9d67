// SPDX: CC0-1.0

use crate::registry;
use anyhow::Context;
use core::fmt;
use std::io::{self, BufRead, Write};

const RULE_WIDTH: usize = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    List,
    Run,
    Demo,
    Settings,
}

impl Command {
    pub const fn exhaustive() -> &'static [Command] {
        &[
            Self::Help,
            Self::Quit,
            Self::List,
            Self::Run,
            Self::Demo,
            Self::Settings,
        ]
    }

    pub const fn help(&self) -> &'static str {
        match self {
            Self::Help => "display help for each command",
            Self::Quit => "quit the shell",
            Self::List => "list the available functions",
            Self::Run => "tabulate a function over an interval",
            Self::Demo => "show the html decorators",
            Self::Settings => "set sampling and plotting parameters",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::List => "list",
            Self::Run => "run",
            Self::Demo => "demo",
            Self::Settings => "settings",
        }
    }

    /// Command whose name is closest to `s`, if any is close enough.
    pub fn most_similar(s: &str) -> Option<Command> {
        Self::exhaustive()
            .iter()
            .map(|c| {
                (
                    strsim::normalized_damerau_levenshtein(
                        &s.to_ascii_lowercase(),
                        c.name(),
                    ),
                    *c,
                )
            })
            .reduce(|(acc_sim, acc_c), (elem_sim, elem_c)| {
                if elem_sim > acc_sim {
                    (elem_sim, elem_c)
                } else {
                    (acc_sim, acc_c)
                }
            })
            .filter(|(sim, _)| *sim > 0.3)
            .map(|(_, c)| c)
    }
}

impl core::str::FromStr for Command {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for c in Self::exhaustive() {
            if s == c.name() {
                return Ok(*c);
            }
        }
        Err(())
    }
}

/// Answers that count as "yes" to a confirmation prompt.
pub const AFFIRMATIVE: &[&str] = &["да", "д", "y", "yes"];

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Prompts and reads one trimmed line. Returns `None` at end of input.
pub fn input<R: BufRead, W: Write>(
    src: &mut R,
    out: W,
    prompt: impl fmt::Display,
) -> anyhow::Result<Option<String>> {
    fn inner<R: BufRead, W: Write>(
        src: &mut R,
        mut out: W,
        prompt: impl fmt::Display,
    ) -> io::Result<Option<String>> {
        write!(out, "{prompt}")?;
        out.flush()?;
        let mut s = String::new();
        if src.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }

    let s = inner(src, out, prompt).context("read from standard input failed")?;
    Ok(s)
}

pub fn read_fromstr<R: BufRead, W: Write, T: core::str::FromStr>(
    src: &mut R,
    mut out: W,
    prompt: impl fmt::Display,
    ignore_empty: bool,
) -> anyhow::Result<Result<Option<T>, <T as core::str::FromStr>::Err>>
where
    <T as core::str::FromStr>::Err: fmt::Display,
{
    let Some(text) = input(src, &mut out, prompt)? else {
        return Ok(Ok(None));
    };
    if ignore_empty && text.is_empty() {
        return Ok(Ok(None));
    }
    match text.parse::<T>() {
        Ok(new) => Ok(Ok(Some(new))),
        Err(err) => {
            writeln!(out)?;
            underline(&mut out, &text)?;
            writeln!(out, "parse error: {err}")?;
            Ok(Err(err))
        }
    }
}

/// Echoes `text` with a caret under every character.
pub fn underline<W: Write>(mut out: W, text: &str) -> io::Result<()> {
    writeln!(out, "{text}")?;
    writeln!(out, "{}", "^".repeat(text.chars().count().max(1)))?;
    Ok(())
}

pub fn heading<W: Write>(mut out: W, title: impl fmt::Display) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")?;
    Ok(())
}

pub fn list_functions<W: Write>(mut out: W) -> io::Result<()> {
    writeln!(out, "available functions:")?;
    for entry in registry::entries() {
        writeln!(out, "  {entry}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_round_trip_names() {
        for c in Command::exhaustive() {
            assert_eq!(c.name().parse::<Command>(), Ok(*c));
        }
        assert_eq!("plot".parse::<Command>(), Err(()));
    }

    #[test]
    fn suggests_close_names() {
        assert_eq!(Command::most_similar("hlep"), Some(Command::Help));
        assert_eq!(Command::most_similar("rn"), Some(Command::Run));
        assert_eq!(Command::most_similar("setings"), Some(Command::Settings));
        assert_eq!(Command::most_similar("xyz"), None);
    }

    #[test]
    fn affirmative_answers() {
        for yes in ["да", "Д", "y", "YES", " yes "] {
            assert!(is_affirmative(yes), "{yes:?}");
        }
        for no in ["нет", "n", "no", "", "yeah", "1"] {
            assert!(!is_affirmative(no), "{no:?}");
        }
    }

    #[test]
    fn input_trims_and_detects_end() {
        let mut src: &[u8] = b"  4.5 \n";
        let mut out = Vec::new();
        assert_eq!(
            input(&mut src, &mut out, "a = ").unwrap(),
            Some(String::from("4.5"))
        );
        assert_eq!(input(&mut src, &mut out, "b = ").unwrap(), None);
        assert_eq!(String::from_utf8(out).unwrap(), "a = b = ");
    }

    #[test]
    fn read_fromstr_reports_parse_errors() {
        let mut src: &[u8] = b"\nabc\n7\n";
        let mut out = Vec::new();
        let skipped = read_fromstr::<_, _, u32>(&mut src, &mut out, "? ", true).unwrap();
        assert_eq!(skipped, Ok(None));
        let bad = read_fromstr::<_, _, u32>(&mut src, &mut out, "? ", true).unwrap();
        assert!(bad.is_err());
        let good = read_fromstr::<_, _, u32>(&mut src, &mut out, "? ", true).unwrap();
        assert_eq!(good, Ok(Some(7)));
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("abc\n^^^\nparse error: invalid digit found in string"));
    }

    #[test]
    fn lists_every_function() {
        let mut out = Vec::new();
        list_functions(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("  1. Linear: y = 2x + 3"));
        assert!(out.contains("  5. Logarithmic: y = ln(x + 1)"));
    }
}
