// SPDX: CC0-1.0

//! Text producers wrapped in HTML tags.
//!
//! Each wrapper takes a producer and returns a new one, so they nest:
//! `emphasis(strong(f))` yields `<em><strong>..</strong></em>`.

use crate::shell;
use std::io::{self, Write};

pub fn strong<F>(f: F) -> impl Fn() -> String
where
    F: Fn() -> String,
{
    move || format!("<strong>{}</strong>", f())
}

pub fn emphasis<F>(f: F) -> impl Fn() -> String
where
    F: Fn() -> String,
{
    move || format!("<em>{}</em>", f())
}

pub fn demo<W: Write>(mut out: W) -> io::Result<()> {
    let simple = strong(|| String::from("Sample text"));
    let combined = emphasis(strong(|| String::from("Combined formatting")));

    shell::heading(&mut out, "HTML DECORATORS")?;
    writeln!(out, "strong: {}", simple())?;
    writeln!(out, "strong + emphasis: {}", combined())?;
    Ok(())
}
