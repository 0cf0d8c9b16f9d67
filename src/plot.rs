// SPDX: CC0-1.0

use crate::{config::Settings, Series};
use anyhow::Context;
use chrono::{DateTime, Local};
#[cfg(not(debug_assertions))]
use std::process::Stdio;
use std::{
    fs::{File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::{self, Child},
};

pub trait Plotter {
    fn plot(&mut self, series: &Series, label: &str) -> anyhow::Result<()>;
}

/// Plotter for headless sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPlot;

impl Plotter for NoPlot {
    fn plot(&mut self, _series: &Series, _label: &str) -> anyhow::Result<()> {
        Ok(())
    }
}

fn output_filename(now: DateTime<Local>, seq: u32, extension: &str) -> String {
    format!(
        "{}_output-{}-{seq}.{}",
        env!("CARGO_PKG_NAME"),
        now.format("%Y-%m-%d_%H-%M-%S_%3f"),
        extension
    )
}

fn create_new(path: &Path) -> io::Result<BufWriter<File>> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(BufWriter::new)
}

/// Writes one `x y` line per sample point.
pub fn write_data<W: Write>(mut out: W, series: &Series) -> io::Result<()> {
    for point in series.points() {
        writeln!(out, "{x} {y}", x = point.x, y = point.y)?;
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct Script<'a> {
    pub data_path: &'a str,
    pub svg_path: &'a str,
    pub label: &'a str,
    pub points: usize,
    pub res: [u32; 2],
}

/// Writes a gnuplot script that saves the chart as svg, then shows it in
/// the default terminal.
pub fn write_script<W: Write>(mut out: W, script: &Script<'_>) -> io::Result<()> {
    let Script {
        data_path,
        svg_path,
        label,
        points,
        res: [width, height],
    } = *script;

    writeln!(out, "reset")?;
    writeln!(out, "set term push")?;
    writeln!(out, "set terminal svg size {width},{height} enhanced")?;
    writeln!(out, "set output '{svg_path}'")?;

    // configure appearence
    writeln!(out, r#"set title "f(x): {label}" noenhanced"#)?;
    writeln!(out, r#"set xlabel "X""#)?;
    writeln!(out, r#"set ylabel "Y = f(X)""#)?;
    writeln!(out, "set grid lw 0.5 dt 2")?;
    writeln!(out, "set tics out nomirror")?;
    writeln!(out, "set key top right")?;
    writeln!(
        out,
        r#"set label 1 "Points: {points}" at graph 0.02, 0.96 left front boxed"#
    )?;

    writeln!(out, r#"plot '{data_path}' \"#)?;
    writeln!(out, r#"  using 1:2 with lines lw 2 lc rgb 'blue' \"#)?;
    writeln!(out, r#"  title "{label}" noenhanced, \"#)?;
    writeln!(out, r#"  '' using 1:2 with points pt 7 ps 0.6 lc rgb 'red' notitle"#)?;

    // display window
    writeln!(out, "set term pop")?;
    writeln!(out, "replot")?;
    Ok(())
}

/// Renders through an external `gnuplot` process.
#[derive(Debug)]
pub struct Gnuplot {
    program: String,
    res: [u32; 2],
    child: Option<Child>,
    dir: PathBuf,
    // plots made by this process, keeps names apart within one millisecond
    seq: u32,
}

impl Gnuplot {
    pub fn new(settings: &Settings) -> Self {
        Self {
            program: settings.gnuplot.clone(),
            res: settings.output_res,
            child: None,
            dir: PathBuf::new(),
            seq: 0,
        }
    }

    /// Writes output files under `dir` instead of the working directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn configure(&mut self, settings: &Settings) {
        self.program.clone_from(&settings.gnuplot);
        self.res = settings.output_res;
    }
}

impl Plotter for Gnuplot {
    fn plot(&mut self, series: &Series, label: &str) -> anyhow::Result<()> {
        let now = Local::now();
        let seq = self.seq;
        self.seq = self.seq.wrapping_add(1);
        let data_path = self.dir.join(output_filename(now, seq, "data"));
        let gnuplot_path = self.dir.join(output_filename(now, seq, "gnuplot"));
        let svg_path = self.dir.join(output_filename(now, seq, "svg"));

        let mut data = create_new(&data_path).context("failed to open output data file")?;
        write_data(&mut data, series).context("failed to write to output data file")?;
        data.flush()?;
        data.get_mut().sync_data()?;
        drop(data);

        let mut gnuplot =
            create_new(&gnuplot_path).context("failed to open output gnuplot file")?;
        write_script(
            &mut gnuplot,
            &Script {
                data_path: &data_path.to_string_lossy(),
                svg_path: &svg_path.to_string_lossy(),
                label,
                points: series.len(),
                res: self.res,
            },
        )
        .context("failed to write to output gnuplot file")?;
        gnuplot.flush()?;
        gnuplot.get_mut().sync_data()?;
        drop(gnuplot);

        // the previous window stays open until there is a new one to show
        if let Some(mut old_child) = self.child.take() {
            if let Err(err) = old_child.kill() {
                log::warn!("failed to kill previous gnuplot child: {err}");
            }
        }

        // spawn gnuplot and provide the path to the file
        let mut cmd = process::Command::new(&self.program);
        cmd.arg("--persist").arg(&gnuplot_path);
        #[cfg(not(debug_assertions))]
        {
            cmd.stdout(Stdio::null())
                .stderr(Stdio::null())
                .stdin(Stdio::null());
        }
        let child = cmd.spawn().with_context(|| {
            format!(
                "failed to spawn {} (is it installed and in ${{PATH}}?)",
                self.program
            )
        })?;
        log::info!("plotting {} with {}", gnuplot_path.display(), self.program);

        self.child = Some(child);
        Ok(())
    }
}
