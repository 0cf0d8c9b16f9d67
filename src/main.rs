// SPDX: CC0-1.0

use anyhow::Context;
use func_table::{
    config::Settings,
    decorate,
    observe::LogObserver,
    plot::Gnuplot,
    session,
    shell::{self, Command},
};
use std::{
    io::{stdin, stdout, BufRead, BufWriter, Write},
    process::ExitCode,
};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("unexpected error: {err}");
            let chain = err.chain();
            if chain.len() > 1 {
                eprintln!();
                eprintln!("context:");
                for it in chain.skip(1) {
                    eprintln!("  {it}");
                }
            }
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug)]
struct State {
    settings: Settings,
    plotter: Gnuplot,
}

fn try_main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env().context("invalid settings in environment")?;
    log::debug!("starting with {settings}");
    let mut state = State {
        plotter: Gnuplot::new(&settings),
        settings,
    };

    let mut src = stdin().lock();
    let mut stdout = BufWriter::new(stdout());

    shell::heading(&mut stdout, "MATH FUNCTION ANALYSIS")?;
    shell::list_functions(&mut stdout)?;
    writeln!(stdout)?;
    writeln!(stdout, r#"type "run" to start, or "help" for help"#)?;
    writeln!(stdout)?;

    loop {
        let Some(mut try_cmd) = shell::input(&mut src, &mut stdout, "> ")? else {
            writeln!(stdout)?;
            break;
        };
        if try_cmd.is_empty() {
            continue;
        }
        try_cmd.make_ascii_lowercase();
        writeln!(stdout)?;

        if let Ok(cmd) = try_cmd.parse::<Command>() {
            match cmd {
                Command::Help => {
                    for c in Command::exhaustive() {
                        writeln!(stdout, "{name}: {help}", name = c.name(), help = c.help())?;
                    }
                }

                Command::Quit => break,

                Command::List => shell::list_functions(&mut stdout)?,

                Command::Run => run(&mut src, &mut stdout, &mut state)?,

                Command::Demo => decorate::demo(&mut stdout)?,

                Command::Settings => {
                    session::edit_settings(&mut src, &mut stdout, &mut state.settings)?;
                    state.plotter.configure(&state.settings);
                }
            }
        } else {
            writeln!(stdout, r#"Unknown command, try "help" for help"#)?;
            if let Some(similar) = Command::most_similar(&try_cmd) {
                writeln!(stdout, "note: command '{}' has a similar name", similar.name())?;
            }
        }

        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

fn run<R: BufRead, W: Write>(src: &mut R, mut out: W, state: &mut State) -> anyhow::Result<()> {
    match session::run_analysis(
        src,
        &mut out,
        &state.settings,
        &mut state.plotter,
        &mut LogObserver,
    )? {
        Ok(analysis) => {
            log::debug!(
                "tabulated `{}` at {} points",
                analysis.entry.name(),
                analysis.series.len()
            );
        }
        Err(err) => session::report(&mut out, &err)?,
    }
    Ok(())
}
