#[macro_use]
extern crate log;

mod config;

use anyhow::Context;
use config::RunnerConfig;
use fern::colors::{Color, ColoredLevelConfig};
use idletime::config::Config;
use idletime::{PollOutcome, Poller, ScreensaverIdle, X11Client};
use log::{Level, LevelFilter};
use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};
use tokio::signal::unix::{signal, SignalKind};

fn level_colors(is_terminal: bool) -> Option<ColoredLevelConfig> {
    is_terminal.then(|| {
        ColoredLevelConfig::new()
            .info(Color::Green)
            .debug(Color::Blue)
            .trace(Color::Cyan)
    })
}

fn format_level(colors: Option<&ColoredLevelConfig>, level: Level) -> String {
    match colors {
        Some(colors) => colors.color(level).to_string(),
        None => level.to_string(),
    }
}

fn setup_logger(verbosity: LevelFilter) -> Result<(), fern::InitError> {
    // Escape codes would end up in the diagnostics scripts read from a redirected stderr.
    let colors = level_colors(io::stderr().is_terminal());

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
                format_level(colors.as_ref(), record.level()),
                record.target(),
                message
            ));
        })
        .level(LevelFilter::Warn)
        .level_for("idletime", verbosity)
        .level_for("xidletool", verbosity)
        .chain(io::stderr())
        .apply()?;

    Ok(())
}

async fn run(config: Config) -> anyhow::Result<PollOutcome> {
    let client = X11Client::new(config.display.as_deref())?;
    let source = ScreensaverIdle::new(client)?;

    let mut terminate =
        signal(SignalKind::terminate()).with_context(|| "Failed to listen for SIGTERM")?;
    let shutdown = async move {
        tokio::select! {
            _ = terminate.recv() => debug!("Received SIGTERM"),
            _ = tokio::signal::ctrl_c() => debug!("Received SIGINT"),
        }
    };

    // The X11 connection is closed when the poller is dropped, on every way out of here.
    let outcome = Poller::new(source, io::stdout(), config)
        .run(shutdown)
        .await?;

    Ok(outcome)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match RunnerConfig::from_cli() {
        Ok(config) => config,
        Err(e) => {
            if e.use_stderr() {
                eprint!("{}", config::render_error(&e));
                return ExitCode::FAILURE;
            }
            // Nothing left to report if the help itself can't be written.
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    if let Err(e) = setup_logger(config.verbosity) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(config.poller).await {
        Ok(outcome) => {
            debug!("Finished with {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Level::Error, "ERROR")]
    #[case(Level::Debug, "DEBUG")]
    fn plain_level_without_terminal(#[case] level: Level, #[case] expected: &str) {
        let colors = level_colors(false);

        assert!(colors.is_none());
        assert_eq!(expected, format_level(colors.as_ref(), level));
    }

    #[rstest]
    fn colored_level_on_terminal() {
        let colors = level_colors(true);
        let formatted = format_level(colors.as_ref(), Level::Error);

        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains('\u{1b}'));
    }
}
