use clap::{arg, value_parser, Arg, ArgAction, ArgMatches, Command};
use idletime::config::{defaults, Config, Target};
use log::LevelFilter;
use std::{ffi::OsString, time::Duration};

pub struct RunnerConfig {
    pub poller: Config,
    pub verbosity: LevelFilter,
}

impl RunnerConfig {
    pub fn from_cli() -> Result<Self, clap::Error> {
        Self::from_args(std::env::args_os())
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;

        Ok(Self {
            poller: poller_config(&matches),
            verbosity: match matches.get_count("log-verbosity") {
                0 => LevelFilter::Error,
                1 => LevelFilter::Warn,
                2 => LevelFilter::Info,
                3 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            },
        })
    }
}

fn command() -> Command {
    Command::new("xidletool")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prints the user's X11 idle time in milliseconds")
        .args_override_self(true)
        .after_help(format!(
            "-s and -t exclude each other, the one given last takes effect.\n\
             By default, xidletool runs indefinitely with an interval of {} milliseconds.",
            defaults::interval_millis()
        ))
        .args([
            arg!(-s --"print-once" "Print the current idle time and exit")
                .overrides_with("target"),
            arg!(-t --target <MILLISECONDS> "Run until the system has been idle for <MILLISECONDS>, 0 runs forever")
                .value_parser(value_parser!(u64))
                .default_value(defaults::target_millis().to_string())
                .overrides_with("print-once"),
            arg!(-i --interval <MILLISECONDS> "Check the idle time every <MILLISECONDS>")
                .value_parser(value_parser!(u64).range(1..))
                .default_value(defaults::interval_millis().to_string()),
            arg!(-q --quiet "Don't print samples, and exit silently when the target is reached"),
            arg!(-v --verbose "Print a timestamp along with every sample"),
            arg!(--display <DISPLAY> "X display to query instead of $DISPLAY")
                .value_parser(value_parser!(String)),
            Arg::new("log-verbosity")
                .short('L')
                .long("log")
                .help("Log level on stderr: -L for warnings, -LL for info, -LLL for debug, -LLLL for trace")
                .action(ArgAction::Count),
        ])
}

fn poller_config(matches: &ArgMatches) -> Config {
    // An overridden -t falls back to its default, so the flag alone decides.
    let target = if matches.get_flag("print-once") {
        Target::PrintOnce
    } else {
        Target::from_millis(*matches.get_one::<u64>("target").unwrap())
    };

    Config {
        target,
        interval: Duration::from_millis(*matches.get_one::<u64>("interval").unwrap()),
        verbose: matches.get_flag("verbose"),
        quiet: matches.get_flag("quiet"),
        display: matches.get_one::<String>("display").cloned(),
    }
}

/// Renders a parse error, adding the usage line to the errors clap reports without it.
pub fn render_error(error: &clap::Error) -> String {
    let rendered = error.render().to_string();
    if !error.use_stderr() || rendered.contains("Usage:") {
        return rendered;
    }

    format!("{rendered}\n{}\n", command().render_usage())
}
