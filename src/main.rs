mod app;
mod command;
mod config;
mod consts;
mod engine;
mod game;
mod highscore;
mod menu;
mod settings;
mod sound;
mod util;
use crate::app::{App, Globals};
use crate::config::Config;
use crate::highscore::FileStore;
use anyhow::Context;
use lexopt::{Arg, Parser};
use log::{error, info, LevelFilter};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "\
Usage: gridsnake [-c|--config <path>]

Play snake in the terminal

Options:
  -c <path>, --config <path>
                    Read configuration from the given file

  -h, --help        Display this help message and exit
  -V, --version     Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run { config })
    }

    fn run(self) -> ExitCode {
        match self {
            Cli::Run { config } => {
                let globals = match setup(config.as_deref()) {
                    Ok(globals) => globals,
                    Err(e) => {
                        eprintln!("gridsnake: {e:?}");
                        return ExitCode::from(2);
                    }
                };
                let terminal = ratatui::init();
                let r = App::new(globals).run(terminal);
                ratatui::restore();
                io_exit(r)
            }
            Cli::Help => {
                print!("{USAGE}");
                ExitCode::SUCCESS
            }
            Cli::Version => {
                println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

fn main() -> ExitCode {
    match Cli::from_parser(Parser::from_env()) {
        Ok(cli) => cli.run(),
        Err(e) => {
            eprintln!("gridsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

/// Load the configuration and start logging
fn setup(config_path: Option<&Path>) -> anyhow::Result<Globals> {
    let config = match config_path {
        Some(path) => Config::load(path, false),
        None => Config::default_path().map_or_else(|_| Ok(Config::default()), |path| {
            Config::load(&path, true)
        }),
    }
    .context("Failed to load configuration")?;
    if let Some(path) = config.log_path() {
        init_logging(&path, config.logging.level)
            .with_context(|| format!("Failed to set up logging to {}", path.display()))?;
    }
    info!("Starting gridsnake {}", env!("CARGO_PKG_VERSION"));
    Ok(Globals {
        settings: config.settings,
        store: FileStore::new(config.high_score_path()),
    })
}

/// Send log messages to the file at `path`.  The terminal belongs to the UI,
/// so nothing is logged there.
fn init_logging(path: &Path, level: LevelFilter) -> anyhow::Result<()> {
    if level == LevelFilter::Off {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let log_config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("gridsnake")
        .build();
    simplelog::WriteLogger::init(level, log_config, file)?;
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal I/O error: {e}");
            eprintln!("gridsnake: {e}");
            ExitCode::from(2)
        }
    }
}
