use anyhow::Context;
use chrono::NaiveDateTime;
use clap::{ArgAction, Args, Parser, Subcommand};
use coreext::prelude::*;
use coreext::{DEFAULT_CULTURE, DEFAULT_FORMAT};
use log::LevelFilter;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Could not use the given options")]
    LibraryError(#[from] coreext::Error),

    #[error("`{date}` is not a valid date for format `{format}` in culture `{culture}`")]
    UnparseableDate {
        date: String,
        format: String,
        culture: String,
        #[source]
        source: ParseError,
    },
}

/// Format and culture used to read dates given on the command line.
#[derive(Args, Debug)]
struct InputArgs {
    /// The pattern dates are written in, e.g. `dd/MM/yyyy` or `d` for the culture's short date.
    #[arg(short, long, default_value = DEFAULT_FORMAT)]
    format: String,

    /// The culture whose separators and month/day names apply, e.g. `vi-VN` or `en-US`.
    #[arg(short, long, default_value = DEFAULT_CULTURE)]
    culture: String,
}

impl InputArgs {
    fn culture(&self) -> Result<&'static Culture, CliError> {
        Ok(Culture::from_name(&self.culture)?)
    }

    fn read(&self, date: &str) -> Result<NaiveDateTime, CliError> {
        parse_exact_with(date, &self.format, self.culture()?).map_err(|source| {
            CliError::UnparseableDate {
                date: date.to_owned(),
                format: self.format.clone(),
                culture: self.culture.clone(),
                source,
            }
        })
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log more. Repeat for even more (`-vvv` logs everything).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Include a backtrace in error messages, if one was captured (see `RUST_BACKTRACE`).
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validates a date against a format, printing it in ISO 8601 if it matches.
    ///
    /// Exits with 0 if the date matches and 1 otherwise.
    Parse {
        /// The date string to parse
        date: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Prints the difference from START to END in whole date parts, like SQL's DATEDIFF.
    Diff {
        /// The earlier date
        start: String,

        /// The later date
        end: String,

        /// The unit: year (yy), quarter (qq, q), month (mm, m), day (dd, d), week (wk, ww),
        /// hour (hh), minute (mi, n), second (ss, s), or millisecond (ms).
        #[arg(short, long)]
        part: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Checks whether [START_A, END_A] and [START_B, END_B] touch.
    ///
    /// Prints `true` and exits with 0 if they do, or prints `false` and exits with 1.
    Intersects {
        start_a: String,
        end_a: String,
        start_b: String,
        end_b: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Rewrites a date in another format and/or culture.
    Format {
        /// The date string to rewrite
        date: String,

        /// The pattern to write the date in
        #[arg(short, long)]
        to: String,

        /// The culture to write the date in. Defaults to the input culture.
        #[arg(long)]
        to_culture: Option<String>,

        #[command(flatten)]
        input: InputArgs,
    },
}

type Output = (String, i32);

fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("{}", e.to_error_message(false));
    }

    let trace = cli.trace;
    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{}", e.to_error_message(trace));
            std::process::exit(2);
        }
    }
}

fn setup_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("Could not install the logger")
}

fn do_work(cli: Cli) -> anyhow::Result<Output> {
    match cli.command {
        Commands::Parse { date, input } => {
            let culture = input.culture()?;
            Ok(match parse_exact_with(&date, &input.format, culture) {
                Ok(parsed) => (parsed.format("%Y-%m-%dT%H:%M:%S%.f").to_string(), 0),
                Err(e) => {
                    log::info!("{}", format_error(Some(&e), None));
                    ("not a valid date".to_string(), 1)
                }
            })
        }
        Commands::Diff {
            start,
            end,
            part,
            input,
        } => {
            let start = input.read(&start)?;
            let end = input.read(&end)?;
            let diff = start
                .date_diff_str(end, &part)
                .with_context(|| format!("Could not measure the difference in `{part}`"))?;
            Ok((diff.to_string(), 0))
        }
        Commands::Intersects {
            start_a,
            end_a,
            start_b,
            end_b,
            input,
        } => {
            let touches = input
                .read(&start_a)?
                .intersects(input.read(&end_a)?, input.read(&start_b)?, input.read(&end_b)?);
            Ok(if touches {
                ("true".to_string(), 0)
            } else {
                ("false".to_string(), 1)
            })
        }
        Commands::Format {
            date,
            to,
            to_culture,
            input,
        } => {
            let parsed = input.read(&date)?;
            let culture = match to_culture {
                Some(name) => Culture::from_name(&name).map_err(CliError::from)?,
                None => input.culture()?,
            };
            Ok((format_date(&parsed, &to, culture).map_err(CliError::from)?, 0))
        }
    }
}
