// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. The options for each `flatdb` subcommand are
//! contained in modules.
//!
//! Only 3 things should be public in this module: `Flatdb`, `Flatdb::run`, and
//! `FlatdbError`.

mod dump;
mod error;
mod recolumn;
mod verify;

pub use error::FlatdbError;

use std::path::Path;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::{debug, info};

use crate::{
    mapping::{Mapping, MappingFileError},
    srctable::STANDARD_COLUMNS,
};

#[derive(Debug, Parser)]
#[clap(
    version,
    about = "Inspect and rewrite flat tables: fixed-width, self-describing text files"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Flatdb {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    Verify(verify::VerifyArgs),

    Dump(dump::DumpArgs),

    Recolumn(recolumn::RecolumnArgs),
}

impl Flatdb {
    pub fn run(self) -> Result<(), FlatdbError> {
        let GlobalArgs { verbosity } = self.global_opts;
        setup_logging(verbosity)
            .map_err(|e| FlatdbError::Generic(format!("Failed to initialise logging: {e}")))?;

        let sub_command = match &self.command {
            Command::Verify(_) => "verify",
            Command::Dump(_) => "dump",
            Command::Recolumn(_) => "recolumn",
        };
        debug!("flatdb {} {}", sub_command, env!("CARGO_PKG_VERSION"));

        match self.command {
            Command::Verify(args) => args.run()?,
            Command::Dump(args) => args.run()?,
            Command::Recolumn(args) => {
                args.run()?;
                info!("flatdb {} complete.", sub_command);
            }
        }

        Ok(())
    }
}

/// Build the mapping requested on the command line, if any.
fn load_mapping(file: Option<&Path>, standard: bool) -> Result<Option<Mapping>, MappingFileError> {
    let mut mapping = match (file, standard) {
        (None, false) => return Ok(None),
        (None, true) => Mapping::new(),
        (Some(file), _) => Mapping::from_file(file)?,
    };
    if standard {
        // Columns from the file win.
        let mut m = STANDARD_COLUMNS.clone();
        m.include(&mapping);
        mapping = m;
    }
    Ok(Some(mapping))
}

/// Activate a logger. Logs go to `stderr` because `flatdb dump` writes table
/// contents to `stdout`, and piping a dump into another table tool must not
/// pick up log lines. Source code lines are displayed in log messages when
/// verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.try_init()
}
