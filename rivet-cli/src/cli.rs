use std::process;

use anyhow::Result;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgMatches, Args, FromArgMatches, Parser, Subcommand};

use crate::{check::Checker, shell};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            checker,
            name,
            files,
        } => checker.check(&files, name.as_deref()),
        Command::Refs {
            checker,
            name,
            file,
        } => checker.refs(&file, &name),
    }
}

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mount HTML files and report every mount point
    Check {
        #[command(flatten)]
        checker: Checker,
        /// Only mount elements with this `data-mounts` name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(required = true)]
        files: Vec<Utf8PathBuf>,
    },
    /// List the refs collected for each mount point
    Refs {
        #[command(flatten)]
        checker: Checker,
        #[arg(short, long)]
        name: String,
        file: Utf8PathBuf,
    },
}

impl Args for Checker {
    fn augment_args(cmd: clap::Command) -> clap::Command {
        cmd.arg(clap::arg!(-c --config <PATH> "Path to the rivet.toml file"))
    }

    fn augment_args_for_update(cmd: clap::Command) -> clap::Command {
        Self::augment_args(cmd)
    }
}

impl FromArgMatches for Checker {
    fn from_arg_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let config_path = matches.get_one::<String>("config").map(Utf8Path::new);
        let checker = Self::from_env(config_path).unwrap_or_else(|err| {
            shell().error(format!("{err:#}"));
            process::exit(1);
        });
        Ok(checker)
    }

    fn update_from_arg_matches(&mut self, matches: &ArgMatches) -> Result<(), clap::Error> {
        *self = Self::from_arg_matches(matches)?;
        Ok(())
    }
}
