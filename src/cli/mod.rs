// CLI interface
pub mod commands;

use crate::aws_config::ProfileStore;
use crate::error::Result;
use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::{CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;

/// Opens the AWS Console authenticating you with your access key instead of
/// user name and password
#[derive(Parser, Debug)]
#[command(name = "aws-console")]
#[command(version)]
pub struct Cli {
    /// Profile name to get role arn to assume from
    #[arg(short, long)]
    pub profile: String,

    /// Print the sign-in URL instead of opening a browser
    #[arg(long)]
    pub headless: bool,

    /// Enable verbose/debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the clap command with `--profile` restricted to `profiles`
    pub fn command_with_profiles(profiles: &[String]) -> clap::Command {
        let choices: Vec<PossibleValue> = profiles
            .iter()
            .map(|name| PossibleValue::new(name.clone()))
            .collect();

        Self::command().mut_arg("profile", |arg| {
            arg.value_parser(PossibleValuesParser::new(choices))
        })
    }

    pub fn try_parse_with_profiles<I, T>(
        profiles: &[String],
        args: I,
    ) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut matches = Self::command_with_profiles(profiles).try_get_matches_from(args)?;
        Self::from_arg_matches_mut(&mut matches)
    }

    /// Parse process arguments; prints usage and exits on invalid input
    pub fn parse_with_profiles(profiles: &[String]) -> Self {
        Self::try_parse_with_profiles(profiles, std::env::args_os()).unwrap_or_else(|e| e.exit())
    }
}

pub async fn execute(args: Cli, store: &ProfileStore) -> Result<()> {
    commands::console::execute(&args.profile, store).await
}
