//! Command-line arguments and the interactive collection of run choices.

pub mod orchestration;

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(
    name = "version-manager",
    version,
    about = "Merge a branch, tag the result with the next version, publish a release and clean up"
)]
pub struct Args {
    #[arg(long, help = "Remote to push to")]
    pub remote: Option<String>,

    #[arg(long, help = "Branch to merge from")]
    pub source: Option<String>,

    #[arg(long, help = "Branch to merge into")]
    pub destination: Option<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", help = "Push changes to the remote")]
    pub push: Option<bool>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", help = "Delete the source branch after merging")]
    pub remove_branch: Option<bool>,

    #[arg(long, help = "Version bump: major, minor, patch, premajor, preminor, prepatch, prerelease or none")]
    pub bump: Option<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", help = "Publish a hosted release for the new tag")]
    pub release: Option<bool>,

    #[arg(long, help = "Release platform: github or gitlab")]
    pub repo_type: Option<String>,

    #[arg(long, help = "Release title")]
    pub title: Option<String>,

    #[arg(long, help = "Release notes")]
    pub notes: Option<String>,

    #[arg(long, help = "Never prompt; unset choices default to off")]
    pub no_input: bool,

    #[arg(long, help = "Do not hold fast steps on screen")]
    pub no_delay: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Read tokens from this env file")]
    pub env_file: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(long, help = "Show local branches and remotes, then exit")]
    pub list: bool,
}
