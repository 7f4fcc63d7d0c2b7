use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ResolveOptions;
use crate::profile::{Level, Mood, Subject};
use crate::voice::{Gender, Language, parse_speed};

#[derive(Parser, Debug)]
#[command(name = "mentor")]
#[command(about = "Personal AI learning mentor that answers out loud")]
#[command(version)]
pub struct Args {
    /// Suppress status messages and spinners
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print diagnostic logs to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask one question and print the spoken answer's file
    Ask {
        /// The question to ask ('-' reads stdin)
        question: Option<String>,

        /// Speech transcript file; takes priority over QUESTION
        #[arg(long, value_name = "FILE")]
        transcript: Option<PathBuf>,

        /// Worksheet photo or screenshot (png, jpg)
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,

        #[command(flatten)]
        session: SessionArgs,
    },
    /// Start an interactive consultation
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// List the synthesis voices
    Voices,
    /// Configure learner and voice defaults
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

/// Profile, voice and provider overrides shared by `ask` and `chat`.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct SessionArgs {
    /// Learner name
    #[arg(long)]
    pub name: Option<String>,

    /// School level
    #[arg(short = 'l', long, value_enum, ignore_case = true)]
    pub level: Option<Level>,

    /// Subjects of interest, comma separated (e.g. math,science)
    #[arg(short = 's', long, value_enum, value_delimiter = ',', ignore_case = true)]
    pub subjects: Option<Vec<Subject>>,

    /// How the learner feels today
    #[arg(long, value_enum, ignore_case = true)]
    pub mood: Option<Mood>,

    /// Voice language
    #[arg(long, value_enum, ignore_case = true)]
    pub lang: Option<Language>,

    /// Voice gender
    #[arg(long, value_enum, ignore_case = true)]
    pub gender: Option<Gender>,

    /// Speech rate offset in percent: -50 to 50 in steps of 10
    #[arg(long, allow_negative_numbers = true, value_parser = parse_speed)]
    pub speed: Option<i32>,

    /// Chat provider name from config.toml
    #[arg(short = 'p', long)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Directory for synthesized answers
    #[arg(long, value_name = "DIR")]
    pub audio_dir: Option<PathBuf>,
}

impl From<SessionArgs> for ResolveOptions {
    fn from(args: SessionArgs) -> Self {
        Self {
            provider: args.provider,
            model: args.model,
            name: args.name,
            level: args.level,
            subjects: args.subjects,
            mood: args.mood,
            lang: args.lang,
            gender: args.gender,
            speed: args.speed,
            audio_dir: args.audio_dir,
        }
    }
}
