use clap::Parser;
use std::process::ExitCode;

use mentor_cli::cli::commands::{ask, chat, configure};
use mentor_cli::cli::{Args, Command};
use mentor_cli::error::exit_code_for;
use mentor_cli::output::{self, OutputConfig};
use mentor_cli::ui::Style;
use mentor_cli::voice::print_voices;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        no_color: args.no_color || OutputConfig::default().no_color,
    });
    output::init_logging(args.verbose);

    let result = match args.command {
        Command::Ask {
            question,
            transcript,
            image,
            session,
        } => {
            let options = ask::AskOptions {
                question,
                transcript,
                image,
                resolve: session.into(),
            };
            ask::run_ask(options).await
        }
        Command::Chat { session } => chat::run_chat(session.into()).await,
        Command::Voices => {
            print_voices();
            Ok(())
        }
        Command::Configure { show } => configure::run_configure(show),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", Style::error("Error:"));
            let code = exit_code_for(&err);
            tracing::debug!(code, "exiting");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
