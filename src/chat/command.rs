use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/config", "Show learner profile and voice settings"),
    ("/help", "Show available commands"),
    ("/history", "Show today's consultation log"),
    ("/image", "Attach an image to the next question"),
    ("/quit", "End the consultation"),
    ("/reset", "Start a new session with an empty log"),
    ("/set", "Change a setting: name, level, subjects, mood, lang, gender, speed, model"),
    ("/transcript", "Ask using a speech transcript file"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(' ') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Config,
    Help,
    History,
    /// `None` clears the pending image.
    Image(Option<String>),
    Quit,
    Reset,
    Set {
        key: String,
        value: Option<String>,
    },
    Transcript(Option<String>),
    Unknown(String),
}

/// Input types
#[derive(Debug)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));
    let argument = (!rest.is_empty()).then(|| rest.to_string());

    let command = match name {
        "config" => SlashCommand::Config,
        "help" => SlashCommand::Help,
        "history" | "log" => SlashCommand::History,
        "image" => SlashCommand::Image(argument),
        "quit" | "exit" | "q" => SlashCommand::Quit,
        "reset" => SlashCommand::Reset,
        "set" => {
            let (key, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(key, value)| (key, value.trim()));
            SlashCommand::Set {
                key: key.to_string(),
                value: (!value.is_empty()).then(|| value.to_string()),
            }
        }
        "transcript" => SlashCommand::Transcript(argument),
        _ => SlashCommand::Unknown(cmd.split_whitespace().collect::<Vec<_>>().join(" ")),
    };

    Input::Command(command)
}
