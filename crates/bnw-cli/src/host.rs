//! Terminal stand-ins for the tabletop collaborators the engine talks to.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use bnw_mechanics::{
    ChatCard, ChatPublisher, Notifications, Operator, PromptError, PromptReply, PublishError,
    TargetPrompt,
};
use colored::Colorize;

/// Asks for a target number on stdin.
///
/// An empty line takes the default, end of input cancels, and anything that is
/// not a number is passed on as NaN so the resolver falls back to the default.
pub struct StdinPrompt;

impl TargetPrompt for StdinPrompt {
    fn name(&self) -> &str {
        "stdin"
    }

    fn request_number(&mut self, default: u32, context: &str) -> Result<PromptReply, PromptError> {
        ask(&mut io::stdin().lock(), &mut io::stderr(), default, context)
    }
}

/// Asks on the controlling terminal, for when stdin cannot be read.
///
/// Answers follow the same rules as [`StdinPrompt`]. A host without a
/// terminal reports the surface as unavailable.
pub struct TtyPrompt {
    path: PathBuf,
}

impl Default for TtyPrompt {
    fn default() -> Self {
        Self::at("/dev/tty")
    }
}

impl TtyPrompt {
    /// A prompt on the given terminal device.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TargetPrompt for TtyPrompt {
    fn name(&self) -> &str {
        "tty"
    }

    fn request_number(&mut self, default: u32, context: &str) -> Result<PromptReply, PromptError> {
        let input = File::open(&self.path).map_err(|_| PromptError::Unavailable)?;
        let mut output = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|_| PromptError::Unavailable)?;
        ask(&mut BufReader::new(input), &mut output, default, context)
    }
}

fn ask(
    input: &mut impl BufRead,
    output: &mut impl Write,
    default: u32,
    context: &str,
) -> Result<PromptReply, PromptError> {
    let question = if context.is_empty() {
        format!("Target number [{default}]: ")
    } else {
        format!("Target number for {context} [{default}]: ")
    };
    output
        .write_all(question.as_bytes())
        .and_then(|()| output.flush())
        .map_err(|e| PromptError::Failed(e.to_string()))?;

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => Ok(PromptReply::Cancelled),
        Ok(_) => Ok(parse_answer(&line, default)),
        Err(e) => Err(PromptError::Failed(e.to_string())),
    }
}

fn parse_answer(line: &str, default: u32) -> PromptReply {
    let answer = line.trim();
    if answer.is_empty() {
        PromptReply::Number(f64::from(default))
    } else {
        PromptReply::Number(answer.parse().unwrap_or(f64::NAN))
    }
}

/// Prints chat cards to stdout.
pub struct TerminalChat {
    /// Print the raw card as JSON instead of a formatted block.
    pub json: bool,
}

impl ChatPublisher for TerminalChat {
    fn publish(&mut self, card: &ChatCard) -> Result<(), PublishError> {
        if self.json {
            let text =
                serde_json::to_string_pretty(card).map_err(|e| PublishError(e.to_string()))?;
            println!("{text}");
            return Ok(());
        }

        println!("  {} [{}]", card.title.bold(), card.speaker.dimmed());
        let bonus = card
            .bonus_dice
            .map(|b| format!(" (+{b} bonus)"))
            .unwrap_or_default();
        println!("  pool:    {}{bonus}", card.pool);
        let runs: Vec<String> = card.dice.iter().map(u32::to_string).collect();
        println!("  runs:    {}", runs.join(" "));
        println!("  target:  {}", card.target);
        let verdict = if card.success {
            "Success".green().bold()
        } else {
            "Failure".red().bold()
        };
        println!("  highest: {}  {verdict}", card.highest);
        Ok(())
    }
}

/// Prints operator warnings to stderr.
pub struct StderrNotices;

impl Notifications for StderrNotices {
    fn warn(&mut self, message: &str) {
        eprintln!("{} {message}", "warning:".yellow());
    }
}

/// The person at the keyboard.
pub struct Seat {
    /// Whether they run the game.
    pub game_master: bool,
}

impl Operator for Seat {
    fn is_game_master(&self) -> bool {
        self.game_master
    }
}
