use swarna_core::{AlgorithmMode, UnknownMode};
use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Mode(AlgorithmMode),
    NextPage,
    PrevPage,
    /// Card position on the current page (1-based) or a record id.
    Open(String),
    Back,
    Evaluate,
    CloseEvaluation,
    Reset,
    Help,
    Quit,
    Blank,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("perintah tidak dikenal: {0} (ketik `bantuan`)")]
    Unknown(String),
    #[error("`{0}` butuh argumen")]
    MissingArgument(&'static str),
    #[error(transparent)]
    Mode(#[from] UnknownMode),
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Blank);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "cari" | "search" | "q" => Command::Search(required(rest, "cari")?),
        "mode" | "m" => Command::Mode(required(rest, "mode")?.parse()?),
        "next" | "n" | "lanjut" => Command::NextPage,
        "prev" | "p" | "sebelumnya" => Command::PrevPage,
        "buka" | "open" => Command::Open(required(rest, "buka")?),
        "kembali" | "back" | "b" => Command::Back,
        "eval" | "evaluasi" => Command::Evaluate,
        "tutup" | "close" => Command::CloseEvaluation,
        "reset" => Command::Reset,
        "bantuan" | "help" | "?" => Command::Help,
        "keluar" | "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn required(rest: &str, name: &'static str) -> Result<String, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(rest.to_string())
    }
}
