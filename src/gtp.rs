//! Go Text Protocol (GTP) implementation.
//!
//! GTP is a text-based protocol for communicating with Go-playing programs.
//! This module implements GTP version 2, allowing the engine to be used
//! with graphical Go interfaces like Sabaki or GoGui.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`, `list_commands`, `known_command`, `quit`
//! - `boardsize <size>` - Start a new board of the given size
//! - `clear_board` - Reset the board to empty
//! - `komi <value>` - Set komi
//! - `play <color> <vertex>` - Play a move (colors must alternate)
//! - `genmove <color>` - Generate and play a move for the color to move
//! - `undo` / `redo` - Step through the move history
//! - `showboard` - Print the board
//! - `final_score` - Simplified area score, e.g. `B+3`
//! - `is_legal <color> <vertex>` - `1` if the move is legal, else `0`
//! - `explain_illegal <vertex>` - Why a move is illegal (empty when legal)
//! - `captures <color>` - Stones captured by a color
//!
//! The rules core has no pass move: `play pass` is refused, and `genmove`
//! answers `pass` without changing the board when no move is available.
//! Without passes the colors strictly alternate, so `play` and `genmove`
//! only accept the color whose turn it is and fail for the other one.
//!
//! ## Example
//!
//! ```ignore
//! use goban_mcts::gtp::GtpEngine;
//! let mut gtp = GtpEngine::new(Board::default(), Engine::new(SearchConfig::default()));
//! gtp.run()?;
//! ```

use std::io::{self, BufRead, Write};

use crate::board::Board;
use crate::engine::Engine;
use crate::grid::{Color, Point};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "explain_illegal",
    "final_score",
    "genmove",
    "is_legal",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "redo",
    "showboard",
    "undo",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    board: Board,
    engine: Engine,
}

impl GtpEngine {
    /// Wrap a starting board and a move selector.
    pub fn new(board: Board, engine: Engine) -> Self {
        Self { board, engine }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Run the GTP command loop, reading from stdin and writing to stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over arbitrary streams.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            log::debug!("gtp <- {command_line}");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());

        // An empty prefix fails to parse
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_vertex(&self, s: &str) -> Result<Point, String> {
        Point::parse(s, self.board.size()).ok_or_else(|| format!("invalid vertex: {s}"))
    }

    fn parse_color(s: &str) -> Result<Color, String> {
        Color::parse(s).ok_or_else(|| format!("invalid color: {s}"))
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match self.dispatch(command, args) {
            Ok(response) => (true, response),
            Err(message) => (false, message),
        }
    }

    fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<String, String> {
        let arg = |i: usize| {
            args.get(i)
                .copied()
                .ok_or_else(|| "missing argument".to_string())
        };

        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("2".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let known = KNOWN_COMMANDS.contains(&arg(0)?.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "boardsize" => {
                let size: usize = arg(0)?.parse().map_err(|_| "invalid size".to_string())?;
                let board = Board::new(size).map_err(|e| format!("unacceptable size: {e}"))?;
                self.board = board
                    .with_komi(self.board.komi())
                    .with_suicide_rule(self.board.suicide_rule());
                Ok(String::new())
            }

            "clear_board" => {
                self.board = Board::new(self.board.size())
                    .map_err(|e| e.to_string())?
                    .with_komi(self.board.komi())
                    .with_suicide_rule(self.board.suicide_rule());
                Ok(String::new())
            }

            "komi" => {
                let komi: f32 = arg(0)?.parse().map_err(|_| "invalid komi".to_string())?;
                self.board = self.board.clone().with_komi(komi);
                Ok(String::new())
            }

            "play" => {
                let color = Self::parse_color(arg(0)?)?;
                let vertex = arg(1)?;
                if vertex.eq_ignore_ascii_case("pass") {
                    return Err("pass is not supported".to_string());
                }
                if color != self.board.to_play() {
                    return Err(format!("it is {}'s turn", self.board.to_play()));
                }
                let pt = self.parse_vertex(vertex)?;
                self.board
                    .place_stone(pt)
                    .map(|_| String::new())
                    .map_err(|e| e.to_string())
            }

            "genmove" => {
                let color = Self::parse_color(arg(0)?)?;
                if color != self.board.to_play() {
                    return Err(format!("it is {}'s turn", self.board.to_play()));
                }
                match self.engine.find_best_move(&self.board) {
                    Some(pt) => {
                        self.board.place_stone(pt).map_err(|e| e.to_string())?;
                        Ok(pt.to_gtp(self.board.size()))
                    }
                    None => Ok("pass".to_string()),
                }
            }

            "undo" => {
                if self.board.undo_move() {
                    Ok(String::new())
                } else {
                    Err("cannot undo".to_string())
                }
            }

            "redo" => {
                if self.board.redo_move() {
                    Ok(String::new())
                } else {
                    Err("cannot redo".to_string())
                }
            }

            "showboard" => Ok(format!("\n{}", self.board)),

            "final_score" => Ok(self.board.score().to_string()),

            "is_legal" => {
                let color = Self::parse_color(arg(0)?)?;
                let pt = self.parse_vertex(arg(1)?)?;
                let legal = color == self.board.to_play() && self.board.is_valid_move(pt);
                Ok(if legal { "1" } else { "0" }.to_string())
            }

            "explain_illegal" => {
                let pt = self.parse_vertex(arg(0)?)?;
                Ok(match self.board.check_move(pt) {
                    Ok(()) => String::new(),
                    Err(e) => e.to_string(),
                })
            }

            "captures" => {
                let color = Self::parse_color(arg(0)?)?;
                Ok(self.board.captures(color).to_string())
            }

            _ => Err(format!("unknown command: {command}")),
        }
    }
}
