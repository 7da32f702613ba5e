//! Forgefile parser.
//!
//! Turns a Forgefile into an ordered, validated list of [`Command`]s in a
//! single forward pass over the text. A logical line is a command token, one
//! or more spaces, and an argument running to the end of the line:
//!
//! ```text
//! # base image
//! FROM ubuntu:20.04
//! RUN apt-get update && \
//!     apt-get install -y curl   # trailing comments are dropped
//! COPY app /opt/app
//! WORKDIR /opt/app
//! CMD /opt/app/run
//! ```
//!
//! `\` escapes the next character; an escaped line break continues the
//! argument on the next physical line. `#` starts a comment that runs to the
//! end of the physical line.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use serde::Serialize;

use crate::command::Command;
use crate::command_type::CommandType;
use crate::error::{ForgeError, ParseError, Result};

/// Parsed Forgefile: its commands in document order.
///
/// A non-empty definition always starts with the origin command and holds at
/// most one origin and at most one entrypoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Definition {
    commands: Vec<Command>,
}

impl Definition {
    /// Parse and validate a Forgefile from its text content.
    ///
    /// A document with only blank and comment lines yields an empty
    /// definition.
    pub fn parse(content: &str) -> std::result::Result<Self, ParseError> {
        let commands = Scanner::new(content).collect::<std::result::Result<Vec<_>, _>>()?;
        validate(&commands)?;

        tracing::debug!(commands = commands.len(), "Parsed Forgefile");
        Ok(Definition { commands })
    }

    /// Parse a Forgefile from a file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForgeError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to read Forgefile at {}: {}", path.display(), e),
            ))
        })?;
        Ok(Self::parse(&content)?)
    }

    /// Commands in document order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The origin command; present whenever the definition is non-empty.
    pub fn origin(&self) -> Option<&Command> {
        self.commands.first()
    }

    /// The entrypoint command, if any.
    pub fn entrypoint(&self) -> Option<&Command> {
        self.of_kind(CommandType::Entrypoint).next()
    }

    /// Commands of one kind, in document order.
    pub fn of_kind(&self, kind: CommandType) -> impl Iterator<Item = &Command> {
        self.commands.iter().filter(move |c| c.kind() == kind)
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

impl<'a> IntoIterator for &'a Definition {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Document-level checks on a scanned command list.
fn validate(commands: &[Command]) -> std::result::Result<(), ParseError> {
    let Some(first) = commands.first() else {
        return Ok(());
    };

    if first.kind() != CommandType::Origin {
        return Err(ParseError::MissingOrigin);
    }

    let count = |kind: CommandType| commands.iter().filter(|c| c.kind() == kind).count();
    if count(CommandType::Origin) > 1 {
        return Err(ParseError::MultipleOrigin);
    }
    if count(CommandType::Entrypoint) > 1 {
        return Err(ParseError::MultipleEntrypoint);
    }

    Ok(())
}

/// Cursor over the document text, yielding one command per logical line.
///
/// Stops for good after the first error.
struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    /// 1-based line of the cursor
    line: usize,
    failed: bool,
}

impl<'a> Scanner<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
            failed: false,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consume one character, counting line breaks.
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    /// Skip ASCII spaces. Tabs are not skipped.
    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.chars.next();
        }
    }

    /// Drop the rest of the physical line, leaving the line break in place.
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    /// Scan one logical line starting at a non-space, non-newline character.
    ///
    /// Returns `Ok(None)` for a comment line.
    fn scan_line(&mut self) -> std::result::Result<Option<Command>, ParseError> {
        let line = self.line;

        let mut token = String::new();
        loop {
            match self.peek() {
                Some('#') => {
                    self.skip_comment();
                    return Ok(None);
                }
                Some(' ') | None => break,
                Some('\n') => return Err(missing_argument(token, line)),
                Some(c) => {
                    token.push(c);
                    self.chars.next();
                }
            }
        }

        self.skip_spaces();
        if matches!(self.peek(), None | Some('\n')) {
            return Err(missing_argument(token, line));
        }

        let mut value = String::new();
        while let Some(c) = self.bump() {
            match c {
                '\\' => self.scan_escape(&mut value)?,
                '#' => {
                    self.skip_comment();
                    break;
                }
                '\n' => break,
                c => value.push(c),
            }
        }

        let value = value.trim();
        if value.is_empty() {
            return Err(missing_argument(token, line));
        }

        let kind = CommandType::resolve_token(&token)
            .ok_or_else(|| ParseError::UnknownCommand {
                token: token.clone(),
                line,
            })?;

        tracing::debug!(line, kind = %kind, value, "Recognized command");
        Ok(Some(Command::new(kind, value.to_string(), line)))
    }

    /// Handle the character after a `\`.
    ///
    /// An escaped line break (LF or CRLF) continues the argument on the next
    /// physical line; any other character is kept as is.
    fn scan_escape(&mut self, value: &mut String) -> std::result::Result<(), ParseError> {
        match self.bump() {
            None => Err(ParseError::UnterminatedEscape { line: self.line }),
            Some('\n') => Ok(()),
            Some('\r') if self.peek() == Some('\n') => {
                self.bump();
                Ok(())
            }
            Some(c) => {
                value.push(c);
                Ok(())
            }
        }
    }
}

/// Drops the `\r` a bare token picks up from a CRLF line ending.
fn missing_argument(mut token: String, line: usize) -> ParseError {
    if token.ends_with('\r') {
        token.pop();
    }
    ParseError::MissingArgument { token, line }
}

impl Iterator for Scanner<'_> {
    type Item = std::result::Result<Command, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.skip_spaces();
            match self.peek() {
                None => return None,
                Some('\n') => {
                    self.bump();
                    continue;
                }
                Some(_) => {}
            }

            match self.scan_line() {
                Ok(Some(command)) => return Some(Ok(command)),
                Ok(None) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
