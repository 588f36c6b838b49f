// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Parsed command and pipeline types.

/// One stage of a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Command {
    /// `argv[0]` is the command name.
    pub argv: Vec<String>,
    pub input_file: Option<String>,
    pub output_file: Option<String>,
    /// Output redirect was `>>`.
    pub append_output: bool,
    pub background: bool,
}

impl Command {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Arguments after the command name.
    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or(&[])
    }

    /// The command line as typed, minus redirections, for job listings.
    pub fn display_text(&self) -> String {
        self.argv.join(" ")
    }
}

/// Commands connected by pipes, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    pub commands: Vec<Command>,
}

impl Pipeline {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Background flag of the final stage.
    pub fn is_background(&self) -> bool {
        self.commands.last().is_some_and(|c| c.background)
    }

    pub fn display_text(&self) -> String {
        self.commands
            .iter()
            .map(Command::display_text)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
