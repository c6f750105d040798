// ABOUTME: Line-oriented chat loop - reads user lines, forwards them to an
// ABOUTME: Agent, and prints replies until "quit" or end of input.

use std::io::{BufRead, Write};

use tracing::debug;

use super::Agent;

pub const BANNER: &str = "Chat with the agent (type 'quit' to exit).";

/// Where the loop gets its input from.
pub trait LineSource {
    /// The next line without its trailing newline, or `None` at end of input.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// Reads lines from any buffered reader. The prompt is not echoed.
pub struct Lines<R> {
    reader: R,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for Lines<R> {
    fn read_line(&mut self, _prompt: &str) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("quit")
}

/// The interactive loop.
pub struct Repl<S, W> {
    source: S,
    out: W,
    prompt: String,
}

impl<S: LineSource, W: Write> Repl<S, W> {
    pub fn new(source: S, out: W) -> Self {
        Self {
            source,
            out,
            prompt: "> ".to_string(),
        }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Run until the user quits or input ends.
    ///
    /// Agent errors are printed and the loop continues. Only input and output
    /// failures end the loop with an error.
    pub async fn run<A: Agent + ?Sized>(&mut self, agent: &mut A) -> anyhow::Result<()> {
        writeln!(self.out, "{BANNER}")?;
        self.out.flush()?;

        while let Some(line) = self.source.read_line(&self.prompt)? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if is_quit(line) {
                debug!("user quit");
                break;
            }

            match agent.send(line).await {
                Ok(reply) => writeln!(self.out, "{reply}\n")?,
                Err(e) => writeln!(self.out, "Error: {e:#}\n")?,
            }
            self.out.flush()?;
        }
        Ok(())
    }

    /// The output sink, for inspecting what the loop printed.
    pub fn into_output(self) -> W {
        self.out
    }
}
