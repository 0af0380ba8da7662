//! Console oracle channel.
//!
//! Relays each question to a human operator, who pastes the oracle's reply
//! back in. A reply may span several lines and ends at the first blank line
//! (or end of input). The level is asked once and then tracked locally.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

use crate::domain::errors::{OracleError, OracleResult};
use crate::domain::models::Level;
use crate::domain::ports::OracleChannel;

/// Operator-driven channel over any async line reader and writer.
pub struct ConsoleChannel<R, W> {
    reader: Mutex<R>,
    writer: Mutex<W>,
    level: Mutex<Option<Level>>,
}

impl ConsoleChannel<BufReader<Stdin>, Stdout> {
    /// Channel over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> ConsoleChannel<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: Mutex::new(reader),
            writer: Mutex::new(writer),
            level: Mutex::new(None),
        }
    }

    async fn prompt(&self, text: &str) -> OracleResult<()> {
        let mut writer = self.writer.lock().await;
        writer
            .write_all(text.as_bytes())
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))
    }

    /// One line without its terminator, or `None` at end of input.
    async fn read_line(&self) -> OracleResult<Option<String>> {
        let mut line = String::new();
        let read = self
            .reader
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn read_reply(&self) -> OracleResult<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line().await? {
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }
        if lines.is_empty() {
            return Err(OracleError::ChannelClosed);
        }
        Ok(lines.join("\n"))
    }
}

#[async_trait]
impl<R, W> OracleChannel for ConsoleChannel<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn ask(&self, question: &str) -> OracleResult<String> {
        self.prompt(&format!(
            "\nAsk the oracle:\n  {question}\nPaste the reply (end with a blank line):\n"
        ))
        .await?;
        self.read_reply().await
    }

    async fn submit(&self, word: &str) -> OracleResult<bool> {
        self.prompt(&format!("Submit the word {word}. Did the level advance? [y/N] "))
            .await?;
        let answer = self.read_line().await?.ok_or(OracleError::ChannelClosed)?;
        let advanced = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
        if advanced {
            if let Some(level) = self.level.lock().await.as_mut() {
                *level += 1;
            }
        }
        Ok(advanced)
    }

    async fn current_level(&self) -> OracleResult<Level> {
        if let Some(level) = *self.level.lock().await {
            return Ok(level);
        }

        self.prompt("Current level: ").await?;
        let answer = self.read_line().await?.ok_or(OracleError::ChannelClosed)?;
        let level = answer
            .trim()
            .parse::<Level>()
            .ok()
            .filter(|level| *level >= 1)
            .ok_or_else(|| OracleError::Malformed(format!("not a level: {answer:?}")))?;
        *self.level.lock().await = Some(level);
        Ok(level)
    }
}
