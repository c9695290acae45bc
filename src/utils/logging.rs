//! Plain-text transcript logging.
//!
//! When a log file is configured, every turn is appended as it happens:
//! user lines with a `You:` prefix, assistant lines verbatim, app notices
//! with a `##` prefix, each stamped with the message time and followed by
//! a blank spacing line. Write failures surface to the caller so the UI
//! can show a notice; they never stop the chat.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::conversation::{Message, Role};

pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    /// A logger for `log_file`; active immediately when a path is given.
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let logging = LoggingState {
            is_active: log_file.is_some(),
            file_path: log_file,
        };

        if let Some(path) = &logging.file_path {
            logging.test_file_access(path)?;
        }
        Ok(logging)
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn log_message(&self, message: &Message) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active || self.file_path.is_none() {
            return Ok(());
        }

        let stamp = message.timestamp.format("%Y-%m-%d %H:%M");
        let text = match message.role {
            Role::User => format!("[{stamp}] You: {}", message.content),
            Role::Assistant => format!("[{stamp}]\n{}", message.content),
            Role::App => format!("[{stamp}] ## {}", message.content),
        };
        self.write_to_log(&text)
    }

    /// Record that a bot's on-screen history was wiped. The log itself is
    /// append-only; earlier lines stay.
    pub fn log_cleared(&self, bot_label: &str) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active || self.file_path.is_none() {
            return Ok(());
        }
        self.write_to_log(&format!("## {bot_label} history cleared"))
    }

    fn write_to_log(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let file_path = self.file_path.as_ref().expect("checked by callers");

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        // Blank spacing line after each entry, matching screen display.
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        if let Some(name) = Path::new(path).file_name() {
            tracing::debug!(file = %name.to_string_lossy(), "transcript logging enabled");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::Message;

    fn log_path(dir: &tempfile::TempDir) -> String {
        dir.path().join("transcript.log").to_string_lossy().into_owned()
    }

    #[test]
    fn inactive_logger_writes_nothing() {
        let logging = LoggingState::new(None).unwrap();
        assert!(!logging.is_active());
        logging.log_message(&Message::user("hello")).unwrap();
    }

    #[test]
    fn user_and_assistant_turns_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);
        let logging = LoggingState::new(Some(path.clone())).unwrap();
        assert!(logging.is_active());

        logging.log_message(&Message::user("how much?")).unwrap();
        logging
            .log_message(&Message::assistant("**Pricing** varies.\nAsk us."))
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("You: how much?"));
        assert!(contents.contains("**Pricing** varies.\nAsk us.\n\n"));
    }

    #[test]
    fn clear_markers_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(&dir);
        let logging = LoggingState::new(Some(path.clone())).unwrap();

        logging.log_cleared("Business").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("## Business history cleared"));
    }

    #[test]
    fn unwritable_path_is_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir
            .path()
            .join("missing-dir")
            .join("transcript.log")
            .to_string_lossy()
            .into_owned();
        assert!(LoggingState::new(Some(path)).is_err());
    }
}
