//! Append-only file notifier.
//!
//! Writes each message to a local log file between `=` banners, with a
//! UTC timestamp. Used when messages should be reviewed instead of posted.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::traits::{Message, Notifier, NotifyError};

const BANNER_WIDTH: usize = 80;

/// Appends messages to a log file, creating it on first use.
#[derive(Debug, Clone)]
pub struct FileNotifier {
    path: PathBuf,
}

impl FileNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One log entry: banner, timestamp, banner, text, banner.
fn entry(timestamp: &str, text: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("\n{rule}\nTimestamp: {timestamp}\n{rule}\n{text}\n{rule}\n\n")
}

#[async_trait::async_trait]
impl Notifier for FileNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry(&timestamp, &message.text).as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(
            proposal_id = %message.proposal_id,
            path = %self.path.display(),
            "notification appended to file"
        );
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, text: &str) -> Message {
        Message {
            proposal_id: id.to_string(),
            title: format!("Proposal {id}"),
            text: text.to_string(),
        }
    }

    #[test]
    fn entry_layout() {
        let rule = "=".repeat(80);
        assert_eq!(
            entry("2025-10-28 12:00:00 UTC", "hello"),
            format!("\n{rule}\nTimestamp: 2025-10-28 12:00:00 UTC\n{rule}\nhello\n{rule}\n\n")
        );
    }

    #[tokio::test]
    async fn appends_messages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slack_message.txt");
        let notifier = FileNotifier::new(&path);

        notifier.send(&message("p1", "first reminder")).await.unwrap();
        notifier.send(&message("p2", "second reminder")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let first = content.find("first reminder").unwrap();
        let second = content.find("second reminder").unwrap();
        assert!(first < second);
        assert_eq!(content.matches("Timestamp: ").count(), 2);
        assert!(content.contains(" UTC\n"));
    }

    #[tokio::test]
    async fn keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "previous run\n").unwrap();

        FileNotifier::new(&path).send(&message("p1", "new")).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("previous run\n"));
        assert!(content.contains("new"));
    }

    #[tokio::test]
    async fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = FileNotifier::new(dir.path().join("missing").join("log.txt"));
        let err = notifier.send(&message("p1", "x")).await.unwrap_err();
        assert!(matches!(err, NotifyError::Io(_)));
    }

    #[test]
    fn channel_name_is_file() {
        assert_eq!(FileNotifier::new("x.txt").channel_name(), "file");
    }
}
