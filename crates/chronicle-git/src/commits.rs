//! Commit history operations

use tracing::{debug, info, instrument, warn};

use chronicle_core::error::GitError;

use crate::cli::{command_line, GitCli};
use crate::repository::Result;
use crate::types::CommitRecord;

/// Separator written after every commit message in the log output.
/// Commit messages do not contain it by convention.
pub const LOG_DELIMITER: &str = "------------------------ >8 ------------------------";

impl GitCli {
    /// Read every commit reachable from `HEAD`, newest first
    #[instrument(skip(self))]
    pub async fn commit_log(&self) -> Result<Vec<CommitRecord>> {
        let format = format!("--format=%h:%ct:%B%n{}", LOG_DELIMITER);
        let args = ["--no-pager", "log", format.as_str()];
        let output = self.run(&args).await?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: command_line(&args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let records = parse_log(&stdout);
        info!(count = records.len(), "read commit log");
        Ok(records)
    }
}

/// Split raw log output into commit records.
///
/// Each record is `<hash>:<unix time>:<message>`; the message may itself
/// contain colons. Records with an empty hash or message are skipped, as
/// are records whose timestamp is not an integer.
pub fn parse_log(output: &str) -> Vec<CommitRecord> {
    output
        .split(LOG_DELIMITER)
        .filter_map(parse_record)
        .collect()
}

fn parse_record(raw: &str) -> Option<CommitRecord> {
    let (hash, rest) = raw.split_once(':')?;
    let (timestamp, message) = rest.split_once(':')?;

    let hash = hash.trim();
    let message = message.trim();
    if hash.is_empty() || message.is_empty() {
        return None;
    }

    let timestamp = match timestamp.trim().parse::<i64>() {
        Ok(ts) => ts,
        Err(e) => {
            warn!(hash, error = %e, "skipping commit with unreadable timestamp");
            return None;
        }
    };

    debug!(hash, timestamp, "parsed log record");
    Some(CommitRecord::new(hash, timestamp, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_output(records: &[(&str, &str, &str)]) -> String {
        records
            .iter()
            .map(|(hash, ts, msg)| format!("{}:{}:{}\n\n{}\n", hash, ts, msg, LOG_DELIMITER))
            .collect()
    }

    #[test]
    fn test_parse_log_records() {
        let output = log_output(&[
            ("b2c3d4e", "200", "bugfix(parser): handle colons: like this"),
            ("a1b2c3d", "100", "feature: first\n\nBody text"),
        ]);

        let records = parse_log(&output);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hash, "b2c3d4e");
        assert_eq!(records[0].timestamp, 200);
        assert_eq!(records[0].message, "bugfix(parser): handle colons: like this");
        assert_eq!(records[1].message, "feature: first\n\nBody text");
    }

    #[test]
    fn test_parse_log_skips_empty_records() {
        let output = format!(
            "{}\n\n   \n{}\nabc1234:100:\n{}",
            LOG_DELIMITER, LOG_DELIMITER, LOG_DELIMITER
        );
        assert!(parse_log(&output).is_empty());
    }

    #[test]
    fn test_parse_log_skips_bad_timestamp() {
        let output = log_output(&[("abc1234", "yesterday", "feature: x")]);
        assert!(parse_log(&output).is_empty());
    }

    #[test]
    fn test_parse_log_empty_output() {
        assert!(parse_log("").is_empty());
    }
}
