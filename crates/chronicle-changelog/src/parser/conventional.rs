//! Conventional Commits parser
//!
//! Parses headers of the form `type(scope): subject`, breaking-change notes
//! (`BREAKING CHANGE: ...` or a `!` after the type) and issue references.

use regex::Regex;
use std::sync::LazyLock;

use super::CommitParser;
use crate::types::{Commit, Note, Reference};
use chronicle_git::CommitRecord;

/// Regex for parsing commit headers
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w*)(?:\((?P<scope>[\w$.\-*@/ ]*)\))?(?P<breaking>!)?: (?P<subject>.*)$")
        .expect("Invalid regex")
});

/// Regex for note keywords at the start of a line
static NOTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>BREAKING[ -]CHANGES?):\s*(?P<text>.*)$").expect("Invalid regex")
});

/// Regex for issue references, with an optional action keyword
static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?P<action>close[sd]?|fix(?:e[sd])?|resolve[sd]?)\s+)?(?:\b(?P<owner>[\w-]+)/(?P<repository>[\w.-]+))?(?P<prefix>#)(?P<issue>\d+)\b",
    )
    .expect("Invalid regex")
});

/// Title given to notes produced by a `!` header marker
const BREAKING_CHANGE: &str = "BREAKING CHANGE";

/// Parser for Conventional Commits format
#[derive(Debug, Default)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Parse the body, splitting it into free text and notes
    fn parse_body(&self, lines: &[&str]) -> (Option<String>, Vec<Note>) {
        let mut notes: Vec<Note> = Vec::new();
        let mut body_lines = Vec::new();

        for line in lines {
            if let Some(caps) = NOTE_REGEX.captures(line) {
                notes.push(Note {
                    title: caps["title"].to_string(),
                    text: caps["text"].trim().to_string(),
                });
            } else if let Some(note) = notes.last_mut() {
                // Everything after a note keyword belongs to that note
                if !note.text.is_empty() || !line.trim().is_empty() {
                    note.text.push('\n');
                    note.text.push_str(line);
                }
            } else {
                body_lines.push(*line);
            }
        }

        for note in &mut notes {
            note.text = note.text.trim().to_string();
        }

        let body = body_lines.join("\n").trim().to_string();
        let body = (!body.is_empty()).then_some(body);

        (body, notes)
    }

    fn parse_references(&self, message: &str) -> Vec<Reference> {
        let mut references: Vec<Reference> = Vec::new();

        for caps in REFERENCE_REGEX.captures_iter(message) {
            let reference = Reference {
                action: caps.name("action").map(|m| m.as_str().to_lowercase()),
                owner: caps.name("owner").map(|m| m.as_str().to_string()),
                repository: caps.name("repository").map(|m| m.as_str().to_string()),
                prefix: caps["prefix"].to_string(),
                issue: caps["issue"].to_string(),
            };

            let duplicate = references.iter().any(|r| {
                r.issue == reference.issue
                    && r.owner == reference.owner
                    && r.repository == reference.repository
            });
            if !duplicate {
                references.push(reference);
            }
        }

        references
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, record: &CommitRecord) -> Commit {
        let message = record.message.trim();
        let mut lines = message.lines().skip_while(|l| l.trim().is_empty());
        let header = lines.next().unwrap_or_default().trim().to_string();
        let rest: Vec<&str> = lines.collect();

        let (body, mut notes) = self.parse_body(&rest);
        let references = self.parse_references(message);

        let mut commit_type = None;
        let mut scope = None;
        let mut subject = None;

        if let Some(caps) = HEADER_REGEX.captures(&header) {
            commit_type = caps
                .name("type")
                .map(|m| m.as_str().to_string())
                .filter(|t| !t.is_empty());
            scope = caps
                .name("scope")
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty());
            let text = caps["subject"].trim().to_string();

            if caps.name("breaking").is_some() && notes.is_empty() {
                notes.push(Note {
                    title: BREAKING_CHANGE.to_string(),
                    text: text.clone(),
                });
            }
            subject = Some(text);
        }

        Commit {
            hash: record.hash.clone(),
            timestamp: record.timestamp,
            commit_type,
            scope,
            subject,
            header,
            body,
            notes,
            references,
            tag: None,
        }
    }
}
