//! Time-coded transcript model: groups of lines of words
//!
//! The transcript arrives as JSON from the transcription collaborator and is
//! treated as read-only input for a render pass. All times are seconds on the
//! whole timeline.

use crate::style::FontType;
use crate::utils::{CoreError, Result};
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize};

/// Smallest word unit with its own timing; never split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Identifier assigned by the transcript producer
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    /// Display text
    pub text: String,
    /// Start time in seconds
    pub start_time: f64,
    /// End time in seconds
    pub end_time: f64,
}

/// One visual line of a caption screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Identifier assigned by the transcript producer
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    /// Start time in seconds
    pub start_time: f64,
    /// End time in seconds
    pub end_time: f64,
    /// Selects the font entry of the style that governs this line
    #[serde(default)]
    pub font_type: FontType,
    /// Words ordered by time; missing or `null` decodes as empty
    #[serde(default, deserialize_with = "vec_or_null")]
    pub words: Vec<Word>,
}

impl Line {
    /// Full line text, words joined by single spaces
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&word.text);
        }
        text
    }
}

/// A caption "screen": lines shown together, stacked vertically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Identifier assigned by the transcript producer
    #[serde(deserialize_with = "id_from_any")]
    pub id: String,
    /// Start time in seconds (matches the first line's start)
    pub start_time: f64,
    /// Nominal end time in seconds
    pub end_time: f64,
    /// Lines in display order; a missing or `null` list decodes as empty
    #[serde(default, deserialize_with = "vec_or_null")]
    pub lines: Vec<Line>,
}

impl Group {
    /// Groups without lines are skipped by the renderer
    pub fn is_renderable(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Total number of words across all lines
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(|line| line.words.len()).sum()
    }
}

/// Ordered list of caption groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    groups: Vec<Group>,
}

/// Structural issue found while validating a transcript
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptIssue {
    /// Group has no lines and will not be rendered
    EmptyGroup {
        /// Group position
        group: usize,
    },
    /// Group starts before the previous group
    OutOfOrder {
        /// Group position
        group: usize,
    },
    /// Group overlaps the next group's start
    Overlap {
        /// Group position
        group: usize,
    },
    /// Words inside a line are not ordered by start time
    UnorderedWords {
        /// Group position
        group: usize,
        /// Line position inside the group
        line: usize,
    },
    /// A time value is negative or not finite
    InvalidTime {
        /// Group position
        group: usize,
    },
}

impl fmt::Display for TranscriptIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGroup { group } => write!(f, "group {group} has no lines"),
            Self::OutOfOrder { group } => {
                write!(f, "group {group} starts before the previous group")
            }
            Self::Overlap { group } => write!(f, "group {group} overlaps the next group"),
            Self::UnorderedWords { group, line } => {
                write!(f, "line {line} of group {group} has unordered words")
            }
            Self::InvalidTime { group } => write!(f, "group {group} has an invalid time value"),
        }
    }
}

impl Transcript {
    /// Wrap a list of groups
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    /// Decode a transcript from its JSON array form
    pub fn from_json(json: &str) -> Result<Self> {
        let transcript: Self = serde_json::from_str(json)?;
        if transcript
            .groups
            .iter()
            .any(|g| !g.start_time.is_finite() || !g.end_time.is_finite())
        {
            return Err(CoreError::InvalidTranscript(
                "group times must be finite numbers".to_string(),
            ));
        }
        Ok(transcript)
    }

    /// Encode back to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Groups in timeline order
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Mutable access for transcript editors
    pub fn groups_mut(&mut self) -> &mut Vec<Group> {
        &mut self.groups
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Report structural issues without rejecting the transcript.
    ///
    /// The renderer tolerates all of these; the report is for editors and CLIs.
    pub fn validate(&self) -> Vec<TranscriptIssue> {
        let mut issues = Vec::new();
        for (i, group) in self.groups.iter().enumerate() {
            if group.start_time < 0.0 || !group.start_time.is_finite() || !group.end_time.is_finite()
            {
                issues.push(TranscriptIssue::InvalidTime { group: i });
            }
            if !group.is_renderable() {
                issues.push(TranscriptIssue::EmptyGroup { group: i });
            }
            if i > 0 && group.start_time < self.groups[i - 1].start_time {
                issues.push(TranscriptIssue::OutOfOrder { group: i });
            }
            if let Some(next) = self.groups.get(i + 1) {
                if group.end_time > next.start_time {
                    issues.push(TranscriptIssue::Overlap { group: i });
                }
            }
            for (l, line) in group.lines.iter().enumerate() {
                if line
                    .words
                    .windows(2)
                    .any(|pair| pair[1].start_time < pair[0].start_time)
                {
                    issues.push(TranscriptIssue::UnorderedWords { group: i, line: l });
                }
            }
        }
        issues
    }
}

impl From<Vec<Group>> for Transcript {
    fn from(groups: Vec<Group>) -> Self {
        Self::new(groups)
    }
}

/// Treat an explicit `null` like an absent list
fn vec_or_null<'de, D, T>(deserializer: D) -> core::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept identifiers encoded either as strings or numbers
fn id_from_any<'de, D: Deserializer<'de>>(deserializer: D) -> core::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64) -> Word {
        Word {
            id: text.to_string(),
            text: text.to_string(),
            start_time: start,
            end_time: end,
        }
    }

    #[test]
    fn line_text_joins_words() {
        let line = Line {
            id: "l".into(),
            start_time: 0.0,
            end_time: 1.0,
            font_type: FontType::Normal,
            words: vec![word("a", 0.0, 0.2), word("bc", 0.3, 1.0)],
        };
        assert_eq!(line.text(), "a bc");
    }

    #[test]
    fn numeric_ids_are_accepted() {
        let json = r#"[{"id": 7, "startTime": 1, "endTime": 2, "lines": []}]"#;
        let transcript = Transcript::from_json(json).unwrap();
        assert_eq!(transcript.groups()[0].id, "7");
        assert!(!transcript.groups()[0].is_renderable());
    }

    #[test]
    fn missing_lines_decode_as_empty() {
        let json = r#"[{"id": "g", "startTime": 0, "endTime": 2}]"#;
        let transcript = Transcript::from_json(json).unwrap();
        assert!(transcript.groups()[0].lines.is_empty());
        assert_eq!(
            transcript.validate(),
            vec![TranscriptIssue::EmptyGroup { group: 0 }]
        );
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let json = r#"[
            {"id": 1, "startTime": 0, "endTime": 1, "lines": null},
            {"id": 2, "startTime": 1, "endTime": 2, "lines": [
                {"id": "l", "startTime": 1, "endTime": 2, "words": null}
            ]},
            {"id": 3, "startTime": 2, "endTime": 3, "lines": [
                {"id": "m", "startTime": 2, "endTime": 3,
                 "words": [{"id": 1, "text": "kept", "startTime": 2, "endTime": 3}]}
            ]}
        ]"#;
        let transcript = Transcript::from_json(json).unwrap();
        assert_eq!(transcript.len(), 3);
        assert!(transcript.groups()[0].lines.is_empty());
        assert!(transcript.groups()[1].lines[0].words.is_empty());
        assert_eq!(transcript.groups()[2].lines[0].text(), "kept");
        assert!(transcript
            .validate()
            .contains(&TranscriptIssue::EmptyGroup { group: 0 }));
    }

    #[test]
    fn unknown_font_type_is_tolerated() {
        let json = r#"[{"id": "g", "startTime": 0, "endTime": 2, "lines": [
            {"id": "l", "startTime": 0, "endTime": 2, "fontType": "gothic", "words": []}
        ]}]"#;
        let transcript = Transcript::from_json(json).unwrap();
        assert_eq!(transcript.groups()[0].lines[0].font_type, FontType::Unknown);
    }

    #[test]
    fn validate_reports_order_and_overlap() {
        let group = |start: f64, end: f64| Group {
            id: format!("{start}"),
            start_time: start,
            end_time: end,
            lines: vec![Line {
                id: "l".into(),
                start_time: start,
                end_time: end,
                font_type: FontType::Normal,
                words: vec![word("x", start + 0.5, end), word("y", start, end)],
            }],
        };
        let transcript = Transcript::new(vec![group(5.0, 7.0), group(3.0, 4.0)]);
        let issues = transcript.validate();
        assert!(issues.contains(&TranscriptIssue::Overlap { group: 0 }));
        assert!(issues.contains(&TranscriptIssue::OutOfOrder { group: 1 }));
        assert!(issues.contains(&TranscriptIssue::UnorderedWords { group: 1, line: 0 }));
    }
}
