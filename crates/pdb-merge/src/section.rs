//! Marker-delimited sections of the main schema file

use crate::error::{MergeError, MergeResult};
use std::fmt;

/// Slice `content` from the first `start` marker up to (not including) the
/// first `end` marker at or after it.
///
/// Returns an empty slice when `start` is absent, and everything from
/// `start` to the end of input when `end` is absent or not given.
///
/// # Examples
/// ```
/// use pdb_merge::extract_section;
/// assert_eq!(extract_section("xSTARTmiddleENDy", "START", Some("END")), "STARTmiddle");
/// assert_eq!(extract_section("xSTARTmiddley", "START", Some("END")), "STARTmiddley");
/// assert_eq!(extract_section("no markers", "START", Some("END")), "");
/// ```
pub fn extract_section<'a>(content: &'a str, start: &str, end: Option<&str>) -> &'a str {
    let Some(start_pos) = content.find(start) else {
        return "";
    };
    let tail = &content[start_pos..];
    match end.and_then(|marker| tail.find(marker)) {
        Some(end_pos) => &tail[..end_pos],
        None => tail,
    }
}

/// Named sections of the main schema file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSection {
    Drop,
    CreateTables,
    Indexes,
    Sequences,
    Functions,
    Triggers,
    Views,
    /// Sample data region scanned for essential inserts
    EssentialData,
    /// Sample data region copied to the sample output
    SampleData,
}

impl SchemaSection {
    /// Structural sections, in schema output order after table creation
    pub const TRAILING: [SchemaSection; 5] = [
        SchemaSection::Indexes,
        SchemaSection::Sequences,
        SchemaSection::Functions,
        SchemaSection::Triggers,
        SchemaSection::Views,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SchemaSection::Drop => "drop",
            SchemaSection::CreateTables => "create_tables",
            SchemaSection::Indexes => "indexes",
            SchemaSection::Sequences => "sequences",
            SchemaSection::Functions => "functions",
            SchemaSection::Triggers => "triggers",
            SchemaSection::Views => "views",
            SchemaSection::EssentialData => "essential_data",
            SchemaSection::SampleData => "sample_data",
        }
    }

    pub fn start_marker(self) -> &'static str {
        match self {
            SchemaSection::Drop => "-- DROP ALL EXISTING OBJECTS",
            SchemaSection::CreateTables => "-- CREATE COMPLETE TABLES",
            SchemaSection::Indexes => "-- INDEXES FOR PERFORMANCE",
            SchemaSection::Sequences => "-- SEQUENCES",
            SchemaSection::Functions => "-- FUNCTIONS",
            SchemaSection::Triggers => "-- TRIGGERS",
            SchemaSection::Views => "-- VIEWS",
            SchemaSection::EssentialData | SchemaSection::SampleData => "-- SAMPLE DATA",
        }
    }

    pub fn end_marker(self) -> Option<&'static str> {
        match self {
            SchemaSection::Drop => Some("-- CREATE COMPLETE TABLES"),
            SchemaSection::CreateTables => Some("-- INDEXES FOR PERFORMANCE"),
            SchemaSection::Indexes => Some("-- SEQUENCES"),
            SchemaSection::Sequences => Some("-- FUNCTIONS"),
            SchemaSection::Functions => Some("-- TRIGGERS"),
            SchemaSection::Triggers => Some("-- VIEWS"),
            SchemaSection::Views => Some("-- SAMPLE DATA"),
            SchemaSection::EssentialData => Some("-- ORDERS SYSTEM"),
            SchemaSection::SampleData => Some("-- COMPLETION MESSAGE"),
        }
    }

    /// Whether a missing start marker fails the merge
    pub fn is_required(self) -> bool {
        !matches!(
            self,
            SchemaSection::EssentialData | SchemaSection::SampleData
        )
    }

    /// Find this section in `content`.
    ///
    /// Required sections whose start marker is absent are an error; optional
    /// ones come back empty.
    pub fn locate(self, content: &str) -> MergeResult<&str> {
        let section = extract_section(content, self.start_marker(), self.end_marker());

        if section.is_empty() {
            if self.is_required() {
                return Err(MergeError::MissingSection {
                    section: self.name(),
                    marker: self.start_marker(),
                });
            }
            log::debug!("Optional section '{}' not present", self.name());
        } else if let Some(end) = self.end_marker() {
            let has_end = content
                .find(self.start_marker())
                .is_some_and(|pos| content[pos..].contains(end));
            if !has_end {
                log::warn!(
                    "Section '{}' has no '{}' marker; taking everything to end of file",
                    self.name(),
                    end
                );
            }
        }

        Ok(section)
    }
}

impl fmt::Display for SchemaSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "section_test.rs"]
mod tests;
