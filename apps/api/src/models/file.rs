use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// What an uploaded file represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum FileKind {
    Resume,
    JobDescription,
}

/// Structured analysis metadata persisted alongside each file row.
///
/// `version` identifies the record layout so stored rows can be migrated
/// if fields are added later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub version: u32,
    pub text_excerpt: String,
    pub jd_excerpt: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl AnalysisMetadata {
    pub const CURRENT_VERSION: u32 = 1;

    /// Excerpt length kept per document text.
    const EXCERPT_CHARS: usize = 500;

    pub fn new(
        resume_text: &str,
        job_text: &str,
        matched_skills: Vec<String>,
        missing_skills: Vec<String>,
    ) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            text_excerpt: truncate_chars(resume_text, Self::EXCERPT_CHARS),
            jd_excerpt: truncate_chars(job_text, Self::EXCERPT_CHARS),
            matched_skills,
            missing_skills,
        }
    }
}

/// One analysis submission. Rows are insert-only: never mutated after
/// creation, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FileRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub filename: String,
    pub kind: FileKind,
    pub score: Option<f64>,
    pub metadata: Json<AnalysisMetadata>,
    pub upload_date: DateTime<Utc>,
}

/// Returns the first `max` characters of `s` (character, not byte, count).
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_shorter_than_max() {
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_truncate_chars_cuts_at_char_boundary() {
        // 4 characters, more than 4 bytes
        assert_eq!(truncate_chars("héllo", 4), "héll");
    }

    #[test]
    fn test_metadata_excerpts_are_capped_at_500_chars() {
        let long = "x".repeat(1200);
        let meta = AnalysisMetadata::new(&long, &long, vec![], vec![]);
        assert_eq!(meta.text_excerpt.chars().count(), 500);
        assert_eq!(meta.jd_excerpt.chars().count(), 500);
        assert_eq!(meta.version, AnalysisMetadata::CURRENT_VERSION);
    }

    #[test]
    fn test_file_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&FileKind::JobDescription).unwrap(),
            r#""job_description""#
        );
        assert_eq!(serde_json::to_string(&FileKind::Resume).unwrap(), r#""resume""#);
    }
}
