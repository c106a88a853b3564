//! Match Scoring — pluggable, trait-based scorer that measures a resume
//! against a job description.
//!
//! Default: `TfidfScorer` (pure-Rust, fast, deterministic, fully testable).
//! `AppState` holds an `Arc<dyn MatchScorer>`, swapped at startup if an
//! alternative backend is ever wired in.

pub mod experience;
pub mod stopwords;
pub mod tfidf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scoring::experience::summarize_experience;
use crate::scoring::tfidf::TermWeights;

/// Reported when the resume text contains no year-count phrase.
pub const EXPERIENCE_NOT_SPECIFIED: &str = "not specified";

/// Full match report returned to callers.
///
/// `matched_terms` and `missing_terms` are disjoint and ordered
/// lexicographically, so repeated calls over the same inputs produce the
/// same display order and the same first-20 truncation downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    /// Cosine similarity of the two TF-IDF vectors, scaled to 0–100.
    pub score: f64,
    /// Terms weighted > 0 in both documents.
    pub matched_terms: Vec<String>,
    /// Terms weighted > 0 in the job text only.
    pub missing_terms: Vec<String>,
    /// matched / (matched + missing) × 100; 0 when both sets are empty.
    pub keyword_coverage: f64,
    /// Summed years-of-experience phrase, or "not specified".
    pub experience: String,
}

impl MatchReport {
    /// The degenerate result for empty or token-free input. Never an error.
    pub fn zero() -> Self {
        Self {
            score: 0.0,
            matched_terms: Vec::new(),
            missing_terms: Vec::new(),
            keyword_coverage: 0.0,
            experience: EXPERIENCE_NOT_SPECIFIED.to_string(),
        }
    }
}

/// The match scorer trait. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn MatchScorer>`.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, resume_text: &str, job_text: &str) -> Result<MatchReport, AppError>;
}

/// TF-IDF cosine-similarity scorer over the two-document corpus formed by
/// exactly the resume and the job description.
pub struct TfidfScorer;

#[async_trait]
impl MatchScorer for TfidfScorer {
    async fn score(&self, resume_text: &str, job_text: &str) -> Result<MatchReport, AppError> {
        Ok(compute_match(resume_text, job_text))
    }
}

/// Pure scoring function; no side effects, never fails.
///
/// Degenerate inputs (either text empty, or no tokens survive stop-word
/// removal in both documents) yield `MatchReport::zero()`.
pub fn compute_match(resume_text: &str, job_text: &str) -> MatchReport {
    if resume_text.trim().is_empty() || job_text.trim().is_empty() {
        return MatchReport::zero();
    }

    let weights = match TermWeights::fit(resume_text, job_text) {
        Some(w) => w,
        None => return MatchReport::zero(),
    };

    let score = weights.cosine_similarity().max(0.0) * 100.0;
    let (matched_terms, missing_terms) = weights.matched_and_missing();

    let total = matched_terms.len() + missing_terms.len();
    let keyword_coverage = if total > 0 {
        matched_terms.len() as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    MatchReport {
        score,
        matched_terms,
        missing_terms,
        keyword_coverage,
        experience: summarize_experience(resume_text),
    }
}
