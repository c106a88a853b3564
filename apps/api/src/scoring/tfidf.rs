//! TF-IDF weighting over the two-document corpus (resume + job description).
//!
//! The job text is the sole "other document" in the inverse-document-frequency
//! denominator: this is a two-document corpus by design, not an approximation
//! of a larger one. Weights use the smoothed formula
//! `idf = ln((1 + n) / (1 + df)) + 1` with raw term counts for tf, followed by
//! per-document L2 normalization, so cosine similarity reduces to a dot
//! product.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::scoring::stopwords::is_stop_word;

/// Word tokens: two or more alphanumeric characters.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// The corpus is always exactly the resume and the job description.
const N_DOCS: f64 = 2.0;

/// Fitted TF-IDF weights for one resume/job pair.
///
/// The vocabulary is the sorted union of both documents' surviving terms;
/// sorting makes term iteration order stable across calls.
pub struct TermWeights {
    vocab: Vec<String>,
    resume: Vec<f64>,
    job: Vec<f64>,
}

impl TermWeights {
    /// Tokenizes both texts and fits joint TF-IDF weights.
    /// Returns `None` when no term in either document survives stop-word
    /// removal (the degenerate zero-result path).
    pub fn fit(resume_text: &str, job_text: &str) -> Option<Self> {
        let resume_counts = term_counts(resume_text);
        let job_counts = term_counts(job_text);

        let vocab: Vec<String> = resume_counts
            .keys()
            .chain(job_counts.keys())
            .cloned()
            .collect::<std::collections::BTreeSet<String>>()
            .into_iter()
            .collect();
        if vocab.is_empty() {
            return None;
        }

        let resume = weigh(&vocab, &resume_counts, &job_counts, Document::Resume);
        let job = weigh(&vocab, &resume_counts, &job_counts, Document::Job);

        Some(Self { vocab, resume, job })
    }

    /// Dot product of the two L2-normalized weight vectors. Zero when either
    /// document has an all-zero vector.
    pub fn cosine_similarity(&self) -> f64 {
        self.resume
            .iter()
            .zip(&self.job)
            .map(|(r, j)| r * j)
            .sum()
    }

    /// Partitions the job-relevant vocabulary: matched terms carry positive
    /// weight in both documents, missing terms only in the job text. Terms
    /// absent from the job text carry no signal and are skipped entirely.
    pub fn matched_and_missing(&self) -> (Vec<String>, Vec<String>) {
        let mut matched = Vec::new();
        let mut missing = Vec::new();
        for (i, term) in self.vocab.iter().enumerate() {
            if self.job[i] <= 0.0 {
                continue;
            }
            if self.resume[i] > 0.0 {
                matched.push(term.clone());
            } else {
                missing.push(term.clone());
            }
        }
        (matched, missing)
    }
}

enum Document {
    Resume,
    Job,
}

/// Lowercases, tokenizes, drops stop words, and counts terms.
fn term_counts(text: &str) -> BTreeMap<String, f64> {
    let lowered = text.to_lowercase();
    let mut counts = BTreeMap::new();
    for token in TOKEN_RE.find_iter(&lowered) {
        let term = token.as_str();
        if is_stop_word(term) {
            continue;
        }
        *counts.entry(term.to_string()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Computes the L2-normalized TF-IDF vector for one side of the pair.
fn weigh(
    vocab: &[String],
    resume_counts: &BTreeMap<String, f64>,
    job_counts: &BTreeMap<String, f64>,
    side: Document,
) -> Vec<f64> {
    let mut weights: Vec<f64> = vocab
        .iter()
        .map(|term| {
            let in_resume = resume_counts.contains_key(term);
            let in_job = job_counts.contains_key(term);
            let df = in_resume as u32 as f64 + in_job as u32 as f64;
            let idf = ((1.0 + N_DOCS) / (1.0 + df)).ln() + 1.0;
            let tf = match side {
                Document::Resume => resume_counts.get(term).copied().unwrap_or(0.0),
                Document::Job => job_counts.get(term).copied().unwrap_or(0.0),
            };
            tf * idf
        })
        .collect();

    let norm = weights.iter().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for w in &mut weights {
            *w /= norm;
        }
    }
    weights
}
