//! Keyword classifier.
//!
//! Scores lowercased document text against per-type keyword lists and picks
//! the best-scoring type.

use docsift_config::RuleConfig;
use docsift_core::{Classification, DocumentType};
use tracing::debug;

/// Confidence reported when no keyword matched at all.
pub const NO_MATCH_CONFIDENCE: f64 = 0.55;
const BASE_CONFIDENCE: f64 = 0.6;
const CONFIDENCE_PER_HIT: f64 = 0.05;
const MAX_CONFIDENCE: f64 = 0.95;

/// Keywords that vote for one document type.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub document_type: DocumentType,
    pub keywords: Vec<String>,
}

impl Rule {
    fn new(document_type: DocumentType, keywords: &[&str]) -> Self {
        Self {
            document_type,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Total non-overlapping occurrences of every keyword in `text`.
    pub fn score(&self, text: &str) -> usize {
        self.keywords.iter().map(|k| text.matches(k.as_str()).count()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<Rule>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

impl KeywordClassifier {
    /// The stock rule set for HR / personnel records.
    pub fn builtin() -> Self {
        use DocumentType::*;
        Self {
            rules: vec![
                Rule::new(Resume, &["education", "skills", "work experience", "objective", "personal data"]),
                Rule::new(BirthCert, &["certificate of live birth", "date of birth", "place of birth"]),
                Rule::new(Tin, &["tin", "bureau of internal revenue", "tax identification number"]),
                Rule::new(Sss, &["sss number", "social security system"]),
                Rule::new(Philhealth, &["philhealth", "insurance corporation"]),
                Rule::new(Pagibig, &["pag-ibig", "hdmf"]),
                Rule::new(Contract, &["agreement", "terms and conditions", "shall"]),
                Rule::new(MedicalClearance, &["medical clearance", "fit to work"]),
                Rule::new(Memo, &["memorandum", "subject:"]),
                Rule::new(IncidentReport, &["incident", "incident occurred"]),
                Rule::new(DisciplinaryAction, &["disciplinary action", "violation"]),
                Rule::new(Commendation, &["commendation", "outstanding performance"]),
                Rule::new(ExitLetter, &["resignation", "last working day"]),
                Rule::new(Interview, &["exit interview"]),
                Rule::new(Clearance, &["clearance form", "no pending accountability"]),
            ],
        }
    }

    /// Rules from config; falls back to [`KeywordClassifier::builtin`] when
    /// none are configured. Keywords are lowercased and blanks dropped.
    pub fn from_config(rules: &[RuleConfig]) -> Self {
        if rules.is_empty() {
            return Self::builtin();
        }
        Self {
            rules: rules
                .iter()
                .map(|r| Rule {
                    document_type: r.document_type,
                    keywords: r
                        .keywords
                        .iter()
                        .map(|k| k.trim().to_lowercase())
                        .filter(|k| !k.is_empty())
                        .collect(),
                })
                .collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Score of every rule, in rule order.
    pub fn scores(&self, text: &str) -> Vec<(DocumentType, usize)> {
        self.rules
            .iter()
            .map(|r| (r.document_type, r.score(text)))
            .collect()
    }

    /// Classify already-lowercased text.
    ///
    /// The highest score wins, the earliest rule on ties. Confidence grows by
    /// 0.05 per hit from 0.6 and is capped at 0.95.
    pub fn classify(&self, text: &str) -> Classification {
        let mut best: Option<(DocumentType, usize)> = None;
        for (document_type, score) in self.scores(text) {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((document_type, score));
            }
        }

        match best {
            Some((document_type, score)) if score > 0 => {
                debug!(%document_type, score, "Keyword match");
                Classification {
                    document_type,
                    confidence: MAX_CONFIDENCE
                        .min(BASE_CONFIDENCE + score as f64 * CONFIDENCE_PER_HIT),
                }
            }
            _ => Classification {
                document_type: DocumentType::Others,
                confidence: NO_MATCH_CONFIDENCE,
            },
        }
    }
}
