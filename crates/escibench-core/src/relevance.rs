//! ESCI relevance grades and the grade-to-gain mapping.
//!
//! The judgment vocabulary is closed: every (query, product) pair carries
//! one of four grades. Set-based metrics (precision, recall, F1, MRR) use
//! the coarser relevant/irrelevant split; NDCG uses the full graded scale
//! through [`RelevanceMapping`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Relevance grade for a query-product pair.
///
/// Serialized as the single-letter labels used by the ESCI dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EsciLabel {
    /// Product exactly matches the query intent.
    #[serde(rename = "E")]
    Exact,
    /// Product is a functional substitute.
    #[serde(rename = "S")]
    Substitute,
    /// Product complements the queried product.
    #[serde(rename = "C")]
    Complement,
    /// Product is irrelevant to the query.
    #[serde(rename = "I")]
    Irrelevant,
}

impl EsciLabel {
    /// Parses a grade label. Anything outside the closed vocabulary is `None`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "E" => Some(Self::Exact),
            "S" => Some(Self::Substitute),
            "C" => Some(Self::Complement),
            "I" => Some(Self::Irrelevant),
            _ => None,
        }
    }

    /// Returns the label string as stored on disk.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "E",
            Self::Substitute => "S",
            Self::Complement => "C",
            Self::Irrelevant => "I",
        }
    }

    /// Whether this grade counts as relevant for the set-based metrics.
    ///
    /// Exact, Substitute and Complement are relevant; Irrelevant is not.
    #[must_use]
    pub fn is_relevant(&self) -> bool {
        !matches!(self, Self::Irrelevant)
    }

    /// All grades in the closed vocabulary.
    pub const ALL: [Self; 4] = [
        Self::Exact,
        Self::Substitute,
        Self::Complement,
        Self::Irrelevant,
    ];
}

/// Mapping from relevance grade to integer gain.
///
/// Configured once per evaluation run. Lookups never fail: grades absent
/// from the mapping (and unjudged products) score a gain of 0, which is a
/// valid irrelevant outcome rather than an error.
#[derive(Debug, Clone)]
pub struct RelevanceMapping {
    gains: HashMap<EsciLabel, u32>,
}

impl Default for RelevanceMapping {
    /// The standard ESCI gain scale: E=3, S=2, C=1, I=0.
    fn default() -> Self {
        let mut gains = HashMap::with_capacity(4);
        gains.insert(EsciLabel::Exact, 3);
        gains.insert(EsciLabel::Substitute, 2);
        gains.insert(EsciLabel::Complement, 1);
        gains.insert(EsciLabel::Irrelevant, 0);
        Self { gains }
    }
}

impl RelevanceMapping {
    /// Builds a mapping from string-keyed configuration.
    ///
    /// Keys that do not parse as an [`EsciLabel`] are skipped and returned
    /// as warnings so callers can surface them at configuration time; the
    /// run-time behavior for such grades (gain 0) is unchanged. Grades not
    /// present in `config` also resolve to 0.
    #[must_use]
    pub fn from_config(config: &HashMap<String, u32>) -> (Self, Vec<String>) {
        let mut gains = HashMap::with_capacity(config.len());
        let mut unknown = Vec::new();

        for (label, &gain) in config {
            match EsciLabel::parse(label) {
                Some(parsed) => {
                    gains.insert(parsed, gain);
                }
                None => {
                    tracing::warn!("Unknown relevance grade '{}' in mapping, ignored", label);
                    unknown.push(label.clone());
                }
            }
        }

        unknown.sort();
        (Self { gains }, unknown)
    }

    /// Gain for a grade; 0 if the grade is not configured.
    #[must_use]
    pub fn gain(&self, label: EsciLabel) -> u32 {
        self.gains.get(&label).copied().unwrap_or(0)
    }

    /// Gain for an optional grade; `None` (unjudged or unknown) scores 0.
    #[must_use]
    pub fn gain_for(&self, label: Option<EsciLabel>) -> u32 {
        label.map_or(0, |l| self.gain(l))
    }
}
