use tracing::debug;

use crate::fuzzy::token_set_ratio;
use crate::normalize::{strip_stopwords, tokenize};
use crate::vendors::VendorDirectory;

pub const DEFAULT_THRESHOLD: u8 = 86;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStage {
    /// A detail token is a known alias.
    Alias,
    /// Best fuzzy score cleared the threshold.
    Fuzzy { score: u8 },
    /// Fuzzy fell short; a vendor shared the most significant tokens.
    Overlap { shared: usize },
}

impl MatchStage {
    pub fn label(&self) -> String {
        match self {
            Self::Alias => "alias".to_string(),
            Self::Fuzzy { score } => format!("fuzzy {score}"),
            Self::Overlap { shared } => format!("overlap {shared}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorMatch {
    pub vendor: String,
    pub stage: MatchStage,
}

/// Resolve free-text `detail` to a vendor name.
///
/// An alias hit returns immediately. Otherwise both the overlap candidate and
/// the fuzzy candidate are computed; fuzzy wins when its score reaches
/// `threshold`, then overlap, then `None`. Ties keep the earlier vendor.
pub fn match_vendor(detail: &str, directory: &VendorDirectory, threshold: u8) -> Option<VendorMatch> {
    if detail.trim().is_empty() {
        return None;
    }

    let detail_tokens = tokenize(detail);

    for token in &detail_tokens {
        if let Some(vendor) = directory.lookup_alias(token) {
            debug!(detail, token = token.as_str(), vendor, "alias hit");
            return Some(VendorMatch {
                vendor: vendor.to_string(),
                stage: MatchStage::Alias,
            });
        }
    }

    let mut overlap: Option<(usize, usize)> = None;
    for (idx, vendor) in directory.vendors().iter().enumerate() {
        let shared = detail_tokens
            .iter()
            .filter(|t| vendor.tokens.contains(t.as_str()))
            .count();
        if shared > 0 && overlap.map_or(true, |(_, best)| shared > best) {
            overlap = Some((idx, shared));
        }
    }

    let fuzzy = best_fuzzy(detail, directory);

    let vendors = directory.vendors();
    if let Some((idx, score)) = fuzzy {
        if score >= threshold {
            debug!(detail, vendor = vendors[idx].name.as_str(), score, "fuzzy match");
            return Some(VendorMatch {
                vendor: vendors[idx].name.clone(),
                stage: MatchStage::Fuzzy { score },
            });
        }
    }
    if let Some((idx, shared)) = overlap {
        debug!(detail, vendor = vendors[idx].name.as_str(), shared, "overlap match");
        return Some(VendorMatch {
            vendor: vendors[idx].name.clone(),
            stage: MatchStage::Overlap { shared },
        });
    }
    debug!(detail, best_score = fuzzy.map(|(_, s)| s), threshold, "no vendor match");
    None
}

/// Highest-scoring vendor index and score. First vendor wins ties.
fn best_fuzzy(detail: &str, directory: &VendorDirectory) -> Option<(usize, u8)> {
    let stripped = strip_stopwords(detail);
    let mut best: Option<(usize, u8)> = None;
    for (idx, vendor) in directory.vendors().iter().enumerate() {
        let score = token_set_ratio(&stripped, &vendor.stripped);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((idx, score));
        }
    }
    best
}

/// The `limit` best fuzzy candidates, highest first, for diagnostics.
pub fn fuzzy_candidates<'a>(
    detail: &str,
    directory: &'a VendorDirectory,
    limit: usize,
) -> Vec<(&'a str, u8)> {
    let stripped = strip_stopwords(detail);
    let mut scored: Vec<(usize, &str, u8)> = directory
        .vendors()
        .iter()
        .enumerate()
        .map(|(i, v)| (i, v.name.as_str(), token_set_ratio(&stripped, &v.stripped)))
        .collect();
    scored.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
    scored.into_iter().take(limit).map(|(_, n, s)| (n, s)).collect()
}
