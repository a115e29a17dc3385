//! Keyword screen for scraped catalog noise.
//!
//! Marketplace results for a hardware category drag in accessories
//! (chargers, cases, replacement heads) and adjacent products that would
//! pollute similarity search. The screen is substring matching over the
//! lowercased title: any blacklist hit disqualifies, and when keyword
//! anchors are configured at least one must appear.

use crate::catalog::CatalogRecord;

/// Title-based screen applied to scraped records at injection time.
///
/// Both lists empty means the screen is disabled and every record passes.
#[derive(Debug, Clone, Default)]
pub struct PurityFilter {
    blacklist: Vec<String>,
    required_keywords: Vec<String>,
}

impl PurityFilter {
    pub fn new(blacklist: Vec<String>, required_keywords: Vec<String>) -> Self {
        Self {
            blacklist: blacklist.into_iter().map(|t| t.to_lowercase()).collect(),
            required_keywords: required_keywords
                .into_iter()
                .map(|t| t.to_lowercase())
                .collect(),
        }
    }

    /// Returns `true` when no terms are configured.
    pub fn is_disabled(&self) -> bool {
        self.blacklist.is_empty() && self.required_keywords.is_empty()
    }

    /// Whether `record` survives the screen.
    pub fn keeps(&self, record: &CatalogRecord) -> bool {
        if self.is_disabled() {
            return true;
        }

        let title = record.title.to_lowercase();

        if self.blacklist.iter().any(|term| title.contains(term)) {
            return false;
        }

        if !self.required_keywords.is_empty()
            && !self.required_keywords.iter().any(|term| title.contains(term))
        {
            return false;
        }

        true
    }
}
