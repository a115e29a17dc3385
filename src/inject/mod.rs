//! Reference injection: fusing verified benchmark records into the
//! scraped catalog.
//!
//! Injection is deterministic and idempotent. A reference whose identity
//! key collides with an existing record replaces it entirely (verified data
//! is trusted over scraped data); otherwise the reference is appended.
//! Re-running injection over an already-merged catalog yields an identical
//! result.

mod filter;
mod identity;


pub use filter::PurityFilter;
pub use identity::{IdentityKeyer, NormalizedKeyer};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogRecord, ReferenceRecord};

/// Why a reference record was rejected at injection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    MissingTitle,
    MissingPrice,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MissingTitle => write!(f, "missing title"),
            RejectReason::MissingPrice => write!(f, "missing or non-positive price"),
        }
    }
}

/// A reference that failed validation and was not injected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedReference {
    pub product_id: String,
    pub reason: RejectReason,
}

/// What happened during one injection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InjectionReport {
    /// Scraped records that entered the merge.
    pub scraped_in: usize,
    /// Scraped records removed by the purity screen.
    pub filtered_out: usize,
    /// References that replaced an existing record on key collision.
    pub replaced: usize,
    /// References appended as new catalog entries.
    pub appended: usize,
    /// References rejected for missing required fields.
    pub rejected: Vec<RejectedReference>,
}

impl InjectionReport {
    /// Final merged catalog size implied by this report.
    pub fn merged_len(&self) -> usize {
        self.scraped_in - self.filtered_out + self.appended
    }
}

/// Merges reference records into a scraped catalog.
pub struct Injector {
    keyer: Box<dyn IdentityKeyer>,
    filter: PurityFilter,
}

impl Default for Injector {
    fn default() -> Self {
        Self::new()
    }
}

impl Injector {
    /// Injector with the exact normalized-string keyer and no purity screen.
    pub fn new() -> Self {
        Self {
            keyer: Box::new(NormalizedKeyer),
            filter: PurityFilter::default(),
        }
    }

    /// Swaps the identity-key strategy.
    pub fn with_keyer(keyer: Box<dyn IdentityKeyer>) -> Self {
        Self {
            keyer,
            filter: PurityFilter::default(),
        }
    }

    /// Enables the purity screen for scraped records.
    pub fn with_filter(mut self, filter: PurityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Produces the merged catalog and a report of what happened.
    ///
    /// The inputs are never mutated; the merged catalog is a fresh snapshot.
    /// Gold-standard records already present in `catalog` are exempt from
    /// the purity screen, which keeps re-injection idempotent.
    pub fn inject(
        &self,
        catalog: &[CatalogRecord],
        references: &[ReferenceRecord],
    ) -> (Vec<CatalogRecord>, InjectionReport) {
        let mut report = InjectionReport {
            scraped_in: catalog.len(),
            ..InjectionReport::default()
        };

        let mut merged: Vec<CatalogRecord> = Vec::with_capacity(catalog.len() + references.len());
        for record in catalog {
            if record.is_gold_standard() || self.filter.keeps(record) {
                merged.push(record.clone());
            } else {
                report.filtered_out += 1;
                debug!(product_id = %record.product_id, "Screened out scraped record");
            }
        }

        let mut index: HashMap<String, usize> = HashMap::with_capacity(merged.len());
        for (i, record) in merged.iter().enumerate() {
            index.insert(self.keyer.key(record), i);
        }

        for reference in references {
            if let Some(reason) = validate_reference(reference) {
                warn!(
                    product_id = %reference.product_id,
                    %reason,
                    "Rejecting reference record"
                );
                report.rejected.push(RejectedReference {
                    product_id: reference.product_id.clone(),
                    reason,
                });
                continue;
            }

            let record = reference.to_catalog_record();
            let key = self.keyer.key(&record);

            match index.get(&key) {
                Some(&i) => {
                    debug!(
                        product_id = %record.product_id,
                        displaced = %merged[i].product_id,
                        "Reference replaces existing record"
                    );
                    merged[i] = record;
                    report.replaced += 1;
                }
                None => {
                    index.insert(key, merged.len());
                    merged.push(record);
                    report.appended += 1;
                }
            }
        }

        info!(
            merged = merged.len(),
            replaced = report.replaced,
            appended = report.appended,
            filtered_out = report.filtered_out,
            rejected = report.rejected.len(),
            "Reference injection complete"
        );

        (merged, report)
    }
}

fn validate_reference(reference: &ReferenceRecord) -> Option<RejectReason> {
    if reference.title.trim().is_empty() {
        return Some(RejectReason::MissingTitle);
    }
    if !reference.price.is_some_and(|p| p > 0.0) {
        return Some(RejectReason::MissingPrice);
    }
    None
}
