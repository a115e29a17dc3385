//! Identity-key strategies for conditional de-duplication.
//!
//! Record linkage has no single correct normalization, so the key function
//! sits behind a trait; injection and scoring never look inside the key.

use crate::catalog::CatalogRecord;

/// Maps a record to the identity key used for duplicate resolution.
///
/// Two records with the same key are considered the same product.
pub trait IdentityKeyer: Send + Sync {
    fn key(&self, record: &CatalogRecord) -> String;
}

/// Exact-match keyer over normalized brand + title.
///
/// Case-folded, punctuation stripped, whitespace collapsed. The `"|"`
/// separator keeps `("ab", "c")` and `("a", "bc")` distinct.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedKeyer;

impl IdentityKeyer for NormalizedKeyer {
    fn key(&self, record: &CatalogRecord) -> String {
        format!("{}|{}", normalize(&record.store), normalize(&record.title))
    }
}

fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_space = true;
        }
    }

    out
}
