//! Record text-blob construction.
//!
//! The blob is the only signal used for semantic similarity. Field order and
//! delimiter are fixed so the catalog-embedding pass and any future
//! query-time embedding of a new anchor produce identical input.

use crate::catalog::CatalogRecord;
use crate::constants::TEXT_BLOB_DELIMITER;

/// Builds the text submitted to the encoder for one record.
pub fn text_blob(record: &CatalogRecord) -> String {
    [
        record.title.as_str(),
        record.feature_text.as_str(),
        record.store.as_str(),
    ]
    .join(TEXT_BLOB_DELIMITER)
}

/// Whether a blob carries any signal worth encoding.
///
/// Whitespace-only blobs are excluded rather than embedded: a zero-ish
/// vector would rank as equidistant from everything and corrupt search.
pub fn is_embeddable(blob: &str) -> bool {
    !blob.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecordSource;

    fn record(title: &str, features: &str, store: &str) -> CatalogRecord {
        CatalogRecord {
            product_id: "id".to_string(),
            title: title.to_string(),
            feature_text: features.to_string(),
            store: store.to_string(),
            price: None,
            average_rating: None,
            rating_number: 0,
            source: RecordSource::Scraped,
        }
    }

    #[test]
    fn test_blob_field_order_is_fixed() {
        let blob = text_blob(&record("Title", "Features", "Store"));
        assert_eq!(blob, "Title\nFeatures\nStore");
    }

    #[test]
    fn test_blob_is_deterministic() {
        let r = record("Massage Gun", "Amplitude: 12mm", "Acme");
        assert_eq!(text_blob(&r), text_blob(&r));
    }

    #[test]
    fn test_blank_record_is_not_embeddable() {
        assert!(!is_embeddable(&text_blob(&record("", "", ""))));
        assert!(!is_embeddable(&text_blob(&record("  ", "\t", " "))));
        assert!(is_embeddable(&text_blob(&record("Massage Gun", "", ""))));
    }
}
