//! Catalog search.

use crate::document::ProductDocument;

/// Documents whose id, description or any barcode contains `term`,
/// ignoring case. A blank term matches everything.
pub fn search<'a>(documents: &'a [ProductDocument], term: &str) -> Vec<&'a ProductDocument> {
    let needle = term.trim().to_lowercase();
    documents
        .iter()
        .filter(|document| needle.is_empty() || matches(document, &needle))
        .collect()
}

fn matches(document: &ProductDocument, needle: &str) -> bool {
    document.id.to_lowercase().contains(needle)
        || document.description.to_lowercase().contains(needle)
        || document
            .barcodes
            .iter()
            .any(|barcode| barcode.to_lowercase().contains(needle))
}

/// The document carrying exactly this barcode, as read by a scanner.
pub fn find_by_barcode<'a>(
    documents: &'a [ProductDocument],
    barcode: &str,
) -> Option<&'a ProductDocument> {
    let barcode = barcode.trim();
    documents
        .iter()
        .find(|document| document.barcodes.iter().any(|code| code == barcode))
}
