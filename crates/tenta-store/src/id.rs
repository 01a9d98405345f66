//! Document identifiers.

/// Identifier used when a product key has no usable characters.
pub const UNKNOWN_ID: &str = "unknown";

/// Turn a product key into a document id.
///
/// Only ASCII letters and digits are kept. An empty result maps to
/// [`UNKNOWN_ID`], so distinct unusable keys share one document.
pub fn sanitize_id(product_key: &str) -> String {
    let id: String = product_key
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if id.is_empty() {
        UNKNOWN_ID.to_string()
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_ascii_alphanumerics() {
        assert_eq!(sanitize_id("AB-12/3"), "AB123");
        assert_eq!(sanitize_id(" p 7 "), "p7");
        assert_eq!(sanitize_id("Ñandú1"), "and1");
    }

    #[test]
    fn unusable_keys_map_to_unknown() {
        assert_eq!(sanitize_id(""), UNKNOWN_ID);
        assert_eq!(sanitize_id("//--"), UNKNOWN_ID);
    }
}
