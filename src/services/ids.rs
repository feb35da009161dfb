use rand::{distr::Alphanumeric, Rng};

/// Length of store-assigned document identifiers
pub const DOCUMENT_ID_LEN: usize = 20;

/// Generate an opaque alphanumeric identifier for a new invite or relationship.
///
/// 62^20 possible values, so collisions are not checked for.
pub fn generate_document_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LEN)
        .map(char::from)
        .collect()
}
