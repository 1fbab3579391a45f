/// Identifies the document (and item) a fetch is scoped to.
///
/// The values are opaque: they are passed through to the service filter
/// without format validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestKey {
    pub fiscal_year: String,
    pub document_id: String,
    pub item_id: String,
}

impl RequestKey {
    pub fn new(
        fiscal_year: impl Into<String>,
        document_id: impl Into<String>,
        item_id: impl Into<String>,
    ) -> Self {
        Self {
            fiscal_year: fiscal_year.into(),
            document_id: document_id.into(),
            item_id: item_id.into(),
        }
    }
}
