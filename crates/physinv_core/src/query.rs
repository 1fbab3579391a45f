use std::collections::BTreeMap;

use crate::{RequestKey, Resource};

/// Query parameter carrying the OData filter expression.
pub const FILTER_PARAM: &str = "$filter";

/// Query parameters sent with a request. Only [`FILTER_PARAM`] is ever set.
pub type QueryParams = BTreeMap<String, String>;

pub fn header_filter(key: &RequestKey) -> String {
    format!(
        "FiscalYear eq '{}' and PhysicalInventoryDocument eq '{}'",
        literal(&key.fiscal_year),
        literal(&key.document_id),
    )
}

pub fn item_filter(key: &RequestKey) -> String {
    format!(
        "{} and PhysicalInventoryDocumentItem eq '{}'",
        header_filter(key),
        literal(&key.item_id),
    )
}

/// Builds the `$filter` query for a resource. Percent-encoding is left to the transport.
pub fn filter_query(resource: Resource, key: &RequestKey) -> QueryParams {
    let filter = match resource {
        Resource::Header => header_filter(key),
        Resource::Item => item_filter(key),
    };
    QueryParams::from([(FILTER_PARAM.to_string(), filter)])
}

// OData string literals escape a quote by doubling it.
fn literal(value: &str) -> String {
    value.replace('\'', "''")
}
