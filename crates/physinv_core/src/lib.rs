//! Physical inventory core: pure request building and response decoding.
mod endpoint;
mod error;
mod formatter;
mod key;
mod odata;
mod query;
mod records;
mod selector;

pub use endpoint::{entity_url, SERVICE_PATH};
pub use error::DecodeError;
pub use formatter::{convert_to_header, convert_to_item, convert_to_to_item};
pub use key::RequestKey;
pub use odata::parse_odata_date;
pub use query::{filter_query, header_filter, item_filter, QueryParams, FILTER_PARAM};
pub use records::{Header, InventoryItem, Item, ToItem};
pub use selector::{expand_accepter, Resource, SelectorEntry, ALL_SELECTOR};
