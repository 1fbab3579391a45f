use serde::de::DeserializeOwned;

use crate::odata::Envelope;
use crate::{DecodeError, Header, Item, ToItem};

pub fn convert_to_header(bytes: &[u8]) -> Result<Vec<Header>, DecodeError> {
    decode_results(bytes, "Header")
}

pub fn convert_to_item(bytes: &[u8]) -> Result<Vec<Item>, DecodeError> {
    decode_results(bytes, "Item")
}

pub fn convert_to_to_item(bytes: &[u8]) -> Result<Vec<ToItem>, DecodeError> {
    decode_results(bytes, "ToItem")
}

/// Decode an OData v2 collection body (`{"d": {"results": [...]}}`).
///
/// An `{"error": ...}` body is reported as [`DecodeError::Service`]. An empty
/// result list is not an error here.
fn decode_results<T: DeserializeOwned>(
    bytes: &[u8],
    entity: &'static str,
) -> Result<Vec<T>, DecodeError> {
    let envelope: Envelope<T> = serde_json::from_slice(bytes)
        .map_err(|err| DecodeError::malformed(entity, err.to_string()))?;

    match envelope {
        Envelope { d: Some(set), .. } => Ok(set.results),
        Envelope {
            error: Some(error), ..
        } => Err(DecodeError::Service {
            entity,
            code: error.code,
            message: error.message.value,
        }),
        Envelope { .. } => Err(DecodeError::malformed(entity, "missing `d.results`")),
    }
}
