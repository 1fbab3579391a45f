use crate::Resource;

/// Service path segment of the physical inventory document API.
pub const SERVICE_PATH: &str = "API_PHYSICAL_INVENTORY_DOC_SRV";

/// `{base_url}/API_PHYSICAL_INVENTORY_DOC_SRV/{entity_set}`
pub fn entity_url(base_url: &str, resource: Resource) -> String {
    [
        base_url.trim_end_matches('/'),
        SERVICE_PATH,
        resource.entity_set(),
    ]
    .join("/")
}
