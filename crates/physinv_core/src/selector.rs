use std::fmt;

/// Shorthand accepter value meaning every resource.
pub const ALL_SELECTOR: &str = "All";

/// Sub-resource of a physical inventory document that can be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Header,
    Item,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Header, Resource::Item];

    /// Matches accepter names exactly; anything else is not a resource.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Header" => Some(Self::Header),
            "Item" => Some(Self::Item),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::Item => "Item",
        }
    }

    /// OData entity set queried for this resource.
    pub fn entity_set(&self) -> &'static str {
        match self {
            Self::Header => "A_PhysInventoryDocHeader",
            Self::Item => "A_PhysInventoryDocItem",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One accepter value after interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEntry {
    Fetch(Resource),
    Ignored(String),
}

/// Interprets the caller-supplied accepter list.
///
/// An empty list, or one starting with `"All"`, selects every resource once.
/// Otherwise each value maps to one entry in input order; duplicates are kept
/// and unrecognized values become [`SelectorEntry::Ignored`].
pub fn expand_accepter<S: AsRef<str>>(accepter: &[S]) -> Vec<SelectorEntry> {
    match accepter.first() {
        None => Resource::ALL.iter().copied().map(SelectorEntry::Fetch).collect(),
        Some(first) if first.as_ref() == ALL_SELECTOR => {
            Resource::ALL.iter().copied().map(SelectorEntry::Fetch).collect()
        }
        Some(_) => accepter
            .iter()
            .map(|value| {
                let value = value.as_ref();
                match Resource::from_name(value) {
                    Some(resource) => SelectorEntry::Fetch(resource),
                    None => SelectorEntry::Ignored(value.to_string()),
                }
            })
            .collect(),
    }
}
