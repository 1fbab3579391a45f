use std::fs;
use std::path::{Path, PathBuf};

use physinv_core::RequestKey;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse input {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Input document naming what to fetch. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct InputSdc {
    #[serde(default)]
    pub accepter: Vec<String>,
    #[serde(default)]
    pub physical_inventory_document: DocumentInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DocumentInput {
    pub fiscal_year: String,
    pub physical_inventory_document: String,
    pub physical_inventory_document_item: ItemInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemInput {
    pub physical_inventory_document_item: String,
}

impl InputSdc {
    pub fn request_key(&self) -> RequestKey {
        let document = &self.physical_inventory_document;
        RequestKey::new(
            document.fiscal_year.clone(),
            document.physical_inventory_document.clone(),
            document
                .physical_inventory_document_item
                .physical_inventory_document_item
                .clone(),
        )
    }
}

pub fn read_sdc(path: &Path) -> Result<InputSdc, InputError> {
    let content = fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
