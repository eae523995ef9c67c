//! `assets` document: required runtime assets and which of them are missing.

use indexmap::IndexSet;
use serde::Serialize;

use super::{DocumentKind, RuntimeDocument};
use crate::validate::SCHEMA_VERSION;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetPackSchema {
    version: &'static str,
    required_assets: Vec<String>,
    missing_assets: Vec<String>,
}

impl AssetPackSchema {
    /// Duplicate entries in either list are dropped, keeping first occurrence order.
    pub fn new(required_assets: Vec<String>, missing_assets: Vec<String>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            required_assets: dedup(required_assets),
            missing_assets: dedup(missing_assets),
        }
    }

    pub fn required_assets(&self) -> &[String] {
        &self.required_assets
    }

    pub fn missing_assets(&self) -> &[String] {
        &self.missing_assets
    }
}

fn dedup(items: Vec<String>) -> Vec<String> {
    items.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}

impl RuntimeDocument for AssetPackSchema {
    const KIND: DocumentKind = DocumentKind::Assets;
}
