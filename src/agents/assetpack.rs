//! Asset pack agent: reports required runtime assets that are not available

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Agent;
use crate::schema::AssetPackSchema;
use crate::validate::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetPackRequest {
    #[serde(default)]
    pub required_assets: Vec<String>,
    #[serde(default)]
    pub available_assets: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AssetPackAgent;

impl Agent for AssetPackAgent {
    type Request = AssetPackRequest;
    type Output = AssetPackSchema;

    fn generate(&self, request: AssetPackRequest) -> Result<AssetPackSchema, ValidationError> {
        let required: IndexSet<String> = request.required_assets.into_iter().collect();
        let available: HashSet<String> = request.available_assets.into_iter().collect();
        let missing =
            required.iter().filter(|asset| !available.contains(*asset)).cloned().collect();
        Ok(AssetPackSchema::new(required.into_iter().collect(), missing))
    }
}
