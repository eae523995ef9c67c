//! UI hints agent

use serde::{Deserialize, Serialize};

use super::Agent;
use crate::schema::UiHintsSchema;
use crate::validate::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiHintsRequest {
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub recommended_presets: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UiHintsAgent;

impl Agent for UiHintsAgent {
    type Request = UiHintsRequest;
    type Output = UiHintsSchema;

    fn generate(&self, request: UiHintsRequest) -> Result<UiHintsSchema, ValidationError> {
        Ok(UiHintsSchema::new(request.tips, request.recommended_presets))
    }
}
