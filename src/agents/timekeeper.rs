//! Timekeeper agent

use serde::{Deserialize, Serialize};

use super::Agent;
use crate::schema::{SeasonalAdjust, TimekeeperSchema, DEFAULT_REGION};
use crate::validate::ValidationError;

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimekeeperRequest {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub adjustments: Vec<SeasonalAdjust>,
}

impl Default for TimekeeperRequest {
    fn default() -> Self {
        Self { region: default_region(), adjustments: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TimekeeperAgent;

impl Agent for TimekeeperAgent {
    type Request = TimekeeperRequest;
    type Output = TimekeeperSchema;

    fn generate(&self, request: TimekeeperRequest) -> Result<TimekeeperSchema, ValidationError> {
        Ok(TimekeeperSchema::new(request.region, request.adjustments))
    }
}
