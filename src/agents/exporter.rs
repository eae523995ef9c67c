//! Exporter agent

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Agent;
use crate::schema::{CaptureSettings, CaptureSpec, ExporterSchema};
use crate::validate::{FieldContext, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExporterRequest {
    #[serde(default)]
    pub capture: CaptureSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watermark: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExporterAgent;

impl Agent for ExporterAgent {
    type Request = ExporterRequest;
    type Output = ExporterSchema;

    fn generate(&self, request: ExporterRequest) -> Result<ExporterSchema, ValidationError> {
        let capture = CaptureSettings::try_from(request.capture).field("capture")?;
        Ok(ExporterSchema::new(capture, request.watermark, request.seed))
    }
}
