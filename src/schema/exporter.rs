//! `exporter` document (written as `capture.json`): capture instructions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DocumentKind, RuntimeDocument};
use crate::validate::{
    clamp, clamp_int, FieldContext, ValidationError, MAX_EXPORT_DURATION, MAX_EXPORT_RESOLUTION,
    MAX_FPS, SCHEMA_VERSION,
};

/// Raw capture request; defaults to a 10 second 1080p60 video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSpec {
    #[serde(rename = "type")]
    pub capture_type: String,
    pub w: i64,
    pub h: i64,
    pub fps: i64,
    pub dur_sec: f64,
}

impl Default for CaptureSpec {
    fn default() -> Self {
        Self { capture_type: "video".to_string(), w: 1920, h: 1080, fps: 60, dur_sec: 10.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureSettings {
    #[serde(rename = "type")]
    capture_type: String,
    w: u32,
    h: u32,
    fps: u32,
    dur_sec: f64,
}

impl TryFrom<CaptureSpec> for CaptureSettings {
    type Error = ValidationError;

    fn try_from(spec: CaptureSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            capture_type: spec.capture_type,
            w: clamp_int(spec.w, 1, MAX_EXPORT_RESOLUTION) as u32,
            h: clamp_int(spec.h, 1, MAX_EXPORT_RESOLUTION) as u32,
            fps: clamp_int(spec.fps, 1, MAX_FPS) as u32,
            dur_sec: clamp(spec.dur_sec, 0.0, MAX_EXPORT_DURATION).field("dur_sec")?,
        })
    }
}

impl CaptureSettings {
    pub fn capture_type(&self) -> &str {
        &self.capture_type
    }

    pub fn w(&self) -> u32 {
        self.w
    }

    pub fn h(&self) -> u32 {
        self.h
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn dur_sec(&self) -> f64 {
        self.dur_sec
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExporterSchema {
    version: &'static str,
    capture: CaptureSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    watermark: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u32>,
}

impl ExporterSchema {
    /// The watermark is passed through untouched; the seed saturates into `u32`.
    pub fn new(
        capture: CaptureSettings,
        watermark: Option<Map<String, Value>>,
        seed: Option<i64>,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION,
            capture,
            watermark,
            seed: seed.map(|s| clamp_int(s, 0, i64::from(u32::MAX)) as u32),
        }
    }

    pub fn capture(&self) -> &CaptureSettings {
        &self.capture
    }

    pub fn watermark(&self) -> Option<&Map<String, Value>> {
        self.watermark.as_ref()
    }

    pub fn seed(&self) -> Option<u32> {
        self.seed
    }
}

impl RuntimeDocument for ExporterSchema {
    const KIND: DocumentKind = DocumentKind::Exporter;
}
