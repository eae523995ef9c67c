//! `timefx` document: region and seasonal parameter adjustments.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DocumentKind, RuntimeDocument};
use crate::validate::SCHEMA_VERSION;

pub const DEFAULT_REGION: &str = "UTC";

/// Opaque per-parameter adjustment table, passed through as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAdjust {
    pub parameter: String,
    #[serde(default)]
    pub values: Map<String, Value>,
}

impl SeasonalAdjust {
    pub fn new(parameter: impl Into<String>, values: Map<String, Value>) -> Self {
        Self { parameter: parameter.into(), values }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimekeeperSchema {
    version: &'static str,
    region: String,
    adjustments: Vec<SeasonalAdjust>,
}

impl TimekeeperSchema {
    pub fn new(region: impl Into<String>, adjustments: Vec<SeasonalAdjust>) -> Self {
        Self { version: SCHEMA_VERSION, region: region.into(), adjustments }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn adjustments(&self) -> &[SeasonalAdjust] {
        &self.adjustments
    }
}

impl Default for TimekeeperSchema {
    fn default() -> Self {
        Self::new(DEFAULT_REGION, Vec::new())
    }
}

impl RuntimeDocument for TimekeeperSchema {
    const KIND: DocumentKind = DocumentKind::Timefx;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_region() {
        assert_eq!(
            TimekeeperSchema::default().to_value().unwrap(),
            json!({"version": "1.0", "region": "UTC", "adjustments": []})
        );
    }

    #[test]
    fn test_adjustment_values_pass_through() {
        let values = json!({"winter": 1.4, "summer": {"scale": 0.6}}).as_object().cloned().unwrap();
        let schema =
            TimekeeperSchema::new("Europe/Oslo", vec![SeasonalAdjust::new("emitter.rate", values)]);
        let value = schema.to_value().unwrap();
        assert_eq!(value["adjustments"][0]["parameter"], "emitter.rate");
        assert_eq!(value["adjustments"][0]["values"]["summer"]["scale"], 0.6);
        assert_eq!(value["region"], "Europe/Oslo");
    }
}
