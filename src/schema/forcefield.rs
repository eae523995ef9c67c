//! `forcefield` document: a timeline of wind, gust and vortex events.

use serde::{Deserialize, Serialize};

use super::{DocumentKind, RuntimeDocument};
use crate::validate::{
    at_least, clamp, ensure_unit_tuple, FieldContext, ValidationError, MAX_TORNADO_RADIUS,
    MAX_VORTEX_SPEED, MAX_WIND_SPEED, SCHEMA_VERSION,
};

/// Raw, unvalidated force event as authored in configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceEventSpec {
    #[serde(default)]
    pub t: f64,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dur: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vortex: Option<f64>,
}

impl ForceEventSpec {
    pub fn new(t: f64, event_type: impl Into<String>) -> Self {
        Self { t, event_type: event_type.into(), ..Default::default() }
    }
}

/// A validated force event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceEvent {
    t: f64,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dir_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dur: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    center: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vortex: Option<f64>,
}

/// Apply `check` to an optional value, tagging failures with `field`
fn optional<T, U>(
    value: Option<T>,
    field: &str,
    check: impl FnOnce(T) -> Result<U, ValidationError>,
) -> Result<Option<U>, ValidationError> {
    value.map(check).transpose().field(field)
}

impl TryFrom<ForceEventSpec> for ForceEvent {
    type Error = ValidationError;

    fn try_from(spec: ForceEventSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            t: at_least(spec.t, 0.0).field("t")?,
            event_type: spec.event_type,
            dir_deg: optional(spec.dir_deg, "dir_deg", |v| clamp(v, 0.0, 360.0))?,
            speed: optional(spec.speed, "speed", |v| clamp(v, 0.0, MAX_WIND_SPEED))?,
            dur: optional(spec.dur, "dur", |v| at_least(v, 0.0))?,
            center: optional(spec.center, "center", |v| ensure_unit_tuple::<2>(&v))?,
            radius: optional(spec.radius, "radius", |v| clamp(v, 0.0, MAX_TORNADO_RADIUS))?,
            vortex: optional(spec.vortex, "vortex", |v| clamp(v, 0.0, MAX_VORTEX_SPEED))?,
        })
    }
}

impl ForceEvent {
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn dir_deg(&self) -> Option<f64> {
        self.dir_deg
    }

    pub fn speed(&self) -> Option<f64> {
        self.speed
    }

    pub fn dur(&self) -> Option<f64> {
        self.dur
    }

    pub fn center(&self) -> Option<[f64; 2]> {
        self.center
    }

    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    pub fn vortex(&self) -> Option<f64> {
        self.vortex
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Texture {
    use_prebaked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForcefieldSchema {
    version: &'static str,
    timeline: Vec<ForceEvent>,
    texture: Texture,
}

impl ForcefieldSchema {
    pub fn new(timeline: Vec<ForceEvent>, use_prebaked_texture: bool) -> Self {
        Self {
            version: SCHEMA_VERSION,
            timeline,
            texture: Texture { use_prebaked: use_prebaked_texture },
        }
    }

    pub fn timeline(&self) -> &[ForceEvent] {
        &self.timeline
    }

    pub fn use_prebaked_texture(&self) -> bool {
        self.texture.use_prebaked
    }
}

impl RuntimeDocument for ForcefieldSchema {
    const KIND: DocumentKind = DocumentKind::Forcefield;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Violation;
    use serde_json::json;

    #[test]
    fn test_minimal_event_omits_optionals() {
        let event = ForceEvent::try_from(ForceEventSpec::new(0.0, "wind")).unwrap();
        let schema = ForcefieldSchema::new(vec![event], false);
        assert_eq!(
            schema.to_value().unwrap(),
            json!({
                "version": "1.0",
                "timeline": [{"t": 0.0, "type": "wind"}],
                "texture": {"use_prebaked": false}
            })
        );
    }

    #[test]
    fn test_event_fields_clamped() {
        let spec = ForceEventSpec {
            t: -4.0,
            event_type: "tornado".to_string(),
            dir_deg: Some(400.0),
            speed: Some(900.0),
            dur: Some(-1.0),
            center: Some(vec![-0.5, 2.0]),
            radius: Some(0.9),
            vortex: Some(1000.0),
        };
        let event = ForceEvent::try_from(spec).unwrap();
        assert_eq!(event.t(), 0.0);
        assert_eq!(event.dir_deg(), Some(360.0));
        assert_eq!(event.speed(), Some(MAX_WIND_SPEED));
        assert_eq!(event.dur(), Some(0.0));
        assert_eq!(event.center(), Some([0.0, 1.0]));
        assert_eq!(event.radius(), Some(MAX_TORNADO_RADIUS));
        assert_eq!(event.vortex(), Some(MAX_VORTEX_SPEED));
    }

    #[test]
    fn test_center_must_be_pair() {
        let spec = ForceEventSpec { center: Some(vec![0.5]), ..ForceEventSpec::new(1.0, "vortex") };
        let err = ForceEvent::try_from(spec).unwrap_err();
        assert_eq!(err.violation, Violation::Arity { expected: 2, actual: 1 });
        assert_eq!(err.field.as_deref(), Some("center"));
    }

    #[test]
    fn test_nan_speed_rejected() {
        let spec = ForceEventSpec { speed: Some(f64::NAN), ..ForceEventSpec::new(1.0, "gust") };
        let err = ForceEvent::try_from(spec).unwrap_err();
        assert_eq!(err.to_string(), "speed: value cannot be NaN");
    }

    #[test]
    fn test_spec_deserializes_with_defaults() {
        let spec: ForceEventSpec =
            serde_json::from_value(json!({"type": "gust", "dir_deg": 150, "speed": 240, "dur": 6}))
                .unwrap();
        assert_eq!(spec.t, 0.0);
        assert_eq!(spec.speed, Some(240.0));
        assert_eq!(spec.center, None);
    }
}
