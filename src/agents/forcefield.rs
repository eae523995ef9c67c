//! Forcefield agent: constrains event speeds before schema validation

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::Agent;
use crate::schema::{ForceEvent, ForceEventSpec, ForcefieldSchema};
use crate::validate::{clamp, FieldContext, ValidationError, MAX_WIND_SPEED};

/// Vortex strength may exceed the wind speed cap by this factor
const VORTEX_HEADROOM: f64 = 1.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForcefieldConstraints {
    pub max_speed: f64,
}

impl Default for ForcefieldConstraints {
    fn default() -> Self {
        Self { max_speed: MAX_WIND_SPEED }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForcefieldRequest {
    /// Free-text description; only used for diagnostics
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub events: Vec<ForceEventSpec>,
    #[serde(default)]
    pub use_prebaked_texture: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ForceFieldAgent {
    constraints: ForcefieldConstraints,
}

impl ForceFieldAgent {
    pub fn new(constraints: ForcefieldConstraints) -> Self {
        Self { constraints }
    }

    /// Clamp `value` into `[0, max]`, warning when the constraint bites
    fn limit(
        value: Option<f64>,
        max: f64,
        field: &str,
        index: usize,
    ) -> Result<Option<f64>, ValidationError> {
        let Some(requested) = value else {
            return Ok(None);
        };
        let limited = clamp(requested, 0.0, max).field(field)?;
        if limited != requested {
            warn!("force event {} {} {} clamped to {}", index, field, requested, limited);
        }
        Ok(Some(limited))
    }

    fn apply_constraints(
        &self,
        index: usize,
        spec: ForceEventSpec,
    ) -> Result<ForceEvent, ValidationError> {
        let max_speed = self.constraints.max_speed;
        let spec = ForceEventSpec {
            speed: Self::limit(spec.speed, max_speed, "speed", index)?,
            vortex: Self::limit(spec.vortex, max_speed * VORTEX_HEADROOM, "vortex", index)?,
            ..spec
        };
        ForceEvent::try_from(spec)
    }
}

impl Agent for ForceFieldAgent {
    type Request = ForcefieldRequest;
    type Output = ForcefieldSchema;

    fn generate(&self, request: ForcefieldRequest) -> Result<ForcefieldSchema, ValidationError> {
        debug!("forcefield '{}' with {} events", request.prompt, request.events.len());
        let timeline = request
            .events
            .into_iter()
            .enumerate()
            .map(|(i, spec)| self.apply_constraints(i, spec).field(i.to_string()).field("timeline"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ForcefieldSchema::new(timeline, request.use_prebaked_texture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RuntimeDocument;
    use crate::validate::MAX_VORTEX_SPEED;

    fn gust(speed: f64) -> ForceEventSpec {
        ForceEventSpec { speed: Some(speed), ..ForceEventSpec::new(0.0, "gust") }
    }

    #[test]
    fn test_speed_limited_by_constraint() {
        let agent = ForceFieldAgent::new(ForcefieldConstraints { max_speed: 150.0 });
        let request = ForcefieldRequest { events: vec![gust(500.0)], ..Default::default() };
        let schema = agent.generate(request).unwrap();
        assert_eq!(schema.timeline()[0].speed(), Some(150.0));
        assert_eq!(schema.to_value().unwrap()["timeline"][0]["speed"], 150.0);
    }

    #[test]
    fn test_vortex_headroom() {
        let agent = ForceFieldAgent::new(ForcefieldConstraints { max_speed: 100.0 });
        let spec = ForceEventSpec { vortex: Some(300.0), ..ForceEventSpec::new(5.0, "tornado") };
        let schema = agent
            .generate(ForcefieldRequest { events: vec![spec], ..Default::default() })
            .unwrap();
        assert_eq!(schema.timeline()[0].vortex(), Some(125.0));
    }

    #[test]
    fn test_schema_cap_still_applies() {
        // A generous constraint cannot lift values past the schema's own range
        let agent = ForceFieldAgent::new(ForcefieldConstraints { max_speed: 10_000.0 });
        let spec = ForceEventSpec {
            speed: Some(9_000.0),
            vortex: Some(9_000.0),
            ..ForceEventSpec::new(0.0, "tornado")
        };
        let schema = agent
            .generate(ForcefieldRequest { events: vec![spec], ..Default::default() })
            .unwrap();
        assert_eq!(schema.timeline()[0].speed(), Some(MAX_WIND_SPEED));
        assert_eq!(schema.timeline()[0].vortex(), Some(MAX_VORTEX_SPEED));
    }

    #[test]
    fn test_other_fields_pass_through() {
        let spec = ForceEventSpec {
            dir_deg: Some(150.0),
            dur: Some(6.0),
            ..ForceEventSpec::new(30.0, "gust")
        };
        let schema = ForceFieldAgent::default()
            .generate(ForcefieldRequest {
                prompt: "short gust".to_string(),
                events: vec![spec],
                use_prebaked_texture: true,
            })
            .unwrap();
        let event = &schema.timeline()[0];
        assert_eq!(event.t(), 30.0);
        assert_eq!(event.dir_deg(), Some(150.0));
        assert_eq!(event.dur(), Some(6.0));
        assert!(event.speed().is_none());
        assert!(schema.use_prebaked_texture());
    }

    #[test]
    fn test_nan_speed_reports_event_index() {
        let request = ForcefieldRequest {
            events: vec![gust(10.0), gust(f64::NAN)],
            ..Default::default()
        };
        let err = ForceFieldAgent::default().generate(request).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("timeline.1.speed"));
    }

    #[test]
    fn test_request_from_json() {
        let request: ForcefieldRequest = serde_json::from_str(
            r#"{"events": [{"type": "wind", "dir_deg": 180, "speed": 120}]}"#,
        )
        .unwrap();
        assert_eq!(request.events[0].t, 0.0);
        assert!(!request.use_prebaked_texture);
        assert!(request.prompt.is_empty());
    }
}
