//! `sequence` document: timed swaps of runtime assets into logical slots.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{DocumentKind, RuntimeDocument};
use crate::validate::{at_least, ensure_runtime_path, FieldContext, ValidationError, SCHEMA_VERSION};

/// Raw track as authored in configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackSpec {
    #[serde(default)]
    pub t: f64,
    /// Slot name to runtime asset path
    #[serde(default)]
    pub apply: IndexMap<String, String>,
}

/// At time `t`, load each asset into its slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceTrack {
    t: f64,
    apply: IndexMap<String, String>,
}

impl SequenceTrack {
    pub fn new(t: f64, apply: IndexMap<String, String>) -> Result<Self, ValidationError> {
        let t = at_least(t, 0.0).field("t")?;
        let apply = apply
            .into_iter()
            .map(|(slot, path)| {
                let path = ensure_runtime_path(path).field(format!("apply.{}", slot))?;
                Ok((slot, path))
            })
            .collect::<Result<IndexMap<_, _>, ValidationError>>()?;
        Ok(Self { t, apply })
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn apply(&self) -> &IndexMap<String, String> {
        &self.apply
    }
}

impl TryFrom<TrackSpec> for SequenceTrack {
    type Error = ValidationError;

    fn try_from(spec: TrackSpec) -> Result<Self, Self::Error> {
        Self::new(spec.t, spec.apply)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceSchema {
    version: &'static str,
    tracks: Vec<SequenceTrack>,
    #[serde(rename = "loop")]
    looping: bool,
}

impl SequenceSchema {
    pub fn new(tracks: Vec<SequenceTrack>, looping: bool) -> Self {
        Self { version: SCHEMA_VERSION, tracks, looping }
    }

    pub fn tracks(&self) -> &[SequenceTrack] {
        &self.tracks
    }

    pub fn looping(&self) -> bool {
        self.looping
    }
}

impl RuntimeDocument for SequenceSchema {
    const KIND: DocumentKind = DocumentKind::Sequence;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn slots(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_track_preserves_slot_order() {
        let track = SequenceTrack::new(
            0.0,
            slots(&[
                ("preset", "res://runtime/preset.json"),
                ("force", "res://runtime/forcefield.json"),
            ]),
        )
        .unwrap();
        let schema = SequenceSchema::new(vec![track], true);
        let value = schema.to_value().unwrap();
        let apply_keys: Vec<_> =
            value["tracks"][0]["apply"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(apply_keys, vec!["preset", "force"]);
        assert_eq!(value["loop"], true);
        assert_eq!(value["version"], "1.0");
    }

    #[test]
    fn test_track_rejects_foreign_path() {
        let err = SequenceTrack::new(
            3.0,
            slots(&[("preset", "res://runtime/a.json"), ("force", "force.json")]),
        )
        .unwrap_err();
        assert_eq!(err.field.as_deref(), Some("apply.force"));
    }

    #[test]
    fn test_track_time_clamped() {
        let track = SequenceTrack::try_from(TrackSpec { t: -2.0, apply: IndexMap::new() }).unwrap();
        assert_eq!(track.t(), 0.0);
    }

    #[test]
    fn test_track_spec_from_json() {
        let spec: TrackSpec =
            serde_json::from_value(json!({"apply": {"preset": "res://runtime/p.json"}})).unwrap();
        assert_eq!(spec.t, 0.0);
        assert_eq!(spec.apply.len(), 1);
    }
}
