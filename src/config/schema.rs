//! Configuration schema for generator input files
//!
//! A config is a mapping of named sections, one per document kind, each
//! deserializing straight into the matching agent request. Sections that are
//! absent or empty produce no document.

use serde::de::value::{MapAccessDeserializer, StringDeserializer};
use serde::de::{DeserializeSeed, IntoDeserializer, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;

use crate::agents::{
    AssetPackRequest, ExporterRequest, ForcefieldConstraints, ForcefieldRequest, ObstacleRequest,
    PresetConstraints, PresetRequest, SequenceRequest, TimekeeperRequest, UiHintsRequest,
};
use crate::schema::DocumentKind;

/// Agent-level limits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintsConfig {
    pub preset: PresetConstraints,
    pub forcefield: ForcefieldConstraints,
}

/// Where generated documents are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory, relative to the working directory unless absolute
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dir: default_output_dir() }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("runtime")
}

/// Full generator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub preset: Option<PresetRequest>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub forcefield: Option<ForcefieldRequest>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub obstacles: Option<ObstacleRequest>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub sequence: Option<SequenceRequest>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub timefx: Option<TimekeeperRequest>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub uihints: Option<UiHintsRequest>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub exporter: Option<ExporterRequest>,
    #[serde(default, deserialize_with = "section", skip_serializing_if = "Option::is_none")]
    pub assets: Option<AssetPackRequest>,
    #[serde(default)]
    pub constraints: ConstraintsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Deserialize a section table, mapping an empty table to `None`
fn section<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_map(SectionVisitor(PhantomData))
}

struct SectionVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for SectionVisitor<T> {
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a section table")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Option<T>, A::Error>
    where
        A: MapAccess<'de>,
    {
        let Some(first) = map.next_key::<String>()? else {
            return Ok(None);
        };
        let rest = FirstKeyThen { first: Some(first), rest: map };
        T::deserialize(MapAccessDeserializer::new(rest)).map(Some)
    }
}

/// Replays a key already read by [`SectionVisitor`] before the remaining entries
struct FirstKeyThen<A> {
    first: Option<String>,
    rest: A,
}

impl<'de, A: MapAccess<'de>> MapAccess<'de> for FirstKeyThen<A> {
    type Error = A::Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, A::Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.first.take() {
            Some(key) => {
                let key: StringDeserializer<A::Error> = key.into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => self.rest.next_key_seed(seed),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, A::Error>
    where
        V: DeserializeSeed<'de>,
    {
        self.rest.next_value_seed(seed)
    }
}

impl GeneratorConfig {
    /// Whether the section for `kind` is present
    pub fn has_section(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::Preset => self.preset.is_some(),
            DocumentKind::Forcefield => self.forcefield.is_some(),
            DocumentKind::Obstacles => self.obstacles.is_some(),
            DocumentKind::Sequence => self.sequence.is_some(),
            DocumentKind::Timefx => self.timefx.is_some(),
            DocumentKind::Uihints => self.uihints.is_some(),
            DocumentKind::Exporter => self.exporter.is_some(),
            DocumentKind::Assets => self.assets.is_some(),
        }
    }

    /// Present sections, in generation order
    pub fn sections(&self) -> Vec<DocumentKind> {
        DocumentKind::ALL.into_iter().filter(|kind| self.has_section(*kind)).collect()
    }

    /// Check settings that cannot be clamped into a sensible value
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.output.dir.as_os_str().is_empty() {
            errors.push("output.dir cannot be empty".to_string());
        }

        let preset = &self.constraints.preset;
        if preset.max_particles < 1 {
            errors.push(format!(
                "constraints.preset.max_particles must be at least 1, got {}",
                preset.max_particles
            ));
        }
        if preset.internal_scale.is_nan() {
            errors.push("constraints.preset.internal_scale cannot be NaN".to_string());
        }

        let max_speed = self.constraints.forcefield.max_speed;
        if max_speed.is_nan() || max_speed < 0.0 {
            errors.push(format!(
                "constraints.forcefield.max_speed must be a non-negative number, got {}",
                max_speed
            ));
        }

        errors
    }
}
