//! Preset agent: prompt-driven emitter and motion heuristics

use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Agent;
use crate::schema::{
    AccumulationSettings, AppearanceSettings, BackgroundSettings, BurstSettings, EmitterSettings,
    FxSettings, MotionSettings, ObstacleSettings, PresetSchema, SizeRange, SpawnBand,
    TargetsSettings, DEFAULT_MASK_PATH,
};
use crate::validate::{clamp_int, FieldContext, ValidationError, MAX_PARTICLE_RATE};

pub const DEFAULT_SPRITE: &str = "res://runtime/preset_sprite.png";
pub const DEFAULT_PALETTE: [&str; 3] = ["#ffffff", "#dddddd", "#bbbbbb"];
const BACKGROUND_GRADIENT: [&str; 2] = ["#0b1120", "#1e293b"];
const FALLBACK_SLUG: &str = "preset";

/// Limits the preset agent applies on top of the schema's own ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConstraints {
    pub max_particles: i64,
    pub target_fps: i64,
    pub internal_scale: f64,
}

impl Default for PresetConstraints {
    fn default() -> Self {
        Self { max_particles: MAX_PARTICLE_RATE, target_fps: 60, internal_scale: 0.75 }
    }
}

/// Burst parameters; a burst is only emitted when both are present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BurstSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_sec: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

fn default_emitter_type() -> String {
    "generic".to_string()
}

fn default_rate() -> i64 {
    2000
}

fn default_sprite() -> String {
    DEFAULT_SPRITE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
    #[serde(default = "default_emitter_type")]
    pub emitter_type: String,
    /// Source for the preset name; the prompt is used when absent or empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_name: Option<String>,
    #[serde(default = "default_rate")]
    pub desired_rate: i64,
    #[serde(default)]
    pub burst: BurstSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<i64>,
    #[serde(default = "default_sprite")]
    pub sprite: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PresetRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            palette: None,
            emitter_type: default_emitter_type(),
            base_name: None,
            desired_rate: default_rate(),
            burst: BurstSpec::default(),
            random_seed: None,
            sprite: default_sprite(),
            notes: None,
        }
    }
}

/// Named motion coefficient sets selected from prompt keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionProfile {
    Intense,
    Calm,
    Default,
}

/// Keyword rules in priority order; first match wins
const MOTION_RULES: &[(&[&str], MotionProfile)] = &[
    (&["storm", "strong"], MotionProfile::Intense),
    (&["calm", "gentle"], MotionProfile::Calm),
];

impl MotionProfile {
    /// Pick a profile by case-insensitive keyword containment
    pub fn from_prompt(prompt: &str) -> Self {
        let prompt = prompt.to_lowercase();
        MOTION_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| prompt.contains(k)))
            .map(|(_, profile)| *profile)
            .unwrap_or(MotionProfile::Default)
    }

    pub fn settings(self) -> Result<MotionSettings, ValidationError> {
        match self {
            MotionProfile::Intense => MotionSettings::new(0.05, 50.0, 0.9, 120.0, 320.0, 0.4),
            MotionProfile::Calm => MotionSettings::new(0.18, 18.0, 0.4, 40.0, 120.0, 0.2),
            MotionProfile::Default => MotionSettings::new(0.12, 30.0, 0.6, 90.0, 240.0, 0.3),
        }
    }
}

fn slug_separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("slug pattern is valid"))
}

/// Lowercase, collapse non-alphanumeric runs to `_` and trim them from the ends
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let slug = slug_separator().replace_all(&lowered, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PresetAgent {
    constraints: PresetConstraints,
}

impl PresetAgent {
    pub fn new(constraints: PresetConstraints) -> Self {
        Self { constraints }
    }

    fn emitter_rate(&self, desired: i64) -> i64 {
        let rate = clamp_int(desired, 1, self.constraints.max_particles);
        if rate != desired {
            warn!(
                "preset emitter rate {} clamped to {} (max_particles = {})",
                desired, rate, self.constraints.max_particles
            );
        }
        rate
    }

    fn burst(spec: &BurstSpec) -> Result<Option<BurstSettings>, ValidationError> {
        match (spec.interval_sec, spec.count) {
            (Some(interval_sec), Some(count)) => {
                BurstSettings::new(interval_sec, count).map(Some).field("burst")
            }
            _ => Ok(None),
        }
    }
}

impl Agent for PresetAgent {
    type Request = PresetRequest;
    type Output = PresetSchema;

    fn generate(&self, request: PresetRequest) -> Result<PresetSchema, ValidationError> {
        let base_name = request.base_name.as_deref().filter(|name| !name.is_empty());
        let name = slugify(base_name.unwrap_or(&request.prompt));

        let emitter = EmitterSettings::new(
            request.emitter_type,
            self.emitter_rate(request.desired_rate),
            SpawnBand::new(0.05, 0.02).field("spawn_band").field("emitter")?,
            Self::burst(&request.burst).field("emitter")?,
            request.random_seed,
        );

        let size = SizeRange::new(6.0, 14.0).field("size_px").field("appearance")?;
        let appearance = match request.palette {
            Some(palette) if !palette.is_empty() => {
                AppearanceSettings::new(palette, size, request.sprite)
            }
            _ => AppearanceSettings::new(DEFAULT_PALETTE, size, request.sprite),
        }
        .field("appearance")?;

        let profile = MotionProfile::from_prompt(&request.prompt);
        debug!("preset '{}' uses {:?} motion profile", name, profile);
        let motion = profile.settings().field("motion")?;

        let accumulation =
            AccumulationSettings::new(true, "heightmap", 180.0, 0.08).field("accumulation")?;
        let obstacle = ObstacleSettings::new(DEFAULT_MASK_PATH, 0.2).field("obstacle")?;
        let background =
            BackgroundSettings::new(BACKGROUND_GRADIENT, false).field("background").field("fx")?;
        let fx = FxSettings::new(0.2, background).field("fx")?;
        let targets =
            TargetsSettings::new(self.constraints.target_fps, self.constraints.internal_scale)
                .field("targets")?;

        let notes = match request.notes.as_deref() {
            Some(notes) if !notes.is_empty() => notes,
            _ => request.prompt.as_str(),
        };

        Ok(PresetSchema::new(
            name,
            emitter,
            appearance,
            motion,
            accumulation,
            obstacle,
            fx,
            targets,
            notes,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RuntimeDocument;
    use crate::validate::Violation;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Sample petals gently swaying"), "sample_petals_gently_swaying");
        assert_eq!(slugify("  --Snow!! Storm--  "), "snow_storm");
        assert_eq!(slugify("Ünïcode"), "n_code");
        assert_eq!(slugify("!!!"), "preset");
        assert_eq!(slugify(""), "preset");
    }

    #[test]
    fn test_motion_profile_rules() {
        assert_eq!(MotionProfile::from_prompt("A STRONG blizzard"), MotionProfile::Intense);
        assert_eq!(MotionProfile::from_prompt("calm snowfall"), MotionProfile::Calm);
        assert_eq!(MotionProfile::from_prompt("Gentle leaves"), MotionProfile::Calm);
        assert_eq!(MotionProfile::from_prompt("falling ash"), MotionProfile::Default);
        // Intensity outranks calmness
        assert_eq!(MotionProfile::from_prompt("calm before the storm"), MotionProfile::Intense);
    }

    #[test]
    fn test_rate_respects_max_particles() {
        let agent = PresetAgent::new(PresetConstraints { max_particles: 1000, ..Default::default() });
        let request = PresetRequest { desired_rate: MAX_PARTICLE_RATE * 2, ..PresetRequest::new("snow") };
        let preset = agent.generate(request).unwrap();
        assert!(preset.emitter().rate_per_sec() <= 1000);
    }

    #[test]
    fn test_rate_floor_is_one() {
        let request = PresetRequest { desired_rate: -50, ..PresetRequest::new("snow") };
        let preset = PresetAgent::default().generate(request).unwrap();
        assert_eq!(preset.emitter().rate_per_sec(), 1);
    }

    #[test]
    fn test_defaults_applied() {
        let preset = PresetAgent::default().generate(PresetRequest::new("Gentle petals")).unwrap();
        assert_eq!(preset.name(), "gentle_petals");
        assert_eq!(preset.appearance().palette(), DEFAULT_PALETTE);
        assert_eq!(preset.appearance().sprite(), DEFAULT_SPRITE);
        assert_eq!(preset.emitter().emitter_type(), "generic");
        assert_eq!(preset.emitter().rate_per_sec(), 2000);
        assert!(preset.emitter().burst().is_none());
        assert_eq!(preset.motion().drag(), 0.18);
        assert_eq!(preset.targets().fps(), 60);
        assert_eq!(preset.targets().internal_scale(), 0.75);
        assert_eq!(preset.notes(), "Gentle petals");
        assert_eq!(preset.obstacle().collide_mask(), DEFAULT_MASK_PATH);
    }

    #[test]
    fn test_base_name_and_notes_override() {
        let request = PresetRequest {
            base_name: Some("My Storm".to_string()),
            notes: Some("n".repeat(100)),
            ..PresetRequest::new("storm of embers")
        };
        let preset = PresetAgent::default().generate(request).unwrap();
        assert_eq!(preset.name(), "my_storm");
        assert_eq!(preset.notes().chars().count(), 80);
        assert_eq!(preset.motion().gravity(), 320.0);
    }

    #[test]
    fn test_empty_base_name_falls_back_to_prompt() {
        let request = PresetRequest { base_name: Some(String::new()), ..PresetRequest::new("Soft Rain") };
        assert_eq!(PresetAgent::default().generate(request).unwrap().name(), "soft_rain");
    }

    #[test]
    fn test_burst_requires_both_fields() {
        let partial = PresetRequest {
            burst: BurstSpec { interval_sec: Some(2.0), count: None },
            ..PresetRequest::new("snow")
        };
        assert!(PresetAgent::default().generate(partial).unwrap().emitter().burst().is_none());

        let full = PresetRequest {
            burst: BurstSpec { interval_sec: Some(2.0), count: Some(50) },
            ..PresetRequest::new("snow")
        };
        let preset = PresetAgent::default().generate(full).unwrap();
        let burst = preset.emitter().burst().unwrap();
        assert_eq!(burst.interval_sec(), 2.0);
        assert_eq!(burst.count(), 50);
    }

    #[test]
    fn test_empty_palette_entries_fail() {
        let request = PresetRequest {
            palette: Some(vec![String::new(), String::new()]),
            ..PresetRequest::new("snow")
        };
        let err = PresetAgent::default().generate(request).unwrap_err();
        assert_eq!(err.violation, Violation::EmptyPalette);
        assert_eq!(err.field.as_deref(), Some("appearance.palette"));
    }

    #[test]
    fn test_nan_burst_interval_reports_path() {
        let request = PresetRequest {
            burst: BurstSpec { interval_sec: Some(f64::NAN), count: Some(1) },
            ..PresetRequest::new("snow")
        };
        let err = PresetAgent::default().generate(request).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("emitter.burst.interval_sec"));
    }

    #[test]
    fn test_request_from_json_defaults() {
        let request: PresetRequest =
            serde_json::from_str(r#"{"prompt": "Snow", "burst": {"count": 3}}"#).unwrap();
        assert_eq!(request.desired_rate, 2000);
        assert_eq!(request.sprite, DEFAULT_SPRITE);
        assert_eq!(request.burst.count, Some(3));
        assert!(request.base_name.is_none());
    }

    #[test]
    fn test_generated_preset_has_version() {
        let value = PresetAgent::default().generate(PresetRequest::new("x")).unwrap().to_value().unwrap();
        assert_eq!(value["version"], "1.0");
        assert!(value["emitter"].get("random_seed").is_none());
    }
}
