//! `preset` document: emitter, appearance, motion and presentation settings.

use serde::Serialize;

use super::{DocumentKind, RuntimeDocument};
use crate::validate::{
    at_least, clamp, clamp_int, ensure_non_empty, ensure_palette, ensure_runtime_path,
    truncate_chars, FieldContext, ValidationError, MAX_ACCUMULATION_HEIGHT, MAX_BURST_COUNT,
    MAX_FPS, MAX_PARTICLE_RATE, NOTES_MAX_CHARS, SCHEMA_VERSION,
};

/// Normalized vertical band particles spawn in
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpawnBand {
    y: f64,
    height: f64,
}

impl SpawnBand {
    pub fn new(y: f64, height: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            y: clamp(y, 0.0, 1.0).field("y")?,
            height: clamp(height, 0.0, 1.0).field("height")?,
        })
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Periodic burst emission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurstSettings {
    interval_sec: f64,
    count: u32,
}

impl BurstSettings {
    pub fn new(interval_sec: f64, count: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            interval_sec: at_least(interval_sec, 0.0).field("interval_sec")?,
            count: clamp_int(count, 0, MAX_BURST_COUNT) as u32,
        })
    }

    pub fn interval_sec(&self) -> f64 {
        self.interval_sec
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Particle emitter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmitterSettings {
    #[serde(rename = "type")]
    emitter_type: String,
    rate_per_sec: u32,
    spawn_band: SpawnBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    burst: Option<BurstSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    random_seed: Option<u32>,
}

impl EmitterSettings {
    /// Rate is saturated into `0..=MAX_PARTICLE_RATE`; the seed keeps its low
    /// 32 bits.
    pub fn new(
        emitter_type: impl Into<String>,
        rate_per_sec: i64,
        spawn_band: SpawnBand,
        burst: Option<BurstSettings>,
        random_seed: Option<i64>,
    ) -> Self {
        Self {
            emitter_type: emitter_type.into(),
            rate_per_sec: clamp_int(rate_per_sec, 0, MAX_PARTICLE_RATE) as u32,
            spawn_band,
            burst,
            random_seed: random_seed.map(|seed| (seed & 0xFFFF_FFFF) as u32),
        }
    }

    pub fn emitter_type(&self) -> &str {
        &self.emitter_type
    }

    pub fn rate_per_sec(&self) -> u32 {
        self.rate_per_sec
    }

    pub fn spawn_band(&self) -> &SpawnBand {
        &self.spawn_band
    }

    pub fn burst(&self) -> Option<&BurstSettings> {
        self.burst.as_ref()
    }

    pub fn random_seed(&self) -> Option<u32> {
        self.random_seed
    }
}

/// Particle size range in pixels; `max` never drops below `min`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeRange {
    min: f64,
    max: f64,
}

impl SizeRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        let min = at_least(min, 0.0).field("min")?;
        let max = at_least(max, min).field("max")?;
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppearanceSettings {
    palette: Vec<String>,
    size_px: SizeRange,
    sprite: String,
}

impl AppearanceSettings {
    pub fn new<I, S>(
        palette: I,
        size_px: SizeRange,
        sprite: impl Into<String>,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            palette: ensure_palette(palette).field("palette")?,
            size_px,
            sprite: ensure_non_empty(sprite).field("sprite")?,
        })
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    pub fn size_px(&self) -> &SizeRange {
        &self.size_px
    }

    pub fn sprite(&self) -> &str {
        &self.sprite
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Sway {
    amp: f64,
    freq: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Spin {
    deg_per_sec: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Glide {
    lift: f64,
}

/// Physical coefficients driving particle motion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionSettings {
    drag: f64,
    sway: Sway,
    spin: Spin,
    gravity: f64,
    glide: Glide,
}

impl MotionSettings {
    pub fn new(
        drag: f64,
        sway_amp: f64,
        sway_freq: f64,
        spin_deg_per_sec: f64,
        gravity: f64,
        glide_lift: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            drag: clamp(drag, 0.0, 5.0).field("drag")?,
            sway: Sway {
                amp: clamp(sway_amp, 0.0, 180.0).field("sway.amp")?,
                freq: clamp(sway_freq, 0.0, 5.0).field("sway.freq")?,
            },
            spin: Spin {
                deg_per_sec: clamp(spin_deg_per_sec, -720.0, 720.0).field("spin.deg_per_sec")?,
            },
            gravity: clamp(gravity, -5000.0, 5000.0).field("gravity")?,
            glide: Glide { lift: clamp(glide_lift, 0.0, 5.0).field("glide.lift")? },
        })
    }

    pub fn drag(&self) -> f64 {
        self.drag
    }

    pub fn sway_amp(&self) -> f64 {
        self.sway.amp
    }

    pub fn sway_freq(&self) -> f64 {
        self.sway.freq
    }

    pub fn spin_deg_per_sec(&self) -> f64 {
        self.spin.deg_per_sec
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn glide_lift(&self) -> f64 {
        self.glide.lift
    }
}

/// Settled-particle accumulation (e.g. snow piling up)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccumulationSettings {
    enabled: bool,
    mode: String,
    max_height_px: f64,
    diffusion: f64,
}

impl AccumulationSettings {
    pub fn new(
        enabled: bool,
        mode: impl Into<String>,
        max_height_px: f64,
        diffusion: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            enabled,
            mode: mode.into(),
            max_height_px: clamp(max_height_px, 0.0, MAX_ACCUMULATION_HEIGHT)
                .field("max_height_px")?,
            diffusion: clamp(diffusion, 0.0, 1.0).field("diffusion")?,
        })
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn max_height_px(&self) -> f64 {
        self.max_height_px
    }

    pub fn diffusion(&self) -> f64 {
        self.diffusion
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleSettings {
    collide_mask: String,
    stickiness: f64,
}

impl ObstacleSettings {
    pub fn new(collide_mask: impl Into<String>, stickiness: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            collide_mask: ensure_runtime_path(collide_mask).field("collide_mask")?,
            stickiness: clamp(stickiness, 0.0, 1.0).field("stickiness")?,
        })
    }

    pub fn collide_mask(&self) -> &str {
        &self.collide_mask
    }

    pub fn stickiness(&self) -> f64 {
        self.stickiness
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundSettings {
    gradient: Vec<String>,
    cycle_by_clock: bool,
}

impl BackgroundSettings {
    pub fn new<I, S>(gradient: I, cycle_by_clock: bool) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self { gradient: ensure_palette(gradient).field("gradient")?, cycle_by_clock })
    }

    pub fn gradient(&self) -> &[String] {
        &self.gradient
    }

    pub fn cycle_by_clock(&self) -> bool {
        self.cycle_by_clock
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FxSettings {
    bloom: f64,
    background: BackgroundSettings,
}

impl FxSettings {
    pub fn new(bloom: f64, background: BackgroundSettings) -> Result<Self, ValidationError> {
        Ok(Self { bloom: clamp(bloom, 0.0, 2.0).field("bloom")?, background })
    }

    pub fn bloom(&self) -> f64 {
        self.bloom
    }

    pub fn background(&self) -> &BackgroundSettings {
        &self.background
    }
}

/// Render targets for the runtime
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetsSettings {
    fps: u32,
    internal_scale: f64,
}

impl TargetsSettings {
    pub fn new(fps: i64, internal_scale: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            fps: clamp_int(fps, 1, MAX_FPS) as u32,
            internal_scale: clamp(internal_scale, 0.1, 1.0).field("internal_scale")?,
        })
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn internal_scale(&self) -> f64 {
        self.internal_scale
    }
}

/// A complete particle preset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetSchema {
    version: &'static str,
    name: String,
    emitter: EmitterSettings,
    appearance: AppearanceSettings,
    motion: MotionSettings,
    accumulation: AccumulationSettings,
    obstacle: ObstacleSettings,
    fx: FxSettings,
    targets: TargetsSettings,
    notes: String,
}

impl PresetSchema {
    /// Assemble a preset from validated parts; notes are cut to 80 characters.
    pub fn new(
        name: impl Into<String>,
        emitter: EmitterSettings,
        appearance: AppearanceSettings,
        motion: MotionSettings,
        accumulation: AccumulationSettings,
        obstacle: ObstacleSettings,
        fx: FxSettings,
        targets: TargetsSettings,
        notes: &str,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION,
            name: name.into(),
            emitter,
            appearance,
            motion,
            accumulation,
            obstacle,
            fx,
            targets,
            notes: truncate_chars(notes, NOTES_MAX_CHARS),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn emitter(&self) -> &EmitterSettings {
        &self.emitter
    }

    pub fn appearance(&self) -> &AppearanceSettings {
        &self.appearance
    }

    pub fn motion(&self) -> &MotionSettings {
        &self.motion
    }

    pub fn accumulation(&self) -> &AccumulationSettings {
        &self.accumulation
    }

    pub fn obstacle(&self) -> &ObstacleSettings {
        &self.obstacle
    }

    pub fn fx(&self) -> &FxSettings {
        &self.fx
    }

    pub fn targets(&self) -> &TargetsSettings {
        &self.targets
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

impl RuntimeDocument for PresetSchema {
    const KIND: DocumentKind = DocumentKind::Preset;
}
