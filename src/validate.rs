//! Range and structural validation shared by every schema record
//!
//! All numeric fields are saturated into their domain rather than rejected,
//! with the single exception of NaN, which always fails. Path and palette
//! checks are structural and fail outright.

use thiserror::Error;

/// Version string stamped on every top-level runtime document
pub const SCHEMA_VERSION: &str = "1.0";

/// Namespace every runtime asset path must live under
pub const RUNTIME_PREFIX: &str = "res://runtime/";

pub const MAX_PARTICLE_RATE: i64 = 100_000;
pub const MAX_BURST_COUNT: i64 = 100_000;
pub const MAX_WIND_SPEED: f64 = 400.0;
pub const MAX_VORTEX_SPEED: f64 = 500.0;
pub const MAX_TORNADO_RADIUS: f64 = 0.5;
pub const MAX_ACCUMULATION_HEIGHT: f64 = 512.0;
pub const MAX_EXPORT_DURATION: f64 = 120.0;
pub const MAX_EXPORT_RESOLUTION: i64 = 4096;
pub const MAX_FPS: i64 = 240;
pub const MAX_CLEAR_RADIUS_PX: f64 = 4096.0;

/// Maximum length of preset notes, in characters
pub const NOTES_MAX_CHARS: usize = 80;

/// The constraint a value violated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("value cannot be NaN")]
    NaN,
    #[error("value must be finite")]
    Infinite,
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("runtime assets must be stored under {prefix} (got '{0}')", prefix = RUNTIME_PREFIX)]
    OutsideRuntimeNamespace(String),
    #[error("must have exactly {expected} components, got {actual}")]
    Arity { expected: usize, actual: usize },
    #[error("cannot be empty")]
    Empty,
}

/// A schema constraint failure.
///
/// `field` is a dotted path to the offending value (e.g. `emitter.spawn_band.y`)
/// and is filled in from the inside out as the error crosses record boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{prefix}{violation}", prefix = field_prefix(.field))]
pub struct ValidationError {
    pub field: Option<String>,
    pub violation: Violation,
}

fn field_prefix(field: &Option<String>) -> String {
    match field {
        Some(name) => format!("{}: ", name),
        None => String::new(),
    }
}

impl ValidationError {
    pub fn new(violation: Violation) -> Self {
        Self { field: None, violation }
    }

    /// Prefix the field path with `parent`
    pub fn in_field(mut self, parent: impl Into<String>) -> Self {
        let parent = parent.into();
        self.field = Some(match self.field.take() {
            Some(child) => format!("{}.{}", parent, child),
            None => parent,
        });
        self
    }
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        Self::new(violation)
    }
}

/// Attach a field name to validation failures
pub trait FieldContext<T> {
    fn field(self, name: impl Into<String>) -> Result<T, ValidationError>;
}

impl<T> FieldContext<T> for Result<T, ValidationError> {
    fn field(self, name: impl Into<String>) -> Result<T, ValidationError> {
        self.map_err(|e| e.in_field(name))
    }
}

/// Pin `value` into `[min, max]`.
///
/// NaN is rejected regardless of bounds. The lower bound is applied first, so
/// an inverted range (`min > max`) yields `max`.
pub fn clamp(value: f64, min: f64, max: f64) -> Result<f64, ValidationError> {
    if value.is_nan() {
        return Err(Violation::NaN.into());
    }
    let mut value = value;
    if value < min {
        value = min;
    }
    if value > max {
        value = max;
    }
    Ok(value)
}

/// Lower-bounded clamp for fields with no upper limit.
///
/// Without an upper bound an infinite value would survive clamping and
/// serialize as `null`, so infinities are rejected here.
pub fn at_least(value: f64, min: f64) -> Result<f64, ValidationError> {
    let value = clamp(value, min, f64::INFINITY)?;
    if value.is_infinite() {
        return Err(Violation::Infinite.into());
    }
    Ok(value)
}

/// Reject NaN and infinities without bounding the value
pub fn ensure_finite(value: f64) -> Result<f64, ValidationError> {
    if value.is_nan() {
        return Err(Violation::NaN.into());
    }
    if value.is_infinite() {
        return Err(Violation::Infinite.into());
    }
    Ok(value)
}

/// Integer counterpart of [`clamp`]; integers cannot be NaN so this never fails
pub fn clamp_int(value: i64, min: i64, max: i64) -> i64 {
    let mut value = value;
    if value < min {
        value = min;
    }
    if value > max {
        value = max;
    }
    value
}

/// Check that `path` lives under [`RUNTIME_PREFIX`], returning it unchanged
pub fn ensure_runtime_path(path: impl Into<String>) -> Result<String, ValidationError> {
    let path = path.into();
    if !path.starts_with(RUNTIME_PREFIX) {
        return Err(Violation::OutsideRuntimeNamespace(path).into());
    }
    Ok(path)
}

/// Drop empty entries, failing if nothing is left
pub fn ensure_palette<I, S>(colors: I) -> Result<Vec<String>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let colors: Vec<String> =
        colors.into_iter().map(Into::into).filter(|color| !color.is_empty()).collect();
    if colors.is_empty() {
        return Err(Violation::EmptyPalette.into());
    }
    Ok(colors)
}

pub fn ensure_non_empty(value: impl Into<String>) -> Result<String, ValidationError> {
    let value = value.into();
    if value.is_empty() {
        return Err(Violation::Empty.into());
    }
    Ok(value)
}

/// Convert a slice into a fixed-size array, clamping each component into `[0, 1]`
pub fn ensure_unit_tuple<const N: usize>(values: &[f64]) -> Result<[f64; N], ValidationError> {
    if values.len() != N {
        return Err(Violation::Arity { expected: N, actual: values.len() }.into());
    }
    let mut out = [0.0; N];
    for (i, value) in values.iter().enumerate() {
        out[i] = clamp(*value, 0.0, 1.0).field(i.to_string())?;
    }
    Ok(out)
}

/// Truncate to at most `max` characters (not bytes)
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
