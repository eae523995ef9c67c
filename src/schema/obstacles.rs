//! `obstacles` document: clear rules and mask draw operations.

use serde::{Deserialize, Serialize};

use super::{DocumentKind, RuntimeDocument};
use crate::validate::{
    clamp, ensure_finite, ensure_runtime_path, ensure_unit_tuple, FieldContext, ValidationError,
    MAX_CLEAR_RADIUS_PX, SCHEMA_VERSION,
};

/// Default collision mask shared by presets and obstacle layouts
pub const DEFAULT_MASK_PATH: &str = "res://runtime/obstacles_mask.png";

fn default_mode() -> String {
    "solid".to_string()
}

/// Raw clear rule as authored in configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearRuleSpec {
    pub trigger: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_px: Option<f64>,
}

/// When `trigger` fires, perform `action` on the mask
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClearRule {
    trigger: String,
    action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gte: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius_px: Option<f64>,
}

impl TryFrom<ClearRuleSpec> for ClearRule {
    type Error = ValidationError;

    fn try_from(spec: ClearRuleSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            trigger: spec.trigger,
            action: spec.action,
            at: spec.at,
            gte: spec.gte.map(ensure_finite).transpose().field("gte")?,
            radius_px: spec
                .radius_px
                .map(|r| clamp(r, 0.0, MAX_CLEAR_RADIUS_PX))
                .transpose()
                .field("radius_px")?,
        })
    }
}

impl ClearRule {
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn at(&self) -> Option<&str> {
        self.at.as_deref()
    }

    pub fn gte(&self) -> Option<f64> {
        self.gte
    }

    pub fn radius_px(&self) -> Option<f64> {
        self.radius_px
    }
}

/// Raw draw operation as authored in configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOpSpec {
    pub op: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rect: Option<Vec<f64>>,
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl DrawOpSpec {
    pub fn new(op: impl Into<String>) -> Self {
        Self { op: op.into(), pos: None, radius: None, rect: None, mode: default_mode() }
    }
}

/// A single paint operation on the obstacle mask, in normalized coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawOp {
    op: String,
    mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pos: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rect: Option<[f64; 4]>,
}

impl TryFrom<DrawOpSpec> for DrawOp {
    type Error = ValidationError;

    fn try_from(spec: DrawOpSpec) -> Result<Self, Self::Error> {
        Ok(Self {
            op: spec.op,
            mode: spec.mode,
            pos: spec.pos.map(|p| ensure_unit_tuple::<2>(&p)).transpose().field("pos")?,
            radius: spec.radius.map(|r| clamp(r, 0.0, 1.0)).transpose().field("radius")?,
            rect: spec.rect.map(|r| ensure_unit_tuple::<4>(&r)).transpose().field("rect")?,
        })
    }
}

impl DrawOp {
    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn pos(&self) -> Option<[f64; 2]> {
        self.pos
    }

    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    pub fn rect(&self) -> Option<[f64; 4]> {
        self.rect
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstaclesSchema {
    version: &'static str,
    clear_rules: Vec<ClearRule>,
    draw_ops: Vec<DrawOp>,
    #[serde(rename = "mask")]
    mask_path: String,
}

impl ObstaclesSchema {
    pub fn new(
        clear_rules: Vec<ClearRule>,
        draw_ops: Vec<DrawOp>,
        mask_path: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            version: SCHEMA_VERSION,
            clear_rules,
            draw_ops,
            mask_path: ensure_runtime_path(mask_path).field("mask")?,
        })
    }

    pub fn clear_rules(&self) -> &[ClearRule] {
        &self.clear_rules
    }

    pub fn draw_ops(&self) -> &[DrawOp] {
        &self.draw_ops
    }

    pub fn mask_path(&self) -> &str {
        &self.mask_path
    }
}

impl RuntimeDocument for ObstaclesSchema {
    const KIND: DocumentKind = DocumentKind::Obstacles;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Violation;
    use serde_json::json;

    #[test]
    fn test_clear_rule_omits_absent_fields() {
        let rule = ClearRule::try_from(ClearRuleSpec {
            trigger: "accumulation".to_string(),
            action: "melt".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({"trigger": "accumulation", "action": "melt"})
        );
    }

    #[test]
    fn test_clear_rule_radius_clamped() {
        let rule = ClearRule::try_from(ClearRuleSpec {
            trigger: "click".to_string(),
            action: "erase".to_string(),
            at: Some("cursor".to_string()),
            gte: Some(0.5),
            radius_px: Some(10_000.0),
        })
        .unwrap();
        assert_eq!(rule.radius_px(), Some(MAX_CLEAR_RADIUS_PX));
        assert_eq!(rule.at(), Some("cursor"));
        assert_eq!(rule.gte(), Some(0.5));
    }

    #[test]
    fn test_draw_op_defaults_and_order() {
        let op = DrawOp::try_from(DrawOpSpec {
            pos: Some(vec![0.25, 1.5]),
            radius: Some(-0.1),
            ..DrawOpSpec::new("circle")
        })
        .unwrap();
        let value = serde_json::to_value(&op).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["op", "mode", "pos", "radius"]);
        assert_eq!(value["mode"], "solid");
        assert_eq!(value["pos"], json!([0.25, 1.0]));
        assert_eq!(value["radius"], json!(0.0));
    }

    #[test]
    fn test_draw_op_rect_arity() {
        let err = DrawOp::try_from(DrawOpSpec {
            rect: Some(vec![0.0, 0.0, 1.0]),
            ..DrawOpSpec::new("rect")
        })
        .unwrap_err();
        assert_eq!(err.violation, Violation::Arity { expected: 4, actual: 3 });
        assert_eq!(err.field.as_deref(), Some("rect"));
    }

    #[test]
    fn test_obstacles_mask_validated() {
        let err = ObstaclesSchema::new(vec![], vec![], "/tmp/mask.png").unwrap_err();
        assert!(matches!(err.violation, Violation::OutsideRuntimeNamespace(_)));

        let schema = ObstaclesSchema::new(vec![], vec![], DEFAULT_MASK_PATH).unwrap();
        assert_eq!(
            schema.to_value().unwrap(),
            json!({
                "version": "1.0",
                "clear_rules": [],
                "draw_ops": [],
                "mask": "res://runtime/obstacles_mask.png"
            })
        );
    }

    #[test]
    fn test_draw_op_spec_mode_default_from_json() {
        let spec: DrawOpSpec = serde_json::from_value(json!({"op": "rect", "rect": [0, 0, 1, 1]})).unwrap();
        assert_eq!(spec.mode, "solid");
    }
}
