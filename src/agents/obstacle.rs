//! Obstacle agent

use serde::{Deserialize, Serialize};

use super::Agent;
use crate::schema::{ClearRule, ClearRuleSpec, DrawOp, DrawOpSpec, ObstaclesSchema, DEFAULT_MASK_PATH};
use crate::validate::{FieldContext, ValidationError};

fn default_mask_path() -> String {
    DEFAULT_MASK_PATH.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleRequest {
    #[serde(default)]
    pub clear_rules: Vec<ClearRuleSpec>,
    #[serde(default)]
    pub draw_ops: Vec<DrawOpSpec>,
    #[serde(default = "default_mask_path")]
    pub mask_path: String,
}

impl Default for ObstacleRequest {
    fn default() -> Self {
        Self { clear_rules: Vec::new(), draw_ops: Vec::new(), mask_path: default_mask_path() }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ObstacleAgent;

impl Agent for ObstacleAgent {
    type Request = ObstacleRequest;
    type Output = ObstaclesSchema;

    fn generate(&self, request: ObstacleRequest) -> Result<ObstaclesSchema, ValidationError> {
        let clear_rules = request
            .clear_rules
            .into_iter()
            .enumerate()
            .map(|(i, rule)| ClearRule::try_from(rule).field(i.to_string()).field("clear_rules"))
            .collect::<Result<Vec<_>, _>>()?;
        let draw_ops = request
            .draw_ops
            .into_iter()
            .enumerate()
            .map(|(i, op)| DrawOp::try_from(op).field(i.to_string()).field("draw_ops"))
            .collect::<Result<Vec<_>, _>>()?;
        ObstaclesSchema::new(clear_rules, draw_ops, request.mask_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Violation;

    #[test]
    fn test_default_request() {
        let schema = ObstacleAgent.generate(ObstacleRequest::default()).unwrap();
        assert!(schema.clear_rules().is_empty());
        assert!(schema.draw_ops().is_empty());
        assert_eq!(schema.mask_path(), DEFAULT_MASK_PATH);
    }

    #[test]
    fn test_rules_and_ops_from_toml() {
        let request: ObstacleRequest = toml::from_str(
            r#"
            [[clear_rules]]
            trigger = "accumulation"
            action = "melt"
            gte = 0.9

            [[draw_ops]]
            op = "circle"
            pos = [0.5, 0.5]
            radius = 0.2
            "#,
        )
        .unwrap();
        let schema = ObstacleAgent.generate(request).unwrap();
        assert_eq!(schema.clear_rules()[0].gte(), Some(0.9));
        assert_eq!(schema.draw_ops()[0].mode(), "solid");
        assert_eq!(schema.draw_ops()[0].pos(), Some([0.5, 0.5]));
    }

    #[test]
    fn test_bad_op_reports_index() {
        let request = ObstacleRequest {
            draw_ops: vec![
                DrawOpSpec::new("circle"),
                DrawOpSpec { pos: Some(vec![0.1]), ..DrawOpSpec::new("circle") },
            ],
            ..Default::default()
        };
        let err = ObstacleAgent.generate(request).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("draw_ops.1.pos"));
        assert_eq!(err.violation, Violation::Arity { expected: 2, actual: 1 });
    }

    #[test]
    fn test_mask_outside_namespace() {
        let request = ObstacleRequest { mask_path: "masks/a.png".to_string(), ..Default::default() };
        let err = ObstacleAgent.generate(request).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("mask"));
    }
}
