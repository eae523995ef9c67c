//! Agents turning loosely-validated requests into runtime documents
//!
//! Each agent is stateless apart from its constraints and produces exactly one
//! document kind. Numeric safety is left to the schema constructors; agents add
//! heuristics (motion profiles, slugs) and the few constraint clamps that
//! depend on caller configuration. Any validation failure is returned as-is.

pub mod assetpack;
pub mod exporter;
pub mod forcefield;
pub mod obstacle;
pub mod preset;
pub mod sequence;
pub mod timekeeper;
pub mod uihints;

pub use assetpack::{AssetPackAgent, AssetPackRequest};
pub use exporter::{ExporterAgent, ExporterRequest};
pub use forcefield::{ForceFieldAgent, ForcefieldConstraints, ForcefieldRequest};
pub use obstacle::{ObstacleAgent, ObstacleRequest};
pub use preset::{BurstSpec, PresetAgent, PresetConstraints, PresetRequest};
pub use sequence::{SequenceAgent, SequenceRequest};
pub use timekeeper::{TimekeeperAgent, TimekeeperRequest};
pub use uihints::{UiHintsAgent, UiHintsRequest};

use crate::schema::RuntimeDocument;
use crate::validate::ValidationError;

/// A transformer from one request type to one runtime document
pub trait Agent {
    type Request;
    type Output: RuntimeDocument;

    fn generate(&self, request: Self::Request) -> Result<Self::Output, ValidationError>;
}
