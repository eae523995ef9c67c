//! Schema records for the runtime JSON documents
//!
//! Every record is built through a fallible constructor that clamps and checks
//! its fields, so a live record always satisfies its invariants. Records are
//! never mutated afterwards; their `Serialize` implementation is the wire
//! format consumed by the simulation runtime.
//!
//! # Documents
//!
//! | Kind         | Record               | File               |
//! |--------------|----------------------|--------------------|
//! | `preset`     | [`PresetSchema`]     | `preset.json`      |
//! | `forcefield` | [`ForcefieldSchema`] | `forcefield.json`  |
//! | `obstacles`  | [`ObstaclesSchema`]  | `obstacles.json`   |
//! | `sequence`   | [`SequenceSchema`]   | `sequence.json`    |
//! | `timefx`     | [`TimekeeperSchema`] | `timefx.json`      |
//! | `uihints`    | [`UiHintsSchema`]    | `uihints.json`     |
//! | `exporter`   | [`ExporterSchema`]   | `capture.json`     |
//! | `assets`     | [`AssetPackSchema`]  | `assets.json`      |

pub mod assets;
pub mod exporter;
pub mod forcefield;
pub mod obstacles;
pub mod preset;
pub mod sequence;
pub mod timekeeper;
pub mod uihints;

pub use assets::*;
pub use exporter::*;
pub use forcefield::*;
pub use obstacles::*;
pub use preset::*;
pub use sequence::*;
pub use timekeeper::*;
pub use uihints::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight runtime document types
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Preset,
    Forcefield,
    Obstacles,
    Sequence,
    Timefx,
    Uihints,
    Exporter,
    Assets,
}

impl DocumentKind {
    /// All kinds, in generation order
    pub const ALL: [DocumentKind; 8] = [
        DocumentKind::Preset,
        DocumentKind::Forcefield,
        DocumentKind::Obstacles,
        DocumentKind::Sequence,
        DocumentKind::Timefx,
        DocumentKind::Uihints,
        DocumentKind::Exporter,
        DocumentKind::Assets,
    ];

    /// Name of the configuration section feeding this document
    pub fn section(&self) -> &'static str {
        match self {
            DocumentKind::Preset => "preset",
            DocumentKind::Forcefield => "forcefield",
            DocumentKind::Obstacles => "obstacles",
            DocumentKind::Sequence => "sequence",
            DocumentKind::Timefx => "timefx",
            DocumentKind::Uihints => "uihints",
            DocumentKind::Exporter => "exporter",
            DocumentKind::Assets => "assets",
        }
    }

    /// Output file name under the runtime directory
    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::Exporter => "capture.json",
            DocumentKind::Preset => "preset.json",
            DocumentKind::Forcefield => "forcefield.json",
            DocumentKind::Obstacles => "obstacles.json",
            DocumentKind::Sequence => "sequence.json",
            DocumentKind::Timefx => "timefx.json",
            DocumentKind::Uihints => "uihints.json",
            DocumentKind::Assets => "assets.json",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.section())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.section() == lowered)
            .ok_or_else(|| format!("unknown document kind '{}'", s))
    }
}

/// A top-level runtime document
pub trait RuntimeDocument: Serialize {
    const KIND: DocumentKind;

    /// Canonical nested mapping of this document (the wire format)
    fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
