//! Sequence agent

use serde::{Deserialize, Serialize};

use super::Agent;
use crate::schema::{SequenceSchema, SequenceTrack, TrackSpec};
use crate::validate::{FieldContext, ValidationError};

fn default_loop() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRequest {
    #[serde(default)]
    pub tracks: Vec<TrackSpec>,
    #[serde(rename = "loop", default = "default_loop")]
    pub looping: bool,
}

impl Default for SequenceRequest {
    fn default() -> Self {
        Self { tracks: Vec::new(), looping: default_loop() }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceAgent;

impl Agent for SequenceAgent {
    type Request = SequenceRequest;
    type Output = SequenceSchema;

    fn generate(&self, request: SequenceRequest) -> Result<SequenceSchema, ValidationError> {
        let tracks = request
            .tracks
            .into_iter()
            .enumerate()
            .map(|(i, track)| SequenceTrack::try_from(track).field(i.to_string()).field("tracks"))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SequenceSchema::new(tracks, request.looping))
    }
}
