//! `uihints` document: tutorial tips and preset recommendations.

use serde::Serialize;

use super::{DocumentKind, RuntimeDocument};
use crate::validate::SCHEMA_VERSION;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiHintsSchema {
    version: &'static str,
    tips: Vec<String>,
    recommended_presets: Vec<String>,
}

impl UiHintsSchema {
    pub fn new(tips: Vec<String>, recommended_presets: Vec<String>) -> Self {
        Self { version: SCHEMA_VERSION, tips, recommended_presets }
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn recommended_presets(&self) -> &[String] {
        &self.recommended_presets
    }
}

impl RuntimeDocument for UiHintsSchema {
    const KIND: DocumentKind = DocumentKind::Uihints;
}
