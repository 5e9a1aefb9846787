use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tool::DetailLevel;

/// How a bundle's overall success is computed from its steps (§3, §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatherStrategy {
    All,
    Majority,
    Any,
}

/// A single step inside a `TaskBundle` (§3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleStep {
    pub tool_name: String,
    #[serde(default)]
    pub static_args: BTreeMap<String, Value>,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub detail_level: Option<DetailLevel>,
}

impl BundleStep {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            static_args: BTreeMap::new(),
            parallel: false,
            optional: false,
            depends_on: Vec::new(),
            detail_level: None,
        }
    }

    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn depends_on(mut self, steps: impl IntoIterator<Item = &'static str>) -> Self {
        self.depends_on = steps.into_iter().map(str::to_string).collect();
        self
    }

    pub fn at_detail(mut self, level: DetailLevel) -> Self {
        self.detail_level = Some(level);
        self
    }
}

/// A predefined multi-step workflow (§3, §4.9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBundle {
    pub name: String,
    pub description: String,
    pub steps: Vec<BundleStep>,
    pub gather_strategy: GatherStrategy,
}
