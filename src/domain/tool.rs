//! Editor tool palette

use serde::{Deserialize, Serialize};

/// Tool selected in the editor palette
///
/// "No tool" is represented as `Option<Tool>::None` by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Box,
    Arrow,
    Step,
    Crop,
}

impl Tool {
    /// Name used by scripts and log output
    pub fn name(self) -> &'static str {
        match self {
            Tool::Box => "box",
            Tool::Arrow => "arrow",
            Tool::Step => "step",
            Tool::Crop => "crop",
        }
    }
}
