//! Drawing tool selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The tool currently armed in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectedTool {
    #[default]
    Select,
    Point,
    Line,
    Polygon,
    Measure,
}

impl SelectedTool {
    /// All tools in toolbar order.
    pub const ALL: [SelectedTool; 5] = [
        SelectedTool::Select,
        SelectedTool::Point,
        SelectedTool::Line,
        SelectedTool::Polygon,
        SelectedTool::Measure,
    ];

    /// Returns true for tools that create annotations on click.
    pub fn is_drawing(self) -> bool {
        matches!(
            self,
            SelectedTool::Point | SelectedTool::Line | SelectedTool::Polygon
        )
    }
}

impl fmt::Display for SelectedTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelectedTool::Select => "select",
            SelectedTool::Point => "point",
            SelectedTool::Line => "line",
            SelectedTool::Polygon => "polygon",
            SelectedTool::Measure => "measure",
        };
        f.write_str(name)
    }
}
