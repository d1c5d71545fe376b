//! Script commands and output frames.
//!
//! Each script line is one JSON object tagged by `op`, e.g.
//!
//! ```text
//! {"op": "set_simulation_running", "running": true}
//! {"op": "fly_to", "target": {"zoom": 18}}
//! {"op": "derive"}
//! ```

use serde::{Deserialize, Serialize};

use map_store::LayerDescriptor;
use map_types::{
    Annotation, CursorPosition, Drone, DronePatch, LayerConfig, LayerPatch, SelectedTool,
    SimulationParamsPatch, ViewState, ViewStatePatch,
};

/// One event applied to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum Command {
    SetViewState {
        view: ViewState,
    },
    FlyTo {
        target: ViewStatePatch,
    },
    FlyToPreset {
        name: String,
    },
    /// The renderer finished moving. Without an explicit view the camera
    /// settles on the last requested transition.
    MoveEnd {
        #[serde(default)]
        view: Option<ViewState>,
    },
    SetSimulationParams {
        params: SimulationParamsPatch,
    },
    SetSimulationRunning {
        running: bool,
    },
    ToggleSimulation,
    SetSelectedTool {
        tool: SelectedTool,
    },
    AddLayer {
        layer: LayerConfig,
    },
    RemoveLayer {
        id: String,
    },
    ToggleLayerVisibility {
        id: String,
    },
    UpdateLayerConfig {
        id: String,
        patch: LayerPatch,
    },
    SetDrones {
        drones: Vec<Drone>,
    },
    UpdateDrone {
        id: String,
        patch: DronePatch,
    },
    AddAnnotation {
        annotation: Annotation,
    },
    RemoveAnnotation {
        id: String,
    },
    SetCursors {
        cursors: Vec<CursorPosition>,
    },
    PruneCursors {
        now_ms: u64,
        max_age_ms: u64,
    },
    /// Emit a frame with the current derived layers.
    Derive {
        #[serde(default)]
        now_ms: Option<u64>,
    },
}

impl Command {
    /// Parses one script line.
    pub fn from_json(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// Derived layers at one point in the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Zero-based frame counter
    pub sequence: u64,
    pub view_state: ViewState,
    pub layers: Vec<LayerDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_types::WeatherCondition;

    #[test]
    fn test_parse_fly_to() {
        let command = Command::from_json(r#"{"op": "fly_to", "target": {"zoom": 18}}"#).unwrap();
        assert_eq!(
            command,
            Command::FlyTo {
                target: ViewStatePatch::default().with_zoom(18.0)
            }
        );
    }

    #[test]
    fn test_parse_unit_commands() {
        assert_eq!(
            Command::from_json(r#"{"op": "toggle_simulation"}"#).unwrap(),
            Command::ToggleSimulation
        );
        assert_eq!(
            Command::from_json(r#"{"op": "derive"}"#).unwrap(),
            Command::Derive { now_ms: None }
        );
        assert_eq!(
            Command::from_json(r#"{"op": "move_end"}"#).unwrap(),
            Command::MoveEnd { view: None }
        );
    }

    #[test]
    fn test_parse_params_patch() {
        let command = Command::from_json(
            r#"{"op": "set_simulation_params", "params": {"weather_condition": "typhoon"}}"#,
        )
        .unwrap();
        match command {
            Command::SetSimulationParams { params } => {
                assert_eq!(params.weather_condition, Some(WeatherCondition::Typhoon));
                assert_eq!(params.wind_speed, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(Command::from_json(r#"{"op": "teleport"}"#).is_err());
    }
}
