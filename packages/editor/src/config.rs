use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Interaction tuning, read from the `editor` section of `folio.config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Squared pointer travel that promotes a press to a drag
    #[serde(default = "default_drag_threshold_sq")]
    pub drag_threshold_sq: f64,

    /// Offset of the floating preview from the pointer
    #[serde(default = "default_ghost_offset")]
    pub ghost_offset: Point,

    /// Preview opacity while exporting to another application
    #[serde(default = "default_external_ghost_alpha")]
    pub external_ghost_alpha: f64,

    /// Distance between the insertion line and the target widget's edge
    #[serde(default = "default_indicator_gap")]
    pub indicator_gap: f64,

    /// Maximum undo depth (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// File name prefix for exported temporary documents
    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,
}

fn default_drag_threshold_sq() -> f64 {
    36.0
}

fn default_ghost_offset() -> Point {
    Point::new(10.0, 10.0)
}

fn default_external_ghost_alpha() -> f64 {
    0.4
}

fn default_indicator_gap() -> f64 {
    6.0
}

fn default_history_limit() -> usize {
    100
}

fn default_temp_prefix() -> String {
    "folio_drag_".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_threshold_sq: default_drag_threshold_sq(),
            ghost_offset: default_ghost_offset(),
            external_ghost_alpha: default_external_ghost_alpha(),
            indicator_gap: default_indicator_gap(),
            history_limit: default_history_limit(),
            temp_prefix: default_temp_prefix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{ "dragThresholdSq": 64.0, "historyLimit": 0 }"#;
        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.drag_threshold_sq, 64.0);
        assert_eq!(config.history_limit, 0);
        assert_eq!(config.indicator_gap, 6.0);
        assert_eq!(config.temp_prefix, "folio_drag_");
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.drag_threshold_sq, 36.0);
        assert_eq!(config.ghost_offset, Point::new(10.0, 10.0));
        assert_eq!(config.external_ghost_alpha, 0.4);
        assert_eq!(config.history_limit, 100);
    }
}
