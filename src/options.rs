//! Layout tuning knobs.
//!
//! Everything the engine treats as a constant lives here so callers can
//! load an alternative set from JSON. Every field has a default, so an
//! empty object `{}` yields the stock engine.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::model::ElementKind;

/// Options for the grid packer, special layouts and templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Rows of the occupancy grid.
    pub grid_rows: usize,
    /// Columns of the occupancy grid.
    pub grid_cols: usize,
    /// Spacing between elements, in cells. Each placement is offset by half
    /// of it in both directions.
    pub min_spacing: f64,
    /// Size used for an element whose hint carries no width/height.
    pub default_sizes: DefaultSizes,
    /// Element count at which `create_dashboard_layout` switches on the
    /// special stat-card/chart arrangement.
    pub special_layout_threshold: usize,
    /// Gutter used by the executive and balanced templates.
    pub template_padding: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            grid_rows: 12,
            grid_cols: 12,
            min_spacing: 1.0,
            default_sizes: DefaultSizes::default(),
            special_layout_threshold: 4,
            template_padding: 20.0,
        }
    }
}

impl LayoutOptions {
    /// Reject options the engine cannot lay out with.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(LayoutError::InvalidOptions(format!(
                "grid must have at least one cell, got {}x{}",
                self.grid_rows, self.grid_cols
            )));
        }
        if !self.min_spacing.is_finite() || self.min_spacing < 0.0 {
            return Err(LayoutError::InvalidOptions(format!(
                "minSpacing must be a non-negative number, got {}",
                self.min_spacing
            )));
        }
        if !self.template_padding.is_finite() || self.template_padding < 0.0 {
            return Err(LayoutError::InvalidOptions(format!(
                "templatePadding must be a non-negative number, got {}",
                self.template_padding
            )));
        }
        for kind in ElementKind::PLACEMENT_ORDER {
            let size = self.default_sizes.for_kind(kind);
            if !is_positive(size.width) || !is_positive(size.height) {
                return Err(LayoutError::InvalidOptions(format!(
                    "default size for {} must be positive, got {}x{}",
                    kind, size.width, size.height
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// A width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Per-category default dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultSizes {
    pub chart: Size,
    pub text_box: Size,
    pub data_table: Size,
    pub stat_card: Size,
}

impl Default for DefaultSizes {
    fn default() -> Self {
        Self {
            chart: Size::new(400.0, 300.0),
            text_box: Size::new(300.0, 150.0),
            data_table: Size::new(500.0, 300.0),
            stat_card: Size::new(250.0, 150.0),
        }
    }
}

impl DefaultSizes {
    pub fn for_kind(&self, kind: ElementKind) -> Size {
        match kind {
            ElementKind::Chart => self.chart,
            ElementKind::TextBox => self.text_box,
            ElementKind::DataTable => self.data_table,
            ElementKind::StatCard => self.stat_card,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let options: LayoutOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, LayoutOptions::default());
        assert_eq!(options.grid_rows, 12);
        assert_eq!(options.default_sizes.stat_card, Size::new(250.0, 150.0));
    }

    #[test]
    fn test_partial_default_sizes() {
        let options: LayoutOptions =
            serde_json::from_str(r#"{ "defaultSizes": { "chart": { "width": 600, "height": 200 } } }"#)
                .unwrap();
        assert_eq!(options.default_sizes.chart, Size::new(600.0, 200.0));
        assert_eq!(options.default_sizes.text_box, Size::new(300.0, 150.0));
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        let options = LayoutOptions {
            grid_cols: 0,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(LayoutError::InvalidOptions(_))));
    }

    #[test]
    fn test_validate_rejects_bad_default_size() {
        let mut options = LayoutOptions::default();
        options.default_sizes.data_table = Size::new(0.0, 300.0);
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("data table"));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(LayoutOptions::default().validate().is_ok());
    }
}
