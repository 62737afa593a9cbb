//! # Dashboard Model
//!
//! The input and output representation for the layout engine. A dashboard
//! is four ordered lists of widgets: charts, stat cards, data tables and
//! text boxes. Each widget carries whatever the renderer needs to draw it
//! plus a `position`, which starts out as a hint (possibly empty) and comes
//! back from the engine fully resolved.
//!
//! The descriptive fields are opaque to the engine. Only the position hint
//! and the list order matter for placement: order within a list is both the
//! tie-break and the output order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    #[serde(default)]
    pub charts: Vec<Chart>,
    #[serde(default)]
    pub stat_cards: Vec<StatCard>,
    #[serde(default)]
    pub data_tables: Vec<DataTable>,
    #[serde(default)]
    pub text_boxes: Vec<TextBox>,
}

impl DashboardConfig {
    /// Number of elements across all four lists.
    pub fn total_elements(&self) -> usize {
        self.charts.len() + self.stat_cards.len() + self.data_tables.len() + self.text_boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_elements() == 0
    }

    /// Number of elements of one kind.
    pub fn count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::StatCard => self.stat_cards.len(),
            ElementKind::Chart => self.charts.len(),
            ElementKind::DataTable => self.data_tables.len(),
            ElementKind::TextBox => self.text_boxes.len(),
        }
    }

    /// The position of one element, if the reference is in range.
    pub fn position(&self, element: ElementRef) -> Option<&Position> {
        match element.kind {
            ElementKind::StatCard => self.stat_cards.get(element.index).map(Element::position),
            ElementKind::Chart => self.charts.get(element.index).map(Element::position),
            ElementKind::DataTable => self.data_tables.get(element.index).map(Element::position),
            ElementKind::TextBox => self.text_boxes.get(element.index).map(Element::position),
        }
    }

    /// Mutable access to one element's position.
    pub fn position_mut(&mut self, element: ElementRef) -> Option<&mut Position> {
        match element.kind {
            ElementKind::StatCard => self
                .stat_cards
                .get_mut(element.index)
                .map(Element::position_mut),
            ElementKind::Chart => self.charts.get_mut(element.index).map(Element::position_mut),
            ElementKind::DataTable => self
                .data_tables
                .get_mut(element.index)
                .map(Element::position_mut),
            ElementKind::TextBox => self
                .text_boxes
                .get_mut(element.index)
                .map(Element::position_mut),
        }
    }

    /// Every element reference in placement priority order: stat cards,
    /// charts, data tables, text boxes, each in list order.
    pub fn elements_in_priority(&self) -> Vec<ElementRef> {
        ElementKind::PLACEMENT_ORDER
            .iter()
            .flat_map(|&kind| (0..self.count(kind)).map(move |index| ElementRef { kind, index }))
            .collect()
    }

    /// Resolved rectangles for every element whose position carries a size.
    pub fn placed_rects(&self) -> Vec<(ElementRef, Rect)> {
        self.elements_in_priority()
            .into_iter()
            .filter_map(|element| {
                let rect = self.position(element)?.resolved()?;
                Some((element, rect))
            })
            .collect()
    }
}

/// A position on the canvas. `x`/`y` are the top-left corner in pixels.
///
/// As input, `width`/`height` are optional size hints. As output from the
/// engine, both are always populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Position {
    /// A size-only hint, as a caller would pass it.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: Some(width),
            height: Some(height),
        }
    }

    /// The rectangle this position describes, if both dimensions are set.
    pub fn resolved(&self) -> Option<Rect> {
        Some(Rect {
            x: self.x,
            y: self.y,
            width: self.width?,
            height: self.height?,
        })
    }
}

impl From<Rect> for Position {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: Some(rect.width),
            height: Some(rect.height),
        }
    }
}

/// A fully resolved rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Strict interior intersection. Rectangles that only share an edge
    /// do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// The pixel size of the canvas elements are placed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The four widget categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementKind {
    StatCard,
    Chart,
    DataTable,
    TextBox,
}

impl ElementKind {
    /// Placement priority: earlier kinds claim grid cells first.
    pub const PLACEMENT_ORDER: [ElementKind; 4] = [
        ElementKind::StatCard,
        ElementKind::Chart,
        ElementKind::DataTable,
        ElementKind::TextBox,
    ];
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::StatCard => "stat card",
            ElementKind::Chart => "chart",
            ElementKind::DataTable => "data table",
            ElementKind::TextBox => "text box",
        };
        f.write_str(name)
    }
}

/// Identifies one element by category and list index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub index: usize,
}

impl ElementRef {
    pub fn new(kind: ElementKind, index: usize) -> Self {
        Self { kind, index }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind, self.index)
    }
}

/// Shared access to the placement-relevant part of a widget.
pub trait Element {
    fn position(&self) -> &Position;

    fn position_mut(&mut self) -> &mut Position;
}

/// A chart over one or more data columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Chart type understood by the renderer (e.g. "bar", "line", "pie").
    #[serde(rename = "type")]
    pub chart_type: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Position,
}

/// A single summary statistic over one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub column: String,
    /// Statistic computed by the backend (e.g. "mean", "sum", "max").
    pub stat_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub position: Position,
}

/// A tabular view over a subset of columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub position: Position,
}

/// Free-form text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub position: Position,
}

macro_rules! impl_element {
    ($ty:ty) => {
        impl Element for $ty {
            fn position(&self) -> &Position {
                &self.position
            }

            fn position_mut(&mut self) -> &mut Position {
                &mut self.position
            }
        }
    };
}

impl_element!(Chart);
impl_element!(StatCard);
impl_element!(DataTable);
impl_element!(TextBox);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_lists() {
        let json = r#"{
            "charts": [{ "type": "bar", "columns": ["sales"], "title": "Sales" }],
            "statCards": [{ "column": "sales", "statType": "mean", "title": "Avg" }],
            "textBoxes": [{ "content": "hello", "position": { "x": 5, "y": 6 } }]
        }"#;
        let config: DashboardConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.charts.len(), 1);
        assert_eq!(config.charts[0].chart_type, "bar");
        assert_eq!(config.stat_cards[0].stat_type, "mean");
        assert!(config.data_tables.is_empty());
        assert_eq!(config.text_boxes[0].position.x, 5.0);
        assert_eq!(config.text_boxes[0].position.width, None);
        assert_eq!(config.total_elements(), 3);
    }

    #[test]
    fn test_position_omits_missing_size() {
        let json = serde_json::to_string(&Position::default()).unwrap();
        assert_eq!(json, r#"{"x":0.0,"y":0.0}"#);
    }

    #[test]
    fn test_priority_order() {
        let config = DashboardConfig {
            charts: vec![Chart::default()],
            stat_cards: vec![StatCard::default(), StatCard::default()],
            data_tables: vec![],
            text_boxes: vec![TextBox::default()],
        };
        let order = config.elements_in_priority();
        assert_eq!(
            order,
            vec![
                ElementRef::new(ElementKind::StatCard, 0),
                ElementRef::new(ElementKind::StatCard, 1),
                ElementRef::new(ElementKind::Chart, 0),
                ElementRef::new(ElementKind::TextBox, 0),
            ]
        );
    }

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let touching = Rect::new(100.0, 0.0, 50.0, 50.0);
        let inside = Rect::new(50.0, 50.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_placed_rects_skips_unsized() {
        let mut config = DashboardConfig {
            charts: vec![Chart::default(), Chart::default()],
            ..Default::default()
        };
        config.charts[1].position = Position::sized(10.0, 20.0);
        let rects = config.placed_rects();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].0, ElementRef::new(ElementKind::Chart, 1));
    }
}
