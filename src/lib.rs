//! # Dashlayout
//!
//! A dashboard layout engine.
//!
//! A dashboard is a pile of heterogeneous widgets (charts, stat cards, data
//! tables, text boxes), most of which arrive without a position and many
//! without a size. Dashlayout turns that pile into non-overlapping pixel
//! rectangles on a fixed canvas. It never refuses: when the canvas is full
//! it degrades to overlapping placement instead of failing.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]     — DashboardConfig: four ordered element lists
//!       ↓
//!   [options]   — Grid size, spacing, default element sizes
//!       ↓
//!   [layout]    — Grid packer with fallback ladder, special row layout
//!       ↓
//!   [template]  — Named recipes: executive, analytical, balanced
//!       ↓
//! Output: the same DashboardConfig with every position resolved
//! ```
//!
//! The engine is pure. It performs no I/O, keeps no state between calls and
//! never mutates its input. The only source of nondeterminism is the
//! last-resort random placement, which draws from the RNG passed to the
//! [`LayoutEngine`] methods. The free functions below use `thread_rng`.

pub mod error;
pub mod layout;
pub mod model;
pub mod options;
pub mod template;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::LayoutError;
pub use layout::{find_overlaps, LayoutEngine};
pub use model::{Canvas, DashboardConfig, ElementKind, ElementRef, Position, Rect};
pub use options::LayoutOptions;
pub use template::Template;

/// Pack every element onto the default 12×12 grid.
///
/// Stat cards are placed first, then charts, data tables and text boxes.
/// Elements without a size hint get their category's default size.
pub fn smart_distribute_elements(
    config: &DashboardConfig,
    canvas: Canvas,
) -> Result<DashboardConfig, LayoutError> {
    LayoutEngine::new().smart_distribute(config, canvas, &mut rand::thread_rng())
}

/// Grid-pack, then use the fixed stat card/chart rows once the dashboard
/// has at least four elements.
pub fn create_dashboard_layout(
    config: &DashboardConfig,
    canvas: Canvas,
) -> Result<DashboardConfig, LayoutError> {
    LayoutEngine::new().create_dashboard_layout(config, canvas, &mut rand::thread_rng())
}

/// Lay out with a named template. Unknown names use the grid packer.
pub fn apply_template_layout(
    config: &DashboardConfig,
    template_name: &str,
    canvas: Canvas,
) -> Result<DashboardConfig, LayoutError> {
    LayoutEngine::new().apply_template_layout(config, template_name, canvas, &mut rand::thread_rng())
}

/// Lay out a dashboard described as JSON and return the result as JSON.
///
/// With a template name the template is applied; otherwise the dashboard
/// goes through [`create_dashboard_layout`].
pub fn layout_json(
    json: &str,
    template_name: Option<&str>,
    canvas: Canvas,
) -> Result<String, LayoutError> {
    let config: DashboardConfig = serde_json::from_str(json)?;
    let laid_out = match template_name {
        Some(name) => apply_template_layout(&config, name, canvas)?,
        None => create_dashboard_layout(&config, canvas)?,
    };
    Ok(serde_json::to_string(&laid_out)?)
}
