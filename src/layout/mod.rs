//! # Dashboard Layout Engine
//!
//! Takes a dashboard whose elements carry at most a size hint and returns a
//! copy where every element has a resolved `{x, y, width, height}`.
//!
//! The general algorithm is a grid packer:
//!
//! 1. Resolve each element's pixel size (hint, else the category default)
//! 2. Partition the canvas into a `grid_rows × grid_cols` occupancy grid
//! 3. Walk elements in priority order: stat cards, charts, data tables,
//!    text boxes, each list in its own order
//! 4. Round each size up to a cell span and claim the first free block,
//!    row-major, offset by half the configured spacing
//! 5. If the grid is exhausted, degrade (stride, then random) rather than
//!    fail. See [`grid`].
//!
//! Below saturation the result depends only on the input, so identical
//! dashboards always come back with identical positions.
//!
//! On top of that sit the special row layout ([`special`]) used by
//! [`LayoutEngine::create_dashboard_layout`] and the named templates in
//! [`crate::template`].

pub mod grid;
pub mod special;

use rand::Rng;

use crate::error::LayoutError;
use crate::model::*;
use crate::options::{is_positive, LayoutOptions, Size};

use grid::{GridPacker, PlacementStrategy};

/// The layout engine. Holds only options; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine with custom options, rejecting unusable ones.
    pub fn with_options(options: LayoutOptions) -> Result<Self, LayoutError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Pack every element onto the grid. Positions on the input are read as
    /// size hints only; `x`/`y` are always recomputed.
    pub fn smart_distribute<R: Rng + ?Sized>(
        &self,
        config: &DashboardConfig,
        canvas: Canvas,
        rng: &mut R,
    ) -> Result<DashboardConfig, LayoutError> {
        validate_canvas(canvas)?;
        let elements = self.resolve_sizes(config, config.elements_in_priority())?;

        let mut result = config.clone();
        let mut packer = GridPacker::new(canvas, &self.options);
        self.pack(&mut result, &mut packer, &elements, rng);
        Ok(result)
    }

    /// Grid-pack, then for dense dashboards replace stat card and chart
    /// positions with the fixed row arrangement.
    pub fn create_dashboard_layout<R: Rng + ?Sized>(
        &self,
        config: &DashboardConfig,
        canvas: Canvas,
        rng: &mut R,
    ) -> Result<DashboardConfig, LayoutError> {
        let distributed = self.smart_distribute(config, canvas, rng)?;
        if distributed.total_elements() < self.options.special_layout_threshold {
            return Ok(distributed);
        }
        Ok(self.apply_special_layouts(&distributed, canvas))
    }

    /// The stat card/chart row arrangement on its own. Other kinds keep
    /// whatever position they already have.
    pub fn apply_special_layouts(&self, config: &DashboardConfig, canvas: Canvas) -> DashboardConfig {
        special::apply(config, canvas)
    }

    /// Resolve the pixel size of each listed element, validating hints.
    pub(crate) fn resolve_sizes(
        &self,
        config: &DashboardConfig,
        elements: Vec<ElementRef>,
    ) -> Result<Vec<(ElementRef, Size)>, LayoutError> {
        elements
            .into_iter()
            .map(|element| {
                let hint = config.position(element).copied().unwrap_or_default();
                let default = self.options.default_sizes.for_kind(element.kind);
                let size = Size::new(
                    hint.width.unwrap_or(default.width),
                    hint.height.unwrap_or(default.height),
                );
                if !is_positive(size.width) || !is_positive(size.height) {
                    return Err(LayoutError::InvalidElementSize {
                        kind: element.kind,
                        index: element.index,
                        width: hint.width,
                        height: hint.height,
                    });
                }
                Ok((element, size))
            })
            .collect()
    }

    /// Place `elements` in order on `packer`, writing positions into `result`.
    /// Returns the ladder rung used for each element, in the same order.
    pub(crate) fn pack<R: Rng + ?Sized>(
        &self,
        result: &mut DashboardConfig,
        packer: &mut GridPacker,
        elements: &[(ElementRef, Size)],
        rng: &mut R,
    ) -> Vec<PlacementStrategy> {
        let mut strategies = Vec::with_capacity(elements.len());
        for &(element, size) in elements {
            let placement = packer.place(size, rng);
            log::debug!(
                "placed {} at ({:.1}, {:.1}) {}x{} via {:?}",
                element,
                placement.rect.x,
                placement.rect.y,
                placement.rect.width,
                placement.rect.height,
                placement.strategy
            );
            if let Some(position) = result.position_mut(element) {
                *position = placement.rect.into();
            }
            strategies.push(placement.strategy);
        }
        strategies
    }
}

pub(crate) fn validate_canvas(canvas: Canvas) -> Result<(), LayoutError> {
    if !is_positive(canvas.width) || !is_positive(canvas.height) {
        return Err(LayoutError::InvalidCanvas {
            width: canvas.width,
            height: canvas.height,
        });
    }
    Ok(())
}

/// Every pair of resolved elements whose rectangles overlap, in priority
/// order. Elements without a resolved size are ignored.
pub fn find_overlaps(config: &DashboardConfig) -> Vec<(ElementRef, ElementRef)> {
    let rects = config.placed_rects();
    let mut overlaps = Vec::new();
    for (i, (a, rect_a)) in rects.iter().enumerate() {
        for (b, rect_b) in rects.iter().skip(i + 1) {
            if rect_a.overlaps(rect_b) {
                overlaps.push((*a, *b));
            }
        }
    }
    overlaps
}
