//! Named layout templates.
//!
//! A template is a fixed recipe for a recognizable dashboard shape rather
//! than a search. Three are known:
//!
//! - `executive`: KPI row, hero chart, secondary chart row, one full-width
//!   table, text boxes two per row. Elements the recipe has no slot for
//!   (stat cards past the 4th, charts past the 4th, tables past the 1st)
//!   are grid-packed into whatever cells the recipe left free. With a stat
//!   row, a hero, secondary charts and a table the recipe runs to y=1050,
//!   so on an 800px canvas no cell is free and leftovers take the stride
//!   fallback, overlapping the recipe. Taller canvases leave free rows.
//! - `analytical`: the plain grid packer.
//! - `balanced`: a near-square grid where the first two charts may take a
//!   double-width slot.
//!
//! Unknown names given to [`LayoutEngine::apply_template_layout`] fall back
//! to the grid packer.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::LayoutError;
use crate::layout::grid::GridPacker;
use crate::layout::{validate_canvas, LayoutEngine};
use crate::model::*;

const EXECUTIVE_STAT_SLOTS: usize = 4;
const EXECUTIVE_STAT_HEIGHT: f64 = 120.0;
const EXECUTIVE_HERO_HEIGHT: f64 = 300.0;
const EXECUTIVE_SECONDARY_CHARTS: usize = 3;
const EXECUTIVE_SECONDARY_HEIGHT: f64 = 250.0;
const EXECUTIVE_TABLE_HEIGHT: f64 = 300.0;
const EXECUTIVE_TEXT_HEIGHT: f64 = 150.0;
const BALANCED_MAX_COLUMNS: usize = 4;
const BALANCED_WIDE_CHARTS: usize = 2;

/// A named layout recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Executive,
    Analytical,
    Balanced,
}

impl FromStr for Template {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "executive" => Ok(Template::Executive),
            "analytical" => Ok(Template::Analytical),
            "balanced" => Ok(Template::Balanced),
            other => Err(LayoutError::UnknownTemplate(other.to_string())),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Template::Executive => "executive",
            Template::Analytical => "analytical",
            Template::Balanced => "balanced",
        };
        f.write_str(name)
    }
}

impl LayoutEngine {
    /// Lay out with a specific template.
    pub fn apply_template<R: Rng + ?Sized>(
        &self,
        config: &DashboardConfig,
        template: Template,
        canvas: Canvas,
        rng: &mut R,
    ) -> Result<DashboardConfig, LayoutError> {
        log::debug!("applying {} template to {} elements", template, config.total_elements());
        match template {
            Template::Executive => self.executive(config, canvas, rng),
            Template::Analytical => self.smart_distribute(config, canvas, rng),
            Template::Balanced => self.balanced(config, canvas),
        }
    }

    /// Lay out with a template chosen by name. Unknown names use the grid
    /// packer.
    pub fn apply_template_layout<R: Rng + ?Sized>(
        &self,
        config: &DashboardConfig,
        name: &str,
        canvas: Canvas,
        rng: &mut R,
    ) -> Result<DashboardConfig, LayoutError> {
        match name.parse::<Template>() {
            Ok(template) => self.apply_template(config, template, canvas, rng),
            Err(_) => {
                log::debug!("unknown template '{}', using grid distribution", name);
                self.smart_distribute(config, canvas, rng)
            }
        }
    }

    fn executive<R: Rng + ?Sized>(
        &self,
        config: &DashboardConfig,
        canvas: Canvas,
        rng: &mut R,
    ) -> Result<DashboardConfig, LayoutError> {
        validate_canvas(canvas)?;
        let pad = self.options().template_padding;
        let full_width = canvas.width - 2.0 * pad;
        let mut result = config.clone();
        let mut placed = Vec::new();
        let mut y = pad;

        // KPI row: always four slots wide, so fewer cards keep their size
        if !result.stat_cards.is_empty() {
            let slots = EXECUTIVE_STAT_SLOTS as f64;
            let width = (canvas.width - pad * (slots + 1.0)) / slots;
            for (i, card) in result.stat_cards.iter_mut().take(EXECUTIVE_STAT_SLOTS).enumerate() {
                let rect = Rect::new(pad + i as f64 * (width + pad), y, width, EXECUTIVE_STAT_HEIGHT);
                *card.position_mut() = rect.into();
                placed.push(rect);
            }
            y += EXECUTIVE_STAT_HEIGHT + pad;
        }

        if let Some(hero) = result.charts.first_mut() {
            let rect = Rect::new(pad, y, full_width, EXECUTIVE_HERO_HEIGHT);
            *hero.position_mut() = rect.into();
            placed.push(rect);
            y += EXECUTIVE_HERO_HEIGHT + pad;
        }

        let secondary = result
            .charts
            .len()
            .saturating_sub(1)
            .min(EXECUTIVE_SECONDARY_CHARTS);
        if secondary > 0 {
            let count = secondary as f64;
            let width = (canvas.width - pad * (count + 1.0)) / count;
            for (i, chart) in result.charts.iter_mut().skip(1).take(secondary).enumerate() {
                let rect = Rect::new(pad + i as f64 * (width + pad), y, width, EXECUTIVE_SECONDARY_HEIGHT);
                *chart.position_mut() = rect.into();
                placed.push(rect);
            }
            y += EXECUTIVE_SECONDARY_HEIGHT + pad;
        }

        if let Some(table) = result.data_tables.first_mut() {
            let rect = Rect::new(pad, y, full_width, EXECUTIVE_TABLE_HEIGHT);
            *table.position_mut() = rect.into();
            placed.push(rect);
            y += EXECUTIVE_TABLE_HEIGHT + pad;
        }

        let text_width = (canvas.width - 3.0 * pad) / 2.0;
        for (i, text) in result.text_boxes.iter_mut().enumerate() {
            let rect = Rect::new(
                pad + (i % 2) as f64 * (text_width + pad),
                y + (i / 2) as f64 * (EXECUTIVE_TEXT_HEIGHT + pad),
                text_width,
                EXECUTIVE_TEXT_HEIGHT,
            );
            *text.position_mut() = rect.into();
            placed.push(rect);
        }

        let remainder: Vec<ElementRef> = config
            .elements_in_priority()
            .into_iter()
            .filter(|element| !has_executive_slot(*element))
            .collect();
        if !remainder.is_empty() {
            log::debug!("executive template grid-packing {} leftover elements", remainder.len());
            let sized = self.resolve_sizes(config, remainder)?;
            let mut packer = GridPacker::new(canvas, self.options());
            for rect in &placed {
                packer.reserve(rect);
            }
            self.pack(&mut result, &mut packer, &sized, rng);
        }

        Ok(result)
    }

    fn balanced(&self, config: &DashboardConfig, canvas: Canvas) -> Result<DashboardConfig, LayoutError> {
        validate_canvas(canvas)?;
        let mut result = config.clone();
        let total = config.total_elements();
        if total == 0 {
            return Ok(result);
        }

        let pad = self.options().template_padding;
        let cols = balanced_columns(total);
        let rows = total.div_ceil(cols);
        let cell_width = (canvas.width - pad * (cols as f64 + 1.0)) / cols as f64;
        let cell_height = (canvas.height - pad * (rows as f64 + 1.0)) / rows as f64;

        let slots = plan_balanced_slots(config, cols);
        for (i, slot) in slots.iter().enumerate() {
            let Slot::Element(element) = *slot else {
                continue;
            };
            let col = i % cols;
            let row = i / cols;
            let wide = matches!(slots.get(i + 1), Some(Slot::Skip));
            let width = if wide {
                2.0 * cell_width + pad
            } else {
                cell_width
            };
            let rect = Rect::new(
                pad + col as f64 * (cell_width + pad),
                pad + row as f64 * (cell_height + pad),
                width,
                cell_height,
            );
            if let Some(position) = result.position_mut(element) {
                *position = rect.into();
            }
        }
        Ok(result)
    }
}

/// Whether the executive recipe has a fixed slot for this element.
fn has_executive_slot(element: ElementRef) -> bool {
    match element.kind {
        ElementKind::StatCard => element.index < EXECUTIVE_STAT_SLOTS,
        ElementKind::Chart => element.index <= EXECUTIVE_SECONDARY_CHARTS,
        ElementKind::DataTable => element.index == 0,
        ElementKind::TextBox => true,
    }
}

/// `min(4, ceil(sqrt(total)))`, at least one.
fn balanced_columns(total: usize) -> usize {
    let mut side = 1;
    while side * side < total {
        side += 1;
    }
    side.min(BALANCED_MAX_COLUMNS)
}

/// One slot of the balanced grid, in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Element(ElementRef),
    /// Reserved by the double-width element before it.
    Skip,
}

/// Assign grid slots in priority order. Each of the first two charts that
/// has a free slot to its right in the same row takes it too, leaving a
/// `Skip` there; every later element shifts by one.
pub(crate) fn plan_balanced_slots(config: &DashboardConfig, cols: usize) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(config.total_elements() + BALANCED_WIDE_CHARTS);
    for element in config.elements_in_priority() {
        let col = slots.len() % cols;
        slots.push(Slot::Element(element));
        let widen = element.kind == ElementKind::Chart
            && element.index < BALANCED_WIDE_CHARTS
            && col + 1 < cols;
        if widen {
            slots.push(Slot::Skip);
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn rng() -> StepRng {
        StepRng::new(0, 1)
    }

    fn dashboard(stats: usize, charts: usize, tables: usize, texts: usize) -> DashboardConfig {
        DashboardConfig {
            stat_cards: vec![StatCard::default(); stats],
            charts: vec![Chart::default(); charts],
            data_tables: vec![DataTable::default(); tables],
            text_boxes: vec![TextBox::default(); texts],
        }
    }

    fn rect_of(position: &Position) -> Rect {
        position.resolved().unwrap()
    }

    #[test]
    fn test_template_names_round_trip() {
        for template in [Template::Executive, Template::Analytical, Template::Balanced] {
            assert_eq!(template.to_string().parse::<Template>().unwrap(), template);
        }
        assert!(matches!(
            "dense".parse::<Template>(),
            Err(LayoutError::UnknownTemplate(name)) if name == "dense"
        ));
    }

    #[test]
    fn test_executive_stat_row() {
        let out = LayoutEngine::new()
            .apply_template(&dashboard(4, 0, 0, 0), Template::Executive, Canvas::default(), &mut rng())
            .unwrap();
        let xs: Vec<f64> = out.stat_cards.iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![20.0, 315.0, 610.0, 905.0]);
        for card in &out.stat_cards {
            assert_eq!(card.position.width, Some(275.0));
            assert_eq!(card.position.y, 20.0);
        }
    }

    #[test]
    fn test_executive_bands_stack() {
        let out = LayoutEngine::new()
            .apply_template(&dashboard(2, 4, 1, 3), Template::Executive, Canvas::default(), &mut rng())
            .unwrap();
        // hero below the KPI row
        assert_eq!(rect_of(&out.charts[0].position), Rect::new(20.0, 160.0, 1160.0, 300.0));
        // three secondary panels
        let second = rect_of(&out.charts[1].position);
        assert_eq!(second.y, 480.0);
        assert!((second.width - (1200.0 - 80.0) / 3.0).abs() < 0.001);
        assert!((out.charts[3].position.x - (20.0 + 2.0 * (second.width + 20.0))).abs() < 0.001);
        // full-width table
        assert_eq!(rect_of(&out.data_tables[0].position), Rect::new(20.0, 750.0, 1160.0, 300.0));
        // text boxes two per row
        assert_eq!(rect_of(&out.text_boxes[0].position), Rect::new(20.0, 1070.0, 570.0, 150.0));
        assert_eq!(rect_of(&out.text_boxes[1].position), Rect::new(610.0, 1070.0, 570.0, 150.0));
        assert_eq!(rect_of(&out.text_boxes[2].position), Rect::new(20.0, 1240.0, 570.0, 150.0));
    }

    #[test]
    fn test_executive_without_stat_cards_starts_at_padding() {
        let out = LayoutEngine::new()
            .apply_template(&dashboard(0, 1, 0, 0), Template::Executive, Canvas::default(), &mut rng())
            .unwrap();
        assert_eq!(out.charts[0].position.y, 20.0);
    }

    #[test]
    fn test_executive_leftovers_are_grid_packed() {
        // Tall canvas so the recipe leaves free rows at the bottom
        let canvas = Canvas::new(1200.0, 2400.0);
        let out = LayoutEngine::new()
            .apply_template(&dashboard(5, 5, 2, 0), Template::Executive, canvas, &mut rng())
            .unwrap();
        for position in [
            out.stat_cards[4].position,
            out.charts[4].position,
            out.data_tables[1].position,
        ] {
            assert!(position.width.is_some() && position.height.is_some());
            // Recipe ends at 20+120+20+300+20+250+20+300 = 1050
            assert!(position.y >= 1050.0, "leftover placed at y={}", position.y);
        }
        assert!(crate::layout::find_overlaps(&out).is_empty());
    }

    #[test]
    fn test_executive_leftovers_on_default_canvas_use_stride() {
        let out = LayoutEngine::new()
            .apply_template(&dashboard(5, 5, 2, 0), Template::Executive, Canvas::default(), &mut rng())
            .unwrap();
        // The recipe covers every grid row, so each leftover lands on the
        // first stride block
        for position in [
            out.stat_cards[4].position,
            out.charts[4].position,
            out.data_tables[1].position,
        ] {
            assert!(position.width.is_some() && position.height.is_some());
            assert!((position.x - 50.0).abs() < 0.001);
            assert!((position.y - 800.0 / 24.0).abs() < 0.001);
        }
        let overlaps = crate::layout::find_overlaps(&out);
        assert!(overlaps.contains(&(
            ElementRef::new(ElementKind::StatCard, 0),
            ElementRef::new(ElementKind::StatCard, 4)
        )));
    }

    #[test]
    fn test_balanced_columns() {
        assert_eq!(balanced_columns(1), 1);
        assert_eq!(balanced_columns(4), 2);
        assert_eq!(balanced_columns(5), 3);
        assert_eq!(balanced_columns(9), 3);
        assert_eq!(balanced_columns(10), 4);
        assert_eq!(balanced_columns(40), 4);
    }

    #[test]
    fn test_balanced_slot_plan_skips_after_wide_charts() {
        let config = dashboard(2, 2, 0, 0);
        let slots = plan_balanced_slots(&config, 2);
        assert_eq!(
            slots,
            vec![
                Slot::Element(ElementRef::new(ElementKind::StatCard, 0)),
                Slot::Element(ElementRef::new(ElementKind::StatCard, 1)),
                Slot::Element(ElementRef::new(ElementKind::Chart, 0)),
                Slot::Skip,
                Slot::Element(ElementRef::new(ElementKind::Chart, 1)),
                Slot::Skip,
            ]
        );
    }

    #[test]
    fn test_balanced_chart_in_last_column_stays_narrow() {
        // 3 columns: stat, stat, chart0 lands in the last column
        let config = dashboard(2, 3, 0, 0);
        let slots = plan_balanced_slots(&config, 3);
        assert_eq!(slots[2], Slot::Element(ElementRef::new(ElementKind::Chart, 0)));
        assert_eq!(slots[3], Slot::Element(ElementRef::new(ElementKind::Chart, 1)));
        assert_eq!(slots[4], Slot::Skip);
        // third chart never widens
        assert_eq!(slots[5], Slot::Element(ElementRef::new(ElementKind::Chart, 2)));
        assert_eq!(slots.len(), 6);
    }

    #[test]
    fn test_balanced_empty() {
        let out = LayoutEngine::new()
            .apply_template(&DashboardConfig::default(), Template::Balanced, Canvas::default(), &mut rng())
            .unwrap();
        assert!(out.is_empty());
    }
}
