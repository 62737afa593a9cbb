//! # Special Layout
//!
//! The fixed arrangement `create_dashboard_layout` applies on top of the
//! grid packer once a dashboard is dense enough: stat cards in rows of
//! four across the top, charts in rows of three underneath. Data tables and
//! text boxes keep their grid positions.

use crate::model::{Canvas, DashboardConfig, Element, Rect};

const STAT_CARDS_PER_ROW: usize = 4;
const STAT_CARD_HEIGHT: f64 = 120.0;
const CHARTS_PER_ROW: usize = 3;
const CHART_HEIGHT: f64 = 300.0;
const ROW_GUTTER: f64 = 20.0;
/// Inset on each side of a cell; the left inset is the element's x offset.
const CELL_INSET: f64 = 10.0;

/// Rectangles for `count` items laid out in rows of `per_row`, each cell
/// `canvas_width / min(count, per_row)` wide, starting at `start_y`.
fn row_rects(count: usize, per_row: usize, height: f64, start_y: f64, canvas_width: f64) -> Vec<Rect> {
    if count == 0 {
        return vec![];
    }
    let cell_width = canvas_width / count.min(per_row) as f64;
    (0..count)
        .map(|i| {
            let col = i % per_row;
            let row = i / per_row;
            Rect::new(
                col as f64 * cell_width + CELL_INSET,
                start_y + row as f64 * (height + ROW_GUTTER),
                (cell_width - 2.0 * CELL_INSET).max(0.0),
                height,
            )
        })
        .collect()
}

/// Overwrite stat card and chart positions with the fixed row arrangement.
/// Without stat cards the config is returned unchanged.
pub fn apply(config: &DashboardConfig, canvas: Canvas) -> DashboardConfig {
    let mut result = config.clone();
    if result.stat_cards.is_empty() {
        return result;
    }

    let stat_rects = row_rects(
        result.stat_cards.len(),
        STAT_CARDS_PER_ROW,
        STAT_CARD_HEIGHT,
        0.0,
        canvas.width,
    );
    for (card, rect) in result.stat_cards.iter_mut().zip(stat_rects) {
        *card.position_mut() = rect.into();
    }

    let stat_rows = result.stat_cards.len().div_ceil(STAT_CARDS_PER_ROW);
    let chart_start_y = stat_rows as f64 * (STAT_CARD_HEIGHT + ROW_GUTTER);
    let chart_rects = row_rects(
        result.charts.len(),
        CHARTS_PER_ROW,
        CHART_HEIGHT,
        chart_start_y,
        canvas.width,
    );
    for (chart, rect) in result.charts.iter_mut().zip(chart_rects) {
        *chart.position_mut() = rect.into();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chart, Position, StatCard, TextBox};

    fn config(stats: usize, charts: usize) -> DashboardConfig {
        DashboardConfig {
            stat_cards: vec![StatCard::default(); stats],
            charts: vec![Chart::default(); charts],
            ..Default::default()
        }
    }

    #[test]
    fn test_no_stat_cards_is_noop() {
        let mut input = config(0, 2);
        input.charts[0].position = Position::sized(1.0, 2.0);
        let output = apply(&input, Canvas::default());
        assert_eq!(output, input);
    }

    #[test]
    fn test_two_stat_cards_split_width() {
        let output = apply(&config(2, 0), Canvas::default());
        let first = output.stat_cards[0].position;
        let second = output.stat_cards[1].position;
        assert_eq!(first.x, 10.0);
        assert_eq!(first.y, 0.0);
        assert_eq!(first.width, Some(580.0));
        assert_eq!(first.height, Some(120.0));
        assert_eq!(second.x, 610.0);
    }

    #[test]
    fn test_stat_cards_wrap_after_four() {
        let output = apply(&config(6, 0), Canvas::default());
        let fifth = output.stat_cards[4].position;
        assert_eq!(fifth.x, 10.0);
        assert_eq!(fifth.y, 140.0);
        assert_eq!(fifth.width, Some(280.0));
    }

    #[test]
    fn test_charts_start_below_stat_block() {
        let output = apply(&config(5, 4), Canvas::default());
        // Two stat rows of 120 + 20
        let first = output.charts[0].position;
        assert_eq!(first.y, 280.0);
        assert_eq!(first.width, Some(380.0));
        assert_eq!(first.height, Some(300.0));
        assert_eq!(output.charts[2].position.x, 810.0);
        let fourth = output.charts[3].position;
        assert_eq!(fourth.x, 10.0);
        assert_eq!(fourth.y, 600.0);
    }

    #[test]
    fn test_other_kinds_untouched() {
        let mut input = config(1, 1);
        input.text_boxes.push(TextBox {
            content: "note".to_string(),
            position: Position::sized(300.0, 150.0),
        });
        let output = apply(&input, Canvas::default());
        assert_eq!(output.text_boxes, input.text_boxes);
    }
}
