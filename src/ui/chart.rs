use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::theme;
use crate::format::format_usd;
use crate::model::BankrollPoint;

pub const CHART_PLACEHOLDER: &str = "Chart available after 2+ days of operation";

/// Plot points `(index, balance)`, or `None` when there is no trend to draw.
pub fn chart_points(history: &[BankrollPoint]) -> Option<Vec<(f64, f64)>> {
    if history.len() < 2 {
        return None;
    }
    Some(
        history
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.balance))
            .collect(),
    )
}

/// Y bounds covering every balance and the reference line, padded a little.
fn y_bounds(points: &[(f64, f64)], initial: f64) -> [f64; 2] {
    let (min, max) = points
        .iter()
        .map(|(_, y)| *y)
        .fold((initial, initial), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let pad = ((max - min) * 0.05).max(1.0);
    [min - pad, max + pad]
}

pub fn render_bankroll_chart(f: &mut Frame, history: &[BankrollPoint], initial: f64, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(Span::styled(" NBA BANKROLL ", theme::title_style()));

    let Some(points) = chart_points(history) else {
        let placeholder = Paragraph::new(CHART_PLACEHOLDER)
            .style(Style::default().fg(theme::MUTED))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(placeholder, area);
        return;
    };

    let last_x = (points.len() - 1) as f64;
    let reference = [(0.0, initial), (last_x, initial)];
    let [y_min, y_max] = y_bounds(&points, initial);

    let datasets = vec![
        Dataset::default()
            .name("initial")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::MUTED))
            .data(&reference),
        Dataset::default()
            .name("balance")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&points),
    ];

    let first_date = history.first().map_or("", |p| p.date.as_str());
    let last_date = history.last().map_or("", |p| p.date.as_str());

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme::MUTED))
                .bounds([0.0, last_x])
                .labels([first_date.to_string(), last_date.to_string()]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme::MUTED))
                .bounds([y_min, y_max])
                .labels([format_usd(y_min), format_usd(y_max)]),
        );
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, balance: f64) -> BankrollPoint {
        BankrollPoint {
            date: date.to_string(),
            balance,
            pnl: 0.0,
            cumulative_pnl: 0.0,
        }
    }

    #[test]
    fn fewer_than_two_points_has_no_series() {
        assert!(chart_points(&[]).is_none());
        assert!(chart_points(&[point("2026-01-06", 1000.0)]).is_none());
    }

    #[test]
    fn two_points_make_a_series() {
        let points = chart_points(&[point("2026-01-06", 1000.0), point("2026-01-07", 1085.5)]).unwrap();
        assert_eq!(points, vec![(0.0, 1000.0), (1.0, 1085.5)]);
    }

    #[test]
    fn bounds_include_reference_line() {
        let [lo, hi] = y_bounds(&[(0.0, 1100.0), (1.0, 1200.0)], 1000.0);
        assert!(lo < 1000.0);
        assert!(hi > 1200.0);
    }
}
