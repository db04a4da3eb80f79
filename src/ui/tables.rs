use std::collections::HashSet;

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::theme;
use crate::format::{
    format_ball, format_bet_pnl, format_confidence, format_contest, format_matches, format_odds, format_usd,
    or_dash,
};
use crate::model::{LotteryPrediction, NbaBet};

pub const NO_BETS: &str = "No bets recorded yet";
pub const NO_PREDICTIONS: &str = "No lottery predictions recorded yet";
pub const AWAITING_DRAW: &str = "Awaiting draw";

fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.iter().map(|h| Cell::from(*h).style(theme::header_cell_style()))).height(1)
}

fn render_empty(f: &mut Frame, text: &str, area: Rect) {
    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(theme::MUTED))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// NBA bets
// ---------------------------------------------------------------------------

pub fn render_nba_table(f: &mut Frame, bets: &[NbaBet], state: &mut TableState, area: Rect) {
    if bets.is_empty() {
        render_empty(f, NO_BETS, area);
        return;
    }

    let header = header_row(&[
        "Date", "Game", "Type", "Pick", "Odds", "Stake", "Conf", "Result", "P&L",
    ]);

    let rows: Vec<Row> = bets
        .iter()
        .map(|b| {
            let bet_type = match &b.prop_type {
                Some(prop) => format!("{} ({prop})", b.bet_type),
                None => b.bet_type.clone(),
            };
            let pick = b.player_name.as_deref().unwrap_or(&b.bet_pick);
            let result_style = Style::default()
                .fg(theme::result_color(&b.result))
                .add_modifier(Modifier::BOLD);

            Row::new(vec![
                Cell::from(b.game_date.clone()).style(Style::default().fg(Color::Gray)),
                Cell::from(format!("{} @ {}", b.team_a, b.team_b)),
                Cell::from(bet_type).style(Style::default().fg(Color::Gray)),
                Cell::from(pick.to_string()),
                Cell::from(format_odds(b.odds)),
                Cell::from(format_usd(b.bet_amount)),
                Cell::from(format_confidence(b.confidence)).style(Style::default().fg(Color::Gray)),
                Cell::from(b.result.as_str().to_uppercase()).style(result_style),
                Cell::from(format_bet_pnl(&b.result, b.profit_loss))
                    .style(Style::default().fg(theme::pnl_color(b.profit_loss))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(11),
            Constraint::Min(14),
            Constraint::Min(12),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(4),
            Constraint::Length(7),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    f.render_stateful_widget(table, area, state);
}

// ---------------------------------------------------------------------------
// Lottery predictions
// ---------------------------------------------------------------------------

/// One flag per predicted number: true iff it was drawn. Without actual
/// numbers nothing is highlighted.
pub fn ball_highlights(predicted: &[u32], actual: Option<&[u32]>) -> Vec<bool> {
    match actual {
        Some(actual) => {
            let drawn: HashSet<u32> = actual.iter().copied().collect();
            predicted.iter().map(|n| drawn.contains(n)).collect()
        }
        None => vec![false; predicted.len()],
    }
}

fn balls_line(numbers: &[u32], highlights: &[bool]) -> Line<'static> {
    let mut spans = Vec::with_capacity(numbers.len() * 2);
    for (i, (n, hit)) in numbers.iter().zip(highlights).enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format_ball(*n), theme::ball_style(*hit)));
    }
    Line::from(spans)
}

pub fn render_lottery_table(
    f: &mut Frame,
    predictions: &[LotteryPrediction],
    state: &mut TableState,
    area: Rect,
) {
    if predictions.is_empty() {
        render_empty(f, NO_PREDICTIONS, area);
        return;
    }

    let header = header_row(&["Date", "Lottery", "Contest", "Predicted", "Drawn", "Hits", "Conf"]);

    let rows: Vec<Row> = predictions
        .iter()
        .map(|p| {
            let predicted = balls_line(
                &p.predicted_numbers,
                &ball_highlights(&p.predicted_numbers, p.actual_numbers.as_deref()),
            );
            let drawn = match &p.actual_numbers {
                Some(actual) => Cell::from(balls_line(actual, &ball_highlights(actual, None))),
                None => Cell::from(AWAITING_DRAW).style(Style::default().fg(theme::MUTED)),
            };
            let contest = format_contest(p.target_concurso);
            let hits_style = p.matches.map_or(Style::default().fg(theme::MUTED), |m| {
                Style::default()
                    .fg(theme::match_color(m))
                    .add_modifier(Modifier::BOLD)
            });

            Row::new(vec![
                Cell::from(or_dash(&p.draw_date).to_string()).style(Style::default().fg(Color::Gray)),
                Cell::from(p.lottery_key.label().to_string()),
                Cell::from(contest).style(Style::default().fg(Color::Gray)),
                Cell::from(predicted),
                drawn,
                Cell::from(format_matches(p.matches, p.predicted_numbers.len())).style(hits_style),
                Cell::from(p.confidence.as_str().to_string())
                    .style(Style::default().fg(theme::tier_color(&p.confidence))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Min(18),
            Constraint::Min(18),
            Constraint::Length(5),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    f.render_stateful_widget(table, area, state);
}
