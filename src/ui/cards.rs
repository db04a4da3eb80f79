//! Header and the two bankroll stat cards.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::theme;
use crate::format::{
    format_headline_pnl, format_pct, format_record, format_usd, format_win_rate, or_dash,
};
use crate::model::{Experiment, LotteryData, NbaData};

pub fn render_header(f: &mut Frame, experiment: &Experiment, area: Rect) {
    let line = Line::from(vec![
        Span::styled(format!(" {} ", experiment.name), theme::title_style()),
        Span::styled(
            format!(" Public predictive AI experiment · Started: {} ", experiment.started_at),
            Style::default().fg(theme::MUTED),
        ),
        Span::raw("  "),
        Span::styled(
            " Hash Chain Auditable ",
            Style::default().fg(theme::GAIN).add_modifier(Modifier::BOLD),
        ),
    ]);
    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).border_style(theme::border_style()));
    f.render_widget(paragraph, area);
}

pub fn render_cards(f: &mut Frame, experiment: &Experiment, nba: &NbaData, lottery: &LotteryData, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_card(
        f,
        " NBA BETTING ",
        Color::Green,
        &Headline {
            balance: nba.current_bankroll,
            pnl: nba.total_pnl,
            roi_pct: nba.roi_pct,
            initial: experiment.initial_nba,
        },
        &nba_stats(nba),
        halves[0],
    );
    // The lottery pool does not move: predictions carry no stake.
    render_card(
        f,
        " BR LOTTERIES ",
        Color::Magenta,
        &Headline {
            balance: experiment.initial_lottery,
            pnl: 0.0,
            roi_pct: 0.0,
            initial: experiment.initial_lottery,
        },
        &lottery_stats(lottery),
        halves[1],
    );
}

struct Headline {
    balance: f64,
    pnl: f64,
    roi_pct: f64,
    initial: f64,
}

/// Stat rows for the NBA card, as shown. Straight from the backend aggregate.
pub fn nba_stats(nba: &NbaData) -> Vec<(&'static str, String)> {
    vec![
        ("Bets", nba.total_bets.to_string()),
        ("Record", format_record(nba.wins, nba.losses, nba.pushes)),
        ("Win Rate", format_win_rate(nba.win_rate)),
        ("Streak", or_dash(&nba.streak).to_string()),
        ("Pending", nba.pending.to_string()),
        ("ROI", format_pct(nba.roi_pct)),
    ]
}

pub fn lottery_stats(lottery: &LotteryData) -> Vec<(&'static str, String)> {
    let best = lottery
        .best_match
        .as_ref()
        .map_or("-".to_string(), |b| format!("{} in {}", b.matches, b.lottery_key.label()));
    vec![
        ("Predictions", lottery.total_predictions.to_string()),
        ("Resolved", lottery.total_resolved.to_string()),
        ("Avg Matches", format!("{:.1}", lottery.avg_matches)),
        ("Best", best),
    ]
}

fn render_card(
    f: &mut Frame,
    title: &str,
    accent: Color,
    headline: &Headline,
    stats: &[(&'static str, String)],
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style())
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let up = headline.pnl >= 0.0;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format_usd(headline.balance),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} ({})", format_headline_pnl(headline.pnl), format_pct(headline.roi_pct)),
                Style::default().fg(if up { theme::GAIN } else { theme::LOSS }),
            ),
        ]),
        Line::from(Span::styled(
            format!("Initial capital: {}", format_usd(headline.initial)),
            Style::default().fg(theme::MUTED),
        )),
    ];
    f.render_widget(Paragraph::new(lines), parts[0]);

    // Two label/value pairs per row.
    let rows: Vec<Row> = stats
        .chunks(2)
        .map(|pair| {
            let mut cells = Vec::with_capacity(4);
            for (label, value) in pair {
                cells.push(Cell::from(*label).style(Style::default().fg(theme::MUTED)));
                cells.push(Cell::from(value.clone()).style(Style::default().fg(Color::White)));
            }
            Row::new(cells)
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(12),
            Constraint::Min(10),
        ],
    );
    f.render_widget(table, parts[1]);
}
