use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use super::theme;
use crate::format::{chain_status, prefix, short_hash};
use crate::model::{AuditChain, AuditData, AuditEntry};

const VERIFY_STEPS: [&str; 5] = [
    "Every prediction is recorded BEFORE the event, with a SHA-256 hash",
    "Each hash links to the previous one: SHA256(prev_hash | payload)",
    "Changing any entry breaks every hash after it",
    "Git commits pin the exact time each entry was recorded",
    "Anyone can clone the repository and recompute the hashes independently",
];

pub fn render_audit(f: &mut Frame, audit: &AuditData, state: &mut TableState, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // chain cards
            Constraint::Min(3),    // recent entries
            Constraint::Length(9), // how to verify
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(sections[0]);
    render_chain_card(f, "NBA Chain", &audit.nba_chain, cards[0]);
    render_chain_card(f, "Lottery Chain", &audit.lottery_chain, cards[1]);

    if !audit.recent_entries.is_empty() {
        render_recent_entries(f, &audit.recent_entries, state, sections[1]);
    }
    render_verify_steps(f, audit.github_repo.as_deref(), sections[2]);
}

/// Card body lines: entry count, then the shortened last hash when known.
pub fn chain_card_lines(chain: &AuditChain) -> Vec<String> {
    let mut lines = vec![format!("Entries: {}", chain.entries)];
    if let Some(hash) = &chain.last_hash {
        lines.push(format!("Last hash: {}", short_hash(hash, 24)));
    }
    lines
}

fn render_chain_card(f: &mut Frame, label: &str, chain: &AuditChain, area: Rect) {
    let badge_color = theme::chain_color(chain);
    let title = Line::from(vec![
        Span::styled(format!(" {label} "), Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {} ", chain_status(chain)),
            Style::default().fg(Color::Black).bg(badge_color).add_modifier(Modifier::BOLD),
        ),
    ]);
    let lines: Vec<Line> = chain_card_lines(chain)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(theme::MUTED))))
        .collect();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(badge_color))
            .title(title),
    );
    f.render_widget(paragraph, area);
}

fn render_recent_entries(f: &mut Frame, entries: &[AuditEntry], state: &mut TableState, area: Rect) {
    let header = Row::new(
        ["#", "Chain", "Type", "Hash", "Git", "Date"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_cell_style())),
    );

    let rows: Vec<Row> = entries
        .iter()
        .map(|e| {
            let git = match &e.git_sha {
                Some(sha) => Cell::from(prefix(sha, 7).to_string()).style(Style::default().fg(Color::Green)),
                None => Cell::from("-").style(Style::default().fg(theme::MUTED)),
            };
            Row::new(vec![
                Cell::from(e.sequence.to_string()).style(Style::default().fg(Color::Gray)),
                Cell::from(e.chain.clone()),
                Cell::from(e.event_type.as_str().to_string())
                    .style(Style::default().fg(theme::event_color(&e.event_type))),
                Cell::from(short_hash(&e.entry_hash, 16)).style(Style::default().fg(theme::MUTED)),
                git,
                Cell::from(prefix(&e.created_at, 19).to_string()).style(Style::default().fg(theme::MUTED)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Min(19),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(Span::styled(" RECENT ENTRIES ", theme::title_style())),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    f.render_stateful_widget(table, area, state);
}

fn render_verify_steps(f: &mut Frame, github_repo: Option<&str>, area: Rect) {
    let mut lines: Vec<Line> = VERIFY_STEPS
        .iter()
        .enumerate()
        .map(|(i, step)| Line::from(Span::styled(format!("{}. {step}", i + 1), Style::default().fg(Color::Gray))))
        .collect();
    if let Some(repo) = github_repo {
        lines.push(Line::from(Span::styled(
            format!("Repository: https://github.com/{repo}"),
            Style::default().fg(Color::Blue),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_style())
            .title(Span::styled(" HOW TO VERIFY ", theme::title_style())),
    );
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intact_chain_card_shows_count_and_short_hash() {
        let chain = AuditChain {
            valid: true,
            entries: 42,
            last_hash: Some("9f2c4e1ab7d05633e8aa41c2f0b9d7e3115ac0de".to_string()),
            broken_at: None,
        };
        assert_eq!(chain_status(&chain), "INTACT");
        assert_eq!(
            chain_card_lines(&chain),
            vec!["Entries: 42".to_string(), "Last hash: 9f2c4e1ab7d05633e8aa41c2...".to_string()]
        );
    }

    #[test]
    fn broken_chain_card_names_the_sequence() {
        let chain = AuditChain {
            valid: false,
            entries: 9,
            last_hash: None,
            broken_at: Some(7),
        };
        assert_eq!(chain_status(&chain), "BROKEN #7");
        assert_eq!(chain_card_lines(&chain), vec!["Entries: 9".to_string()]);
    }
}
