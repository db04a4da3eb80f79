//! Rendering. Pure functions of the session: no I/O happens here.

pub mod audit;
pub mod cards;
pub mod chart;
pub mod tables;
pub mod theme;

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, TableState, Tabs, Wrap},
    Frame,
};

use crate::format::format_latency_ms;
use crate::latency::LatencySummary;
use crate::model::LedgerData;
use crate::session::{Session, Tab, View};

pub const LOADING_TEXT: &str = "Loading ledger...";
pub const ERROR_TITLE: &str = " Failed to load ";

/// Everything the screen shows besides the session itself.
#[derive(Debug, Clone, Copy)]
pub struct Chrome {
    pub refresh_interval_secs: u64,
    pub latency: LatencySummary,
    /// Reference point for "updated Ns ago".
    pub now: Instant,
}

pub fn render(f: &mut Frame, session: &Session, chrome: &Chrome, table_state: &mut TableState) {
    let area = f.area();
    match session.view() {
        View::Loading => render_loading(f, area),
        View::Error(message) => render_error(f, &message, area),
        View::Ready(ledger) => render_dashboard(f, session, ledger, chrome, table_state, area),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

// ---------------------------------------------------------------------------
// Loading / error screens
// ---------------------------------------------------------------------------

fn render_loading(f: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled("◌ ", Style::default().fg(Color::Green)),
        Span::styled(LOADING_TEXT, Style::default().fg(theme::MUTED)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(paragraph, centered(area, 40, 1));
}

fn render_error(f: &mut Frame, message: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[r] ", Style::default().fg(Color::Yellow)),
            Span::raw("try again  "),
            Span::styled("[q] ", Style::default().fg(Color::Yellow)),
            Span::raw("quit"),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::LOSS))
                .title(Span::styled(
                    ERROR_TITLE,
                    Style::default().fg(theme::LOSS).add_modifier(Modifier::BOLD),
                )),
        );
    f.render_widget(paragraph, centered(area, 60.min(area.width), 7.min(area.height)));
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

fn render_dashboard(
    f: &mut Frame,
    session: &Session,
    ledger: &LedgerData,
    chrome: &Chrome,
    table_state: &mut TableState,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // header
            Constraint::Length(7),  // stat cards
            Constraint::Length(10), // bankroll chart
            Constraint::Length(3),  // tabs
            Constraint::Min(4),     // tab content
            Constraint::Length(2),  // footer
        ])
        .split(area);

    cards::render_header(f, &ledger.experiment, chunks[0]);
    cards::render_cards(f, &ledger.experiment, &ledger.nba, &ledger.lottery, chunks[1]);
    chart::render_bankroll_chart(
        f,
        &ledger.nba.bankroll_history,
        ledger.experiment.initial_nba,
        chunks[2],
    );
    render_tabs(f, session.tab(), chunks[3]);

    let content = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::border_style());
    let inner = content.inner(chunks[4]);
    f.render_widget(content, chunks[4]);
    match session.tab() {
        Tab::Nba => tables::render_nba_table(f, &ledger.nba.bets, table_state, inner),
        Tab::Lottery => {
            tables::render_lottery_table(f, &ledger.lottery.predictions, table_state, inner)
        }
        Tab::Audit => audit::render_audit(f, &ledger.audit, table_state, inner),
    }

    render_footer(f, session, ledger, chrome, chunks[5]);
}

fn render_tabs(f: &mut Frame, active: Tab, area: Rect) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|t| Line::from(format!(" {} {} ", t.index() + 1, t.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(active.index())
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).border_style(theme::border_style()));
    f.render_widget(tabs, area);
}

fn render_footer(f: &mut Frame, session: &Session, ledger: &LedgerData, chrome: &Chrome, area: Rect) {
    let mut about = vec![
        Span::styled(format!(" {}", ledger.experiment.name), Style::default().fg(theme::MUTED)),
        Span::raw(" · "),
        Span::styled(
            format!("SHA-256 hash chain with {} verified entries", ledger.audit.total_entries),
            Style::default().fg(theme::MUTED),
        ),
    ];
    if let Some(repo) = &ledger.audit.github_repo {
        about.push(Span::raw(" · "));
        about.push(Span::styled(
            format!("github.com/{repo}"),
            Style::default().fg(Color::Blue),
        ));
    }
    about.push(Span::raw("  │  "));
    about.push(Span::styled(
        format!(
            "fetch p50 {} p95 {} p99 {} ({})",
            format_latency_ms(chrome.latency.p50_ms),
            format_latency_ms(chrome.latency.p95_ms),
            format_latency_ms(chrome.latency.p99_ms),
            chrome.latency.samples,
        ),
        Style::default().fg(theme::MUTED),
    ));

    let updated = session
        .last_success()
        .map_or("—".to_string(), |t| format!("{}s ago", chrome.now.saturating_duration_since(t).as_secs()));
    let keys = Line::from(vec![
        Span::styled(" [q] ", Style::default().fg(Color::Yellow)),
        Span::raw("quit  "),
        Span::styled("[1-3 / Tab] ", Style::default().fg(Color::Yellow)),
        Span::raw("switch view  "),
        Span::styled("[r] ", Style::default().fg(Color::Yellow)),
        Span::raw("refresh  "),
        Span::styled("[↑↓ / j k] ", Style::default().fg(Color::Yellow)),
        Span::raw("scroll  "),
        Span::styled(
            format!("auto-refresh: {}s · updated {updated}", chrome.refresh_interval_secs),
            Style::default().fg(theme::MUTED),
        ),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(about), keys]).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
pub(crate) mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::error::AppError;
    use crate::session::tests::sample_ledger;

    pub(crate) fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(session: &Session) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 60)).unwrap();
        // Pinned to the last success so the footer reads "0s ago" on every draw.
        let chrome = Chrome {
            refresh_interval_secs: 60,
            latency: LatencySummary::default(),
            now: session.last_success().unwrap_or_else(Instant::now),
        };
        let mut table_state = TableState::default();
        terminal
            .draw(|f| render(f, session, &chrome, &mut table_state))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn ready(ledger: LedgerData) -> Session {
        let mut session = Session::new();
        session.apply(Ok(ledger));
        session
    }

    #[test]
    fn loading_screen() {
        let screen = draw(&Session::new());
        assert!(screen.contains(LOADING_TEXT));
    }

    #[test]
    fn first_load_failure_shows_status_code() {
        let mut session = Session::new();
        session.apply(Err(AppError::Http { context: "API", status: 500 }));
        let screen = draw(&session);
        assert!(screen.contains("Failed to load"));
        assert!(screen.contains("API error: 500"));
    }

    #[test]
    fn stat_card_shows_backend_record() {
        let screen = draw(&ready(sample_ledger()));
        assert!(screen.contains("10W 5L 1P"), "{screen}");
        assert!(screen.contains("Pending"));
        assert!(screen.contains("$1,085.50"));
        assert!(screen.contains("+$85.50 (+8.6%)"));
    }

    #[test]
    fn later_failure_leaves_screen_unchanged() {
        let mut session = ready(sample_ledger());
        let before = draw(&session);
        session.apply(Err(AppError::Http { context: "API", status: 503 }));
        let after = draw(&session);
        assert!(!after.contains("Failed to load"));
        assert!(!after.contains("503"));
        assert!(after.contains("10W 5L 1P"));
        assert_eq!(before, after);
    }

    #[test]
    fn flat_lottery_pool_shows_signed_zero() {
        let screen = draw(&ready(sample_ledger()));
        assert!(screen.contains("+$0.00 (+0.0%)"), "{screen}");
    }

    #[test]
    fn contest_zero_renders_as_dash() {
        let mut ledger = sample_ledger();
        let idx = ledger
            .lottery
            .predictions
            .iter()
            .position(|p| p.target_concurso == Some(2950))
            .unwrap();
        ledger.lottery.predictions[idx].target_concurso = Some(0);
        let mut session = ready(ledger);
        session.set_tab(Tab::Lottery);
        let screen = draw(&session);
        assert!(screen.contains("#-"));
        assert!(!screen.contains("#0 "));
        assert!(screen.contains("#6620"));
    }

    #[test]
    fn footer_age_follows_the_supplied_clock() {
        let session = ready(sample_ledger());
        let synced = session.last_success().unwrap();
        let mut terminal = Terminal::new(TestBackend::new(140, 60)).unwrap();
        let chrome = Chrome {
            refresh_interval_secs: 60,
            latency: LatencySummary::default(),
            now: synced + std::time::Duration::from_secs(42),
        };
        terminal
            .draw(|f| render(f, &session, &chrome, &mut TableState::default()))
            .unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("updated 42s ago"));
    }

    #[test]
    fn chart_needs_two_points() {
        let mut ledger = sample_ledger();
        assert!(!draw(&ready(ledger.clone())).contains(chart::CHART_PLACEHOLDER));

        ledger.nba.bankroll_history.truncate(1);
        assert!(draw(&ready(ledger.clone())).contains(chart::CHART_PLACEHOLDER));

        ledger.nba.bankroll_history.clear();
        assert!(draw(&ready(ledger)).contains(chart::CHART_PLACEHOLDER));
    }

    #[test]
    fn nba_tab_lists_bets() {
        let screen = draw(&ready(sample_ledger()));
        assert!(screen.contains("BOS @ NYK"));
        assert!(screen.contains("prop (points)"));
        assert!(screen.contains("L. James"));
        assert!(screen.contains("WIN"));
        assert!(screen.contains("+$85.00"));
    }

    #[test]
    fn empty_bets_show_message() {
        let mut ledger = sample_ledger();
        ledger.nba.bets.clear();
        assert!(draw(&ready(ledger)).contains(tables::NO_BETS));
    }

    #[test]
    fn lottery_tab_shows_labels_and_awaiting_draw() {
        let mut session = ready(sample_ledger());
        session.set_tab(Tab::Lottery);
        let screen = draw(&session);
        assert!(screen.contains("Mega-Sena"));
        assert!(screen.contains("#6620"));
        assert!(screen.contains("2/5"));
        assert!(screen.contains(tables::AWAITING_DRAW));
        assert!(!screen.contains("BOS @ NYK"));
    }

    #[test]
    fn audit_tab_shows_chain_badges() {
        let mut session = ready(sample_ledger());
        session.set_tab(Tab::Audit);
        let screen = draw(&session);
        assert!(screen.contains("INTACT"));
        assert!(screen.contains("BROKEN #7"));
        assert!(screen.contains("Last hash: 9f2c4e1ab7d05633e8aa41c2..."));
        assert!(screen.contains("9f2c4e1ab7d05633..."));
        assert!(screen.contains("a1b2c3d"));
        assert!(screen.contains("2026-01-07T03:00:00"));
        assert!(!screen.contains("2026-01-07T03:00:00.1"));
        assert!(screen.contains("https://github.com/syndicate/ledger-proofs"));
    }

    #[test]
    fn footer_reports_total_entries() {
        let screen = draw(&ready(sample_ledger()));
        assert!(screen.contains("SHA-256 hash chain with 5 verified entries"));
        assert!(screen.contains("auto-refresh: 60s"));
    }
}
