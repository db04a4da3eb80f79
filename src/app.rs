//! Terminal lifecycle and the main event loop.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::{Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, widgets::TableState, Frame, Terminal};
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::client::LedgerClient;
use crate::config::{Config, CHANNEL_CAPACITY};
use crate::error::Result;
use crate::latency::FetchLatency;
use crate::model::LedgerData;
use crate::session::{Session, Tab, View};
use crate::ui::{self, Chrome};

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Fetch now, keeping whatever is on screen.
    Refresh,
    /// Start over from `loading`, as a page reload would.
    Reload,
    ShowTab(Tab),
    NextTab,
    PrevTab,
    ScrollDown,
    ScrollUp,
}

/// Map a key to an action. On the error screen only retry and quit apply.
pub fn action_for(code: KeyCode, showing_error: bool) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') if showing_error => Some(Action::Reload),
        _ if showing_error => None,
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Refresh),
        KeyCode::Char('1') => Some(Action::ShowTab(Tab::Nba)),
        KeyCode::Char('2') => Some(Action::ShowTab(Tab::Lottery)),
        KeyCode::Char('3') => Some(Action::ShowTab(Tab::Audit)),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(Action::NextTab),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevTab),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        _ => None,
    }
}

/// Rows the active tab's table holds, for clamping the selection.
fn row_count(ledger: &LedgerData, tab: Tab) -> usize {
    match tab {
        Tab::Nba => ledger.nba.bets.len(),
        Tab::Lottery => ledger.lottery.predictions.len(),
        Tab::Audit => ledger.audit.recent_entries.len(),
    }
}

pub async fn run(cfg: Config) -> Result<()> {
    let client = LedgerClient::new(&cfg.api_url)?;
    info!(api_url = %client.base_url(), refresh_secs = cfg.refresh_interval_secs, "dashboard starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &cfg, &client).await;

    // Restore terminal regardless of result
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("dashboard stopped");
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: &Config,
    client: &LedgerClient,
) -> Result<()> {
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<Result<LedgerData>>(CHANNEL_CAPACITY);
    let latency = Arc::new(FetchLatency::new());
    let mut app = App::new(Duration::from_secs(cfg.refresh_interval_secs));
    let mut events = EventStream::new();

    loop {
        let chrome = Chrome {
            refresh_interval_secs: cfg.refresh_interval_secs,
            latency: latency.summary(),
            now: Instant::now(),
        };
        terminal.draw(|f| app.draw(f, &chrome))?;

        let input = app.next_input(&mut events, &mut outcome_rx).await?;
        match app.handle(input) {
            Control::Continue => {}
            Control::Fetch => spawn_fetch(client, &outcome_tx, &latency),
            Control::Quit => return Ok(()),
        }
    }
}

/// One thing the loop woke up for.
#[derive(Debug)]
pub enum Input {
    RefreshDue,
    Fetched(Result<LedgerData>),
    ClockTick,
    Key(KeyCode),
    /// The terminal event stream ended.
    Closed,
}

/// What the loop should do after handling an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Fetch,
    Quit,
}

fn refresh_ticker(every: Duration) -> Interval {
    // The first tick fires immediately and doubles as the initial fetch.
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Loop state: the session, the table selection and the two timers.
/// Owns no terminal and no client, so it runs under a paused test clock.
pub struct App {
    session: Session,
    table_state: TableState,
    refresh_every: Duration,
    ticker: Interval,
    // Keeps the "updated Ns ago" footer moving.
    clock: Interval,
}

impl App {
    /// Must be called inside a tokio runtime.
    pub fn new(refresh_every: Duration) -> Self {
        Self {
            session: Session::new(),
            table_state: TableState::default(),
            refresh_every,
            ticker: refresh_ticker(refresh_every),
            clock: interval(Duration::from_secs(1)),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn draw(&mut self, f: &mut Frame, chrome: &Chrome) {
        ui::render(f, &self.session, chrome, &mut self.table_state);
    }

    /// Wait for the next key press, refresh tick, clock tick or fetch outcome.
    pub async fn next_input<S>(
        &mut self,
        events: &mut S,
        outcomes: &mut mpsc::Receiver<Result<LedgerData>>,
    ) -> Result<Input>
    where
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        loop {
            tokio::select! {
                _ = self.ticker.tick() => return Ok(Input::RefreshDue),
                Some(outcome) = outcomes.recv() => return Ok(Input::Fetched(outcome)),
                _ = self.clock.tick() => return Ok(Input::ClockTick),
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        return Ok(Input::Key(key.code))
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(Input::Closed),
                },
            }
        }
    }

    pub fn handle(&mut self, input: Input) -> Control {
        match input {
            Input::RefreshDue => Control::Fetch,
            Input::Fetched(outcome) => {
                self.session.apply(outcome);
                Control::Continue
            }
            Input::ClockTick => Control::Continue,
            Input::Closed => Control::Quit,
            Input::Key(code) => {
                let showing_error = matches!(self.session.view(), View::Error(_));
                match action_for(code, showing_error) {
                    Some(action) => {
                        debug!(?action, "key action");
                        self.perform(action)
                    }
                    None => Control::Continue,
                }
            }
        }
    }

    fn perform(&mut self, action: Action) -> Control {
        match action {
            Action::Quit => return Control::Quit,
            Action::Refresh => return Control::Fetch,
            Action::Reload => {
                self.session.reload();
                self.table_state = TableState::default();
                // A fresh interval ticks immediately: that is the reload fetch.
                self.ticker = refresh_ticker(self.refresh_every);
            }
            Action::ShowTab(tab) => self.switch_tab(tab),
            Action::NextTab => self.switch_tab(self.session.tab().next()),
            Action::PrevTab => self.switch_tab(self.session.tab().prev()),
            Action::ScrollDown => {
                let rows = self
                    .session
                    .data()
                    .map_or(0, |d| row_count(d, self.session.tab()));
                let max = rows.saturating_sub(1);
                let next = self.table_state.selected().map_or(0, |i| (i + 1).min(max));
                self.table_state.select((rows > 0).then_some(next));
            }
            Action::ScrollUp => {
                let prev = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
                self.table_state.select(Some(prev));
            }
        }
        Control::Continue
    }

    fn switch_tab(&mut self, tab: Tab) {
        if self.session.tab() != tab {
            self.session.set_tab(tab);
            self.table_state = TableState::default();
        }
    }
}

/// Fire one ledger request in the background. Requests are not sequenced:
/// whichever finishes last lands in the session last.
fn spawn_fetch(
    client: &LedgerClient,
    outcome_tx: &mpsc::Sender<Result<LedgerData>>,
    latency: &Arc<FetchLatency>,
) {
    let client = client.clone();
    let outcome_tx = outcome_tx.clone();
    let latency = Arc::clone(latency);
    tokio::spawn(async move {
        let started = Instant::now();
        let outcome = client.fetch_ledger().await;
        latency.record(started.elapsed());
        if outcome_tx.send(outcome).await.is_err() {
            debug!("event loop gone, dropping fetch outcome");
        }
    });
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};
    use futures_util::stream;

    use super::*;
    use crate::error::AppError;
    use crate::session::tests::sample_ledger;

    #[test]
    fn error_screen_only_retries_or_quits() {
        assert_eq!(action_for(KeyCode::Char('r'), true), Some(Action::Reload));
        assert_eq!(action_for(KeyCode::Char('q'), true), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Char('2'), true), None);
        assert_eq!(action_for(KeyCode::Down, true), None);
    }

    #[test]
    fn dashboard_keys() {
        assert_eq!(action_for(KeyCode::Char('r'), false), Some(Action::Refresh));
        assert_eq!(action_for(KeyCode::Char('1'), false), Some(Action::ShowTab(Tab::Nba)));
        assert_eq!(action_for(KeyCode::Char('3'), false), Some(Action::ShowTab(Tab::Audit)));
        assert_eq!(action_for(KeyCode::Tab, false), Some(Action::NextTab));
        assert_eq!(action_for(KeyCode::BackTab, false), Some(Action::PrevTab));
        assert_eq!(action_for(KeyCode::Char('j'), false), Some(Action::ScrollDown));
        assert_eq!(action_for(KeyCode::Up, false), Some(Action::ScrollUp));
        assert_eq!(action_for(KeyCode::Char('x'), false), None);
    }

    type Outcomes = mpsc::Receiver<Result<LedgerData>>;

    fn outcomes() -> (mpsc::Sender<Result<LedgerData>>, Outcomes) {
        mpsc::channel(CHANNEL_CAPACITY)
    }

    /// Run the loop with no key input until `window` of (paused) time has
    /// passed. Returns how many fetches it asked for.
    async fn fetches_within(app: &mut App, outcomes: &mut Outcomes, window: Duration) -> usize {
        let deadline = tokio::time::sleep(window);
        tokio::pin!(deadline);
        let mut events = stream::pending::<io::Result<Event>>();
        let mut fetches = 0;
        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => return fetches,
                input = app.next_input(&mut events, outcomes) => {
                    if app.handle(input.unwrap()) == Control::Fetch {
                        fetches += 1;
                    }
                }
            }
        }
    }

    fn press(app: &mut App, code: KeyCode) -> Control {
        app.handle(Input::Key(code))
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_is_the_initial_fetch() {
        let (_tx, mut rx) = outcomes();
        let mut app = App::new(Duration::from_secs(60));
        assert_eq!(app.session().view(), View::Loading);
        assert_eq!(fetches_within(&mut app, &mut rx, Duration::from_millis(500)).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn refetches_every_interval() {
        let (_tx, mut rx) = outcomes();
        let mut app = App::new(Duration::from_secs(60));
        assert_eq!(fetches_within(&mut app, &mut rx, Duration::from_secs(59)).await, 1);
        assert_eq!(fetches_within(&mut app, &mut rx, Duration::from_secs(2)).await, 1);
        assert_eq!(fetches_within(&mut app, &mut rx, Duration::from_secs(60)).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reload_fetches_straight_away() {
        let (_tx, mut rx) = outcomes();
        let mut app = App::new(Duration::from_secs(60));
        assert_eq!(fetches_within(&mut app, &mut rx, Duration::from_secs(5)).await, 1);

        app.handle(Input::Fetched(Err(AppError::Http { context: "API", status: 500 })));
        assert!(matches!(app.session().view(), View::Error(_)));

        assert_eq!(press(&mut app, KeyCode::Char('r')), Control::Continue);
        assert_eq!(app.session().view(), View::Loading);
        // Without the reload the next tick would be 55s away.
        assert_eq!(fetches_within(&mut app, &mut rx, Duration::from_millis(10)).await, 1);
        assert_eq!(fetches_within(&mut app, &mut rx, Duration::from_secs(59)).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_key_fetches_only_when_ready() {
        let (_tx, mut rx) = outcomes();
        let mut app = App::new(Duration::from_secs(60));
        fetches_within(&mut app, &mut rx, Duration::from_secs(1)).await;
        app.handle(Input::Fetched(Ok(sample_ledger())));
        assert_eq!(press(&mut app, KeyCode::Char('r')), Control::Fetch);
        assert!(matches!(app.session().view(), View::Ready(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn tab_keys_never_fetch() {
        let (_tx, mut rx) = outcomes();
        let mut app = App::new(Duration::from_secs(60));
        assert_eq!(fetches_within(&mut app, &mut rx, Duration::from_secs(1)).await, 1);
        app.handle(Input::Fetched(Ok(sample_ledger())));

        for code in [
            KeyCode::Char('2'),
            KeyCode::Char('3'),
            KeyCode::Tab,
            KeyCode::BackTab,
            KeyCode::Right,
            KeyCode::Left,
            KeyCode::Char('1'),
            KeyCode::Char('j'),
        ] {
            assert_eq!(press(&mut app, code), Control::Continue, "{code:?}");
        }
        assert_eq!(app.session().tab(), Tab::Nba);
        assert_eq!(fetches_within(&mut app, &mut rx, Duration::from_secs(58)).await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn outcomes_land_in_the_session() {
        let (tx, mut rx) = outcomes();
        let mut app = App::new(Duration::from_secs(60));
        tx.send(Ok(sample_ledger())).await.unwrap();
        fetches_within(&mut app, &mut rx, Duration::from_millis(10)).await;
        assert!(matches!(app.session().view(), View::Ready(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn key_presses_come_through_the_event_stream() {
        let (_tx, mut rx) = outcomes();
        let mut app = App::new(Duration::from_secs(60));
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let mut events = stream::iter(vec![Ok::<_, io::Error>(Event::Key(q))]);
        loop {
            match app.next_input(&mut events, &mut rx).await.unwrap() {
                Input::Key(code) => {
                    assert_eq!(app.handle(Input::Key(code)), Control::Quit);
                    break;
                }
                Input::Closed => panic!("stream closed before the key arrived"),
                _ => {}
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn switching_tab_resets_selection() {
        let mut app = App::new(Duration::from_secs(60));
        app.handle(Input::Fetched(Ok(sample_ledger())));
        app.table_state.select(Some(1));

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.table_state.selected(), Some(1));

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.session().tab(), Tab::Lottery);
        assert_eq!(app.table_state.selected(), None);
    }
}
