//! Application shell: owns the current screen, turns terminal input into controller
//! calls and runs their network effects as background tasks.

use crate::api::{AnalysisSummary, AuthResponse, JournalClient, MutationOutcome};
use crate::auth::{AuthForm, AuthKind, AuthSubmission};
use crate::dashboard::{Dashboard, Effect, Focus, Prompt};
use crate::diary_entry::{DiaryEntry, EntryId};
use crate::editor::{EditorField, EditorState};
use crate::error::ClientResult;
use crate::tui::Tui;
use crate::ui;
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use futures::StreamExt;
use ratatui::layout::Rect;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

/// Fixed delays of the UI flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub login_redirect: Duration,
    pub register_redirect: Duration,
    pub confirmation: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            login_redirect: Duration::from_secs(1),
            register_redirect: Duration::from_secs(2),
            confirmation: Duration::from_secs(3),
        }
    }
}

impl Timings {
    pub fn immediate() -> Self {
        Self {
            login_redirect: Duration::ZERO,
            register_redirect: Duration::ZERO,
            confirmation: Duration::ZERO,
        }
    }
}

/// Completions of background work, delivered back to the UI task.
#[derive(Debug)]
pub enum AppEvent {
    AuthFinished {
        kind: AuthKind,
        result: ClientResult<AuthResponse>,
    },
    Navigate(Route),
    EntriesLoaded(ClientResult<Vec<DiaryEntry>>),
    EntrySaved {
        ticket: u64,
        result: ClientResult<MutationOutcome>,
    },
    EntryDeleted {
        id: EntryId,
        result: ClientResult<MutationOutcome>,
    },
    ConfirmationElapsed {
        ticket: u64,
    },
    AnalysisLoaded {
        ticket: u64,
        result: ClientResult<AnalysisSummary>,
    },
}

enum Incoming {
    Terminal(Option<std::io::Result<Event>>),
    Background(AppEvent),
}

#[derive(Debug)]
pub enum Screen {
    Auth(AuthForm),
    Dashboard(Dashboard),
}

pub struct App {
    client: JournalClient,
    timings: Timings,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    screen: Screen,
    viewport: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(client: JournalClient, timings: Timings, start: Route) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App {
            client,
            timings,
            tx,
            rx,
            screen: Screen::Auth(AuthForm::login()),
            viewport: Rect::new(0, 0, 80, 24),
            should_quit: false,
        };
        app.navigate(start);
        app
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match &self.screen {
            Screen::Dashboard(dashboard) => Some(dashboard),
            Screen::Auth(_) => None,
        }
    }

    pub fn auth_form(&self) -> Option<&AuthForm> {
        match &self.screen {
            Screen::Auth(form) => Some(form),
            Screen::Dashboard(_) => None,
        }
    }

    pub fn route(&self) -> Route {
        match &self.screen {
            Screen::Auth(form) if form.kind() == AuthKind::Login => Route::Login,
            Screen::Auth(_) => Route::Register,
            Screen::Dashboard(_) => Route::Dashboard,
        }
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let mut events = EventStream::new();

        while !self.should_quit {
            self.viewport = tui.draw(|f| ui::render(f, self))?;

            let incoming = tokio::select! {
                maybe_event = events.next() => Incoming::Terminal(maybe_event),
                Some(event) = self.rx.recv() => Incoming::Background(event),
            };

            match incoming {
                Incoming::Terminal(Some(Ok(event))) => self.handle_terminal_event(event),
                Incoming::Terminal(Some(Err(e))) => return Err(e.into()),
                Incoming::Terminal(None) => break,
                Incoming::Background(event) => self.handle_app_event(event),
            }
        }

        Ok(())
    }

    /// Waits for the next background completion.
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = task.await;
            if tx.send(event).is_err() {
                tracing::debug!("event dropped, app already shut down");
            }
        });
    }

    fn send_after(&self, delay: Duration, event: AppEvent) {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            event
        });
    }

    fn navigate(&mut self, route: Route) {
        tracing::info!(?route, "navigating");
        self.screen = match route {
            Route::Login => Screen::Auth(AuthForm::login()),
            Route::Register => Screen::Auth(AuthForm::register()),
            Route::Dashboard => {
                let dashboard = Dashboard::new();
                let effect = dashboard.refresh();
                self.run_effect(effect);
                Screen::Dashboard(dashboard)
            }
        };
    }

    fn run_effect(&self, effect: Effect) {
        let client = self.client.clone();
        match effect {
            Effect::FetchEntries => {
                self.spawn(async move { AppEvent::EntriesLoaded(client.list_entries().await) })
            }
            Effect::Save(request) => self.spawn(async move {
                let result = match request.id {
                    Some(id) => client.update_entry(id, &request.payload).await,
                    None => client.create_entry(&request.payload).await,
                };
                AppEvent::EntrySaved {
                    ticket: request.ticket,
                    result,
                }
            }),
            Effect::Delete(id) => self.spawn(async move {
                AppEvent::EntryDeleted {
                    id,
                    result: client.delete_entry(id).await,
                }
            }),
            Effect::FetchAnalysis { ticket } => self.spawn(async move {
                AppEvent::AnalysisLoaded {
                    ticket,
                    result: client.analysis().await,
                }
            }),
            Effect::EndConfirmation { ticket } => self.send_after(
                self.timings.confirmation,
                AppEvent::ConfirmationElapsed { ticket },
            ),
        }
    }

    fn run_effects(&self, effects: impl IntoIterator<Item = Effect>) {
        effects.into_iter().for_each(|effect| self.run_effect(effect));
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Navigate(route) => self.navigate(route),
            AppEvent::AuthFinished { kind, result } => {
                let Screen::Auth(form) = &mut self.screen else {
                    tracing::debug!(?kind, "auth result arrived after leaving the form");
                    return;
                };
                if form.kind() != kind {
                    tracing::debug!(?kind, "auth result arrived for the other form");
                    return;
                }
                if let Some(route) = form.finish(result) {
                    let delay = match kind {
                        AuthKind::Login => self.timings.login_redirect,
                        AuthKind::Register => self.timings.register_redirect,
                    };
                    self.send_after(delay, AppEvent::Navigate(route));
                }
            }
            other => {
                let Screen::Dashboard(dashboard) = &mut self.screen else {
                    tracing::debug!(event = ?other, "dashboard event dropped");
                    return;
                };
                let effects = match other {
                    AppEvent::EntriesLoaded(result) => {
                        dashboard.entries_loaded(result);
                        Vec::new()
                    }
                    AppEvent::EntrySaved { ticket, result } => dashboard.entry_saved(ticket, result),
                    AppEvent::EntryDeleted { id, result } => dashboard.entry_deleted(id, result),
                    AppEvent::ConfirmationElapsed { ticket } => {
                        vec![dashboard.confirmation_elapsed(ticket)]
                    }
                    AppEvent::AnalysisLoaded { ticket, result } => {
                        dashboard.analysis_loaded(ticket, result);
                        Vec::new()
                    }
                    AppEvent::Navigate(_) | AppEvent::AuthFinished { .. } => Vec::new(),
                };
                self.run_effects(effects);
            }
        }
    }

    pub fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row)
            }
            Event::Resize(width, height) => self.viewport = Rect::new(0, 0, width, height),
            _ => {}
        }
    }

    /// A click outside the analysis modal is a click on its backdrop.
    pub fn handle_click(&mut self, column: u16, row: u16) {
        let viewport = self.viewport;
        if let Screen::Dashboard(dashboard) = &mut self.screen {
            if dashboard.analysis().is_open() && !ui::contains(ui::modal_area(viewport), column, row)
            {
                dashboard.close_analysis();
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match &mut self.screen {
            Screen::Auth(_) => self.handle_auth_key(key),
            Screen::Dashboard(_) => self.handle_dashboard_key(key),
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        let Screen::Auth(form) = &mut self.screen else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::F(2) => {
                let other = match form.kind() {
                    AuthKind::Login => Route::Register,
                    AuthKind::Register => Route::Login,
                };
                self.navigate(other);
            }
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
            KeyCode::Enter => {
                let kind = form.kind();
                if let Some(submission) = form.begin_submit() {
                    let client = self.client.clone();
                    self.spawn(async move {
                        let result = match submission {
                            AuthSubmission::Login(request) => client.login(&request).await,
                            AuthSubmission::Register(request) => client.register(&request).await,
                        };
                        AppEvent::AuthFinished { kind, result }
                    });
                }
            }
            _ => {
                form.focused_input_mut().handle_key(key);
            }
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        let Screen::Dashboard(dashboard) = &mut self.screen else {
            return;
        };

        if let Some(prompt) = dashboard.prompt().cloned() {
            let effect = match (prompt, key.code) {
                (Prompt::ConfirmDelete(_), KeyCode::Char('y' | 'Y') | KeyCode::Enter) => {
                    dashboard.answer_delete(true)
                }
                (Prompt::ConfirmDelete(_), KeyCode::Char('n' | 'N') | KeyCode::Esc) => {
                    dashboard.answer_delete(false)
                }
                (Prompt::Alert(_), KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) => {
                    dashboard.dismiss_alert();
                    None
                }
                _ => None,
            };
            self.run_effects(effect);
            return;
        }

        if dashboard.analysis().is_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('x')) {
                dashboard.close_analysis();
            }
            return;
        }

        let effect = match dashboard.focus() {
            Focus::List => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    dashboard.entries_mut().select_previous();
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    dashboard.entries_mut().select_next();
                    None
                }
                KeyCode::Enter => {
                    dashboard.view_selected();
                    None
                }
                KeyCode::Char('e') => {
                    dashboard.edit_selected();
                    None
                }
                KeyCode::Char('d') => {
                    dashboard.request_delete_selected();
                    None
                }
                KeyCode::Char('n') => {
                    dashboard.new_entry();
                    None
                }
                KeyCode::Char('a') => Some(dashboard.open_analysis()),
                KeyCode::Char('r') => Some(dashboard.refresh()),
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    None
                }
                KeyCode::Tab => {
                    dashboard.set_focus(Focus::Editor);
                    None
                }
                _ => None,
            },
            Focus::Editor => Self::handle_editor_key(dashboard, key),
        };
        self.run_effects(effect);
    }

    fn handle_editor_key(dashboard: &mut Dashboard, key: KeyEvent) -> Option<Effect> {
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return dashboard.submit();
        }
        if key.code == KeyCode::Esc {
            dashboard.dismiss_editor();
            return None;
        }

        if let EditorState::View { .. } = dashboard.editor().state() {
            match key.code {
                KeyCode::Char('e') => dashboard.edit_current(),
                KeyCode::Char('d') => dashboard.request_delete_current(),
                KeyCode::Tab | KeyCode::BackTab => dashboard.set_focus(Focus::List),
                _ => {}
            }
            return None;
        }

        let Some(form) = dashboard.editor_mut().state_mut().writable_form_mut() else {
            return None;
        };
        match (form.focus(), key.code) {
            (_, KeyCode::Tab) => form.focus_next(),
            (_, KeyCode::BackTab) => form.focus_previous(),
            (EditorField::Title, KeyCode::Enter) => form.focus_next(),
            (EditorField::Mood, KeyCode::Right | KeyCode::Char(' ')) => form.next_mood(),
            (EditorField::Mood, KeyCode::Left) => form.previous_mood(),
            _ => {
                if let Some(input) = form.focused_input_mut() {
                    input.handle_key(key);
                }
            }
        }
        None
    }
}
