use crate::analysis::{AnalysisView, EMPTY_PROMPT, LOAD_FAILED, TREND_HEADING};
use crate::app::{App, Screen};
use crate::auth::{AuthForm, AuthKind, MessageKind};
use crate::dashboard::{AnalysisPanel, Dashboard, Focus, Prompt, DELETE_CONFIRMATION};
use crate::editor::{EditorField, EditorState, EntryForm};
use crate::input::TextInput;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const EMPTY_LIST: &str = "No entries yet. Create your first entry!";
const WELCOME: &str = "Welcome to your journal. Press n to write a new entry, or pick one from the list.";

pub fn render(f: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Auth(form) => render_auth(f, form),
        Screen::Dashboard(dashboard) => render_dashboard(f, dashboard),
    }
}

fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn hints(spans: &[(&str, &str)]) -> Line<'static> {
    let mut line = Vec::new();
    for (i, (key, action)) in spans.iter().enumerate() {
        if i > 0 {
            line.push(Span::raw(", "));
        }
        line.push(Span::styled(
            key.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        line.push(Span::raw(format!(" {action}")));
    }
    Line::from(line)
}

fn input_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border)
}

/// Puts the terminal cursor on the input's cursor, scrolled into view.
fn place_cursor(f: &mut Frame, input: &TextInput, area: Rect, scroll: u16) {
    let (row, column) = input.cursor_cell();
    let x = area.x + 1 + column.min(area.width.saturating_sub(3));
    let y = area.y + 1 + row.saturating_sub(scroll);
    f.set_cursor_position((x, y));
}

fn scroll_for(input: &TextInput, area: Rect) -> u16 {
    let (row, _) = input.cursor_cell();
    let visible = area.height.saturating_sub(2).max(1);
    row.saturating_sub(visible - 1)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Area of the analysis modal for a given screen; everything else is backdrop.
pub fn modal_area(area: Rect) -> Rect {
    centered_rect(70, 80, area)
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn render_auth(f: &mut Frame, form: &AuthForm) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(f.area());

    let mut constraints = vec![Constraint::Length(3)];
    constraints.extend(form.fields().iter().map(|_| Constraint::Length(3)));
    constraints.extend([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ]);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(columns[1]);

    let title = Paragraph::new(form.kind().title())
        .style(title_style())
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    for (i, field) in form.fields().iter().enumerate() {
        let area = chunks[i + 1];
        let input = form.input(*field);
        let focused = form.focus() == *field;
        let widget = Paragraph::new(input.display()).block(input_block(field.label(), focused));
        f.render_widget(widget, area);
        if focused {
            place_cursor(f, input, area, 0);
        }
    }

    let message_area = chunks[form.fields().len() + 1];
    if let Some(message) = form.message() {
        let color = match message.kind {
            MessageKind::Success => Color::Green,
            MessageKind::Error => Color::Red,
        };
        let paragraph = Paragraph::new(message.text.clone())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, message_area);
    } else if form.is_submitting() {
        let paragraph = Paragraph::new("Please wait...")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, message_area);
    }

    let switch = match form.kind() {
        AuthKind::Login => "create an account",
        AuthKind::Register => "go to login",
    };
    let controls = Paragraph::new(hints(&[
        ("Tab", "next field"),
        ("Enter", "submit"),
        ("F2", switch),
        ("Esc", "quit"),
    ]))
    .style(Style::default().fg(Color::Yellow))
    .alignment(Alignment::Center);
    f.render_widget(controls, chunks[chunks.len() - 1]);
}

pub fn render_dashboard(f: &mut Frame, dashboard: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new("Mindful Journal")
        .style(title_style())
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[1]);

    render_entry_list(f, dashboard, panes[0]);
    render_editor(f, dashboard, panes[1]);

    let controls = Paragraph::new(dashboard_hints(dashboard))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(controls, chunks[2]);

    if dashboard.analysis().is_open() {
        render_analysis(f, dashboard.analysis());
    }
    if let Some(prompt) = dashboard.prompt() {
        render_prompt(f, prompt);
    }
}

fn dashboard_hints(dashboard: &Dashboard) -> Line<'static> {
    if let Some(prompt) = dashboard.prompt() {
        return match prompt {
            Prompt::ConfirmDelete(_) => hints(&[("y", "delete"), ("n", "keep")]),
            Prompt::Alert(_) => hints(&[("Enter", "dismiss")]),
        };
    }
    if dashboard.analysis().is_open() {
        return hints(&[("Esc", "close"), ("click outside", "close")]);
    }

    match (dashboard.focus(), dashboard.editor().state()) {
        (Focus::List, _) => hints(&[
            ("n", "new entry"),
            ("Enter", "view"),
            ("e", "edit"),
            ("d", "delete"),
            ("a", "analysis"),
            ("r", "refresh"),
            ("q", "quit"),
        ]),
        (Focus::Editor, EditorState::View { .. }) => {
            hints(&[("e", "edit"), ("d", "delete"), ("Esc", "close")])
        }
        (Focus::Editor, EditorState::Edit { .. }) => hints(&[
            ("Tab", "next field"),
            ("Ctrl-S", "save"),
            ("Esc", "cancel"),
        ]),
        (Focus::Editor, _) => hints(&[
            ("Tab", "next field"),
            ("Ctrl-S", "save"),
            ("Esc", "back to list"),
        ]),
    }
}

fn render_entry_list(f: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let focused = dashboard.focus() == Focus::List;
    let block = input_block("Entries", focused);
    let state = dashboard.entries();

    if state.is_empty() {
        let placeholder = Paragraph::new(EMPTY_LIST)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let active = dashboard.editor().current_entry_id();
    let items: Vec<ListItem> = state
        .get_entries()
        .iter()
        .map(|entry| {
            let mut row_style = Style::default().add_modifier(Modifier::BOLD);
            if Some(entry.id) == active {
                row_style = row_style.fg(Color::Cyan);
            }
            if dashboard.is_deleting(entry.id) {
                row_style = row_style.add_modifier(Modifier::DIM);
            }
            ListItem::new(vec![
                Line::from(Span::styled(entry.display_title().to_string(), row_style)),
                Line::from(Span::styled(
                    entry.display_date(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    f.render_stateful_widget(
        list,
        area,
        &mut ListState::default().with_selected(state.selected_index()),
    );
}

fn render_editor(f: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let session = dashboard.editor();
    let state = session.state();
    let focused = dashboard.focus() == Focus::Editor;

    let Some(form) = state.form() else {
        let welcome = Paragraph::new(WELCOME)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Journal"));
        f.render_widget(welcome, area);
        return;
    };

    let confirmation_height = if session.confirmation().is_some() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(confirmation_height),
            Constraint::Length(1),
        ])
        .split(area);

    let heading = Paragraph::new(state.heading().to_string()).style(title_style());
    f.render_widget(heading, chunks[0]);

    let read_only = state.is_read_only();
    let text_style = if read_only {
        Style::default().fg(Color::Gray)
    } else {
        Style::default()
    };
    let field_focused = |field: EditorField| focused && !read_only && form.focus() == field;

    let title = Paragraph::new(form.title.value().to_string())
        .style(text_style)
        .block(input_block("Title (optional)", field_focused(EditorField::Title)));
    f.render_widget(title, chunks[1]);

    let scroll = scroll_for(&form.content, chunks[2]);
    let content = Paragraph::new(form.content.value().to_string())
        .style(text_style)
        .scroll((scroll, 0))
        .block(input_block("Content", field_focused(EditorField::Content)));
    f.render_widget(content, chunks[2]);

    let mood = Paragraph::new(mood_label(form))
        .style(text_style)
        .block(input_block("Mood (←/→ to change)", field_focused(EditorField::Mood)));
    f.render_widget(mood, chunks[3]);

    if let Some(confirmation) = session.confirmation() {
        let panel = Paragraph::new(confirmation.text.clone())
            .style(Style::default().fg(Color::Green))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("💚 Message for You")
                    .border_style(Style::default().fg(Color::Green)),
            );
        f.render_widget(panel, chunks[4]);
    }

    let status = if session.is_saving() {
        Span::styled("Saving...", Style::default().fg(Color::DarkGray))
    } else if let Some(label) = state.dismiss_label() {
        Span::styled(
            format!("[Esc] {label}"),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw("")
    };
    f.render_widget(Paragraph::new(Line::from(status)), chunks[5]);

    if let Some(EditorField::Title) = field_focus(state, focused) {
        place_cursor(f, &form.title, chunks[1], 0);
    } else if let Some(EditorField::Content) = field_focus(state, focused) {
        place_cursor(f, &form.content, chunks[2], scroll);
    }
}

fn field_focus(state: &EditorState, focused: bool) -> Option<EditorField> {
    match state {
        EditorState::Create(form) | EditorState::Edit { form, .. } if focused => Some(form.focus()),
        _ => None,
    }
}

fn mood_label(form: &EntryForm) -> String {
    match form.mood() {
        "" => "Select mood (optional)".to_string(),
        mood => format!("{} {}", crate::analysis::mood_emoji(Some(mood)), mood),
    }
}

pub fn analysis_text(panel: &AnalysisPanel) -> Text<'static> {
    let muted = Style::default().fg(Color::DarkGray);
    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let lines = match panel {
        AnalysisPanel::Closed => Vec::new(),
        AnalysisPanel::Loading { .. } => vec![Line::styled("Loading...", muted)],
        AnalysisPanel::Failed => vec![Line::styled(LOAD_FAILED, Style::default().fg(Color::Red))],
        AnalysisPanel::Ready(AnalysisView::Empty) => vec![Line::styled(EMPTY_PROMPT, muted)],
        AnalysisPanel::Ready(AnalysisView::Report(report)) => {
            let mut lines = vec![
                Line::styled("Total Entries", heading),
                Line::from(report.total_entries.to_string()),
                Line::from(""),
                Line::styled("Average Sentiment", heading),
                Line::from(format!("{}%", report.sentiment_percent)),
                Line::styled(report.sentiment_description, muted),
            ];
            if !report.moods.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::styled("Mood Distribution", heading));
                lines.extend(report.moods.iter().cloned().map(Line::from));
            }
            if !report.trends.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::styled(TREND_HEADING, heading));
                lines.extend(report.trends.iter().cloned().map(Line::from));
            }
            lines
        }
    };
    Text::from(lines)
}

fn render_analysis(f: &mut Frame, panel: &AnalysisPanel) {
    let area = modal_area(f.area());
    let alignment = match panel {
        AnalysisPanel::Ready(AnalysisView::Report(_)) => Alignment::Left,
        _ => Alignment::Center,
    };
    let paragraph = Paragraph::new(analysis_text(panel))
        .alignment(alignment)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Your Insights")
                .title_bottom(Line::from(" [x] close ").alignment(Alignment::Right))
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn render_prompt(f: &mut Frame, prompt: &Prompt) {
    let area = centered_rect(50, 30, f.area());
    let (title, text, color) = match prompt {
        Prompt::ConfirmDelete(_) => (
            "Delete entry",
            format!("{DELETE_CONFIRMATION}\n\n[y] yes   [n] no"),
            Color::Red,
        ),
        Prompt::Alert(message) => (
            "Notice",
            format!("{message}\n\n[Enter] OK"),
            Color::Yellow,
        ),
    };
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(color)),
        );
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}
