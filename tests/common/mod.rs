#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mindful_journal::api::JournalClient;
use mindful_journal::app::{App, Route, Timings};
use mindful_journal::dashboard::Dashboard;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::MockServer;

pub fn spawn_app(server: &MockServer, start: Route) -> App {
    let client = JournalClient::new(&server.uri(), Duration::from_secs(5)).unwrap();
    App::new(client, Timings::immediate(), start)
}

/// Handles the next background completion, failing the test if none arrives.
pub async fn pump(app: &mut App) {
    let event = tokio::time::timeout(Duration::from_secs(5), app.next_event())
        .await
        .expect("timed out waiting for a background event")
        .expect("event channel closed");
    app.handle_app_event(event);
}

/// True when no background event shows up within a short grace period.
pub async fn is_idle(app: &mut App) -> bool {
    tokio::time::timeout(Duration::from_millis(200), app.next_event())
        .await
        .is_err()
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

pub fn dashboard(app: &App) -> &Dashboard {
    app.dashboard().expect("dashboard screen")
}

pub fn entry_json(id: i64, title: &str, content: &str, mood: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": content,
        "mood": mood,
        "sentiment_score": 0.6,
        "created_at": "2025-01-05 09:30:00"
    })
}
