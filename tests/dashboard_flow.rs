use crossterm::event::KeyCode;
use mindful_journal::analysis::AnalysisView;
use mindful_journal::app::Route;
use mindful_journal::dashboard::{AnalysisPanel, Focus, Prompt};
use mindful_journal::editor::EditorState;
use ratatui::layout::Rect;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::*;

async fn mount_entries_once(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .up_to_n_times(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_entry_adds_one_and_hides_editor() {
    let server = MockServer::start().await;
    mount_entries_once(&server, json!([entry_json(1, "First", "Hello", "happy")])).await;
    mount_entries_once(
        &server,
        json!([
            entry_json(2, "", "A calm day", ""),
            entry_json(1, "First", "Hello", "happy")
        ]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/entries"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"title": "", "content": "A calm day", "mood": ""})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"success": true, "response": "Glad to hear it."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    pump(&mut app).await;
    let before = dashboard(&app).entries().len();
    assert_eq!(before, 1);

    app.handle_key(key(KeyCode::Char('n')));
    assert!(matches!(dashboard(&app).editor().state(), EditorState::Create(_)));
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "A calm day");
    app.handle_key(ctrl('s'));

    // Second submit while the first is in flight is ignored.
    app.handle_key(ctrl('s'));

    pump(&mut app).await;
    let confirmation = dashboard(&app).editor().confirmation().expect("confirmation shown");
    assert_eq!(confirmation.text, "Glad to hear it.");

    pump(&mut app).await;
    assert_eq!(dashboard(&app).editor().state(), &EditorState::Hidden);
    assert_eq!(dashboard(&app).focus(), Focus::List);

    pump(&mut app).await;
    assert_eq!(dashboard(&app).entries().len(), before + 1);
}

#[tokio::test]
async fn test_edit_entry_puts_and_leaves_edit_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entries"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([entry_json(1, "First", "Original.", "happy")])),
        )
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/entries/1"))
        .and(body_json(
            json!({"title": "First", "content": "Original. More.", "mood": "happy"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Entry updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    pump(&mut app).await;

    app.handle_key(key(KeyCode::Char('e')));
    assert!(matches!(
        dashboard(&app).editor().state(),
        EditorState::Edit { id: 1, .. }
    ));
    type_text(&mut app, " More.");
    app.handle_key(ctrl('s'));

    pump(&mut app).await;
    assert_eq!(
        dashboard(&app).editor().confirmation().map(|c| c.text.as_str()),
        Some("Entry updated")
    );

    pump(&mut app).await;
    let state = dashboard(&app).editor().state();
    assert!(matches!(state, EditorState::Create(_)));
    assert_eq!(state.heading(), "New Entry");

    pump(&mut app).await;
    assert_eq!(dashboard(&app).entries().len(), 1);
}

#[tokio::test]
async fn test_whitespace_content_is_rejected_without_request() {
    let server = MockServer::start().await;
    mount_entries_once(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/entries"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    pump(&mut app).await;

    app.handle_key(key(KeyCode::Char('n')));
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "   ");
    app.handle_key(ctrl('s'));

    assert_eq!(
        dashboard(&app).prompt(),
        Some(&Prompt::Alert("Please write something in your entry.".into()))
    );
    assert!(is_idle(&mut app).await);

    app.handle_key(key(KeyCode::Enter));
    assert!(dashboard(&app).prompt().is_none());
    assert!(matches!(dashboard(&app).editor().state(), EditorState::Create(_)));
}

#[tokio::test]
async fn test_failed_save_alerts_and_keeps_form() {
    let server = MockServer::start().await;
    mount_entries_once(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/api/entries"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    pump(&mut app).await;

    app.handle_key(key(KeyCode::Char('n')));
    app.handle_key(key(KeyCode::Tab));
    type_text(&mut app, "keep this");
    app.handle_key(ctrl('s'));
    pump(&mut app).await;

    assert_eq!(
        dashboard(&app).prompt(),
        Some(&Prompt::Alert("Error saving entry. Please try again.".into()))
    );
    let form = dashboard(&app).editor().state().form().unwrap();
    assert_eq!(form.content.value(), "keep this");
    assert!(dashboard(&app).entries().is_empty());
}

#[tokio::test]
async fn test_deleting_viewed_entry_hides_editor() {
    let server = MockServer::start().await;
    mount_entries_once(
        &server,
        json!([entry_json(1, "One", "a", ""), entry_json(2, "Two", "b", "")]),
    )
    .await;
    mount_entries_once(&server, json!([entry_json(2, "Two", "b", "")])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/entries/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    pump(&mut app).await;

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(dashboard(&app).editor().current_entry_id(), Some(1));
    assert!(dashboard(&app).editor().state().is_read_only());

    app.handle_key(key(KeyCode::Char('d')));
    assert_eq!(dashboard(&app).prompt(), Some(&Prompt::ConfirmDelete(1)));
    app.handle_key(key(KeyCode::Char('y')));

    pump(&mut app).await;
    assert_eq!(dashboard(&app).editor().state(), &EditorState::Hidden);

    pump(&mut app).await;
    assert_eq!(dashboard(&app).entries().len(), 1);
}

#[tokio::test]
async fn test_deleting_other_entry_keeps_editor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            entry_json(1, "One", "a", ""),
            entry_json(2, "Two", "b", "")
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/entries/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    pump(&mut app).await;

    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(dashboard(&app).editor().current_entry_id(), Some(2));

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(dashboard(&app).focus(), Focus::List);
    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Char('d')));
    app.handle_key(key(KeyCode::Char('y')));

    pump(&mut app).await;
    assert_eq!(dashboard(&app).editor().current_entry_id(), Some(2));
    assert!(dashboard(&app).editor().state().is_read_only());
    pump(&mut app).await;
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let server = MockServer::start().await;
    mount_entries_once(&server, json!([entry_json(1, "One", "a", "")])).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    pump(&mut app).await;

    app.handle_key(key(KeyCode::Char('d')));
    app.handle_key(key(KeyCode::Char('n')));
    assert!(dashboard(&app).prompt().is_none());
    assert!(is_idle(&mut app).await);
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_list() {
    let server = MockServer::start().await;
    mount_entries_once(&server, json!([entry_json(1, "One", "a", "")])).await;
    Mock::given(method("GET"))
        .and(path("/api/entries"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    pump(&mut app).await;

    app.handle_key(key(KeyCode::Char('r')));
    pump(&mut app).await;
    assert_eq!(dashboard(&app).entries().len(), 1);
    assert!(dashboard(&app).prompt().is_none());
}

#[tokio::test]
async fn test_analysis_empty_state_and_backdrop_click() {
    let server = MockServer::start().await;
    mount_entries_once(&server, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/analysis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_entries": 0,
            "avg_sentiment": 0.9,
            "mood_distribution": [{"mood": "happy", "count": 2}],
            "sentiment_trends": []
        })))
        .expect(2)
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    app.set_viewport(Rect::new(0, 0, 100, 50));
    pump(&mut app).await;

    app.handle_key(key(KeyCode::Char('a')));
    assert!(matches!(dashboard(&app).analysis(), AnalysisPanel::Loading { .. }));
    pump(&mut app).await;
    assert_eq!(
        dashboard(&app).analysis(),
        &AnalysisPanel::Ready(AnalysisView::Empty)
    );

    app.handle_click(50, 25);
    assert!(dashboard(&app).analysis().is_open());
    app.handle_click(0, 0);
    assert!(!dashboard(&app).analysis().is_open());

    // Reopening fetches again.
    app.handle_key(key(KeyCode::Char('a')));
    pump(&mut app).await;
    app.handle_key(key(KeyCode::Esc));
    assert!(!dashboard(&app).analysis().is_open());
}

#[tokio::test]
async fn test_analysis_report_and_failure() {
    let server = MockServer::start().await;
    mount_entries_once(&server, json!([])).await;
    Mock::given(method("GET"))
        .and(path("/api/analysis"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_entries": 4,
            "avg_sentiment": 0.3,
            "mood_distribution": [{"mood": "tired", "count": 4}],
            "sentiment_trends": [{"entry_date": "2025-01-04", "avg_sentiment": 0.3, "entry_count": 4}]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/analysis"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let mut app = spawn_app(&server, Route::Dashboard);
    pump(&mut app).await;

    app.handle_key(key(KeyCode::Char('a')));
    pump(&mut app).await;
    let AnalysisPanel::Ready(AnalysisView::Report(report)) = dashboard(&app).analysis() else {
        panic!("expected a report, got {:?}", dashboard(&app).analysis());
    };
    assert_eq!(report.sentiment_percent, 30);
    assert_eq!(report.sentiment_description, "Neutral 😐");
    assert_eq!(report.moods, vec!["😴 tired: 4 entries"]);
    assert_eq!(report.trends, vec!["Jan 4: 30% (4 entries)"]);

    app.handle_key(key(KeyCode::Char('x')));
    app.handle_key(key(KeyCode::Char('a')));
    pump(&mut app).await;
    assert_eq!(dashboard(&app).analysis(), &AnalysisPanel::Failed);
}
