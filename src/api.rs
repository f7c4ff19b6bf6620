use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use crate::app::App;
use crate::data::subjects_for;
use crate::models::{ClassLevel, DoubtRecord, NoteRecord, Profile, QuizResult, StudySession};

#[derive(Clone)]
pub struct ApiState {
    pub app: Arc<Mutex<App>>,
}

pub fn app_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/catalog/:class", get(get_catalog))
        .route("/api/onboarding", post(onboard))
        .route("/api/profile", put(update_profile))
        .route("/api/quiz-results", post(record_quiz_result))
        .route("/api/recalculate", post(recalculate))
        .route("/api/sessions", post(add_session))
        .route("/api/sessions/:id", put(update_session).delete(delete_session))
        .route("/api/sessions/:id/toggle", post(toggle_session))
        .route("/api/doubts", post(add_doubt))
        .route("/api/notes", post(add_note))
        .route("/api/notes/:id", delete(delete_note))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Calendar day in UTC, the same clock quiz and doubt timestamps are bucketed by.
fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Answers with the fresh snapshot, or a 500 carrying the error text.
fn respond(app: &App, result: anyhow::Result<()>) -> Response {
    match result {
        Ok(()) => Json(app.state.clone()).into_response(),
        Err(e) => {
            log::error!("Request failed: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

async fn get_state(State(state): State<ApiState>) -> impl IntoResponse {
    let app = state.app.lock().await;
    Json(app.state.clone())
}

async fn get_dashboard(State(state): State<ApiState>) -> impl IntoResponse {
    let app = state.app.lock().await;
    Json(app.dashboard(today()))
}

async fn get_catalog(Path(class): Path<String>) -> Response {
    match class.parse::<ClassLevel>() {
        Ok(class) => Json(subjects_for(class)).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

#[derive(Deserialize)]
struct OnboardingRequest {
    profile: Profile,
}

async fn onboard(State(state): State<ApiState>, Json(payload): Json<OnboardingRequest>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.complete_onboarding(payload.profile, today()).await;
    respond(&app, result)
}

async fn update_profile(State(state): State<ApiState>, Json(profile): Json<Profile>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.update_profile(profile, today()).await;
    respond(&app, result)
}

async fn record_quiz_result(State(state): State<ApiState>, Json(result): Json<QuizResult>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.record_quiz_result(result).await;
    respond(&app, result)
}

async fn recalculate(State(state): State<ApiState>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.recalculate_plan(today()).await;
    respond(&app, result)
}

async fn add_session(State(state): State<ApiState>, Json(session): Json<StudySession>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.add_session(session).await;
    respond(&app, result)
}

async fn update_session(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(mut session): Json<StudySession>,
) -> Response {
    session.id = id;
    let mut app = state.app.lock().await;
    let result = app.update_session(session).await;
    respond(&app, result)
}

async fn delete_session(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.delete_session(&id).await;
    respond(&app, result)
}

async fn toggle_session(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.toggle_session(&id).await;
    respond(&app, result)
}

async fn add_doubt(State(state): State<ApiState>, Json(doubt): Json<DoubtRecord>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.add_doubt(doubt).await;
    respond(&app, result)
}

async fn add_note(State(state): State<ApiState>, Json(note): Json<NoteRecord>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.add_note(note).await;
    respond(&app, result)
}

async fn delete_note(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    let mut app = state.app.lock().await;
    let result = app.delete_note(&id).await;
    respond(&app, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Db;
    use crate::models::{StudyState, Subject};
    use crate::scheduler::SchedulerConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn test_state() -> ApiState {
        let db = Db::in_memory().await.unwrap();
        let app = App::new(db, "learner", SchedulerConfig::default()).await.unwrap();
        ApiState {
            app: Arc::new(Mutex::new(app)),
        }
    }

    async fn send(state: &ApiState, method: &str, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn onboarding_body() -> serde_json::Value {
        serde_json::json!({
            "profile": {
                "uid": "ignored",
                "name": "Asha",
                "classLevel": "10",
                "subjects": ["Science", "Social Science"],
                "examDate": "2027-03-01",
                "dailyStudyHours": 3
            }
        })
    }

    #[tokio::test]
    async fn test_onboarding_then_toggle() {
        let state = test_state().await;

        let (status, body) = send(&state, "POST", "/api/onboarding", Some(onboarding_body())).await;
        assert_eq!(status, StatusCode::OK);
        let snapshot: StudyState = serde_json::from_slice(&body).unwrap();
        assert_eq!(snapshot.syllabus.len(), 2);
        assert!(!snapshot.sessions.is_empty());
        assert_eq!(snapshot.syllabus[1].subject, Subject::SocialScience);

        let id = snapshot.sessions[0].id.clone();
        let (status, body) = send(&state, "POST", &format!("/api/sessions/{}/toggle", id), None).await;
        assert_eq!(status, StatusCode::OK);
        let snapshot: StudyState = serde_json::from_slice(&body).unwrap();
        assert!(snapshot.sessions[0].is_completed());
    }

    #[tokio::test]
    async fn test_recalculate_before_onboarding_fails() {
        let state = test_state().await;

        let (status, _) = send(&state, "POST", "/api/recalculate", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_catalog_lookup() {
        let state = test_state().await;

        let (status, body) = send(&state, "GET", "/api/catalog/11", None).await;
        assert_eq!(status, StatusCode::OK);
        let subjects: Vec<Subject> = serde_json::from_slice(&body).unwrap();
        assert!(subjects.contains(&Subject::Physics));

        let (status, _) = send(&state, "GET", "/api/catalog/7", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_after_onboarding() {
        let state = test_state().await;
        send(&state, "POST", "/api/onboarding", Some(onboarding_body())).await;

        let (status, body) = send(&state, "GET", "/api/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        let summary: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(summary["completedTopics"], 0);
        assert_eq!(summary["totalTopics"], 23);
    }

    #[tokio::test]
    async fn test_quiz_taken_now_lands_in_todays_heatmap_cell() {
        let state = test_state().await;
        send(&state, "POST", "/api/onboarding", Some(onboarding_body())).await;

        let result = QuizResult {
            id: "q1".to_string(),
            user_id: "learner".to_string(),
            date: Utc::now(),
            subject: Subject::Science,
            topic_title: "Matter in Our Surroundings".to_string(),
            score: 4,
            total: 5,
            questions: Vec::new(),
            user_answers: Vec::new(),
        };
        let (status, _) = send(&state, "POST", "/api/quiz-results", Some(serde_json::to_value(&result).unwrap())).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&state, "GET", "/api/dashboard", None).await;
        let summary: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let cells = summary["activity"].as_array().unwrap();
        let last = cells.last().unwrap();
        assert_eq!(last["date"], serde_json::json!(today()));
        assert_eq!(last["count"], 1);
    }
}
