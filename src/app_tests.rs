use super::*;
use crate::models::{ClassLevel, SessionStatus, Subject, TopicState};
use chrono::Utc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
}

fn profile(hours: i32) -> Profile {
    Profile {
        uid: String::new(),
        name: "Asha".to_string(),
        class_level: ClassLevel::Twelfth,
        subjects: vec![Subject::Physics, Subject::Mathematics, Subject::Physics],
        exam_date: NaiveDate::from_ymd_opt(2027, 3, 1),
        daily_study_hours: hours,
        streak: 0,
        onboarded: false,
    }
}

fn quiz(subject: Subject, topic: &str, score: u32) -> QuizResult {
    QuizResult {
        id: format!("quiz-{}-{}", topic, score),
        user_id: "learner".to_string(),
        date: Utc::now(),
        subject,
        topic_title: topic.to_string(),
        score,
        total: 5,
        questions: Vec::new(),
        user_answers: Vec::new(),
    }
}

async fn onboarded_app() -> App {
    let db = Db::in_memory().await.unwrap();
    let mut app = App::new(db, "learner", SchedulerConfig::default()).await.unwrap();
    app.complete_onboarding(profile(2), today()).await.unwrap();
    app
}

#[tokio::test]
async fn test_onboarding_builds_syllabus_and_plan() {
    let app = onboarded_app().await;
    let user = app.state.user.as_ref().unwrap();

    assert!(user.onboarded);
    assert_eq!(user.uid, "learner");
    assert_eq!(user.subjects, vec![Subject::Physics, Subject::Mathematics]);
    assert_eq!(app.state.syllabus.len(), 2);

    let total_topics: usize = app.state.syllabus.iter().map(|c| c.topics.len()).sum();
    assert_eq!(app.state.sessions.len(), total_topics);
    assert_eq!(app.state.sessions[0].date, today());
    assert_eq!(app.state.sessions[0].subject, Subject::Physics);
    assert_eq!(app.state.sessions[1].subject, Subject::Mathematics);
}

#[tokio::test]
async fn test_state_survives_reload() {
    let app = onboarded_app().await;
    let db = app.db.clone();

    let reloaded = App::new(db, "learner", SchedulerConfig::default()).await.unwrap();

    assert_eq!(reloaded.state, app.state);
}

#[tokio::test]
async fn test_quiz_then_recalculate_flow() {
    let mut app = onboarded_app().await;
    let first = app.state.syllabus[0].topics[0].title.clone();
    let second = app.state.syllabus[0].topics[1].title.clone();

    app.record_quiz_result(quiz(Subject::Physics, &first, 4)).await.unwrap();
    assert_eq!(app.state.syllabus[0].topics[0].state(), TopicState::Completed);
    assert_eq!(app.state.syllabus[0].topics[1].state(), TopicState::Unlocked);
    assert_eq!(app.state.quiz_history.len(), 1);
    assert_eq!(app.state.syllabus[0].current_topic().map(|t| t.title.clone()), Some(second.clone()));

    let done_id = app.state.sessions[0].id.clone();
    app.toggle_session(&done_id).await.unwrap();
    let completed = app.state.sessions[0].clone();
    assert_eq!(completed.status, SessionStatus::Completed);

    let later = NaiveDate::from_ymd_opt(2026, 11, 5).unwrap();
    app.recalculate_plan(later).await.unwrap();

    assert_eq!(app.state.sessions[0], completed);
    let pending = &app.state.sessions[1..];
    assert!(pending.iter().all(|s| s.date >= later));
    assert!(!pending.iter().any(|s| s.topic_title == first && s.subject == Subject::Physics));
    assert!(pending.iter().any(|s| s.topic_title == second));
}

#[tokio::test]
async fn test_changing_hours_triggers_recalculation() {
    let mut app = onboarded_app().await;
    let before_last = app.state.sessions.last().unwrap().date;

    let mut faster = app.state.user.clone().unwrap();
    faster.daily_study_hours = 6;
    app.update_profile(faster, today()).await.unwrap();

    assert_eq!(app.state.user.as_ref().unwrap().daily_study_hours, 6);
    assert!(app.state.sessions.last().unwrap().date < before_last);

    let mut renamed = app.state.user.clone().unwrap();
    renamed.name = "Asha K".to_string();
    let sessions = app.state.sessions.clone();
    app.update_profile(renamed, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap()).await.unwrap();
    assert_eq!(app.state.sessions, sessions);
}

#[tokio::test]
async fn test_recalculate_requires_profile() {
    let db = Db::in_memory().await.unwrap();
    let mut app = App::new(db, "nobody", SchedulerConfig::default()).await.unwrap();

    assert!(app.recalculate_plan(today()).await.is_err());
}

#[tokio::test]
async fn test_session_edits_and_history() {
    let mut app = onboarded_app().await;
    let count = app.state.sessions.len();

    let custom = StudySession::custom(today(), Subject::Mathematics, "Sample paper", 90);
    app.add_session(custom.clone()).await.unwrap();
    assert_eq!(app.state.sessions.len(), count + 1);

    let mut edited = custom.clone();
    edited.duration_minutes = 60;
    app.update_session(edited).await.unwrap();
    assert_eq!(app.state.sessions.last().unwrap().duration_minutes, 60);

    app.delete_session(&custom.id).await.unwrap();
    assert_eq!(app.state.sessions.len(), count);

    let note = NoteRecord {
        id: "n1".to_string(),
        subject: Subject::Physics,
        topic_title: "Atoms".to_string(),
        content: "Bohr model".to_string(),
        timestamp: Utc::now(),
    };
    app.add_note(note).await.unwrap();
    app.add_doubt(DoubtRecord {
        id: "d1".to_string(),
        question: "What is a photon?".to_string(),
        answer: "A quantum of light.".to_string(),
        timestamp: Utc::now(),
        subject: Some(Subject::Physics),
    })
    .await
    .unwrap();

    let summary = app.dashboard(today());
    assert_eq!(summary.note_count, 1);
    assert_eq!(summary.doubt_count, 1);

    app.delete_note("n1").await.unwrap();
    assert!(app.state.notes.is_empty());
}
