use crate::models::{StudySession, StudyState};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Days before the exam that count as the final stretch.
pub const URGENT_DAYS: i64 = 30;
pub const HEATMAP_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub days: i64,
    pub is_expired: bool,
    pub is_today: bool,
    pub is_urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub count: usize,
    /// 0 idle, 1 single activity, 2 up to three, 3 busier.
    pub intensity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_topics: usize,
    pub completed_topics: usize,
    pub progress_percent: u32,
    pub countdown: Option<Countdown>,
    pub todays_sessions: Vec<StudySession>,
    pub activity: Vec<ActivityDay>,
    pub quiz_count: usize,
    pub doubt_count: usize,
    pub note_count: usize,
}

impl DashboardSummary {
    pub fn build(state: &StudyState, today: NaiveDate) -> Self {
        let total_topics: usize = state.syllabus.iter().map(|c| c.topics.len()).sum();
        let completed_topics: usize = state
            .syllabus
            .iter()
            .map(|c| c.topics.iter().filter(|t| t.is_completed).count())
            .sum();
        let progress_percent = if total_topics > 0 {
            (completed_topics as f64 * 100.0 / total_topics as f64).round() as u32
        } else {
            0
        };

        let countdown = state
            .user
            .as_ref()
            .and_then(|u| u.exam_date)
            .map(|exam| countdown(exam, today));

        let todays_sessions = state
            .sessions
            .iter()
            .filter(|s| s.date == today)
            .cloned()
            .collect();

        Self {
            total_topics,
            completed_topics,
            progress_percent,
            countdown,
            todays_sessions,
            activity: activity(state, today),
            quiz_count: state.quiz_history.len(),
            doubt_count: state.doubts.len(),
            note_count: state.notes.len(),
        }
    }
}

pub fn countdown(exam: NaiveDate, today: NaiveDate) -> Countdown {
    let diff = (exam - today).num_days();
    Countdown {
        days: diff.max(0),
        is_expired: diff < 0,
        is_today: diff == 0,
        is_urgent: diff > 0 && diff <= URGENT_DAYS,
    }
}

fn intensity(count: usize) -> u8 {
    match count {
        0 => 0,
        1 => 1,
        2..=3 => 2,
        _ => 3,
    }
}

/// Quizzes taken plus doubts asked per UTC day over the last week, oldest first.
fn activity(state: &StudyState, today: NaiveDate) -> Vec<ActivityDay> {
    (0..HEATMAP_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let quizzes = state
                .quiz_history
                .iter()
                .filter(|q| q.date.date_naive() == date)
                .count();
            let doubts = state
                .doubts
                .iter()
                .filter(|d| d.timestamp.date_naive() == date)
                .count();
            let count = quizzes + doubts;
            ActivityDay {
                date,
                count,
                intensity: intensity(count),
            }
        })
        .collect()
}
