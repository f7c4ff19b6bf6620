use crate::models::{Chapter, Profile, SessionStatus, StudySession, Subject, Topic, GENERATED_PREFIX};
use chrono::{Duration, NaiveDate};
use std::collections::VecDeque;

pub const DEFAULT_SESSION_MINUTES: u32 = 45;
pub const DEFAULT_HORIZON_DAYS: i64 = 30;
pub const MIN_DAILY_HOURS: i32 = 1;
pub const MAX_DAILY_HOURS: i32 = 24;
/// Longest fallback horizon accepted, about ten years.
pub const MAX_HORIZON_DAYS: i64 = 3650;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Length of one generated study session.
    pub session_minutes: u32,
    /// Shortest clipped session allowed to fill the tail of a partly used day.
    pub min_session_minutes: u32,
    /// Horizon used when the exam date is missing or already behind us.
    pub default_horizon_days: i64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            session_minutes: DEFAULT_SESSION_MINUTES,
            min_session_minutes: DEFAULT_SESSION_MINUTES,
            default_horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

/// Output of one scheduler run.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub sessions: Vec<StudySession>,
    /// Last calendar day inside the planning horizon.
    pub horizon_end: NaiveDate,
    /// Sessions that landed after `horizon_end`.
    pub spilled: usize,
}

/// Allocates pending topics to calendar days with the default configuration.
///
/// `syllabus` must already exclude completed work; topics are not re-filtered here.
pub fn generate_schedule(profile: &Profile, syllabus: &[Chapter], today: NaiveDate) -> Vec<StudySession> {
    SchedulerConfig::default().schedule(profile, syllabus, today).sessions
}

/// Number of candidate study days between `today` and the exam.
pub fn horizon_days(profile: &Profile, today: NaiveDate, default_days: i64) -> i64 {
    match profile.exam_date {
        Some(exam) if exam >= today => (exam - today).num_days().max(1),
        _ => default_days.clamp(1, MAX_HORIZON_DAYS),
    }
}

/// Minutes available per day. Hours outside `MIN_DAILY_HOURS..=MAX_DAILY_HOURS`
/// are clamped into that range.
pub fn daily_budget_minutes(profile: &Profile) -> u32 {
    let requested = profile.daily_study_hours;
    let hours = requested.clamp(MIN_DAILY_HOURS, MAX_DAILY_HOURS);
    if hours != requested {
        log::warn!(
            "daily_study_hours={} is not usable, scheduling with {}h/day",
            requested,
            hours
        );
    }

    hours.unsigned_abs() * 60
}

impl SchedulerConfig {
    pub fn schedule(&self, profile: &Profile, syllabus: &[Chapter], today: NaiveDate) -> Schedule {
        let budget = daily_budget_minutes(profile);
        let session_len = self.session_minutes.max(1);
        // A fresh day always accepts a session, so the loop below always progresses.
        let min_chunk = self.min_session_minutes.clamp(1, session_len).min(budget);

        let horizon = horizon_days(profile, today, self.default_horizon_days);
        let horizon_end = today + Duration::days(horizon - 1);

        let mut queues = subject_queues(syllabus);
        let mut pending: usize = queues.iter().map(|(_, q)| q.len()).sum();
        let mut sessions = Vec::with_capacity(pending);

        let mut day = today;
        let mut remaining = budget;
        let mut cursor = 0;

        while pending > 0 {
            let n = queues.len();
            let Some(idx) = (0..n).map(|o| (cursor + o) % n).find(|&i| !queues[i].1.is_empty()) else {
                break;
            };

            if remaining < min_chunk {
                day = day + Duration::days(1);
                remaining = budget;
                continue;
            }

            let (subject, queue) = &mut queues[idx];
            let Some(topic) = queue.pop_front() else {
                break;
            };

            let duration = session_len.min(remaining);
            sessions.push(StudySession {
                id: format!("{}{}-{}", GENERATED_PREFIX, topic.id, day),
                date: day,
                subject: *subject,
                topic_title: topic.title.clone(),
                duration_minutes: duration,
                status: SessionStatus::Planned,
            });

            remaining -= duration;
            pending -= 1;
            cursor = (idx + 1) % n;

            if remaining == 0 && pending > 0 {
                day = day + Duration::days(1);
                remaining = budget;
            }
        }

        let spilled = sessions.iter().filter(|s| s.date > horizon_end).count();
        if spilled > 0 {
            log::warn!(
                "{} session(s) spill past {} at {}h/day",
                spilled,
                horizon_end,
                budget / 60
            );
        }
        log::debug!(
            "Scheduled {} session(s) from {} across {} subject(s)",
            sessions.len(),
            today,
            queues.len()
        );

        Schedule {
            sessions,
            horizon_end,
            spilled,
        }
    }
}

/// One FIFO per subject, subjects in order of first appearance, topics in chapter order.
fn subject_queues(syllabus: &[Chapter]) -> Vec<(Subject, VecDeque<&Topic>)> {
    let mut queues: Vec<(Subject, VecDeque<&Topic>)> = Vec::new();

    for chapter in syllabus {
        let idx = match queues.iter().position(|(s, _)| *s == chapter.subject) {
            Some(i) => i,
            None => {
                queues.push((chapter.subject, VecDeque::new()));
                queues.len() - 1
            }
        };
        queues[idx].1.extend(chapter.topics.iter());
    }

    queues
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
