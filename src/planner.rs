use crate::models::{Chapter, Profile, StudySession, Subject};
use crate::scheduler::SchedulerConfig;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Replans pending work with the default scheduler configuration.
pub fn recalculate(
    profile: &Profile,
    syllabus: &[Chapter],
    sessions: &[StudySession],
    today: NaiveDate,
) -> Vec<StudySession> {
    recalculate_with(&SchedulerConfig::default(), profile, syllabus, sessions, today)
}

/// Keeps every completed session verbatim and regenerates the rest of the plan
/// from the topics those sessions do not cover.
pub fn recalculate_with(
    config: &SchedulerConfig,
    profile: &Profile,
    syllabus: &[Chapter],
    sessions: &[StudySession],
    today: NaiveDate,
) -> Vec<StudySession> {
    let completed: Vec<StudySession> = sessions.iter().filter(|s| s.is_completed()).cloned().collect();

    let done: HashSet<(Subject, &str)> = completed
        .iter()
        .map(|s| (s.subject, s.topic_title.as_str()))
        .collect();

    let remaining = prune_syllabus(syllabus, &done);
    let fresh = config.schedule(profile, &remaining, today).sessions;

    log::info!(
        "Recalculated plan: kept {} completed, discarded {}, generated {}",
        completed.len(),
        sessions.len() - completed.len(),
        fresh.len()
    );

    let mut taken: HashSet<String> = completed.iter().map(|s| s.id.clone()).collect();
    let mut plan = completed;
    for mut session in fresh {
        if taken.contains(&session.id) {
            let base = session.id.clone();
            let mut n = 1;
            while taken.contains(&session.id) {
                session.id = format!("{}-{}", base, n);
                n += 1;
            }
        }
        taken.insert(session.id.clone());
        plan.push(session);
    }

    plan
}

/// Drops topics whose `(subject, title)` is already covered.
pub fn prune_syllabus(syllabus: &[Chapter], done: &HashSet<(Subject, &str)>) -> Vec<Chapter> {
    syllabus
        .iter()
        .map(|chapter| Chapter {
            topics: chapter
                .topics
                .iter()
                .filter(|t| !done.contains(&(chapter.subject, t.title.as_str())))
                .cloned()
                .collect(),
            ..chapter.clone()
        })
        .collect()
}
