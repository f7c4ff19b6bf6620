//! Session list edits requested by the learner. None of these touch the scheduler.

use crate::models::StudySession;

/// Appends `session` unless a session with the same id already exists.
pub fn add_session(sessions: &[StudySession], session: StudySession) -> Vec<StudySession> {
    let mut updated = sessions.to_vec();
    if sessions.iter().any(|s| s.id == session.id) {
        log::debug!("Session {} already present, not adding", session.id);
    } else {
        updated.push(session);
    }
    updated
}

/// Replaces the session with the same id. Unknown ids leave the list unchanged.
pub fn update_session(sessions: &[StudySession], session: StudySession) -> Vec<StudySession> {
    sessions
        .iter()
        .map(|s| if s.id == session.id { session.clone() } else { s.clone() })
        .collect()
}

pub fn delete_session(sessions: &[StudySession], id: &str) -> Vec<StudySession> {
    sessions.iter().filter(|s| s.id != id).cloned().collect()
}

/// Flips planned/completed on the session with `id`.
pub fn toggle_status(sessions: &[StudySession], id: &str) -> Vec<StudySession> {
    sessions
        .iter()
        .map(|s| {
            let mut s = s.clone();
            if s.id == id {
                s.status = s.status.toggled();
            }
            s
        })
        .collect()
}
