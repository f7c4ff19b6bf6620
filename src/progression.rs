use crate::models::{Chapter, QuizResult};

/// Fraction of correct answers needed to pass a topic quiz.
pub const PASS_RATIO: f64 = 0.5;

/// Pass/fail for a raw score. A quiz with no questions never passes.
pub fn is_pass(score: u32, total: u32) -> bool {
    if total == 0 {
        return false;
    }
    score as f64 / total as f64 >= PASS_RATIO
}

/// Applies a quiz outcome to the syllabus and returns the updated copy.
///
/// Pass: the topic is completed and its immediate successor unlocked.
/// Fail: completion is left alone.
/// In both cases the latest score is recorded.
///
/// A result that names a subject or topic missing from the syllabus leaves it
/// unchanged.
pub fn apply_quiz_result(syllabus: &[Chapter], result: &QuizResult) -> Vec<Chapter> {
    let passed = is_pass(result.score, result.total);
    let mut updated = syllabus.to_vec();
    let mut matched = false;

    for chapter in updated.iter_mut().filter(|c| c.subject == result.subject) {
        let Some(idx) = chapter.topics.iter().position(|t| t.title == result.topic_title) else {
            continue;
        };
        matched = true;

        let topic = &mut chapter.topics[idx];
        topic.quiz_score = Some(result.score);
        if passed {
            topic.is_completed = true;
            if let Some(next) = chapter.topics.get_mut(idx + 1) {
                next.is_unlocked = true;
            }
        }
    }

    if matched {
        log::info!(
            "Quiz on {} / {}: {}/{} ({})",
            result.subject,
            result.topic_title,
            result.score,
            result.total,
            if passed { "pass" } else { "fail" }
        );
    } else {
        log::debug!(
            "Quiz result {} references {} / {} outside the syllabus, ignoring",
            result.id,
            result.subject,
            result.topic_title
        );
    }

    updated
}
