use crate::models::{QuizQuestion, QuizResult, Subject};
use crate::progression::is_pass;
use chrono::{DateTime, Utc};

/// Generated study material. Implementations usually call out to a language
/// model; the planner only consumes what they return.
pub trait ContentSource {
    fn generate_quiz(&self, subject: Subject, topic: &str, count: usize) -> anyhow::Result<Vec<QuizQuestion>>;

    fn solve_doubt(&self, question: &str, subject: Option<Subject>) -> anyhow::Result<String>;

    fn generate_notes(&self, subject: Subject, topic: &str) -> anyhow::Result<String>;
}

/// Number of answers that pick the correct option.
pub fn grade(questions: &[QuizQuestion], answers: &[Option<usize>]) -> u32 {
    questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| **a == Some(q.correct_answer))
        .count() as u32
}

impl QuizResult {
    pub fn graded(
        user_id: impl Into<String>,
        subject: Subject,
        topic_title: impl Into<String>,
        questions: Vec<QuizQuestion>,
        user_answers: Vec<Option<usize>>,
        date: DateTime<Utc>,
    ) -> Self {
        let score = grade(&questions, &user_answers);
        Self {
            id: date.timestamp_millis().to_string(),
            user_id: user_id.into(),
            date,
            subject,
            topic_title: topic_title.into(),
            score,
            total: questions.len() as u32,
            questions,
            user_answers,
        }
    }

    pub fn passed(&self) -> bool {
        is_pass(self.score, self.total)
    }

    /// Score as a rounded percentage.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.score as f64 * 100.0 / self.total as f64).round() as u32
    }
}

/// Generates a quiz and grades the learner's answers in one go.
pub fn take_quiz(
    source: &dyn ContentSource,
    user_id: &str,
    subject: Subject,
    topic: &str,
    count: usize,
    answer: impl Fn(&QuizQuestion) -> Option<usize>,
    now: DateTime<Utc>,
) -> anyhow::Result<QuizResult> {
    let questions = source.generate_quiz(subject, topic, count)?;
    if questions.is_empty() {
        anyhow::bail!("no questions generated for {} / {}", subject, topic);
    }
    let answers = questions.iter().map(&answer).collect();
    Ok(QuizResult::graded(user_id, subject, topic, questions, answers, now))
}
