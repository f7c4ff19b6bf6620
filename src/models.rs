use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassLevel {
    #[serde(rename = "9")]
    Ninth,
    #[serde(rename = "10")]
    Tenth,
    #[serde(rename = "11")]
    Eleventh,
    #[serde(rename = "12")]
    Twelfth,
}

impl ClassLevel {
    pub const ALL: [ClassLevel; 4] = [
        ClassLevel::Ninth,
        ClassLevel::Tenth,
        ClassLevel::Eleventh,
        ClassLevel::Twelfth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLevel::Ninth => "9",
            ClassLevel::Tenth => "10",
            ClassLevel::Eleventh => "11",
            ClassLevel::Twelfth => "12",
        }
    }
}

impl fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClassLevel::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| anyhow::anyhow!("unknown class level '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    Physics,
    Chemistry,
    Mathematics,
    Biology,
    Science,
    #[serde(rename = "Social Science")]
    SocialScience,
    English,
}

impl Subject {
    pub const ALL: [Subject; 7] = [
        Subject::Physics,
        Subject::Chemistry,
        Subject::Mathematics,
        Subject::Biology,
        Subject::Science,
        Subject::SocialScience,
        Subject::English,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Mathematics => "Mathematics",
            Subject::Biology => "Biology",
            Subject::Science => "Science",
            Subject::SocialScience => "Social Science",
            Subject::English => "English",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|sub| sub.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("unknown subject '{}'", s))
    }
}

/// Where a topic sits in its chapter's progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicState {
    Locked,
    Unlocked,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
    pub is_unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<u32>,
}

impl Topic {
    pub fn new(id: impl Into<String>, title: impl Into<String>, is_unlocked: bool) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_completed: false,
            is_unlocked,
            quiz_score: None,
        }
    }

    pub fn state(&self) -> TopicState {
        if self.is_completed {
            TopicState::Completed
        } else if self.is_unlocked {
            TopicState::Unlocked
        } else {
            TopicState::Locked
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub subject: Subject,
    pub title: String,
    pub topics: Vec<Topic>,
}

impl Chapter {
    /// The topic the learner should be working on: first unlocked, not yet completed.
    pub fn current_topic(&self) -> Option<&Topic> {
        self.topics
            .iter()
            .find(|t| t.state() == TopicState::Unlocked)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub uid: String,
    pub name: String,
    pub class_level: ClassLevel,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub exam_date: Option<NaiveDate>,
    pub daily_study_hours: i32,
    #[serde(default)]
    pub streak: u32,
    #[serde(default)]
    pub onboarded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Planned,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Planned => "planned",
            SessionStatus::Completed => "completed",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SessionStatus::Planned => SessionStatus::Completed,
            SessionStatus::Completed => SessionStatus::Planned,
        }
    }
}

impl FromStr for SessionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(SessionStatus::Planned),
            "completed" => Ok(SessionStatus::Completed),
            other => Err(anyhow::anyhow!("unknown session status '{}'", other)),
        }
    }
}

pub const GENERATED_PREFIX: &str = "gen-";
pub const CUSTOM_PREFIX: &str = "custom-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub date: NaiveDate,
    pub subject: Subject,
    pub topic_title: String,
    pub duration_minutes: u32,
    pub status: SessionStatus,
}

impl StudySession {
    /// A learner-created session. The id is random and carries the custom prefix.
    pub fn custom(date: NaiveDate, subject: Subject, topic_title: impl Into<String>, duration_minutes: u32) -> Self {
        Self {
            id: format!("{}{}", CUSTOM_PREFIX, uuid::Uuid::new_v4()),
            date,
            subject,
            topic_title: topic_title.into(),
            duration_minutes,
            status: SessionStatus::Planned,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub subject: Subject,
    pub topic_title: String,
    pub score: u32,
    pub total: u32,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    /// Chosen option per question, `None` when skipped.
    #[serde(default)]
    pub user_answers: Vec<Option<usize>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubtRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub subject: Option<Subject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: String,
    pub subject: Subject,
    pub topic_title: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Everything the host keeps for one learner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyState {
    pub user: Option<Profile>,
    pub syllabus: Vec<Chapter>,
    pub sessions: Vec<StudySession>,
    pub quiz_history: Vec<QuizResult>,
    pub doubts: Vec<DoubtRecord>,
    pub notes: Vec<NoteRecord>,
}
