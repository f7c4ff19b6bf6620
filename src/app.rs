use crate::dashboard::DashboardSummary;
use crate::data::{build_syllabus, unique_subjects};
use crate::db::Db;
use crate::models::{DoubtRecord, NoteRecord, Profile, QuizResult, StudySession, StudyState};
use crate::planner::recalculate_with;
use crate::progression::apply_quiz_result;
use crate::scheduler::SchedulerConfig;
use crate::sessions;
use chrono::NaiveDate;

/// The host side of the planner: owns the learner's snapshot, runs the pure
/// planning operations on it and persists the result after every change.
pub struct App {
    pub db: Db,
    pub uid: String,
    pub scheduler: SchedulerConfig,
    pub state: StudyState,
}

impl App {
    pub async fn new(db: Db, uid: impl Into<String>, scheduler: SchedulerConfig) -> anyhow::Result<Self> {
        let uid = uid.into();
        let state = db.load(&uid).await?;

        Ok(Self {
            db,
            uid,
            scheduler,
            state,
        })
    }

    async fn commit(&mut self, state: StudyState) -> anyhow::Result<()> {
        self.db.save(&self.uid, &state).await?;
        self.state = state;
        Ok(())
    }

    fn profile(&self) -> anyhow::Result<&Profile> {
        self.state
            .user
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("learner {} has not onboarded yet", self.uid))
    }

    /// Builds the syllabus from the catalog and lays out the first plan.
    pub async fn complete_onboarding(&mut self, mut profile: Profile, today: NaiveDate) -> anyhow::Result<()> {
        profile.uid = self.uid.clone();
        profile.onboarded = true;
        profile.subjects = unique_subjects(&profile.subjects);

        let syllabus = build_syllabus(profile.class_level, &profile.subjects);
        let schedule = self.scheduler.schedule(&profile, &syllabus, today);

        log::info!(
            "Onboarded {} (class {}): {} chapter(s), {} session(s) through {}",
            self.uid,
            profile.class_level,
            syllabus.len(),
            schedule.sessions.len(),
            schedule.horizon_end
        );

        let state = StudyState {
            user: Some(profile),
            syllabus,
            sessions: schedule.sessions,
            ..self.state.clone()
        };
        self.commit(state).await
    }

    /// Stores the profile. A change of daily hours replans pending work.
    pub async fn update_profile(&mut self, mut profile: Profile, today: NaiveDate) -> anyhow::Result<()> {
        profile.uid = self.uid.clone();
        let hours_changed = self
            .state
            .user
            .as_ref()
            .map_or(true, |old| old.daily_study_hours != profile.daily_study_hours);

        let mut state = self.state.clone();
        if hours_changed {
            log::info!("Daily study hours now {}, recalculating", profile.daily_study_hours);
            state.sessions = recalculate_with(&self.scheduler, &profile, &state.syllabus, &state.sessions, today);
        }
        state.user = Some(profile);
        self.commit(state).await
    }

    pub async fn recalculate_plan(&mut self, today: NaiveDate) -> anyhow::Result<()> {
        let profile = self.profile()?;
        let sessions = recalculate_with(&self.scheduler, profile, &self.state.syllabus, &self.state.sessions, today);

        let state = StudyState {
            sessions,
            ..self.state.clone()
        };
        self.commit(state).await
    }

    /// Appends the result to history and advances topic progression.
    pub async fn record_quiz_result(&mut self, result: QuizResult) -> anyhow::Result<()> {
        let mut state = self.state.clone();
        state.syllabus = apply_quiz_result(&state.syllabus, &result);
        state.quiz_history.insert(0, result);
        self.commit(state).await
    }

    pub async fn add_session(&mut self, session: StudySession) -> anyhow::Result<()> {
        let mut state = self.state.clone();
        state.sessions = sessions::add_session(&state.sessions, session);
        self.commit(state).await
    }

    pub async fn update_session(&mut self, session: StudySession) -> anyhow::Result<()> {
        let mut state = self.state.clone();
        state.sessions = sessions::update_session(&state.sessions, session);
        self.commit(state).await
    }

    pub async fn delete_session(&mut self, id: &str) -> anyhow::Result<()> {
        let mut state = self.state.clone();
        state.sessions = sessions::delete_session(&state.sessions, id);
        self.commit(state).await
    }

    pub async fn toggle_session(&mut self, id: &str) -> anyhow::Result<()> {
        let mut state = self.state.clone();
        state.sessions = sessions::toggle_status(&state.sessions, id);
        self.commit(state).await
    }

    pub async fn add_doubt(&mut self, doubt: DoubtRecord) -> anyhow::Result<()> {
        let mut state = self.state.clone();
        state.doubts.insert(0, doubt);
        self.commit(state).await
    }

    pub async fn add_note(&mut self, note: NoteRecord) -> anyhow::Result<()> {
        let mut state = self.state.clone();
        state.notes.insert(0, note);
        self.commit(state).await
    }

    pub async fn delete_note(&mut self, id: &str) -> anyhow::Result<()> {
        let mut state = self.state.clone();
        state.notes.retain(|n| n.id != id);
        self.commit(state).await
    }

    pub fn dashboard(&self, today: NaiveDate) -> DashboardSummary {
        DashboardSummary::build(&self.state, today)
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
