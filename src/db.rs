use crate::models::{Profile, SessionStatus, StudySession, StudyState};
use anyhow::Context;
use chrono::NaiveDate;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    ConnectOptions, Pool, Row, Sqlite, Transaction,
};
use std::str::FromStr;

/// History tables holding one JSON payload per row, ordered by `position`.
const PAYLOAD_TABLES: [&str; 4] = ["chapters", "quiz_results", "doubts", "notes"];

impl<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow> for StudySession {
    fn from_row(row: &'r sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let date: NaiveDate = row.try_get("date")?;
        let subject: String = row.try_get("subject")?;
        let topic_title: String = row.try_get("topic_title")?;
        let duration_minutes: i64 = row.try_get("duration_minutes")?;
        let status: String = row.try_get("status")?;

        let decode = |e: anyhow::Error| sqlx::Error::Decode(e.into());

        Ok(StudySession {
            id,
            date,
            subject: subject.parse().map_err(decode)?,
            topic_title,
            duration_minutes: duration_minutes.max(0) as u32,
            status: status.parse::<SessionStatus>().map_err(decode)?,
        })
    }
}

#[derive(Clone)]
pub struct Db {
    pool: Pool<Sqlite>,
}

impl Db {
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url '{}'", url))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .log_statements(log::LevelFilter::Trace);

        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::with_pool(pool).await
    }

    /// Private in-memory database. Single connection so every query sees the same data.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?
            .log_statements(log::LevelFilter::Trace);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: Pool<Sqlite>) -> anyhow::Result<Self> {
        let db = Db { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                uid TEXT PRIMARY KEY,
                payload TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                uid TEXT NOT NULL,
                position INTEGER NOT NULL,
                id TEXT NOT NULL,
                date DATE NOT NULL,
                subject TEXT NOT NULL,
                topic_title TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'planned',
                PRIMARY KEY (uid, id)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        for table in PAYLOAD_TABLES {
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS {} (uid TEXT NOT NULL, position INTEGER NOT NULL, payload TEXT NOT NULL, PRIMARY KEY (uid, position))",
                table
            ))
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Loads the learner's snapshot. A learner with no rows gets an empty state.
    pub async fn load(&self, uid: &str) -> anyhow::Result<StudyState> {
        let profile: Option<String> = sqlx::query_scalar("SELECT payload FROM profiles WHERE uid = ?")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        let user = profile
            .map(|raw| serde_json::from_str::<Profile>(&raw))
            .transpose()
            .context("corrupt profile row")?;

        let sessions = sqlx::query_as::<_, StudySession>(
            "SELECT * FROM sessions WHERE uid = ? ORDER BY position ASC",
        )
        .bind(uid)
        .fetch_all(&self.pool)
        .await?;

        let state = StudyState {
            user,
            syllabus: self.load_payloads(uid, "chapters").await?,
            sessions,
            quiz_history: self.load_payloads(uid, "quiz_results").await?,
            doubts: self.load_payloads(uid, "doubts").await?,
            notes: self.load_payloads(uid, "notes").await?,
        };

        log::debug!(
            "Loaded state for {}: {} chapter(s), {} session(s)",
            uid,
            state.syllabus.len(),
            state.sessions.len()
        );
        Ok(state)
    }

    async fn load_payloads<T: DeserializeOwned>(&self, uid: &str, table: &str) -> anyhow::Result<Vec<T>> {
        let rows: Vec<String> = sqlx::query_scalar(&format!(
            "SELECT payload FROM {} WHERE uid = ? ORDER BY position ASC",
            table
        ))
        .bind(uid)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|raw| serde_json::from_str(raw).with_context(|| format!("corrupt row in {}", table)))
            .collect()
    }

    /// Replaces everything stored for `uid` with `state` in one transaction.
    pub async fn save(&self, uid: &str, state: &StudyState) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM profiles WHERE uid = ?")
            .bind(uid)
            .execute(&mut *tx)
            .await?;
        if let Some(user) = &state.user {
            sqlx::query("INSERT INTO profiles (uid, payload) VALUES (?, ?)")
                .bind(uid)
                .bind(serde_json::to_string(user)?)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM sessions WHERE uid = ?")
            .bind(uid)
            .execute(&mut *tx)
            .await?;
        for (position, session) in state.sessions.iter().enumerate() {
            sqlx::query(
                "INSERT OR REPLACE INTO sessions (uid, position, id, date, subject, topic_title, duration_minutes, status) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(uid)
            .bind(position as i64)
            .bind(&session.id)
            .bind(session.date)
            .bind(session.subject.as_str())
            .bind(&session.topic_title)
            .bind(session.duration_minutes as i64)
            .bind(session.status.as_str())
            .execute(&mut *tx)
            .await?;
        }

        replace_payloads(&mut tx, uid, "chapters", &state.syllabus).await?;
        replace_payloads(&mut tx, uid, "quiz_results", &state.quiz_history).await?;
        replace_payloads(&mut tx, uid, "doubts", &state.doubts).await?;
        replace_payloads(&mut tx, uid, "notes", &state.notes).await?;

        tx.commit().await?;

        log::debug!("Saved state for {}", uid);
        Ok(())
    }
}

async fn replace_payloads<T: Serialize>(
    tx: &mut Transaction<'_, Sqlite>,
    uid: &str,
    table: &str,
    items: &[T],
) -> anyhow::Result<()> {
    sqlx::query(&format!("DELETE FROM {} WHERE uid = ?", table))
        .bind(uid)
        .execute(&mut **tx)
        .await?;

    for (position, item) in items.iter().enumerate() {
        sqlx::query(&format!(
            "INSERT INTO {} (uid, position, payload) VALUES (?, ?, ?)",
            table
        ))
        .bind(uid)
        .bind(position as i64)
        .bind(serde_json::to_string(item)?)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::build_syllabus;
    use crate::models::{ClassLevel, Subject};
    use crate::scheduler::generate_schedule;

    fn sample_state() -> StudyState {
        let profile = Profile {
            uid: "u1".to_string(),
            name: "Asha".to_string(),
            class_level: ClassLevel::Tenth,
            subjects: vec![Subject::Science, Subject::English],
            exam_date: NaiveDate::from_ymd_opt(2027, 3, 1),
            daily_study_hours: 2,
            streak: 4,
            onboarded: true,
        };
        let syllabus = build_syllabus(profile.class_level, &profile.subjects);
        let mut sessions = generate_schedule(&profile, &syllabus, NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
        sessions[1].status = SessionStatus::Completed;

        StudyState {
            user: Some(profile),
            syllabus,
            sessions,
            ..StudyState::default()
        }
    }

    #[tokio::test]
    async fn test_save_then_load_restores_state() {
        let db = Db::in_memory().await.unwrap();
        let state = sample_state();

        db.save("u1", &state).await.unwrap();
        let loaded = db.load("u1").await.unwrap();

        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let db = Db::in_memory().await.unwrap();
        let mut state = sample_state();
        db.save("u1", &state).await.unwrap();

        state.sessions.truncate(2);
        state.syllabus.pop();
        db.save("u1", &state).await.unwrap();

        let loaded = db.load("u1").await.unwrap();
        assert_eq!(loaded.sessions.len(), 2);
        assert_eq!(loaded.syllabus.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_is_empty() {
        let db = Db::in_memory().await.unwrap();
        db.save("u1", &sample_state()).await.unwrap();

        assert_eq!(db.load("someone-else").await.unwrap(), StudyState::default());
    }
}
