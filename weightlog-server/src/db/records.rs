//! Record repository
//!
//! Every operation is a single statement against the borrowed connection.
//! Duplicate dates are detected from the UNIQUE constraint (no
//! check-then-insert).

use sqlx::SqliteConnection;

use super::DbError;
use crate::models::{DailyRecord, NewRecord};

const SELECT_RECORD: &str = "SELECT id, date, weight, COALESCE(memo, '') AS memo FROM daily_records";

/// Record repository over one checked-out connection
pub struct RecordRepo<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> RecordRepo<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// All records, oldest date first.
    pub async fn list_all(&mut self) -> Result<Vec<DailyRecord>, DbError> {
        let records = sqlx::query_as::<_, DailyRecord>(&format!("{SELECT_RECORD} ORDER BY date ASC"))
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(records)
    }

    /// Fetch one record by id.
    pub async fn get_by_id(&mut self, id: i64) -> Result<DailyRecord, DbError> {
        sqlx::query_as::<_, DailyRecord>(&format!("{SELECT_RECORD} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?
            .ok_or(DbError::NotFound { id })
    }

    /// Insert a record and return it with its assigned id.
    pub async fn insert(&mut self, record: &NewRecord) -> Result<DailyRecord, DbError> {
        let result = sqlx::query("INSERT INTO daily_records (date, weight, memo) VALUES (?, ?, ?)")
            .bind(record.date)
            .bind(record.weight)
            .bind(&record.memo)
            .execute(&mut *self.conn)
            .await
            .map_err(|e| DbError::from_write(e, record.date))?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, date = %record.date, "record inserted");

        Ok(DailyRecord {
            id,
            date: record.date,
            weight: record.weight,
            memo: record.memo.clone(),
        })
    }

    /// Overwrite every field of record `id`.
    ///
    /// Keeping a record's own date is not a conflict; taking another
    /// record's date is [`DbError::DuplicateDate`].
    pub async fn update(&mut self, id: i64, record: &NewRecord) -> Result<DailyRecord, DbError> {
        let result =
            sqlx::query("UPDATE daily_records SET date = ?, weight = ?, memo = ? WHERE id = ?")
                .bind(record.date)
                .bind(record.weight)
                .bind(&record.memo)
                .bind(id)
                .execute(&mut *self.conn)
                .await
                .map_err(|e| DbError::from_write(e, record.date))?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound { id });
        }
        tracing::debug!(id, date = %record.date, "record updated");

        Ok(DailyRecord {
            id,
            date: record.date,
            weight: record.weight,
            memo: record.memo.clone(),
        })
    }

    /// Number of stored records.
    pub async fn count(&mut self) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM daily_records")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    async fn test_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("weight.db")).await.unwrap();
        (dir, db)
    }

    fn new_record(date: &str, weight: f64, memo: &str) -> NewRecord {
        NewRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            weight,
            memo: memo.to_owned(),
        }
    }

    #[tokio::test]
    async fn round_trip_through_get_by_id() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = RecordRepo::new(&mut conn);

        let created = repo.insert(&new_record("2024-01-01", 70.5, "morning")).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(fetched.weight, 70.5);
        assert_eq!(fetched.memo, "morning");
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn empty_memo_reads_back_as_empty_string() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = RecordRepo::new(&mut conn);

        let created = repo.insert(&new_record("2024-01-02", 71.0, "")).await.unwrap();
        assert_eq!(repo.get_by_id(created.id).await.unwrap().memo, "");
    }

    #[tokio::test]
    async fn null_memo_reads_back_as_empty_string() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();

        sqlx::query("INSERT INTO daily_records (date, weight, memo) VALUES ('2024-01-05', 69.0, NULL)")
            .execute(&mut *conn)
            .await
            .unwrap();

        let records = RecordRepo::new(&mut conn).list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].memo, "");
    }

    #[tokio::test]
    async fn list_is_ordered_by_date() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = RecordRepo::new(&mut conn);

        repo.insert(&new_record("2024-01-10", 70.0, "")).await.unwrap();
        repo.insert(&new_record("2023-12-31", 71.0, "")).await.unwrap();
        repo.insert(&new_record("2024-01-05", 70.5, "")).await.unwrap();

        let dates: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2023-12-31", "2024-01-05", "2024-01-10"]);
    }

    #[tokio::test]
    async fn ids_increase() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = RecordRepo::new(&mut conn);

        let a = repo.insert(&new_record("2024-02-01", 70.0, "")).await.unwrap();
        let b = repo.insert(&new_record("2024-01-01", 70.0, "")).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn duplicate_date_insert_is_rejected() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = RecordRepo::new(&mut conn);

        repo.insert(&new_record("2024-01-01", 70.5, "morning")).await.unwrap();
        let err = repo.insert(&new_record("2024-01-01", 69.0, "evening")).await.unwrap_err();

        assert!(matches!(err, DbError::DuplicateDate { date } if date.to_string() == "2024-01-01"));
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.list_all().await.unwrap()[0].memo, "morning");
    }

    #[tokio::test]
    async fn update_to_other_records_date_is_rejected() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = RecordRepo::new(&mut conn);

        repo.insert(&new_record("2024-01-01", 70.0, "")).await.unwrap();
        let second = repo.insert(&new_record("2024-01-02", 71.0, "")).await.unwrap();

        let err = repo
            .update(second.id, &new_record("2024-01-01", 72.0, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicateDate { .. }));

        let unchanged = repo.get_by_id(second.id).await.unwrap();
        assert_eq!(unchanged.date.to_string(), "2024-01-02");
        assert_eq!(unchanged.weight, 71.0);
    }

    #[tokio::test]
    async fn update_keeping_own_date_succeeds() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = RecordRepo::new(&mut conn);

        let rec = repo.insert(&new_record("2024-01-01", 70.0, "")).await.unwrap();
        let updated = repo
            .update(rec.id, &new_record("2024-01-01", 69.4, "after run"))
            .await
            .unwrap();

        assert_eq!(updated.id, rec.id);
        let fetched = repo.get_by_id(rec.id).await.unwrap();
        assert_eq!(fetched.weight, 69.4);
        assert_eq!(fetched.memo, "after run");
    }

    #[tokio::test]
    async fn update_can_move_to_free_date() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = RecordRepo::new(&mut conn);

        let rec = repo.insert(&new_record("2024-01-01", 70.0, "")).await.unwrap();
        repo.update(rec.id, &new_record("2024-01-09", 70.0, "")).await.unwrap();

        assert_eq!(repo.get_by_id(rec.id).await.unwrap().date.to_string(), "2024-01-09");
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let (_dir, db) = test_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = RecordRepo::new(&mut conn);

        assert!(matches!(repo.get_by_id(42).await, Err(DbError::NotFound { id: 42 })));
        assert!(matches!(
            repo.update(42, &new_record("2024-01-01", 70.0, "")).await,
            Err(DbError::NotFound { id: 42 })
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
