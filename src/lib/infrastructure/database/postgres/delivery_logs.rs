//! Postgres implementation of the DeliveryLogRepository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{
    domain::mail::delivery_log::{
        errors::{CreateLogEntryError, ListDeliveryLogError, UpdateLogEntryError},
        DeliveryLogEntry, DeliveryLogRepository, NewDeliveryLogEntry,
    },
    infrastructure::database::postgres::PostgresDatabase,
};

#[derive(FromRow)]
struct DeliveryLogRecord {
    id: Uuid,
    to_address: String,
    subject: String,
    name: String,
    body: String,
    is_sent: bool,
    viewed: bool,
    created_at: DateTime<Utc>,
}

impl From<DeliveryLogRecord> for DeliveryLogEntry {
    fn from(record: DeliveryLogRecord) -> Self {
        DeliveryLogEntry {
            id: record.id,
            to: record.to_address,
            subject: record.subject,
            name: record.name,
            body: record.body,
            is_sent: record.is_sent,
            viewed: record.viewed,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl DeliveryLogRepository for PostgresDatabase {
    #[mutants::skip]
    async fn create(&self, entry: &NewDeliveryLogEntry) -> Result<Uuid, CreateLogEntryError> {
        sqlx::query(
            r#"
            INSERT INTO delivery_logs (id, to_address, subject, name, body)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(entry.id)
        .bind(entry.to.to_string())
        .bind(&entry.subject)
        .bind(&entry.name)
        .bind(&entry.body)
        .execute(&self.pool)
        .await?;

        Ok(entry.id)
    }

    #[mutants::skip]
    async fn set_sent(&self, id: &Uuid, is_sent: bool) -> Result<(), UpdateLogEntryError> {
        let result = sqlx::query(
            r#"
            UPDATE delivery_logs
            SET is_sent = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(is_sent)
        .execute(&self.pool)
        .await
        .map_err(|err| UpdateLogEntryError::UnknownError(err.into()))?;

        if result.rows_affected() == 0 {
            return Err(UpdateLogEntryError::EntryNotFound(*id));
        }

        Ok(())
    }

    #[mutants::skip]
    async fn mark_viewed(&self, id: &Uuid) -> Result<(), UpdateLogEntryError> {
        let result = sqlx::query(
            r#"
            UPDATE delivery_logs
            SET viewed = TRUE
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|err| UpdateLogEntryError::UnknownError(err.into()))?;

        if result.rows_affected() == 0 {
            return Err(UpdateLogEntryError::EntryNotFound(*id));
        }

        Ok(())
    }

    #[mutants::skip]
    async fn list(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<DeliveryLogEntry>, ListDeliveryLogError> {
        let records = sqlx::query_as::<_, DeliveryLogRecord>(
            r#"
            SELECT id, to_address, subject, name, body, is_sent, viewed, created_at
            FROM delivery_logs
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;

        Ok(records.into_iter().map(DeliveryLogEntry::from).collect())
    }

    #[mutants::skip]
    async fn count(&self) -> Result<i64, ListDeliveryLogError> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM delivery_logs")
                .fetch_one(&self.pool)
                .await?,
        )
    }
}
