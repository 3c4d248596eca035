// src/infrastructure/repositories/postgres_audit_log.rs
use super::map_sqlx;
use crate::domain::{
    audit::{
        AuditLog, AuditLogFilter, AuditLogRepository, AuditTransaction, NewAuditLog, PageRequest,
        Redacted, ResourceId,
    },
    errors::{DomainError, DomainResult},
    user::UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{
    FromRow, PgPool, Postgres, QueryBuilder, Transaction, postgres::PgArguments, query::QueryAs,
};

// JSON (not JSONB) columns keep object keys in insertion order; snapshots
// travel as text in both directions.
const INSERT_SQL: &str = "WITH inserted AS (
        INSERT INTO audit_logs
            (user_id, action, resource_type, resource_id, before, after, metadata, created_at)
        VALUES ($1, $2, $3, $4, $5::json, $6::json, $7::json, $8)
        RETURNING *
    )
    SELECT i.id, i.user_id, u.name AS actor_name, i.action, i.resource_type, i.resource_id,
           i.before::text AS before, i.after::text AS after, i.metadata::text AS metadata,
           i.created_at
    FROM inserted i
    LEFT JOIN users u ON u.id = i.user_id";

const SELECT_SQL: &str = "SELECT a.id, a.user_id, u.name AS actor_name, a.action, a.resource_type,
           a.resource_id, a.before::text AS before, a.after::text AS after,
           a.metadata::text AS metadata, a.created_at
    FROM audit_logs a
    LEFT JOIN users u ON u.id = a.user_id";

const COUNT_SQL: &str = "SELECT COUNT(*) FROM audit_logs a";

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    user_id: Option<i64>,
    actor_name: Option<String>,
    action: String,
    resource_type: String,
    resource_id: Option<String>,
    before: Option<String>,
    after: Option<String>,
    metadata: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLog {
    type Error = DomainError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        Ok(AuditLog {
            id: row.id,
            user_id: row.user_id.map(UserId::new).transpose()?,
            actor_name: row.actor_name,
            action: row.action,
            resource_type: row.resource_type,
            resource_id: row.resource_id.map(ResourceId::from),
            before: decode_json(row.before)?,
            after: decode_json(row.after)?,
            metadata: decode_json(row.metadata)?,
            created_at: row.created_at,
        })
    }
}

fn decode_json(raw: Option<String>) -> DomainResult<Option<Value>> {
    raw.map(|text| serde_json::from_str(&text))
        .transpose()
        .map_err(|err| DomainError::Persistence(format!("corrupt audit snapshot: {err}")))
}

fn encode_json(value: Option<&Redacted>) -> DomainResult<Option<String>> {
    value
        .map(|v| serde_json::to_string(v.as_value()))
        .transpose()
        .map_err(|err| DomainError::Persistence(format!("failed to encode audit snapshot: {err}")))
}

fn insert_query(
    log: &NewAuditLog,
) -> DomainResult<QueryAs<'static, Postgres, AuditLogRow, PgArguments>> {
    Ok(sqlx::query_as::<_, AuditLogRow>(INSERT_SQL)
        .bind(log.user_id.map(i64::from))
        .bind(log.action.clone())
        .bind(log.resource_type.clone())
        .bind(log.resource_id.clone().map(String::from))
        .bind(encode_json(log.before.as_ref())?)
        .bind(encode_json(log.after.as_ref())?)
        .bind(encode_json(log.metadata.as_ref())?)
        .bind(log.created_at))
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &AuditLogFilter) {
    builder.push(" WHERE TRUE");
    if let Some(user_id) = filter.user_id {
        builder.push(" AND a.user_id = ").push_bind(i64::from(user_id));
    }
    if let Some(action) = &filter.action {
        builder
            .push(" AND a.action ILIKE ")
            .push_bind(format!("%{}%", escape_like(action)));
    }
    if let Some(resource_type) = &filter.resource_type {
        builder
            .push(" AND a.resource_type = ")
            .push_bind(resource_type.clone());
    }
    if let Some(resource_id) = &filter.resource_id {
        builder
            .push(" AND a.resource_id = ")
            .push_bind(resource_id.as_str().to_owned());
    }
    if let Some(from) = filter.created_from {
        builder.push(" AND a.created_at >= ").push_bind(from);
    }
    if let Some(until) = filter.created_until {
        builder.push(" AND a.created_at <= ").push_bind(until);
    }
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<AuditLog> {
        let row = insert_query(&log)?
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;
        AuditLog::try_from(row)
    }

    async fn search(
        &self,
        filter: &AuditLogFilter,
        page: PageRequest,
    ) -> DomainResult<(Vec<AuditLog>, u64)> {
        let mut count_query: QueryBuilder<Postgres> = QueryBuilder::new(COUNT_SQL);
        push_filters(&mut count_query, filter);

        let mut rows_query: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_SQL);
        push_filters(&mut rows_query, filter);
        rows_query
            .push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ")
            .push_bind(i64::from(page.page_size()))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let (total, rows) = tokio::try_join!(
            count_query.build_query_scalar::<i64>().fetch_one(&self.pool),
            rows_query.build_query_as::<AuditLogRow>().fetch_all(&self.pool),
        )
        .map_err(map_sqlx)?;

        let items = rows
            .into_iter()
            .map(AuditLog::try_from)
            .collect::<DomainResult<Vec<_>>>()?;
        Ok((items, u64::try_from(total).unwrap_or(0)))
    }
}

/// Audit inserts issued on an open transaction commit or roll back with it.
#[async_trait]
impl<'c> AuditTransaction for Transaction<'c, Postgres> {
    async fn insert_audit_log(&mut self, log: NewAuditLog) -> DomainResult<()> {
        insert_query(&log)?
            .fetch_one(&mut **self)
            .await
            .map_err(map_sqlx)?;
        Ok(())
    }
}
