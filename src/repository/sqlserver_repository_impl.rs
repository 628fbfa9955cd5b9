use crate::common::*;

use crate::dto::result_table::*;
use crate::errors::report_error::*;
use crate::model::{configs::rdb_config::*, report::report_definition::*};
use crate::traits::repository_traits::sqlserver_repository::*;

#[doc = r#"
    Opens SQL Server sessions for report runs.

    Each session owns a fresh single-connection pool, so closing one session
    never affects the next `acquire` on the same repository.
"#]
pub struct SqlServerRepositoryImpl {
    rdb_config: RdbConfig,
    target: String,
}

impl SqlServerRepositoryImpl {
    #[doc = r#"
        Checks that a pool can be built for the configured server.
        Nothing is dialled here; the first connection is opened by `acquire`.
    "#]
    pub fn new(rdb_config: &RdbConfig) -> Result<Self, anyhow::Error> {
        build_pool(rdb_config)?.close();

        Ok(SqlServerRepositoryImpl {
            rdb_config: rdb_config.clone(),
            target: rdb_config.target(),
        })
    }

    #[doc = "A session over its own not-yet-dialled pool"]
    fn open_session(&self) -> Result<SqlServerSession, anyhow::Error> {
        Ok(SqlServerSession {
            pool: build_pool(&self.rdb_config)?,
            target: self.target.clone(),
        })
    }
}

fn build_pool(rdb_config: &RdbConfig) -> Result<Pool, anyhow::Error> {
    let mut manager: Manager = Manager::new()
        .host(rdb_config.host())
        .port(*rdb_config.port())
        .database(rdb_config.database())
        .max_size(1);

    manager = match rdb_config.auth() {
        RdbAuth::Sql => manager.basic_authentication(
            rdb_config.user().as_deref().unwrap_or_default(),
            rdb_config.password().as_deref().unwrap_or_default(),
        ),
        RdbAuth::Integrated => manager.authentication(integrated_auth()?),
    };

    if *rdb_config.trust_cert() {
        manager = manager.trust_cert();
    }

    manager.create_pool().map_err(|e| {
        anyhow!(
            "[SqlServerRepositoryImpl->build_pool] failed to build the connection pool for {}: {}",
            rdb_config.target(),
            e
        )
    })
}

#[cfg(windows)]
fn integrated_auth() -> anyhow::Result<AuthMethod> {
    Ok(AuthMethod::Integrated)
}

#[cfg(not(windows))]
fn integrated_auth() -> anyhow::Result<AuthMethod> {
    Err(anyhow!(
        "[SqlServerRepositoryImpl->new] integrated (trusted) authentication is only available on Windows; set sqlserver.auth = \"sql\""
    ))
}

#[async_trait]
impl SqlServerRepository for SqlServerRepositoryImpl {
    type Session = SqlServerSession;

    async fn acquire(&self, def: &ReportDefinition) -> Result<SqlServerSession, ReportError> {
        info!("[{}] connecting to SQL Server at {}", def.id(), self.target);

        let session: SqlServerSession =
            self.open_session().map_err(|e| ReportError::Connection {
                report: def.id().to_string(),
                target: self.target.clone(),
                reason: format!("{:#}", e),
            })?;

        /* Dial now so an unreachable server fails before the query step */
        let conn = session.pool.get().await.map_err(|e| ReportError::Connection {
            report: def.id().to_string(),
            target: self.target.clone(),
            reason: e.to_string(),
        })?;
        drop(conn);

        Ok(session)
    }
}

#[doc = "The acquired connection. Dropping it closes the session's own pool and with it the TCP session."]
pub struct SqlServerSession {
    pool: Pool,
    target: String,
}

#[async_trait]
impl ReportSession for SqlServerSession {
    async fn fetch_table(&mut self, def: &ReportDefinition) -> Result<ResultTable, ReportError> {
        let query_err = |e: tiberius::error::Error| ReportError::Query {
            report: def.id().to_string(),
            query: def.query().to_string(),
            reason: e.to_string(),
        };

        let mut conn = self.pool.get().await.map_err(|e| ReportError::Connection {
            report: def.id().to_string(),
            target: self.target.clone(),
            reason: e.to_string(),
        })?;

        info!("[{}] executing `{}`", def.id(), def.query());

        let mut stream = conn.simple_query(def.query()).await.map_err(query_err)?;

        let columns: Vec<String> = stream
            .columns()
            .await
            .map_err(query_err)?
            .map(|cols| cols.iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();

        let rows: Vec<tiberius::Row> = stream.into_first_result().await.map_err(query_err)?;

        let rows: Vec<Vec<CellValue>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(cell_from_column_data).collect())
            .collect();

        info!(
            "[{}] fetched {} rows, columns: {}",
            def.id(),
            rows.len(),
            columns.join(", ")
        );

        Ok(ResultTable::new(columns, rows))
    }
}

impl Drop for SqlServerSession {
    fn drop(&mut self) {
        self.pool.close();
        info!("SQL Server connection to {} released", self.target);
    }
}

#[doc = "Converts one TDS column value into a result cell"]
fn cell_from_column_data(data: ColumnData<'static>) -> CellValue {
    match &data {
        ColumnData::U8(v) => v.map_or(CellValue::Null, |v| CellValue::Int(i64::from(v))),
        ColumnData::I16(v) => v.map_or(CellValue::Null, |v| CellValue::Int(i64::from(v))),
        ColumnData::I32(v) => v.map_or(CellValue::Null, |v| CellValue::Int(i64::from(v))),
        ColumnData::I64(v) => v.map_or(CellValue::Null, CellValue::Int),
        ColumnData::F32(v) => v.map_or(CellValue::Null, |v| CellValue::Float(f64::from(v))),
        ColumnData::F64(v) => v.map_or(CellValue::Null, CellValue::Float),
        ColumnData::Bit(v) => v.map_or(CellValue::Null, CellValue::Bool),
        ColumnData::Numeric(v) => v.map_or(CellValue::Null, |n| CellValue::Float(f64::from(n))),
        ColumnData::String(v) => v
            .as_ref()
            .map_or(CellValue::Null, |s| CellValue::Text(s.to_string())),
        ColumnData::Date(_) => NaiveDate::from_sql(&data)
            .ok()
            .flatten()
            .map_or(CellValue::Null, CellValue::Date),
        ColumnData::DateTime(_) | ColumnData::SmallDateTime(_) | ColumnData::DateTime2(_) => {
            NaiveDateTime::from_sql(&data)
                .ok()
                .flatten()
                .map_or(CellValue::Null, CellValue::DateTime)
        }
        ColumnData::DateTimeOffset(_) => chrono::DateTime::<chrono::Utc>::from_sql(&data)
            .ok()
            .flatten()
            .map_or(CellValue::Null, |dt| CellValue::DateTime(dt.naive_utc())),
        other => CellValue::Text(format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use tiberius::IntoSql;

    #[test]
    fn converts_scalar_column_data() {
        assert_eq!(cell_from_column_data(ColumnData::I32(Some(7))), CellValue::Int(7));
        assert_eq!(cell_from_column_data(ColumnData::I64(None)), CellValue::Null);
        assert_eq!(cell_from_column_data(ColumnData::F64(Some(1.5))), CellValue::Float(1.5));
        assert_eq!(cell_from_column_data(ColumnData::Bit(Some(true))), CellValue::Bool(true));
        assert_eq!(
            cell_from_column_data(ColumnData::String(Some(Cow::Borrowed("2023-01")))),
            CellValue::Text("2023-01".to_string())
        );
    }

    fn sql_auth_config() -> RdbConfig {
        toml::from_str::<RdbConfig>(
            r#"
            host = "127.0.0.1"
            auth = "sql"
            user = "report_reader"
            password = "secret"
            "#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn closing_a_session_leaves_the_repository_usable() {
        let repo: SqlServerRepositoryImpl = SqlServerRepositoryImpl::new(&sql_auth_config()).unwrap();

        let first: SqlServerSession = repo.open_session().unwrap();
        let first_pool: Pool = first.pool.clone();
        drop(first);
        assert!(first_pool.is_closed());

        let second: SqlServerSession = repo.open_session().unwrap();
        assert!(!second.pool.is_closed());
    }

    #[test]
    fn converts_dates() {
        let date: NaiveDate = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let data: ColumnData<'static> = date.into_sql();
        assert_eq!(cell_from_column_data(data), CellValue::Date(date));
    }
}
