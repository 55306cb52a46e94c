use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

mod admin;
mod binding;
mod code;
mod invoice;
pub mod models;
mod solo;

#[cfg(test)]
mod tests;

const CODE_TABLE: &str = "code";
const BINDING_TABLE: &str = "binding";
const SOLO_TABLE: &str = "solo";
const INVOICE_TABLE: &str = "invoice";
const ADMIN_TABLE: &str = "admin";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to run query: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone)]
pub struct DB {
    pool: SqlitePool,
}

impl DB {
    pub async fn init(path: &str) -> Result<Self> {
        let pool = SqlitePool::connect_with(SqliteConnectOptions::new().filename(path).create_if_missing(true)).await?;

        sqlx::migrate!("../../migrations").run(&pool).await?;

        sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

        Ok(Self { pool })
    }
}

// Stats for the owner overview
impl DB {
    pub async fn load_stats(&self) -> Result<models::Stats> {
        Ok(models::Stats {
            codes: self.load_count(&format!("from {CODE_TABLE} where revoked = false")).await?,
            bindings: self.load_count(&format!("from {BINDING_TABLE}")).await?,
            connected_bindings: self
                .load_count(&format!("from {BINDING_TABLE} b where b.connected = true"))
                .await?,
            solo_users: self.load_count(&format!("from {SOLO_TABLE}")).await?,
        })
    }
    async fn load_count(&self, sql_predicate: &str) -> Result<u32> {
        Ok(
            sqlx::query_as::<_, models::fetch::Count>(&format!("select count(*) as count {sql_predicate}"))
                .fetch_one(&self.pool)
                .await?
                .count,
        )
    }
}

trait IgnoreNotFound<T> {
    type Error;

    fn ignore_not_found(self) -> Result<Option<T>, Self::Error>;
}

impl<T> IgnoreNotFound<T> for std::result::Result<T, sqlx::Error> {
    type Error = sqlx::Error;

    fn ignore_not_found(self) -> std::result::Result<Option<T>, Self::Error> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
