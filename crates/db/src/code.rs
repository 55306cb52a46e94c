use common::{types::Id, UnixDateTime};

use crate::{models, IgnoreNotFound};

use super::{Result, BINDING_TABLE, CODE_TABLE, DB};

impl DB {
    pub async fn add_code(&self, code: models::Code) -> Result<()> {
        log::debug!("saving code {}", code.code());
        sqlx::query(&format!(
            "insert into {CODE_TABLE}
             (code, issuer_id, created_at, expires_at, privileged, revoked)
             values (?, ?, ?, ?, ?, ?)"
        ))
        .bind(code.code())
        .bind(code.issuer_id())
        .bind(code.created_at())
        .bind(code.expires_at())
        .bind(code.privileged())
        .bind(code.revoked())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
    pub async fn select_code(&self, code: &str) -> Result<Option<models::Code>> {
        log::debug!("select code {code}");
        let res = sqlx::query_as::<_, models::Code>(&format!(
            "select * from {CODE_TABLE}
             where code = ?"
        ))
        .bind(code)
        .fetch_one(&self.pool)
        .await;

        Ok(res.ignore_not_found()?)
    }
    /// Count non-revoked, non-privileged codes of an issuer that have not
    /// expired yet. This is the free-tier quota predicate.
    pub async fn count_live_codes(&self, issuer_id: Id, now: UnixDateTime) -> Result<u32> {
        log::debug!("count live codes of issuer {issuer_id}");
        Ok(sqlx::query_as::<_, models::fetch::Count>(&format!(
            "select count(*) as count
             from {CODE_TABLE}
             where issuer_id = ?
               and privileged = false
               and revoked = false
               and expires_at >= ?"
        ))
        .bind(issuer_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?
        .count)
    }
    /// Returns false if the code does not exist
    pub async fn save_code_revoked(&self, code: &str) -> Result<bool> {
        log::debug!("revoking code {code}");
        let res = sqlx::query(&format!(
            "update {CODE_TABLE}
             set revoked = true
             where code = ?"
        ))
        .bind(code)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }
    pub async fn save_code_expires(&self, code: &str, expires_at: UnixDateTime) -> Result<()> {
        log::debug!("update expires_at for code {code}");
        sqlx::query(&format!(
            "update {CODE_TABLE}
             set expires_at = ?
             where code = ?"
        ))
        .bind(expires_at)
        .bind(code)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
    /// Connected bindings follow the code's authoritative expiry after an
    /// administrative code extension
    pub async fn sync_binding_expires_to_code(&self, code: &str, expires_at: UnixDateTime) -> Result<u64> {
        log::debug!("sync connected bindings of code {code} to new expiry");
        let res = sqlx::query(&format!(
            "update {BINDING_TABLE}
             set expires_at = ?
             where code = ? and connected = true"
        ))
        .bind(expires_at)
        .bind(code)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
}
