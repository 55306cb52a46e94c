use common::{types::Id, UnixDateTime};

use crate::{models, IgnoreNotFound};

use super::{Result, SOLO_TABLE, DB};

impl DB {
    /// Activation keeps the later expiry and the accumulated
    /// extension_count, so re-activating cannot shorten a paid window or
    /// reset the renewal allowance
    pub async fn activate_solo(&self, user_id: Id, expires_at: UnixDateTime) -> Result<()> {
        log::debug!("activating solo mode for user {user_id}");
        sqlx::query(&format!(
            "insert into {SOLO_TABLE} (user_id, expires_at)
             values (?, ?)
             on conflict(user_id)
             do update set expires_at = max(expires_at, excluded.expires_at)"
        ))
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
    pub async fn select_solo(&self, user_id: Id) -> Result<Option<models::Solo>> {
        log::debug!("select solo entitlement for user {user_id}");
        let res = sqlx::query_as::<_, models::Solo>(&format!(
            "select * from {SOLO_TABLE}
             where user_id = ?"
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;

        Ok(res.ignore_not_found()?)
    }
    /// Bounded like [`DB::extend_binding`], with the solo-specific limit
    pub async fn extend_solo(&self, user_id: Id, seconds: i64, max_extensions: u32) -> Result<bool> {
        log::debug!("extending solo entitlement for user {user_id}");
        let res = sqlx::query(&format!(
            "update {SOLO_TABLE}
             set expires_at = expires_at + ?,
                 extension_count = extension_count + 1
             where user_id = ? and extension_count < ?"
        ))
        .bind(seconds)
        .bind(user_id)
        .bind(max_extensions)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }
}
