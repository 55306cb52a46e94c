use common::{types::Id, UnixDateTime};

use crate::{models, IgnoreNotFound};

use super::{Result, BINDING_TABLE, DB};

impl DB {
    pub async fn add_binding(&self, binding: models::Binding) -> Result<()> {
        log::debug!("saving binding for chat {}", binding.chat_id());
        sqlx::query(&format!(
            "insert into {BINDING_TABLE}
             (chat_id, code, expires_at, extension_count, connected, last_payment_check)
             values (?, ?, ?, ?, ?, ?)"
        ))
        .bind(binding.chat_id())
        .bind(binding.code())
        .bind(binding.expires_at())
        .bind(binding.extension_count())
        .bind(binding.connected())
        .bind(binding.last_payment_check())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
    pub async fn select_binding(&self, chat_id: Id) -> Result<Option<models::Binding>> {
        log::debug!("select binding for chat {chat_id}");
        let res = sqlx::query_as::<_, models::Binding>(&format!(
            "select * from {BINDING_TABLE}
             where chat_id = ?"
        ))
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await;

        Ok(res.ignore_not_found()?)
    }
    pub async fn select_all_bindings(&self) -> Result<Vec<models::Binding>> {
        log::debug!("select all bindings");
        Ok(
            sqlx::query_as::<_, models::Binding>(&format!("select * from {BINDING_TABLE} order by chat_id"))
                .fetch_all(&self.pool)
                .await?,
        )
    }
    /// How many chats ever bound to this code. Rebinding the same chat does
    /// not create a second row, so this is the group-quota predicate.
    pub async fn count_bindings(&self, code: &str) -> Result<u32> {
        log::debug!("count bindings of code {code}");
        Ok(sqlx::query_as::<_, models::fetch::Count>(&format!(
            "select count(*) as count
             from {BINDING_TABLE}
             where code = ?"
        ))
        .bind(code)
        .fetch_one(&self.pool)
        .await?
        .count)
    }
    pub async fn save_binding_connected(&self, chat_id: Id, connected: bool) -> Result<()> {
        log::debug!("saving binding connected for chat {chat_id}: {connected}");
        sqlx::query(&format!(
            "update {BINDING_TABLE}
             set connected = ?
             where chat_id = ?"
        ))
        .bind(connected)
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
    /// Rebind path: reconnect and refresh expiry from the code, keeping
    /// extension_count as is
    pub async fn reconnect_binding(&self, chat_id: Id, expires_at: UnixDateTime) -> Result<()> {
        log::debug!("reconnecting binding for chat {chat_id}");
        sqlx::query(&format!(
            "update {BINDING_TABLE}
             set connected = true, expires_at = ?
             where chat_id = ?"
        ))
        .bind(expires_at)
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
    /// Bounded extension as a single conditional update. Returns false when
    /// the binding is missing or the extension limit is already reached.
    pub async fn extend_binding(&self, chat_id: Id, seconds: i64, max_extensions: u32) -> Result<bool> {
        log::debug!("extending binding for chat {chat_id}");
        let res = sqlx::query(&format!(
            "update {BINDING_TABLE}
             set expires_at = expires_at + ?,
                 extension_count = extension_count + 1
             where chat_id = ? and extension_count < ?"
        ))
        .bind(seconds)
        .bind(chat_id)
        .bind(max_extensions)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }
    /// Revocation cascade: every chat bound to the code loses its connection
    pub async fn disconnect_bindings_of_code(&self, code: &str) -> Result<u64> {
        log::debug!("disconnecting bindings of code {code}");
        let res = sqlx::query(&format!(
            "update {BINDING_TABLE}
             set connected = false
             where code = ?"
        ))
        .bind(code)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected())
    }
    /// Administrative purge: drops the binding row entirely, freeing the
    /// chat to bind a different code
    pub async fn remove_binding(&self, chat_id: Id) -> Result<bool> {
        log::debug!("removing binding for chat {chat_id}");
        let res = sqlx::query(&format!(
            "delete from {BINDING_TABLE}
             where chat_id = ?"
        ))
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }
    pub async fn save_binding_payment_check(&self, chat_id: Id, checked_at: UnixDateTime) -> Result<()> {
        log::debug!("saving last_payment_check for chat {chat_id}");
        sqlx::query(&format!(
            "update {BINDING_TABLE}
             set last_payment_check = ?
             where chat_id = ?"
        ))
        .bind(checked_at)
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
