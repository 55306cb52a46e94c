use common::types::Id;

use crate::models;

use super::{Result, ADMIN_TABLE, DB};

impl DB {
    pub async fn admin_config(&self) -> Result<models::AdminConfig> {
        log::debug!("select admin config");
        Ok(
            sqlx::query_as::<_, models::AdminConfig>(&format!("select owner_id, control_chat_id from {ADMIN_TABLE}"))
                .fetch_one(&self.pool)
                .await?,
        )
    }
    pub async fn save_owner(&self, owner_id: Id) -> Result<()> {
        log::debug!("saving owner {owner_id}");
        sqlx::query(&format!(
            "update {ADMIN_TABLE}
             set owner_id = ?
             where id = 0"
        ))
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
    pub async fn save_control_chat(&self, chat_id: Id) -> Result<()> {
        log::debug!("saving control chat {chat_id}");
        sqlx::query(&format!(
            "update {ADMIN_TABLE}
             set control_chat_id = ?
             where id = 0"
        ))
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
