use common::{
    types::{Id, MicroUsdt},
    UnixDateTime,
};

use crate::{models, IgnoreNotFound};

use super::{Result, INVOICE_TABLE, DB};

impl DB {
    pub async fn select_invoice(&self, chat_id: Id) -> Result<Option<models::Invoice>> {
        log::debug!("select invoice for chat {chat_id}");
        let res = sqlx::query_as::<_, models::Invoice>(&format!(
            "select * from {INVOICE_TABLE}
             where chat_id = ?"
        ))
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await;

        Ok(res.ignore_not_found()?)
    }
    /// A new deposit order supersedes any previous one for the chat
    pub async fn replace_invoice(
        &self,
        chat_id: Id,
        order_ref: &str,
        address: &str,
        created_at: UnixDateTime,
    ) -> Result<()> {
        log::debug!("saving invoice for chat {chat_id}");
        sqlx::query(&format!(
            "insert into {INVOICE_TABLE} (chat_id, order_ref, address, created_at)
             values (?, ?, ?, ?)
             on conflict(chat_id)
             do update set order_ref = excluded.order_ref,
                           address = excluded.address,
                           created_at = excluded.created_at,
                           settled = false,
                           confirmed_amount = null"
        ))
        .bind(chat_id)
        .bind(order_ref)
        .bind(address)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
    /// Consume a paid invoice so its confirmed amount is never applied twice
    pub async fn delete_invoice(&self, chat_id: Id) -> Result<()> {
        log::debug!("deleting invoice for chat {chat_id}");
        sqlx::query(&format!(
            "delete from {INVOICE_TABLE}
             where chat_id = ?"
        ))
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
    /// Payment arrived but could not be applied; keep the record so the
    /// outcome is reported, not re-processed
    pub async fn save_invoice_settled(&self, chat_id: Id, confirmed_amount: MicroUsdt) -> Result<()> {
        log::debug!("marking invoice settled for chat {chat_id}");
        sqlx::query(&format!(
            "update {INVOICE_TABLE}
             set settled = true, confirmed_amount = ?
             where chat_id = ?"
        ))
        .bind(confirmed_amount)
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
