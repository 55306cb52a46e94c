use common::{
    days_to_seconds,
    types::{ChatId, UserId},
    DateTime, UnixDateTime,
};

use crate::{Engine, Result};

// Renewals return a bool, not an error: hitting the limit is a frequent
// business outcome and callers message both branches.
impl Engine {
    pub async fn extend_binding(&self, chat: ChatId) -> Result<bool> {
        let _guard = self.lock.lock().await;
        self.extend_binding_locked(chat).await
    }
    /// For call sites already holding the engine lock
    pub(crate) async fn extend_binding_locked(&self, chat: ChatId) -> Result<bool> {
        Ok(self
            .db
            .extend_binding(
                chat.into(),
                days_to_seconds(self.policy.extend_days),
                self.policy.max_extensions,
            )
            .await?)
    }
    pub async fn activate_solo(&self, user: UserId) -> Result<UnixDateTime> {
        let _guard = self.lock.lock().await;
        let expires_at = DateTime::now() + days_to_seconds(self.policy.solo_days);
        self.db.activate_solo(user.into(), expires_at).await?;
        Ok(expires_at)
    }
    pub async fn extend_solo(&self, user: UserId) -> Result<bool> {
        let _guard = self.lock.lock().await;
        Ok(self
            .db
            .extend_solo(
                user.into(),
                days_to_seconds(self.policy.extend_days),
                self.policy.max_solo_extensions,
            )
            .await?)
    }
}
