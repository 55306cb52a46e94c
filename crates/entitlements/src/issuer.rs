use rand::Rng;

use common::{days_to_seconds, types::UserId, DateTime, UnixDateTime};
use db::models::Code;

use crate::{Engine, Result};

#[derive(Debug, PartialEq, Eq)]
pub enum IssueOutcome {
    Created(String),
    /// Free-tier issuer already has the allowed number of live codes
    QuotaExceeded,
    /// Requested code value already exists (operator-chosen codes only)
    CodeTaken,
}

impl Engine {
    /// Mint a free-tier code. Counts only live (non-revoked, unexpired)
    /// non-privileged codes against the quota; nothing is persisted on
    /// refusal.
    pub async fn create_code(&self, issuer: UserId) -> Result<IssueOutcome> {
        let _guard = self.lock.lock().await;
        let now = DateTime::now();

        let live = self.db.count_live_codes(issuer.into(), now).await?;
        if live >= self.policy.free_quota {
            log::debug!("issuer {issuer} is over free quota");
            return Ok(IssueOutcome::QuotaExceeded);
        }

        let code = self.unique_code().await?;
        self.db
            .add_code(
                Code::builder()
                    .code(code.clone())
                    .issuer_id(issuer.into())
                    .created_at(now)
                    .expires_at(now + days_to_seconds(self.policy.free_code_days))
                    .build(),
            )
            .await?;

        Ok(IssueOutcome::Created(code))
    }
    /// Owner-issued code with a chosen value and duration, quota-exempt
    pub async fn issue_code(&self, issuer: UserId, code: &str, days: u32) -> Result<IssueOutcome> {
        let _guard = self.lock.lock().await;
        let now = DateTime::now();

        if self.db.select_code(code).await?.is_some() {
            return Ok(IssueOutcome::CodeTaken);
        }

        self.db
            .add_code(
                Code::builder()
                    .code(code.to_string())
                    .issuer_id(issuer.into())
                    .created_at(now)
                    .expires_at(now + days_to_seconds(days))
                    .privileged(true)
                    .build(),
            )
            .await?;

        Ok(IssueOutcome::Created(code.to_string()))
    }
    /// Revoke a code and disconnect every chat bound to it. Returns false
    /// if the code does not exist.
    pub async fn delete_code(&self, code: &str) -> Result<bool> {
        let _guard = self.lock.lock().await;

        if !self.db.save_code_revoked(code).await? {
            return Ok(false);
        }
        let disconnected = self.db.disconnect_bindings_of_code(code).await?;
        log::info!("code {code} revoked, {disconnected} bindings disconnected");

        Ok(true)
    }
    /// Push the code's expiry forward and re-synchronize every connected
    /// binding to it. Returns the new expiry, None if the code is unknown
    /// or revoked.
    pub async fn extend_issued_code(&self, code: &str, days: u32) -> Result<Option<UnixDateTime>> {
        let _guard = self.lock.lock().await;

        let Some(record) = self.db.select_code(code).await? else {
            return Ok(None);
        };
        if record.revoked() {
            return Ok(None);
        }

        let expires_at = record.expires_at() + days_to_seconds(days);
        self.db.save_code_expires(code, expires_at).await?;
        let synced = self.db.sync_binding_expires_to_code(code, expires_at).await?;
        log::info!("code {code} extended by {days}d, {synced} bindings synced");

        Ok(Some(expires_at))
    }
    /// 6-digit numeric space is plenty for process-lifetime scope, but
    /// collisions are still tolerated by regenerating
    async fn unique_code(&self) -> Result<String> {
        loop {
            let candidate = {
                let mut rng = rand::thread_rng();
                format!("{}", rng.gen_range(100_000..1_000_000))
            };
            if self.db.select_code(&candidate).await?.is_none() {
                return Ok(candidate);
            }
            log::debug!("code collision, regenerating");
        }
    }
}
