use teloxide::prelude::*;

use common::{
    types::{ChatId as OurChatId, UserId as OurUserId},
    DateTime, DAY_SECONDS,
};
use db::models::Binding;
use entitlements::{AuthPolicy, Engine, IssueOutcome};

use crate::OwnerCommand;

pub async fn owner_command_handler(
    bot: Bot,
    msg: Message,
    cmd: OwnerCommand,
    engine: Engine,
    auth: AuthPolicy,
) -> ResponseResult<()> {
    let chat: OurChatId = msg.chat.id.into();
    let Some(user) = msg.from().map(|u| OurUserId::from(u.id)) else {
        return Ok(());
    };

    // /auth is the entry point, everything else needs an authorized owner
    let reply = if let OwnerCommand::Auth(secret) = &cmd {
        match auth.authenticate(secret, user).await {
            Ok(true) => i18n::auth_ok(),
            Ok(false) => i18n::auth_failed(),
            Err(e) => internal(e, "authenticate"),
        }
    } else {
        match auth.authorize(user, chat).await {
            Ok(true) => owner_command(&engine, &auth, cmd, user, chat).await,
            Ok(false) => i18n::owner_only(),
            Err(e) => internal(e, "authorize"),
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn owner_command(
    engine: &Engine,
    auth: &AuthPolicy,
    cmd: OwnerCommand,
    user: OurUserId,
    chat: OurChatId,
) -> String {
    match cmd {
        OwnerCommand::Auth(_) => unreachable!("handled by the caller"),
        OwnerCommand::SetControlGroup => match auth.set_control_chat(user, chat).await {
            Ok(true) => i18n::control_group_set(),
            Ok(false) => i18n::owner_only(),
            Err(e) => internal(e, "set control chat"),
        },
        OwnerCommand::GenCode(code, days) => match engine.issue_code(user, code.trim(), days).await {
            Ok(IssueOutcome::Created(code)) => i18n::code_issued(&code, days),
            Ok(IssueOutcome::CodeTaken) => i18n::code_taken(&code),
            Ok(IssueOutcome::QuotaExceeded) => {
                log::error!("owner issuance reported quota");
                i18n::internal_error()
            }
            Err(e) => internal(e, "issue code"),
        },
        OwnerCommand::DelCode(code) => match engine.delete_code(code.trim()).await {
            Ok(true) => i18n::code_deleted(&code),
            Ok(false) => i18n::code_not_found(&code),
            Err(e) => internal(e, "delete code"),
        },
        OwnerCommand::ExtendIssued(code, days) => match engine.extend_issued_code(code.trim(), days).await {
            Ok(Some(_)) => i18n::code_extended(&code, days),
            Ok(None) => i18n::code_not_found(&code),
            Err(e) => internal(e, "extend issued code"),
        },
        OwnerCommand::ForceDisconnect(chat_id) => match engine.force_disconnect(chat_id.into()).await {
            Ok(()) => i18n::force_disconnected(chat_id),
            Err(e) => internal(e, "force disconnect"),
        },
        OwnerCommand::PurgeBinding(chat_id) => match engine.purge_binding(chat_id.into()).await {
            Ok(true) => i18n::binding_purged(chat_id),
            Ok(false) => i18n::binding_not_found(chat_id),
            Err(e) => internal(e, "purge binding"),
        },
        OwnerCommand::ListBindings => match engine.list_bindings().await {
            Ok(bindings) => format_bindings(&bindings),
            Err(e) => internal(e, "list bindings"),
        },
        OwnerCommand::Stats => match engine.stats().await {
            Ok(stats) => format_stats(&stats),
            Err(e) => internal(e, "load stats"),
        },
    }
}

fn format_bindings(bindings: &[Binding]) -> String {
    if bindings.is_empty() {
        return "(no bindings)".to_string();
    }
    let now = DateTime::now();
    bindings
        .iter()
        .map(|b| {
            let state = if !b.connected() {
                "disconnected"
            } else if b.is_active(now) {
                "active"
            } else {
                "expired"
            };
            format!(
                "{}: code {}, {}d left, ext {}, {state}",
                b.chat_id(),
                b.code(),
                b.remaining_seconds(now) / DAY_SECONDS,
                b.extension_count(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_stats(stats: &db::models::Stats) -> String {
    [
        format!("codes: {}", stats.codes),
        format!("bindings: {} ({} connected)", stats.bindings, stats.connected_bindings),
        format!("solo users: {}", stats.solo_users),
    ]
    .join("\n")
}

fn internal(e: entitlements::Error, op: &str) -> String {
    log::error!("failed to {op}: {e}");
    i18n::internal_error()
}
