use teloxide::prelude::*;

use common::{
    types::{format_usdt, ChatId as OurChatId, UserId as OurUserId},
    DAY_SECONDS,
};
use entitlements::{BindOutcome, CheckOutcome, Engine, Error, IssueOutcome};
use translate::Translation;

use crate::{Command, DynIndexer, DynTranslator};

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    engine: Engine,
    indexer: DynIndexer,
) -> ResponseResult<()> {
    let chat: OurChatId = msg.chat.id.into();
    let Some(user) = msg.from().map(|u| OurUserId::from(u.id)) else {
        log::debug!("command without sender in chat {chat}, ignoring");
        return Ok(());
    };

    let reply = match cmd {
        Command::Start => i18n::start(),
        Command::Help => i18n::help(engine.policy().free_code_days),
        Command::CreateCode => match engine.create_code(user).await {
            Ok(IssueOutcome::Created(code)) => i18n::code_created(&code, engine.policy().free_code_days),
            Ok(IssueOutcome::QuotaExceeded) => i18n::code_quota_exceeded(),
            Ok(IssueOutcome::CodeTaken) => {
                log::error!("random issuance reported a taken code");
                i18n::internal_error()
            }
            Err(e) => internal(e, "create code"),
        },
        Command::RegisterCode(code) => {
            let code = code.trim();
            if code.is_empty() {
                i18n::usage_register_code()
            } else {
                match engine.bind(code, chat).await {
                    Ok(BindOutcome::Bound) => {
                        let remaining = engine.remaining_seconds(chat).await.unwrap_or(0);
                        i18n::group_registered(remaining / DAY_SECONDS)
                    }
                    Ok(BindOutcome::Rebound) => i18n::group_rebound(),
                    Ok(BindOutcome::InvalidOrExpiredCode) => i18n::code_invalid(),
                    Ok(BindOutcome::AlreadyConnected) => i18n::already_connected(),
                    Ok(BindOutcome::AlreadyBoundToDifferentCode) => i18n::already_bound_other_code(),
                    Ok(BindOutcome::GroupQuotaExceeded) => i18n::group_quota_exceeded(),
                    Err(e) => internal(e, "bind"),
                }
            }
        }
        Command::Disconnect => match engine.disconnect(chat).await {
            Ok(()) => i18n::disconnected(),
            Err(e) => internal(e, "disconnect"),
        },
        Command::SoloMode => match engine.activate_solo(user).await {
            Ok(_) => i18n::solo_started(engine.policy().solo_days),
            Err(e) => internal(e, "activate solo"),
        },
        Command::ExtendCode => extend_handler(&engine, &msg, user, chat).await,
        Command::Remaining => {
            let remaining = if msg.chat.is_private() {
                engine.solo_remaining_seconds(user).await
            } else {
                engine.remaining_seconds(chat).await
            };
            match remaining {
                Ok(seconds) if seconds > 0 => i18n::remaining(seconds),
                Ok(_) => i18n::no_remaining(),
                Err(e) => internal(e, "remaining"),
            }
        }
        Command::PaymentCheck => payment_handler(&engine, &indexer, chat).await,
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn extend_handler(engine: &Engine, msg: &Message, user: OurUserId, chat: OurChatId) -> String {
    let policy = engine.policy();
    if msg.chat.is_private() {
        match engine.solo_active(user).await {
            Ok(false) => return i18n::need_register_first(),
            Err(e) => return internal(e, "solo active"),
            Ok(true) => {}
        }
        match engine.extend_solo(user).await {
            Ok(true) => {
                let remaining = engine.solo_remaining_seconds(user).await.unwrap_or(0);
                i18n::extended(policy.extend_days, remaining / DAY_SECONDS)
            }
            Ok(false) => i18n::solo_extension_limit(),
            Err(e) => internal(e, "extend solo"),
        }
    } else {
        match engine.is_active(chat).await {
            Ok(false) => return i18n::need_register_first(),
            Err(e) => return internal(e, "is active"),
            Ok(true) => {}
        }
        match engine.extend_binding(chat).await {
            Ok(true) => {
                let remaining = engine.remaining_seconds(chat).await.unwrap_or(0);
                i18n::extended(policy.extend_days, remaining / DAY_SECONDS)
            }
            Ok(false) => i18n::extension_limit(policy.max_extensions, &format_usdt(policy.required_payment)),
            Err(e) => internal(e, "extend binding"),
        }
    }
}

async fn payment_handler(engine: &Engine, indexer: &DynIndexer, chat: OurChatId) -> String {
    let policy = engine.policy();
    match engine.check_and_extend(chat, indexer.as_ref()).await {
        Ok(CheckOutcome::NotRegistered) => i18n::need_register_first(),
        Ok(CheckOutcome::Paid {
            amount,
            remaining_seconds,
        }) => i18n::payment_confirmed(&format_usdt(amount), policy.extend_days, remaining_seconds / DAY_SECONDS),
        Ok(CheckOutcome::PaidNoCapacity { amount }) => i18n::payment_no_capacity(&format_usdt(amount)),
        Ok(CheckOutcome::Unpaid { address }) => {
            i18n::payment_not_found(&format_usdt(policy.required_payment), &address)
        }
        Err(Error::Indexer(e)) => {
            log::warn!("payment check failed: {e}");
            i18n::payment_error()
        }
        Err(e) => internal(e, "payment check"),
    }
}

/// Translation path: only speaks when the chat (or the user, in private)
/// holds an active entitlement
pub async fn message_handler(bot: Bot, msg: Message, engine: Engine, translator: DynTranslator) -> ResponseResult<()> {
    let Some(text) = msg.text() else { return Ok(()) };
    if text.starts_with('/') {
        return Ok(());
    }

    let chat: OurChatId = msg.chat.id.into();
    let active = if msg.chat.is_private() {
        let Some(user) = msg.from().map(|u| OurUserId::from(u.id)) else {
            return Ok(());
        };
        engine.solo_active(user).await
    } else {
        engine.is_active(chat).await
    };
    match active {
        Ok(true) => {}
        Ok(false) => return Ok(()),
        Err(e) => {
            log::error!("failed to check entitlement for chat {chat}: {e}");
            return Ok(());
        }
    }

    match translator.translate(text).await {
        Ok(translations) if translations.is_empty() => {}
        Ok(translations) => {
            bot.send_message(msg.chat.id, format_translations(&translations)).await?;
        }
        Err(e) => {
            log::warn!("translation failed in chat {chat}: {e}");
            bot.send_message(msg.chat.id, i18n::translation_error()).await?;
        }
    }
    Ok(())
}

fn format_translations(translations: &[Translation]) -> String {
    translations
        .iter()
        .map(|t| format!("[{}] {}", t.lang.label(), t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn internal(e: entitlements::Error, op: &str) -> String {
    log::error!("failed to {op}: {e}");
    i18n::internal_error()
}

#[cfg(test)]
mod tests {
    use translate::Lang;

    use super::*;

    #[test]
    fn test_format_translations() {
        let translations = [
            Translation {
                lang: Lang::Ko,
                text: "안녕하세요".to_string(),
            },
            Translation {
                lang: Lang::Vi,
                text: "xin chào".to_string(),
            },
        ];
        assert_eq!(
            format_translations(&translations),
            "[한국어] 안녕하세요\n[Tiếng Việt] xin chào"
        );
    }
}
