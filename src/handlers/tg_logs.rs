use teloxide::{
    payloads::SendMessageSetters,
    requests::Requester,
    types::{ChatId, ParseMode},
    utils::markdown::code_block_with_lang,
    Bot,
};
use tokio::sync::mpsc::Receiver;

use common::LogError;

pub(crate) async fn start_tg_logs_job(bot: Bot, chat_id: ChatId, mut rx: Receiver<String>) {
    while let Some(text) = rx.recv().await {
        bot.send_message(chat_id, code_block_with_lang(&text, "log"))
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .log_error_msg("failed to send log");
    }
}
