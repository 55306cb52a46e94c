use std::{sync::Arc, time::Duration};

use anyhow::Result;
use dotenvy_macro::dotenv;
use reqwest::Client;
use simplelog::LevelFilter;
use teloxide::{prelude::*, utils::command::BotCommands};

use tokio::{
    signal,
    sync::mpsc::{self, Sender},
    task::JoinSet,
};
use tokio_util::sync::CancellationToken;

use bot_handlers::{
    command_handler, message_handler, owner_command_handler, Command, DynIndexer, DynTranslator, OwnerCommand,
};
use common::spawn_with_token;
use db::DB;
use entitlements::{AuthPolicy, Engine, Policy};
use payment::TronGrid;
use translate::GoogleTranslate;

use crate::handlers::tg_logs::start_tg_logs_job;
use crate::logger::TgLogger;

mod handlers;
mod logger;

const DB_FILE: &str = dotenv!("DB_URL");
const TG_BOT_TOKEN: &str = if IS_PROD {
    dotenv!("PROD_BOT_TOKEN")
} else {
    dotenv!("BOT_TOKEN")
};
const LOG_CHAT_ID: &str = dotenv!("LOG_CHAT_ID");
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const TRONGRID_BASE_URL: &str = "https://api.trongrid.io";

const IS_PROD: bool = cfg!(feature = "prod");
const LOG_LEVEL: LevelFilter = if IS_PROD {
    LevelFilter::Error
} else {
    LevelFilter::Debug
};

#[tokio::main]
async fn main() -> Result<()> {
    let tg_logs_chan = mpsc::channel(100);
    let log_chat_id = LOG_CHAT_ID.parse().ok().map(ChatId);

    init_logger(tg_logs_chan.0);

    let db = DB::init(&db_path()).await?;

    let engine = Engine::new(db.clone(), Policy::default());
    let auth = AuthPolicy::new(db.clone(), common::OWNER_SECRET);
    let indexer: DynIndexer = Arc::new(TronGrid::new(
        TRONGRID_BASE_URL,
        common::TRONGRID_API_KEY,
        common::TRC20_CONTRACT_ADDRESS,
        common::TRC20_RECEIVER_ADDRESS,
    )?);
    let translator: DynTranslator = Arc::new(GoogleTranslate::new(common::GOOGLE_TRANSLATE_API_KEY)?);

    let bot = Bot::with_client(
        TG_BOT_TOKEN,
        Client::builder().timeout(REQUEST_TIMEOUT).build()?,
    );
    bot.set_my_commands(Command::bot_commands()).await?;

    let cancel_token = CancellationToken::new();

    let mut jobs = JoinSet::new();
    if let Some(log_chat_id) = log_chat_id {
        jobs.spawn(spawn_with_token(
            cancel_token.clone(),
            start_tg_logs_job(bot.clone(), log_chat_id, tg_logs_chan.1),
        ));
    } else {
        log::warn!("LOG_CHAT_ID env not set, skip starting tg logs job")
    }
    jobs.spawn(spawn_with_token(
        cancel_token.clone(),
        start_bot(bot.clone(), engine, auth, indexer, translator),
    ));

    jobs.spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("failed to listen for SIGINT: {e}");
        }
        cancel_token.cancel();
    });

    while (jobs.join_next().await).is_some() {}

    Ok(())
}

fn db_path() -> String {
    if DB_FILE.is_empty() {
        panic!("DB_URL env variable is empty")
    }
    let db_file = if IS_PROD {
        let home = match std::env::var("HOME") {
            Ok(s) => s,
            Err(_) => "/".to_string(),
        };
        format!("{home}/{DB_FILE}")
    } else {
        DB_FILE.to_string()
    };
    log::debug!("opening db at {db_file}");
    db_file
}

fn init_logger(sender: Sender<String>) {
    use simplelog::*;

    use logger::ConfigBuilder as TgConfigBuilder;

    let term_config = if IS_PROD {
        Config::default()
    } else {
        ConfigBuilder::new()
            .add_filter_ignore_str("h2")
            .add_filter_ignore_str("hyper")
            .add_filter_ignore_str("reqwest")
            .add_filter_ignore_str("rustls")
            .add_filter_ignore_str("sqlx")
            .build()
    };

    let tg_config = if IS_PROD {
        logger::Config::default()
    } else {
        TgConfigBuilder::new()
            .add_ignore("ConnectionReset")
            .add_ignore("TerminatedByOtherGetUpdates")
            .build()
    };

    CombinedLogger::init(vec![
        TermLogger::new(
            LOG_LEVEL,
            term_config,
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        TgLogger::new(sender, tg_config),
    ])
    .expect("failed to init logger");
}

async fn start_bot(bot: Bot, engine: Engine, auth: AuthPolicy, indexer: DynIndexer, translator: DynTranslator) {
    log::debug!("starting bot");
    let handler = dptree::entry().branch(
        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<OwnerCommand>()
                    .endpoint(owner_command_handler),
            )
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(command_handler),
            )
            .branch(dptree::entry().endpoint(message_handler)),
    );
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine, auth, indexer, translator])
        .default_handler(|_update| async move { log::debug!("unhandled update") })
        .error_handler(LoggingErrorHandler::with_custom_text("error in dispatcher"))
        .build()
        .dispatch()
        .await;
}
