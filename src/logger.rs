use std::thread;

use log::{Level, Metadata, Record};
use simplelog::SharedLogger;
use tokio::sync::mpsc::Sender;

/// Forwards error records into a channel consumed by the tg logs job.
/// Errors that match an ignore pattern stay local (polling noise would spam
/// the log chat).
#[derive(Debug)]
pub(crate) struct TgLogger {
    sender: Sender<String>,
    config: Config,
}

#[derive(Debug, Default)]
pub(crate) struct Config {
    ignores: Vec<String>,
}

pub(crate) struct ConfigBuilder(Config);

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self(Config::default())
    }
    pub(crate) fn add_ignore(mut self, pattern: &str) -> Self {
        self.0.ignores.push(pattern.to_string());
        self
    }
    pub(crate) fn build(self) -> Config {
        self.0
    }
}

impl TgLogger {
    pub(crate) fn new(sender: Sender<String>, config: Config) -> Box<Self> {
        Box::new(Self { sender, config })
    }
}

impl log::Log for TgLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Error
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let text = record.args().to_string();
        if self.config.ignores.iter().any(|p| text.contains(p)) {
            return;
        }

        let mut msg = format!("[ERROR] {text}\n        at {}", record.target());
        if let Some(file) = record.file() {
            msg += &format!(": {file}");
            if let Some(line) = record.line() {
                msg += &format!(":{line}");
            }
        }
        thread::scope(|s| {
            s.spawn(|| {
                let _ = self.sender.blocking_send(msg);
            });
        });
    }

    fn flush(&self) {}
}

impl SharedLogger for TgLogger {
    fn level(&self) -> log::LevelFilter {
        log::LevelFilter::Error
    }

    fn config(&self) -> Option<&simplelog::Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn log::Log> {
        Box::new(*self)
    }
}
