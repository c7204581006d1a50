// ============================================
// src/logging.rs
// ログ設定 (tracing)
// 画面は TUI が使うので、ログはファイルにだけ書く
// ============================================

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, LogLevelArg};

/// 設定されていればこちらを優先する
const LOG_ENV: &str = "TRIVIA_LOG";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// None ならログを出さない
    pub log_file: Option<PathBuf>,
}

impl LogConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let level = match cli.log_level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
        Self {
            level,
            log_file: cli.log_file.clone(),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.level.into())
            .with_env_var(LOG_ENV)
            .from_env_lossy()
    }
}

/// ログファイルが指定されていればサブスクライバを登録する
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(io::Error::other)?;
    Ok(())
}
