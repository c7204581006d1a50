// ============================================
// src/cli.rs
// コマンドライン引数
// ============================================

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use directories::ProjectDirs;

use crate::error::LoadError;
use crate::questions::KeyPolicy;

const QUESTIONS_FILE: &str = "questions.json";

#[derive(Debug, Parser)]
#[command(name = "trivia-wiz", version, about = "Multiple-choice trivia in your terminal")]
pub struct Cli {
    /// Question file (JSON array). Defaults to ./questions.json, then the app data directory
    #[arg(value_name = "QUESTIONS")]
    pub questions: Option<PathBuf>,

    /// Seed for a reproducible round and answer order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reject records carrying keys other than question, correct and incorrect
    #[arg(long)]
    pub strict_keys: bool,

    /// Write logs to this file (no logging when omitted)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level (TRIVIA_LOG overrides it)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevelArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Cli {
    pub fn key_policy(&self) -> KeyPolicy {
        if self.strict_keys {
            KeyPolicy::Exact
        } else {
            KeyPolicy::Tolerant
        }
    }

    /// 読み込む問題ファイルを決める
    pub fn questions_path(&self) -> Result<PathBuf, LoadError> {
        if let Some(path) = &self.questions {
            return Ok(path.clone());
        }

        let candidates = default_candidates();
        candidates
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| LoadError::NotFound {
                tried: candidates
                    .iter()
                    .map(|path| path.display().to_string())
                    .collect(),
            })
    }
}

/// カレントディレクトリ → OSごとのデータディレクトリ
fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![Path::new(QUESTIONS_FILE).to_path_buf()];
    if let Some(proj_dirs) = ProjectDirs::from("jp", "Fukumoto0141", "TRIVIA_WIZ") {
        candidates.push(proj_dirs.data_dir().join(QUESTIONS_FILE));
    }
    candidates
}
