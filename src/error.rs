// ============================================
// src/error.rs
// エラー型
// ============================================

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 問題ファイルの読み込みエラー (起動時に致命的)
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read question file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse question file {} as JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("question file {} must contain a JSON array of questions", path.display())]
    NotAnArray { path: PathBuf },
    #[error("no question file found (tried {})", tried.join(", "))]
    NotFound { tried: Vec<String> },
}

/// 端末UI側のエラー
#[derive(Debug, Error)]
pub enum TuiError {
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Esc / Ctrl-C で中断された
    #[error("game aborted by user")]
    Aborted,
}
