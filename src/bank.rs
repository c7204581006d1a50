// ============================================
// src/bank.rs
// 問題バンク (検証・重複排除済みの問題集合)
// ============================================

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::questions::{KeyPolicy, Question};

/// 1ラウンドの目標問題数
pub const ROUND_SIZE: usize = 10;

/// 読み込み時の診断メッセージ (致命的ではない)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BankDiagnostic {
    /// 使える問題が1つもない
    NoUsableQuestions,
    /// 1ラウンド分に足りない (available 問で続行)
    ShortRound { available: usize },
}

impl BankDiagnostic {
    /// 画面に出す行 (1行目が見出し)
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::NoUsableQuestions => {
                vec!["The source file didn't give me any good questions".to_string()]
            }
            Self::ShortRound { available } => vec![
                "The source file didn't give me enough questions for a full round of questions :("
                    .to_string(),
                format!("The game will continue but will only have {available} questions"),
            ],
        }
    }
}

impl fmt::Display for BankDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join(" "))
    }
}

/// 検証済み・重複なしの問題リスト。読み込み後は不変。
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// 生レコードから問題バンクを作る。入力順を保ち、重複は最初の1件だけ残す。
    pub fn load<'a, I>(records: I, policy: KeyPolicy) -> (Self, Vec<BankDiagnostic>)
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut questions = Vec::new();
        let mut seen = HashSet::new();
        let mut invalid = 0usize;
        let mut duplicates = 0usize;

        for record in records {
            let Some(question) = Question::from_record(record, policy) else {
                invalid += 1;
                continue;
            };
            if seen.insert(question.clone()) {
                questions.push(question);
            } else {
                duplicates += 1;
            }
        }

        info!(
            accepted = questions.len(),
            invalid, duplicates, "question bank loaded"
        );

        let bank = Self { questions };
        let diagnostics = bank.diagnostics();
        (bank, diagnostics)
    }

    fn diagnostics(&self) -> Vec<BankDiagnostic> {
        match self.questions.len() {
            0 => vec![BankDiagnostic::NoUsableQuestions],
            n if n < ROUND_SIZE => vec![BankDiagnostic::ShortRound { available: n }],
            _ => Vec::new(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// JSONファイルを読み込み、レコードの配列を返す
pub fn load_records(path: &Path) -> Result<Vec<Value>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(records) => {
            debug!(path = %path.display(), records = records.len(), "question file read");
            Ok(records)
        }
        _ => Err(LoadError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
pub(crate) fn bank_of(size: usize) -> QuestionBank {
    QuestionBank {
        questions: (0..size).map(crate::questions::sample_question).collect(),
    }
}
