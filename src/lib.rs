// ============================================
// src/lib.rs
// クイズエンジン本体と端末UI
// ============================================

//! 4択トリビアゲーム。
//!
//! 問題の検証 (`questions`)、問題バンク (`bank`)、ラウンドの抽選と選択肢のシャッフル
//! (`round`)、スコア (`score`)、進行のステートマシン (`game`) がエンジン部分。
//! 画面とキー入力は [`game::Screen`] 越しに使い、端末向けの実装は `tui` にある。

pub mod bank;
pub mod cli;
pub mod error;
pub mod game;
pub mod logging;
pub mod questions;
pub mod round;
pub mod score;
pub mod tui;
