// ============================================
// src/game.rs
// ゲームの進行 (ステートマシン)
// ============================================

use rand::Rng;
use tracing::{debug, info};

use crate::bank::BankDiagnostic;
use crate::questions::{ANSWER_COUNT, Question};
use crate::round::{AnswerSet, Round};
use crate::score::ScoreKeeper;

pub const NO_QUESTIONS_MESSAGE: &str = "No questions were loaded ;-; sorry and good bye";
pub const CORRECT_MESSAGE: &str = "Nice job! You got it right!";
pub const WRONG_MESSAGE: &str = "You got it wrong, the correct answer was: ";
pub const PERFECT_MESSAGE: &str = "PERFECT GAME! Every single answer was right!";

/// パーフェクト時のバナー
const PERFECT_BANNER: [&str; 8] = [
    r"                  __          _                                ",
    r"                 / _|        | |                               ",
    r" _ __   ___ _ __| |_ ___  ___| |_    __ _  __ _ _ __ ___   ___ ",
    r"| '_ \ / _ \ '__|  _/ _ \/ __| __|  / _` |/ _` | '_ ` _ \ / _ \",
    r"| |_) |  __/ |  | ||  __/ (__| |_  | (_| | (_| | | | | | |  __/",
    r"| .__/ \___|_|  |_| \___|\___|\__|  \__, |\__,_|_| |_| |_|\___|",
    r"| |                                  __/ |                     ",
    r"|_|                                 |___/                      ",
];

// --------------------------------------------------
// 表示・入力の窓口
// --------------------------------------------------

/// メッセージの装飾
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Emphasis {
    pub bold: bool,
    pub blink: bool,
    /// 画面をクリアして縦方向の中央に出す
    pub vcenter: bool,
}

impl Emphasis {
    pub const PLAIN: Self = Self {
        bold: false,
        blink: false,
        vcenter: false,
    };
    pub const BOLD: Self = Self {
        bold: true,
        ..Self::PLAIN
    };
    pub const BLINK: Self = Self {
        blink: true,
        ..Self::PLAIN
    };
    pub const CENTERED: Self = Self {
        vcenter: true,
        ..Self::PLAIN
    };
}

/// 回答待ちの間に届く入力
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    Confirm,
}

/// ゲームが使う表示・入力の機能。待機系のメソッドはキー入力までブロックする。
pub trait Screen {
    type Error;

    fn show_message(&mut self, text: &str, emphasis: Emphasis) -> Result<(), Self::Error>;
    fn show_question(&mut self, index: usize, text: &str) -> Result<(), Self::Error>;
    fn show_choices(&mut self, options: &[String], highlighted: usize) -> Result<(), Self::Error>;
    fn await_confirm_or_navigate(&mut self) -> Result<Navigation, Self::Error>;
    fn await_any_key(&mut self) -> Result<(), Self::Error>;
    fn show_score_header(&mut self, score: u32) -> Result<(), Self::Error>;
}

// --------------------------------------------------
// 状態
// --------------------------------------------------

/// 1セッション分の状態。GameLoop だけが持ち、遷移ごとに明示的に渡す。
#[derive(Debug)]
pub struct GameState {
    score: ScoreKeeper,
    current_index: usize,
    round: Round,
}

impl GameState {
    pub fn new(round: Round) -> Self {
        Self {
            score: ScoreKeeper::new(),
            current_index: 0,
            round,
        }
    }

    pub fn score(&self) -> u32 {
        self.score.score()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    fn current_question(&self) -> Option<&Question> {
        self.round.get(self.current_index)
    }

    fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.round.len()
    }
}

/// ステートマシンの状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Welcome,
    Presenting,
    /// 選択肢の並びは Presenting で一度だけ決め、カーソル移動では変えない
    AwaitingInput {
        answers: AnswerSet,
        highlighted: usize,
    },
    Scoring {
        answer: String,
    },
    Finished,
}

/// 最終結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub score: u32,
    pub total: usize,
}

impl Summary {
    /// 全問正解か (0問のときは対象外)
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score as usize == self.total
    }
}

// --------------------------------------------------
// ゲームループ
// --------------------------------------------------

pub struct GameLoop<'s, S: Screen, R: Rng> {
    screen: &'s mut S,
    rng: R,
    diagnostics: Vec<BankDiagnostic>,
    /// まだ何も表示していないか (最初のメッセージだけ中央寄せにする)
    fresh_screen: bool,
}

impl<'s, S: Screen, R: Rng> GameLoop<'s, S, R> {
    pub fn new(screen: &'s mut S, rng: R) -> Self {
        Self {
            screen,
            rng,
            diagnostics: Vec::new(),
            fresh_screen: true,
        }
    }

    /// 問題バンク読み込み時の診断を、ゲーム開始時に表示する
    pub fn with_diagnostics(mut self, diagnostics: Vec<BankDiagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// ラウンドを最後まで進め、結果を返す
    pub fn run(mut self, round: Round) -> Result<Summary, S::Error> {
        let mut state = GameState::new(round);
        let mut phase = Phase::NotStarted;

        loop {
            phase = match phase {
                Phase::NotStarted => self.start(&state)?,
                Phase::Welcome => self.welcome(&state)?,
                Phase::Presenting => self.present(&state)?,
                Phase::AwaitingInput {
                    answers,
                    highlighted,
                } => self.await_input(answers, highlighted)?,
                Phase::Scoring { answer } => self.score(&answer, &mut state)?,
                Phase::Finished => return self.finish(&state),
            };
        }
    }

    /// 見出し系のメッセージ。画面が空なら中央に出す。
    fn announce(&mut self, text: &str, mut emphasis: Emphasis) -> Result<(), S::Error> {
        if self.fresh_screen {
            emphasis.vcenter = true;
            self.fresh_screen = false;
        }
        self.screen.show_message(text, emphasis)
    }

    fn start(&mut self, state: &GameState) -> Result<Phase, S::Error> {
        for diagnostic in std::mem::take(&mut self.diagnostics) {
            for line in diagnostic.lines() {
                self.announce(&line, Emphasis::PLAIN)?;
            }
        }

        if state.round.is_empty() {
            info!("round is empty, skipping straight to the end");
            self.announce(NO_QUESTIONS_MESSAGE, Emphasis::PLAIN)?;
            return Ok(Phase::Finished);
        }

        info!(questions = state.round.len(), "round started");
        Ok(Phase::Welcome)
    }

    fn welcome(&mut self, state: &GameState) -> Result<Phase, S::Error> {
        self.announce("Hello! Welcome to this trivia game :D", Emphasis::PLAIN)?;
        self.announce(
            &format!("We are doing {} questions!", state.round.len()),
            Emphasis::PLAIN,
        )?;
        self.announce("press any key to continue", Emphasis::BLINK)?;
        self.screen.await_any_key()?;
        Ok(Phase::Presenting)
    }

    fn present(&mut self, state: &GameState) -> Result<Phase, S::Error> {
        let Some(question) = state.current_question() else {
            return Ok(Phase::Finished);
        };

        self.screen.show_score_header(state.score())?;
        self.screen.show_question(state.current_index, question.text())?;

        // シャッフルはここで1回だけ
        let answers = AnswerSet::shuffle(question, &mut self.rng);
        Ok(Phase::AwaitingInput {
            answers,
            highlighted: 0,
        })
    }

    fn await_input(&mut self, answers: AnswerSet, highlighted: usize) -> Result<Phase, S::Error> {
        self.screen.show_choices(answers.options(), highlighted)?;

        let phase = match self.screen.await_confirm_or_navigate()? {
            Navigation::Next => Phase::AwaitingInput {
                highlighted: (highlighted + 1) % ANSWER_COUNT,
                answers,
            },
            Navigation::Previous => Phase::AwaitingInput {
                highlighted: (highlighted + ANSWER_COUNT - 1) % ANSWER_COUNT,
                answers,
            },
            Navigation::Confirm => Phase::Scoring {
                answer: answers.get(highlighted).to_string(),
            },
        };
        Ok(phase)
    }

    fn score(&mut self, answer: &str, state: &mut GameState) -> Result<Phase, S::Error> {
        let Some(question) = state.round.get(state.current_index) else {
            return Ok(Phase::Finished);
        };

        let is_correct = question.is_correct(answer);
        let score = state.score.record(is_correct);
        debug!(index = state.current_index, is_correct, score, "answer scored");

        if is_correct {
            self.screen.show_message(CORRECT_MESSAGE, Emphasis::PLAIN)?;
        } else {
            self.screen.show_message(WRONG_MESSAGE, Emphasis::PLAIN)?;
            self.screen.show_message(question.correct(), Emphasis::BOLD)?;
        }

        let is_last = state.is_last_question();
        if !is_last {
            self.screen
                .show_message(&format!("Your score is {score} point(s) now."), Emphasis::PLAIN)?;
        }
        self.screen.show_score_header(score)?;
        self.screen.await_any_key()?;

        if is_last {
            Ok(Phase::Finished)
        } else {
            state.current_index += 1;
            Ok(Phase::Presenting)
        }
    }

    fn finish(&mut self, state: &GameState) -> Result<Summary, S::Error> {
        let summary = Summary {
            score: state.score(),
            total: state.round.len(),
        };
        info!(score = summary.score, total = summary.total, "game finished");

        // 最後の問題の表示を消してから結果を出す (空のラウンドでは通知を残す)
        let heading = Emphasis {
            vcenter: !state.round.is_empty(),
            ..Emphasis::BOLD
        };
        self.screen.show_message("END OF GAME!", heading)?;
        self.screen.show_message(
            &format!(
                "Your total score is {}/{} point(s)!!",
                summary.score, summary.total
            ),
            Emphasis::BOLD,
        )?;

        if summary.is_perfect() {
            for line in PERFECT_BANNER {
                self.screen.show_message(line, Emphasis::PLAIN)?;
            }
            self.screen.show_message(
                PERFECT_MESSAGE,
                Emphasis {
                    bold: true,
                    blink: true,
                    vcenter: false,
                },
            )?;
        }

        self.screen.await_any_key()?;
        Ok(summary)
    }
}
