// ============================================
// src/round.rs
// ラウンドの抽選と、選択肢のシャッフル
// ============================================

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::bank::{QuestionBank, ROUND_SIZE};
use crate::questions::{ANSWER_COUNT, Question};

/// 1回のゲームで出題する問題の列 (重複なし)
#[derive(Debug, Clone, Default)]
pub struct Round {
    questions: Vec<Question>,
}

impl Round {
    /// バンクから min(10, バンクの大きさ) 問を非復元抽出し、順番もシャッフルする
    pub fn select<R: Rng + ?Sized>(bank: &QuestionBank, rng: &mut R) -> Self {
        let k = ROUND_SIZE.min(bank.len());
        let mut questions: Vec<Question> = bank
            .questions()
            .choose_multiple(rng, k)
            .cloned()
            .collect();
        questions.shuffle(rng);
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// 表示順に並べた4つの選択肢と、正解の位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    options: [String; ANSWER_COUNT],
    correct_index: usize,
}

impl AnswerSet {
    /// 不正解3つ + 正解1つを一様にシャッフルする。出題のたびに呼ぶ。
    pub fn shuffle<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let [a, b, c] = question.incorrect().clone();
        let mut options = [a, b, c, question.correct().to_string()];
        options.shuffle(rng);

        // 4つとも異なる文字列なので位置は一意に決まる
        let correct_index = options
            .iter()
            .position(|option| question.is_correct(option));
        debug_assert!(correct_index.is_some(), "correct answer missing after shuffle");
        let correct_index = correct_index.unwrap_or_default();

        Self {
            options,
            correct_index,
        }
    }

    pub fn options(&self) -> &[String; ANSWER_COUNT] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn get(&self, index: usize) -> &str {
        &self.options[index % ANSWER_COUNT]
    }
}
