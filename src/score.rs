// ============================================
// src/score.rs
// ============================================

/// 現在のスコア。正解時に +1 するだけで、減ることはない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreKeeper {
    score: u32,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// 回答結果を記録し、更新後のスコアを返す
    pub fn record(&mut self, is_correct: bool) -> u32 {
        if is_correct {
            self.score += 1;
        }
        self.score
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(ScoreKeeper::new().score(), 0);
    }

    #[test]
    fn only_correct_answers_count() {
        let mut keeper = ScoreKeeper::new();
        let mut previous = keeper.score();
        for is_correct in [true, false, false, true, true, false] {
            let now = keeper.record(is_correct);
            assert_eq!(now, previous + u32::from(is_correct));
            previous = now;
        }
        assert_eq!(keeper.score(), 3);
    }
}
