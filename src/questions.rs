/*
 * src/questions.rs
 * 問題データの構造と、生レコードの検証ロジック
 */

use serde::Deserialize;
use serde_json::Value;

/// 1問あたりの選択肢の数 (正解 1 + 不正解 3)
pub const ANSWER_COUNT: usize = 4;

/// レコードが持つべきキー
const REQUIRED_KEYS: [&str; 3] = ["question", "correct", "incorrect"];

/// キーの扱い方
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyPolicy {
    /// 必須キーがあればOK (余計なキーは無視)
    #[default]
    Tolerant,
    /// キーの集合が必須キーとぴったり一致する必要がある
    Exact,
}

/// 検証済みの問題 (作成後は不変)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    text: String,
    correct: String,
    incorrect: [String; ANSWER_COUNT - 1],
}

/// serde でそのまま読み込むための生の形
#[derive(Deserialize)]
struct RawQuestion {
    question: String,
    correct: String,
    incorrect: Vec<String>,
}

impl Question {
    /// 生レコードを検証し、問題として使えるなら `Question` を返す
    pub fn from_record(record: &Value, policy: KeyPolicy) -> Option<Self> {
        let map = record.as_object()?;

        if !REQUIRED_KEYS.iter().all(|key| map.contains_key(*key)) {
            return None;
        }
        if policy == KeyPolicy::Exact && map.len() != REQUIRED_KEYS.len() {
            return None;
        }

        // 型が違えばここで弾かれる (数値の question、文字列以外の選択肢など)
        let raw = RawQuestion::deserialize(record).ok()?;

        if raw.question.is_empty() {
            return None;
        }

        let incorrect: [String; ANSWER_COUNT - 1] = raw.incorrect.try_into().ok()?;
        let [a, b, c] = &incorrect;
        if a == b || b == c || a == c {
            return None;
        }
        if incorrect.contains(&raw.correct) {
            return None;
        }

        Some(Self {
            text: raw.question,
            correct: raw.correct,
            incorrect,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn correct(&self) -> &str {
        &self.correct
    }

    pub fn incorrect(&self) -> &[String; ANSWER_COUNT - 1] {
        &self.incorrect
    }

    /// 回答が正解と一致するか (文字列の完全一致)
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct
    }
}

/// レコードが問題として成立しているかどうか。副作用なし、パニックなし。
pub fn validate(record: &Value, policy: KeyPolicy) -> bool {
    Question::from_record(record, policy).is_some()
}

#[cfg(test)]
pub(crate) fn sample_question(n: usize) -> Question {
    Question {
        text: format!("Question number {n}?"),
        correct: format!("right {n}"),
        incorrect: [
            format!("wrong {n}a"),
            format!("wrong {n}b"),
            format!("wrong {n}c"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn good() -> Value {
        json!({
            "question": "What is 2 + 2?",
            "correct": "4",
            "incorrect": ["3", "5", "22"]
        })
    }

    #[test]
    fn accepts_well_formed_record() {
        let question = Question::from_record(&good(), KeyPolicy::Tolerant).unwrap();
        assert_eq!(question.text(), "What is 2 + 2?");
        assert_eq!(question.correct(), "4");
        assert_eq!(question.incorrect(), &["3", "5", "22"].map(String::from));
        assert!(validate(&good(), KeyPolicy::Exact));
    }

    #[test]
    fn rejects_missing_fields() {
        for key in REQUIRED_KEYS {
            let mut record = good();
            record.as_object_mut().unwrap().remove(key);
            assert!(!validate(&record, KeyPolicy::Tolerant), "missing {key}");
        }
    }

    #[test]
    fn tolerant_policy_allows_extra_keys() {
        let mut record = good();
        record["category"] = json!("Math");
        assert!(validate(&record, KeyPolicy::Tolerant));
    }

    #[test]
    fn exact_policy_rejects_extra_keys() {
        let mut record = good();
        record["category"] = json!("Math");
        assert!(!validate(&record, KeyPolicy::Exact));
    }

    #[test]
    fn default_policy_is_tolerant() {
        assert_eq!(KeyPolicy::default(), KeyPolicy::Tolerant);
    }

    #[test]
    fn rejects_wrong_number_of_incorrect_answers() {
        let mut record = good();
        record["incorrect"] = json!(["3", "5"]);
        assert!(!validate(&record, KeyPolicy::Tolerant));

        record["incorrect"] = json!(["3", "5", "6", "7"]);
        assert!(!validate(&record, KeyPolicy::Tolerant));
    }

    #[test]
    fn rejects_repeated_incorrect_answers() {
        let mut record = good();
        record["incorrect"] = json!(["3", "5", "3"]);
        assert!(!validate(&record, KeyPolicy::Tolerant));
    }

    #[test]
    fn rejects_correct_answer_among_incorrect() {
        let mut record = good();
        record["incorrect"] = json!(["3", "4", "5"]);
        assert!(!validate(&record, KeyPolicy::Tolerant));
    }

    #[test]
    fn rejects_wrong_types() {
        let cases = [
            json!({ "question": 12, "correct": "4", "incorrect": ["3", "5", "22"] }),
            json!({ "question": "Q", "correct": 4, "incorrect": ["3", "5", "22"] }),
            json!({ "question": "Q", "correct": "4", "incorrect": "3,5,22" }),
            json!({ "question": "Q", "correct": "4", "incorrect": ["3", 5, "22"] }),
            json!({ "question": "", "correct": "4", "incorrect": ["3", "5", "22"] }),
            json!(null),
            json!("just a string"),
            json!([1, 2, 3]),
        ];
        for record in cases {
            assert!(!validate(&record, KeyPolicy::Tolerant), "{record}");
        }
    }

    #[test]
    fn validation_is_pure() {
        let record = good();
        assert_eq!(
            validate(&record, KeyPolicy::Tolerant),
            validate(&record, KeyPolicy::Tolerant)
        );
        assert_eq!(record, good());
    }

    #[test]
    fn equality_covers_every_field() {
        let a = Question::from_record(&good(), KeyPolicy::Tolerant).unwrap();
        let mut other = good();
        other["incorrect"] = json!(["3", "5", "23"]);
        let b = Question::from_record(&other, KeyPolicy::Tolerant).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
