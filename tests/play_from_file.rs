use std::convert::Infallible;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use trivia_wiz::bank::{BankDiagnostic, QuestionBank, load_records};
use trivia_wiz::game::{Emphasis, GameLoop, Navigation, Screen};
use trivia_wiz::questions::KeyPolicy;
use trivia_wiz::round::Round;

/// 最初の選択肢で必ず決定する画面
#[derive(Default)]
struct FirstChoiceScreen {
    messages: Vec<String>,
    questions: Vec<String>,
}

impl Screen for FirstChoiceScreen {
    type Error = Infallible;

    fn show_message(&mut self, text: &str, _: Emphasis) -> Result<(), Infallible> {
        self.messages.push(text.to_string());
        Ok(())
    }

    fn show_question(&mut self, _: usize, text: &str) -> Result<(), Infallible> {
        self.questions.push(text.to_string());
        Ok(())
    }

    fn show_choices(&mut self, _: &[String], _: usize) -> Result<(), Infallible> {
        Ok(())
    }

    fn await_confirm_or_navigate(&mut self) -> Result<Navigation, Infallible> {
        Ok(Navigation::Confirm)
    }

    fn await_any_key(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn show_score_header(&mut self, _: u32) -> Result<(), Infallible> {
        Ok(())
    }
}

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
}

#[test]
fn mixed_file_keeps_only_playable_questions() {
    let records = load_records(&fixture("tests/fixtures/mixed.json")).unwrap();
    assert_eq!(records.len(), 9);

    let (bank, diagnostics) = QuestionBank::load(&records, KeyPolicy::Tolerant);
    assert_eq!(bank.len(), 2);
    assert_eq!(diagnostics, vec![BankDiagnostic::ShortRound { available: 2 }]);

    let (strict, _) = QuestionBank::load(&records, KeyPolicy::Exact);
    assert_eq!(strict.len(), 1);
}

#[test]
fn short_file_plays_a_short_round() {
    let records = load_records(&fixture("tests/fixtures/mixed.json")).unwrap();
    let (bank, diagnostics) = QuestionBank::load(&records, KeyPolicy::Tolerant);
    let mut rng = StdRng::seed_from_u64(17);
    let round = Round::select(&bank, &mut rng);

    let mut screen = FirstChoiceScreen::default();
    let summary = GameLoop::new(&mut screen, rng)
        .with_diagnostics(diagnostics)
        .run(round)
        .unwrap();

    assert_eq!(summary.total, 2);
    assert!(summary.score <= 2);
    assert_eq!(screen.questions.len(), 2);
    assert_eq!(
        screen.messages[1],
        "The game will continue but will only have 2 questions"
    );
    assert!(
        screen
            .messages
            .contains(&format!("Your total score is {}/2 point(s)!!", summary.score))
    );
}

#[test]
fn bundled_questions_fill_a_round() {
    let records = load_records(&fixture("questions.json")).unwrap();
    let (bank, diagnostics) = QuestionBank::load(&records, KeyPolicy::Exact);
    assert!(bank.len() >= 10);
    assert!(diagnostics.is_empty());

    for seed in 0..5 {
        let round = Round::select(&bank, &mut StdRng::seed_from_u64(seed));
        assert_eq!(round.len(), 10);
    }
}
