// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::io::stdout;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use trivia_wiz::bank::{BankDiagnostic, QuestionBank, load_records};
use trivia_wiz::cli::Cli;
use trivia_wiz::error::TuiError;
use trivia_wiz::game::{GameLoop, Summary};
use trivia_wiz::logging::{LogConfig, init_logging};
use trivia_wiz::round::Round;
use trivia_wiz::tui::{TerminalGuard, TuiScreen};

// --------------------------------------------------
// メイン関数
// --------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {error:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    init_logging(&LogConfig::from_cli(cli)).context("failed to initialize logging")?;

    // 読み込みの失敗はゲームを始める前に報告する
    let path = cli.questions_path()?;
    let records = load_records(&path)?;
    let (bank, diagnostics) = QuestionBank::load(&records, cli.key_policy());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let round = Round::select(&bank, &mut rng);
    info!(path = %path.display(), bank = bank.len(), round = round.len(), "ready to play");

    // ここで端末は元に戻っている
    if let Some(summary) = play(round, diagnostics, rng)? {
        println!(
            "{}",
            style(format!("Final score: {}/{}", summary.score, summary.total)).bold()
        );
    }
    Ok(())
}

/// 端末をゲーム用に切り替えて1ラウンド遊ぶ。中断された場合は None。
fn play(
    round: Round,
    diagnostics: Vec<BankDiagnostic>,
    rng: StdRng,
) -> anyhow::Result<Option<Summary>> {
    let _guard = TerminalGuard::enter().context("failed to prepare the terminal")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    let mut screen = TuiScreen::new(terminal)?;

    match GameLoop::new(&mut screen, rng)
        .with_diagnostics(diagnostics)
        .run(round)
    {
        Ok(summary) => Ok(Some(summary)),
        Err(TuiError::Aborted) => {
            info!("game aborted");
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}
