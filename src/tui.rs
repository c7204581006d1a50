// ============================================
// src/tui.rs
// 端末への描画とキー入力 (ratatui + crossterm)
// ============================================

use std::io::{self, stdout};

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::debug;

use crate::error::TuiError;
use crate::game::{Emphasis, Navigation, Screen};

// --------------------------------------------------
// rawモードのスコープ
// --------------------------------------------------

/// 生きている間だけ rawモード + 代替スクリーン。Drop で必ず元に戻す。
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // ここから先で失敗しても guard の Drop で戻る
        let guard = Self { _private: () };
        stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
        stdout().execute(Hide)?; // カーソルを非表示
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = stdout().execute(Show);
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

// --------------------------------------------------
// キー入力
// --------------------------------------------------

/// キーの意味
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Navigate(Navigation),
    Abort,
    Other,
}

fn key_action(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::Abort,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Abort,
        KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => KeyAction::Navigate(Navigation::Next),
        KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => {
            KeyAction::Navigate(Navigation::Previous)
        }
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Navigate(Navigation::Confirm),
        _ => KeyAction::Other,
    }
}

/// キー入力の取り出し元
pub trait EventSource {
    fn read(&mut self) -> io::Result<Event>;
}

/// 実際の端末から読む
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn read(&mut self) -> io::Result<Event> {
        event::read()
    }
}

// --------------------------------------------------
// 画面の中身
// --------------------------------------------------

#[derive(Debug, Clone)]
enum BodyLine {
    Message { text: String, emphasis: Emphasis },
    Question { index: usize, text: String },
    /// 選択肢を描く位置
    Choices,
}

/// 描画する内容 (terminal とは別に持つ)
#[derive(Debug, Default)]
struct ScreenBuffer {
    score: Option<u32>,
    body: Vec<BodyLine>,
    choices: Vec<String>,
    highlighted: usize,
    /// 縦方向の中央に寄せるか
    centered: bool,
}

impl ScreenBuffer {
    fn clear(&mut self) {
        self.body.clear();
        self.choices.clear();
        self.highlighted = 0;
        self.centered = false;
    }

    fn lines(&self) -> Vec<Line<'_>> {
        let alert = Style::default().fg(Color::Black).bg(Color::Yellow);
        let mut lines = Vec::new();

        for item in &self.body {
            match item {
                BodyLine::Message { text, emphasis } => {
                    let mut style = alert;
                    if emphasis.bold {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    if emphasis.blink {
                        style = style.add_modifier(Modifier::SLOW_BLINK);
                    }
                    lines.push(Line::from(text.as_str()).style(style).centered());
                }
                BodyLine::Question { index, text } => {
                    lines.push(Line::from(format!(" Question {}", index + 1)).bold());
                    lines.push(Line::default());
                    lines.push(Line::from(format!(" {text}")));
                    lines.push(Line::default());
                }
                BodyLine::Choices => {
                    for (i, choice) in self.choices.iter().enumerate() {
                        if i == self.highlighted {
                            let selected =
                                Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
                            lines.push(Line::from(format!(" > {choice}")).style(selected));
                        } else {
                            lines.push(Line::from(format!("   {choice}")));
                        }
                    }
                    lines.push(Line::default());
                }
            }
        }
        lines
    }
}

fn ui(f: &mut Frame, buffer: &ScreenBuffer) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("Trivia Wiz !");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] スコア
            Constraint::Length(1), // [1] 空白
            Constraint::Min(1),    // [2] 本文
        ])
        .split(inner_area);

    // 0. スコア表示
    if let Some(score) = buffer.score {
        f.render_widget(
            Paragraph::new(format!("YOUR CURRENT SCORE IS {score}"))
                .style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .centered(),
            chunks[0],
        );
    }

    // 2. 本文
    let body = buffer.lines();
    let pad = if buffer.centered {
        (chunks[2].height as usize).saturating_sub(body.len()) / 2
    } else {
        0
    };
    let mut lines = vec![Line::default(); pad];
    lines.extend(body);
    // 長い問題文は折り返す
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[2]);
}

// --------------------------------------------------
// Screen の実装
// --------------------------------------------------

pub struct TuiScreen<B: Backend, E: EventSource = CrosstermEvents> {
    terminal: Terminal<B>,
    buffer: ScreenBuffer,
    events: E,
}

impl<B: Backend> TuiScreen<B> {
    pub fn new(terminal: Terminal<B>) -> io::Result<Self> {
        Self::with_events(terminal, CrosstermEvents)
    }
}

impl<B: Backend, E: EventSource> TuiScreen<B, E> {
    pub fn with_events(mut terminal: Terminal<B>, events: E) -> io::Result<Self> {
        terminal.clear()?;
        Ok(Self {
            terminal,
            buffer: ScreenBuffer::default(),
            events,
        })
    }

    fn redraw(&mut self) -> Result<(), TuiError> {
        self.terminal.draw(|f| ui(f, &self.buffer))?;
        Ok(())
    }

    /// キーが押されるまで待つ (リサイズ時は描き直す)
    fn read_key(&mut self) -> Result<KeyEvent, TuiError> {
        loop {
            match self.events.read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key_action(key) == KeyAction::Abort {
                        debug!("abort key pressed");
                        return Err(TuiError::Aborted);
                    }
                    return Ok(key);
                }
                Event::Resize(..) => self.redraw()?,
                _ => {}
            }
        }
    }
}

impl<B: Backend, E: EventSource> Screen for TuiScreen<B, E> {
    type Error = TuiError;

    fn show_message(&mut self, text: &str, emphasis: Emphasis) -> Result<(), TuiError> {
        if emphasis.vcenter {
            self.buffer.clear();
            self.buffer.centered = true;
        }
        self.buffer.body.push(BodyLine::Message {
            text: text.to_string(),
            emphasis,
        });
        self.redraw()
    }

    fn show_question(&mut self, index: usize, text: &str) -> Result<(), TuiError> {
        self.buffer.clear();
        self.buffer.body.push(BodyLine::Question {
            index,
            text: text.to_string(),
        });
        self.redraw()
    }

    fn show_choices(&mut self, options: &[String], highlighted: usize) -> Result<(), TuiError> {
        if !self
            .buffer
            .body
            .iter()
            .any(|line| matches!(line, BodyLine::Choices))
        {
            self.buffer.body.push(BodyLine::Choices);
        }
        self.buffer.choices = options.to_vec();
        self.buffer.highlighted = highlighted;
        self.redraw()
    }

    fn await_confirm_or_navigate(&mut self) -> Result<Navigation, TuiError> {
        loop {
            if let KeyAction::Navigate(navigation) = key_action(self.read_key()?) {
                return Ok(navigation);
            }
        }
    }

    fn await_any_key(&mut self) -> Result<(), TuiError> {
        self.read_key()?;
        Ok(())
    }

    fn show_score_header(&mut self, score: u32) -> Result<(), TuiError> {
        self.buffer.score = Some(score);
        self.redraw()
    }
}
