//! ミニバッファ
//!
//! 画面下部の1行プロンプト。ノードテキストの編集、タイトル編集、
//! エクスポート先の入力、リセット確認、時限メッセージ表示を担う。

use crate::map::NodeId;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

/// メッセージ表示の持続時間
const MESSAGE_DURATION: Duration = Duration::from_secs(5);

/// ミニバッファの動作モード
#[derive(Debug, Clone, PartialEq)]
pub enum MinibufferMode {
    /// 非アクティブ状態
    Inactive,
    /// ノードテキスト編集
    EditText { target: NodeId },
    /// ルートタイトル編集
    EditTitle,
    /// エクスポート先パス入力
    ExportPath,
    /// リセット確認（y/n）
    ResetConfirm,
    /// 情報メッセージ表示
    InfoDisplay { message: String, expires_at: Instant },
    /// エラーメッセージ表示
    ErrorDisplay { message: String, expires_at: Instant },
}

/// 入力処理の結果
#[derive(Debug, Clone, PartialEq)]
pub enum MinibufferOutcome {
    /// 入力継続中（キーは消費した）
    Pending,
    /// Enterで確定した入力
    Submit(String),
    /// キャンセルされた
    Cancel,
    /// 非アクティブのためキーを消費しなかった
    NotConsumed,
}

/// ミニバッファ状態
#[derive(Debug, Clone)]
pub struct Minibuffer {
    mode: MinibufferMode,
    input: String,
    /// カーソル位置（文字単位）
    cursor_pos: usize,
    prompt: String,
}

impl Minibuffer {
    pub fn new() -> Self {
        Self {
            mode: MinibufferMode::Inactive,
            input: String::new(),
            cursor_pos: 0,
            prompt: String::new(),
        }
    }

    /// 現在のモード
    pub fn mode(&self) -> &MinibufferMode {
        &self.mode
    }

    /// 入力を受け付け中か（メッセージ表示は含まない）
    pub fn is_active(&self) -> bool {
        matches!(
            self.mode,
            MinibufferMode::EditText { .. }
                | MinibufferMode::EditTitle
                | MinibufferMode::ExportPath
                | MinibufferMode::ResetConfirm
        )
    }

    /// プロンプト文字列
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// 入力中のテキスト
    pub fn input(&self) -> &str {
        &self.input
    }

    /// カーソル位置（文字単位）
    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// ノードテキスト編集を開始（現在のテキストを種にする）
    pub fn start_edit_text(&mut self, target: NodeId, current: &str) {
        self.mode = MinibufferMode::EditText { target };
        self.prompt = "テキスト: ".to_string();
        self.seed_input(current);
    }

    /// タイトル編集を開始
    pub fn start_edit_title(&mut self, current: &str) {
        self.mode = MinibufferMode::EditTitle;
        self.prompt = "タイトル: ".to_string();
        self.seed_input(current);
    }

    /// エクスポート先入力を開始（提案ファイル名を種にする）
    pub fn start_export(&mut self, suggested: &str) {
        self.mode = MinibufferMode::ExportPath;
        self.prompt = "書き出し先: ".to_string();
        self.seed_input(suggested);
    }

    /// リセット確認を開始
    pub fn start_reset_confirm(&mut self) {
        self.mode = MinibufferMode::ResetConfirm;
        self.prompt = "マップをリセットしますか？ (y/n): ".to_string();
        self.seed_input("");
    }

    /// 情報メッセージを表示
    pub fn show_info(&mut self, message: impl Into<String>) {
        self.mode = MinibufferMode::InfoDisplay {
            message: message.into(),
            expires_at: Instant::now() + MESSAGE_DURATION,
        };
        self.clear_input();
    }

    /// エラーメッセージを表示
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.mode = MinibufferMode::ErrorDisplay {
            message: message.into(),
            expires_at: Instant::now() + MESSAGE_DURATION,
        };
        self.clear_input();
    }

    /// 期限切れのメッセージ表示を片付ける
    pub fn refresh(&mut self) {
        let expired = match &self.mode {
            MinibufferMode::InfoDisplay { expires_at, .. }
            | MinibufferMode::ErrorDisplay { expires_at, .. } => Instant::now() >= *expires_at,
            _ => false,
        };
        if expired {
            self.deactivate();
        }
    }

    /// キーイベントを処理
    pub fn handle_key(&mut self, event: &KeyEvent) -> MinibufferOutcome {
        if !self.is_active() {
            return MinibufferOutcome::NotConsumed;
        }

        // 確認モードは1キーで確定する
        if matches!(self.mode, MinibufferMode::ResetConfirm) {
            return match event.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.deactivate();
                    MinibufferOutcome::Submit("y".to_string())
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.deactivate();
                    MinibufferOutcome::Cancel
                }
                _ => MinibufferOutcome::Pending,
            };
        }

        match event.code {
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.input);
                self.deactivate();
                MinibufferOutcome::Submit(input)
            }
            KeyCode::Esc => {
                self.deactivate();
                MinibufferOutcome::Cancel
            }
            KeyCode::Char(c) => {
                self.insert_char(c);
                MinibufferOutcome::Pending
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    self.cursor_pos -= 1;
                    self.remove_char_at(self.cursor_pos);
                }
                MinibufferOutcome::Pending
            }
            KeyCode::Delete => {
                if self.cursor_pos < self.char_count() {
                    self.remove_char_at(self.cursor_pos);
                }
                MinibufferOutcome::Pending
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                MinibufferOutcome::Pending
            }
            KeyCode::Right => {
                self.cursor_pos = (self.cursor_pos + 1).min(self.char_count());
                MinibufferOutcome::Pending
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                MinibufferOutcome::Pending
            }
            KeyCode::End => {
                self.cursor_pos = self.char_count();
                MinibufferOutcome::Pending
            }
            _ => MinibufferOutcome::Pending,
        }
    }

    fn seed_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.cursor_pos = self.char_count();
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_pos = 0;
        self.prompt.clear();
    }

    fn deactivate(&mut self) {
        self.mode = MinibufferMode::Inactive;
        self.clear_input();
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    fn insert_char(&mut self, c: char) {
        let byte_idx = self.byte_index(self.cursor_pos);
        self.input.insert(byte_idx, c);
        self.cursor_pos += 1;
    }

    fn remove_char_at(&mut self, char_pos: usize) {
        let byte_idx = self.byte_index(char_pos);
        self.input.remove(byte_idx);
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_pos)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len())
    }
}

impl Default for Minibuffer {
    fn default() -> Self {
        Self::new()
    }
}
