//! キーバインドシステム
//!
//! キーイベントからコマンド名への変換。プレフィックスキーは使わず、
//! 1ストロークの平坦なキーマップで構成する。

use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Esc,
    Unknown,
}

impl Key {
    fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    fn ctrl(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: true,
                shift: false,
            },
            code,
        }
    }

    fn shift(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers {
                ctrl: false,
                shift: true,
            },
            code,
        }
    }

    /// crossterm のキーイベントから変換
    pub fn from_event(event: &KeyEvent) -> Self {
        let code = match event.code {
            CrosstermKeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        // 文字キーはShift済みの文字が届くため、Shiftは矢印キーなどにだけ意味を持つ
        let shift = event.modifiers.contains(CrosstermModifiers::SHIFT)
            && !matches!(code, KeyCode::Char(_));

        Self {
            modifiers: KeyModifiers {
                ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
                shift,
            },
            code,
        }
    }
}

/// キーマップ
#[derive(Debug)]
pub struct KeyMap {
    bindings: HashMap<Key, &'static str>,
}

impl KeyMap {
    /// 既定のキーバインドを構築
    pub fn new() -> Self {
        let mut bindings = HashMap::new();

        // ノード操作
        bindings.insert(Key::plain(KeyCode::Tab), "add-child");
        bindings.insert(Key::plain(KeyCode::Char('a')), "add-child");
        bindings.insert(Key::plain(KeyCode::Char('d')), "delete-node");
        bindings.insert(Key::plain(KeyCode::Delete), "delete-node");
        bindings.insert(Key::plain(KeyCode::Enter), "edit-text");
        bindings.insert(Key::plain(KeyCode::Char('e')), "edit-text");
        bindings.insert(Key::plain(KeyCode::Char('t')), "edit-title");
        bindings.insert(Key::plain(KeyCode::Char('r')), "reset-map");

        // エクスポート・終了
        bindings.insert(Key::plain(KeyCode::Char('s')), "export-markdown");
        bindings.insert(Key::ctrl(KeyCode::Char('s')), "export-markdown");
        bindings.insert(Key::plain(KeyCode::Char('q')), "quit");
        bindings.insert(Key::ctrl(KeyCode::Char('c')), "quit");

        // 選択移動
        bindings.insert(Key::plain(KeyCode::Up), "select-parent");
        bindings.insert(Key::plain(KeyCode::Char('k')), "select-parent");
        bindings.insert(Key::plain(KeyCode::Down), "select-first-child");
        bindings.insert(Key::plain(KeyCode::Char('j')), "select-first-child");
        bindings.insert(Key::plain(KeyCode::Right), "select-next-sibling");
        bindings.insert(Key::plain(KeyCode::Char('l')), "select-next-sibling");
        bindings.insert(Key::plain(KeyCode::Left), "select-previous-sibling");
        bindings.insert(Key::plain(KeyCode::Char('h')), "select-previous-sibling");
        bindings.insert(Key::plain(KeyCode::Char('n')), "select-next-node");
        bindings.insert(Key::plain(KeyCode::Char('p')), "select-previous-node");

        // ズーム
        bindings.insert(Key::plain(KeyCode::Char('+')), "zoom-in");
        bindings.insert(Key::plain(KeyCode::Char('=')), "zoom-in");
        bindings.insert(Key::plain(KeyCode::Char('-')), "zoom-out");
        bindings.insert(Key::plain(KeyCode::Char('0')), "zoom-reset");

        // スクロール
        bindings.insert(Key::shift(KeyCode::Up), "scroll-up");
        bindings.insert(Key::shift(KeyCode::Down), "scroll-down");
        bindings.insert(Key::shift(KeyCode::Left), "scroll-left");
        bindings.insert(Key::shift(KeyCode::Right), "scroll-right");

        Self { bindings }
    }

    /// キーイベントに対応するコマンド名を検索
    pub fn lookup(&self, event: &KeyEvent) -> Option<&'static str> {
        self.bindings.get(&Key::from_event(event)).copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}
