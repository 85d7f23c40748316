//! 入力処理モジュール
//!
//! キーバインド、コマンド実行、タッチジェスチャー認識

pub mod commands;
pub mod gesture;
pub mod keybinding;

// 公開API
pub use commands::{Command, CommandProcessor, CommandResult};
pub use gesture::{ContactPoint, GestureEvent, SwipeDirection, SwipeTracker, TouchTracker};
pub use keybinding::KeyMap;
