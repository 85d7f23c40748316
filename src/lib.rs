//! edaha - ターミナルで動くマインドマップエディタ
//!
//! ツリーデータモデルとビューポート制御を核としたモジュール構成

// コアモジュール
pub mod error;
pub mod logging;
pub mod app;

// データ層
pub mod map;
pub mod file;

// ロジック層
pub mod input;
pub mod minibuffer;

// 表示層
pub mod ui;

// 公開API
pub use app::App;
pub use error::{EdahaError, Result};
pub use map::{MindMap, Node, NodeId, NodePatch};
