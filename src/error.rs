//! エラーハンドリングシステム
//!
//! edaha 全体で使用される統一されたエラー型とユーティリティを定義。
//! ツリー操作は「対象IDが見つからない」場合をエラーにせず no-op とする方針の
//! ため、ここで扱うのはファイル書き出し・端末制御など周辺のエラーのみ。

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum EdahaError {
    /// ファイル操作エラー（エクスポート書き出し）
    #[error("File operation failed")]
    File(#[from] FileError),

    /// UI操作エラー
    #[error("UI operation failed")]
    Ui(#[from] UiError),

    /// 入力処理エラー
    #[error("Input processing failed")]
    Input(#[from] InputError),

    /// アプリケーション論理エラー
    #[error("Application error: {0}")]
    Application(String),

    /// パスエラー
    #[error("Path error: {0}")]
    Path(String),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum FileError {
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Screen size too small: {width}x{height}")]
    ScreenTooSmall { width: u16, height: u16 },

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 入力処理固有のエラー
#[derive(Error, Debug, Clone)]
pub enum InputError {
    #[error("Unknown command: {command}")]
    UnknownCommand { command: String },

    #[error("Invalid argument: {arg}")]
    InvalidArgument { arg: String },
}

// std::io::Error から EdahaError への変換
impl From<std::io::Error> for EdahaError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => EdahaError::File(FileError::PermissionDenied {
                path: String::new(),
            }),
            _ => EdahaError::File(FileError::Io {
                message: error.to_string(),
            }),
        }
    }
}

/// パニックハンドラの設定
///
/// raw mode のままパニックすると端末が壊れるため、位置情報を stderr に
/// 出してから即座に終了する。
pub fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .unwrap_or_else(|| std::panic::Location::caller());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        eprintln!("PANIC at {}:{}: {}", location.file(), location.line(), message);
        eprintln!("Stack trace: {}", std::backtrace::Backtrace::capture());

        std::process::exit(1);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, EdahaError>;
