//! コマンドシステム
//!
//! マインドマップ操作コマンドの定義と実行

use crate::map::{resolve_navigation, MindMap, NavigationAction, NodeId, NodePatch};

/// コマンド実行の結果
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// 実行が成功したか
    pub success: bool,
    /// 結果メッセージ
    pub message: Option<String>,
    /// 画面更新が必要か
    pub needs_refresh: bool,
    /// アプリケーションを終了するか
    pub should_quit: bool,
}

impl CommandResult {
    /// 成功結果を作成
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
            needs_refresh: true,
            should_quit: false,
        }
    }

    /// メッセージ付き成功結果を作成
    pub fn success_with_message(message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            needs_refresh: true,
            should_quit: false,
        }
    }

    /// 画面更新なしの成功結果を作成
    pub fn success_no_refresh() -> Self {
        Self {
            success: true,
            message: None,
            needs_refresh: false,
            should_quit: false,
        }
    }

    /// エラー結果を作成
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            needs_refresh: false,
            should_quit: false,
        }
    }

    /// 終了結果を作成
    pub fn quit() -> Self {
        Self {
            success: true,
            message: Some("アプリケーションを終了します".to_string()),
            needs_refresh: false,
            should_quit: true,
        }
    }
}

/// コマンドの種類
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // ノード操作
    AddChild,
    DeleteNode,
    EditText,
    EditTitle,
    ResetMap,

    // 選択移動
    SelectParent,
    SelectFirstChild,
    SelectNextSibling,
    SelectPreviousSibling,
    SelectNextNode,
    SelectPreviousNode,

    // ビューポート操作（アプリ側で処理）
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,

    // エクスポート・終了
    ExportMarkdown,
    Quit,

    // 未知のコマンド
    Unknown(String),
}

impl Command {
    /// 文字列からコマンドを作成
    pub fn from_string(cmd: &str) -> Self {
        match cmd {
            "add-child" => Command::AddChild,
            "delete-node" => Command::DeleteNode,
            "edit-text" => Command::EditText,
            "edit-title" => Command::EditTitle,
            "reset-map" => Command::ResetMap,
            "select-parent" => Command::SelectParent,
            "select-first-child" => Command::SelectFirstChild,
            "select-next-sibling" => Command::SelectNextSibling,
            "select-previous-sibling" => Command::SelectPreviousSibling,
            "select-next-node" => Command::SelectNextNode,
            "select-previous-node" => Command::SelectPreviousNode,
            "zoom-in" => Command::ZoomIn,
            "zoom-out" => Command::ZoomOut,
            "zoom-reset" => Command::ZoomReset,
            "scroll-up" => Command::ScrollUp,
            "scroll-down" => Command::ScrollDown,
            "scroll-left" => Command::ScrollLeft,
            "scroll-right" => Command::ScrollRight,
            "export-markdown" => Command::ExportMarkdown,
            "quit" => Command::Quit,
            _ => Command::Unknown(cmd.to_string()),
        }
    }

    /// コマンドの説明を取得
    pub fn description(&self) -> &'static str {
        match self {
            Command::AddChild => "選択ノードに子を追加",
            Command::DeleteNode => "選択ノードを削除",
            Command::EditText => "選択ノードのテキストを編集",
            Command::EditTitle => "マップのタイトルを編集",
            Command::ResetMap => "マップを初期状態に戻す",
            Command::SelectParent => "親ノードを選択",
            Command::SelectFirstChild => "最初の子ノードを選択",
            Command::SelectNextSibling => "次の兄弟ノードを選択",
            Command::SelectPreviousSibling => "前の兄弟ノードを選択",
            Command::SelectNextNode => "次のノードを選択",
            Command::SelectPreviousNode => "前のノードを選択",
            Command::ZoomIn => "拡大",
            Command::ZoomOut => "縮小",
            Command::ZoomReset => "拡大率をリセット",
            Command::ScrollUp => "画面を上にスクロール",
            Command::ScrollDown => "画面を下にスクロール",
            Command::ScrollLeft => "画面を左にスクロール",
            Command::ScrollRight => "画面を右にスクロール",
            Command::ExportMarkdown => "マークダウンとして書き出し",
            Command::Quit => "終了",
            Command::Unknown(_) => "不明なコマンド",
        }
    }
}

/// コマンド処理器
///
/// ツリーと選択状態を所有し、ツリーに閉じたコマンドをここで処理する。
/// ミニバッファやビューポートが絡むコマンドはアプリ側が先に処理する。
pub struct CommandProcessor {
    map: MindMap,
    selection: NodeId,
}

impl CommandProcessor {
    /// 新しいコマンド処理器を作成
    pub fn new() -> Self {
        let map = MindMap::new();
        let selection = map.root_id().clone();
        Self { map, selection }
    }

    /// マップへの参照
    pub fn map(&self) -> &MindMap {
        &self.map
    }

    /// 現在の選択ノードID
    pub fn selection(&self) -> &NodeId {
        &self.selection
    }

    /// 選択を変更（存在しないIDは無視）
    pub fn select(&mut self, id: &NodeId) -> bool {
        if self.map.find(id).is_some() {
            self.selection = id.clone();
            true
        } else {
            false
        }
    }

    /// コマンドを実行
    pub fn execute(&mut self, command: Command) -> CommandResult {
        match command {
            Command::AddChild => self.execute_add_child(),
            Command::DeleteNode => self.execute_delete_node(),
            Command::SelectParent => self.navigate(NavigationAction::SelectParent),
            Command::SelectFirstChild => self.navigate(NavigationAction::SelectFirstChild),
            Command::SelectNextSibling => self.navigate(NavigationAction::SelectNextSibling),
            Command::SelectPreviousSibling => {
                self.navigate(NavigationAction::SelectPreviousSibling)
            }
            Command::SelectNextNode => self.navigate(NavigationAction::SelectNextNode),
            Command::SelectPreviousNode => self.navigate(NavigationAction::SelectPreviousNode),
            Command::Quit => CommandResult::quit(),
            Command::EditText
            | Command::EditTitle
            | Command::ResetMap
            | Command::ExportMarkdown
            | Command::ZoomIn
            | Command::ZoomOut
            | Command::ZoomReset
            | Command::ScrollUp
            | Command::ScrollDown
            | Command::ScrollLeft
            | Command::ScrollRight => {
                CommandResult::error("このコマンドはアプリ側で処理します".to_string())
            }
            Command::Unknown(cmd) => CommandResult::error(format!("不明なコマンド: {}", cmd)),
        }
    }

    fn execute_add_child(&mut self) -> CommandResult {
        let parent = self.selection.clone();
        match self.map.add_child(&parent) {
            Some(new_id) => {
                self.selection = new_id;
                CommandResult::success_with_message("子ノードを追加しました".to_string())
            }
            // 選択が stale だった場合は何もしない（安全な no-op）
            None => CommandResult::success_no_refresh(),
        }
    }

    fn execute_delete_node(&mut self) -> CommandResult {
        if self.selection == *self.map.root_id() {
            return CommandResult::error("ルートノードは削除できません".to_string());
        }

        let parent = crate::map::navigation::find_parent(self.map.root(), &self.selection)
            .map(|p| p.id.clone())
            .unwrap_or_else(|| self.map.root_id().clone());

        if self.map.delete(&self.selection.clone()) {
            self.selection = parent;
            CommandResult::success_with_message("ノードを削除しました".to_string())
        } else {
            CommandResult::success_no_refresh()
        }
    }

    fn navigate(&mut self, action: NavigationAction) -> CommandResult {
        match resolve_navigation(self.map.root(), &self.selection, action) {
            Some(next) => {
                self.selection = next;
                CommandResult::success()
            }
            None => CommandResult::success_no_refresh(),
        }
    }

    /// 指定ノードのテキストを確定する（ミニバッファからの反映）
    pub fn apply_text_edit(&mut self, id: &NodeId, text: &str) -> CommandResult {
        self.map.update_text(id, text);
        CommandResult::success()
    }

    /// ルートのタイトルを確定する
    pub fn apply_title_edit(&mut self, title: &str) -> CommandResult {
        let root_id = self.map.root_id().clone();
        self.map.update(&root_id, &NodePatch::new().title(title));
        CommandResult::success_with_message("タイトルを更新しました".to_string())
    }

    /// マップを初期状態に戻す
    pub fn reset_map(&mut self) -> CommandResult {
        self.map.reset();
        self.selection = self.map.root_id().clone();
        CommandResult::success_with_message("マップをリセットしました".to_string())
    }

    /// エクスポート文書を生成
    pub fn export_markdown(&self) -> String {
        self.map.to_markdown()
    }
}

impl Default for CommandProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_from_string() {
        assert_eq!(Command::from_string("add-child"), Command::AddChild);
        assert_eq!(Command::from_string("zoom-in"), Command::ZoomIn);

        match Command::from_string("unknown-command") {
            Command::Unknown(name) => assert_eq!(name, "unknown-command"),
            _ => panic!("Expected Unknown"),
        }
    }

    #[test]
    fn test_command_result() {
        let success = CommandResult::success();
        assert!(success.success);
        assert!(success.needs_refresh);
        assert!(!success.should_quit);

        let quit = CommandResult::quit();
        assert!(quit.success);
        assert!(quit.should_quit);
    }

    #[test]
    fn test_add_child_moves_selection() {
        let mut processor = CommandProcessor::new();

        let result = processor.execute(Command::AddChild);
        assert!(result.success);
        assert_ne!(processor.selection(), processor.map().root_id());
        assert_eq!(processor.map().node_count(), 2);
    }

    #[test]
    fn test_delete_refuses_root() {
        let mut processor = CommandProcessor::new();

        let result = processor.execute(Command::DeleteNode);
        assert!(!result.success);
        assert_eq!(processor.map().node_count(), 1);
    }

    #[test]
    fn test_delete_moves_selection_to_parent() {
        let mut processor = CommandProcessor::new();
        processor.execute(Command::AddChild);

        let result = processor.execute(Command::DeleteNode);
        assert!(result.success);
        assert_eq!(processor.selection(), processor.map().root_id());
        assert_eq!(processor.map().node_count(), 1);
    }

    #[test]
    fn test_navigation_at_boundary_is_noop() {
        let mut processor = CommandProcessor::new();

        let result = processor.execute(Command::SelectParent);
        assert!(result.success);
        assert!(!result.needs_refresh);
        assert_eq!(processor.selection(), processor.map().root_id());
    }

    #[test]
    fn test_viewport_commands_are_deferred_to_app() {
        let mut processor = CommandProcessor::new();
        let result = processor.execute(Command::ZoomIn);
        assert!(!result.success);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut processor = CommandProcessor::new();
        processor.execute(Command::AddChild);
        processor.execute(Command::AddChild);

        let result = processor.reset_map();
        assert!(result.success);
        assert_eq!(processor.map().node_count(), 1);
        assert_eq!(processor.selection(), processor.map().root_id());
    }

    #[test]
    fn test_text_edit_applies_to_target() {
        let mut processor = CommandProcessor::new();
        processor.execute(Command::AddChild);
        let child = processor.selection().clone();

        processor.apply_text_edit(&child, "アイデア");
        assert_eq!(processor.map().find(&child).unwrap().text, "アイデア");
    }
}
