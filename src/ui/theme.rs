//! テーマシステム
//!
//! ノード枠・選択・ミニバッファなど、UI要素ごとのスタイル定義

use ratatui::style::{Color, Modifier, Style};

/// UIコンポーネントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// ルートノードの枠
    RootNode,
    /// 通常ノードの枠
    Node,
    /// 選択中ノードの枠
    SelectedNode,
    /// 親子の接続線
    Connector,
    /// ヘッダ行
    Header,
    /// ミニバッファのプロンプト
    MinibufferPrompt,
    /// ミニバッファの入力テキスト
    MinibufferInput,
    /// エラーメッセージ
    Error,
    /// 情報メッセージ
    Info,
}

/// テーマ
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
}

impl Theme {
    /// 既定のダークテーマ
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
        }
    }

    /// コンポーネントに対応するスタイルを取得
    pub fn style(&self, component: ComponentType) -> Style {
        match component {
            ComponentType::RootNode => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            ComponentType::Node => Style::default().fg(Color::White),
            ComponentType::SelectedNode => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            ComponentType::Connector => Style::default().fg(Color::DarkGray),
            ComponentType::Header => Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray),
            ComponentType::MinibufferPrompt => Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            ComponentType::MinibufferInput => Style::default().fg(Color::White),
            ComponentType::Error => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            ComponentType::Info => Style::default().fg(Color::Green),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_node_stands_out() {
        let theme = Theme::dark();
        let normal = theme.style(ComponentType::Node);
        let selected = theme.style(ComponentType::SelectedNode);
        assert_ne!(normal, selected);
    }
}
