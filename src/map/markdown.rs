//! マークダウン書き出し
//!
//! ツリーを見出しだけの文書に直列化する。1行目はルートの表示タイトル、
//! 以降は行きがけ順（pre-order DFS）で各ノードのテキストを1行ずつ、
//! 見出しレベル = ツリー深さ（ルート = 1）で出力する。

use super::node::Node;

/// ルートの title が空のときに使う既定タイトル
pub const DEFAULT_TITLE: &str = "マインドマップ";

/// ルートの表示タイトル（空なら既定値）
pub fn display_title(root: &Node) -> &str {
    let title = root.title.trim();
    if title.is_empty() {
        DEFAULT_TITLE
    } else {
        title
    }
}

/// ツリー全体をマークダウン文書に変換
///
/// 空テキストのノードも（空の）見出し行として必ず出力する。
pub fn convert_to_markdown(root: &Node) -> String {
    let mut lines = Vec::with_capacity(root.count() + 1);
    lines.push(heading_line(1, display_title(root)));
    push_headings(&mut lines, root, 1);
    let mut document = lines.join("\n");
    document.push('\n');
    document
}

fn push_headings(lines: &mut Vec<String>, node: &Node, depth: usize) {
    lines.push(heading_line(depth, &node.text));
    for child in &node.children {
        push_headings(lines, child, depth + 1);
    }
}

/// 見出し1行を組み立てる
///
/// マーカーは深さぶんの `#`。深さと入れ子レベルの対応だけが契約であり、
/// CommonMark の6段制限には合わせない。空テキストは末尾空白を落として
/// マーカーのみの行になる。
fn heading_line(depth: usize, text: &str) -> String {
    let line = format!("{} {}", "#".repeat(depth), text);
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::node::NodeId;

    fn node(id: &str, text: &str, children: Vec<Node>) -> Node {
        let mut n = Node::with_text(NodeId::new(id), text);
        n.children = children;
        n
    }

    #[test]
    fn test_heading_levels_follow_depth() {
        // root ─┬─ c1 ── g1
        //        └─ c2 ── g2
        let root = node(
            "root",
            "中心",
            vec![
                node("node-1", "枝1", vec![node("node-2", "葉1", vec![])]),
                node("node-3", "枝2", vec![node("node-4", "葉2", vec![])]),
            ],
        );

        let document = convert_to_markdown(&root);
        let lines: Vec<&str> = document.lines().collect();

        assert_eq!(
            lines,
            vec![
                "# マインドマップ",
                "# 中心",
                "## 枝1",
                "### 葉1",
                "## 枝2",
                "### 葉2",
            ]
        );
    }

    #[test]
    fn test_empty_text_still_emits_heading_line() {
        let root = node("root", "", vec![node("node-1", "", vec![])]);

        let document = convert_to_markdown(&root);
        let lines: Vec<&str> = document.lines().collect();

        assert_eq!(lines, vec!["# マインドマップ", "#", "##"]);
    }

    #[test]
    fn test_title_used_for_first_line() {
        let mut root = node("root", "中心", vec![]);
        root.title = "今期の計画".to_string();

        let document = convert_to_markdown(&root);
        assert!(document.starts_with("# 今期の計画\n"));
    }

    #[test]
    fn test_display_title_falls_back_on_whitespace() {
        let mut root = node("root", "", vec![]);
        root.title = "   ".to_string();
        assert_eq!(display_title(&root), DEFAULT_TITLE);
    }

    #[test]
    fn test_depth_beyond_six_keeps_growing() {
        let mut current = node("node-7", "深", vec![]);
        for i in (1..7).rev() {
            current = node(&format!("node-{}", i), "n", vec![current]);
        }
        let mut root = node("root", "r", vec![current]);
        root.title = "t".to_string();

        let document = convert_to_markdown(&root);
        let last = document.lines().last().unwrap();
        assert_eq!(last, format!("{} 深", "#".repeat(8)));
    }
}
