//! レイアウト計算
//!
//! 画面の分割と、ツリーの再帰的な水平スタッキング配置を計算する。
//! 配置は描画の関心事であり、ツリーデータ自体には一切触れない。

use crate::error::{EdahaError, UiError};
use crate::map::{Node, NodeId};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthChar;

/// 最小画面サイズ
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 10;

/// 拡大率 1.0 のときのノード枠の幅（セル）
const BASE_NODE_WIDTH: f64 = 24.0;
/// 拡大率 1.0 のときのノード枠の高さ（セル）
const BASE_NODE_HEIGHT: f64 = 3.0;
/// 兄弟間の水平ギャップ
const BASE_H_GAP: f64 = 4.0;
/// 深さ1段ぶんの垂直ギャップ
const BASE_V_GAP: f64 = 2.0;

/// アプリケーション全体のレイアウト
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// ヘッダ行（上部、1行）
    pub header: Rect,
    /// キャンバス（中央、可変）
    pub canvas: Rect,
    /// ミニバッファ（下部、1行）
    pub minibuffer: Rect,
}

/// 画面サイズからレイアウトを計算
pub fn calculate_layout(area: Rect) -> Result<AppLayout, EdahaError> {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return Err(EdahaError::Ui(UiError::ScreenTooSmall {
            width: area.width,
            height: area.height,
        }));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // ヘッダ
            Constraint::Min(1),    // キャンバス
            Constraint::Length(1), // ミニバッファ
        ])
        .split(area);

    Ok(AppLayout {
        header: chunks[0],
        canvas: chunks[1],
        minibuffer: chunks[2],
    })
}

/// 拡大率を反映したセル寸法
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub node_width: i32,
    pub node_height: i32,
    pub h_gap: i32,
    pub v_gap: i32,
}

impl CellMetrics {
    /// 拡大率からセル寸法を決める
    ///
    /// 枠線と1文字ぶんが必ず収まるよう下限を設ける。
    pub fn for_zoom(zoom: f64) -> Self {
        Self {
            node_width: ((BASE_NODE_WIDTH * zoom).round() as i32).max(6),
            node_height: ((BASE_NODE_HEIGHT * zoom).round() as i32).max(3),
            h_gap: ((BASE_H_GAP * zoom).round() as i32).max(1),
            v_gap: ((BASE_V_GAP * zoom).round() as i32).max(1),
        }
    }

    fn row_height(&self) -> i32 {
        self.node_height + self.v_gap
    }
}

/// 配置済みノード1件
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub id: NodeId,
    /// キャンバス座標
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// ツリー深さ（ルート = 1）
    pub depth: usize,
    /// 親枠の下辺中央（接続線の始点）。ルートは None。
    pub parent_anchor: Option<(i32, i32)>,
}

impl NodeBox {
    /// 枠の上辺中央（接続線の終点）
    pub fn top_anchor(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y)
    }

    /// 枠の下辺中央
    pub fn bottom_anchor(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height - 1)
    }
}

/// ツリー全体の配置結果
#[derive(Debug, Clone)]
pub struct TreeLayout {
    pub boxes: Vec<NodeBox>,
    /// キャンバス座標での全体の大きさ
    pub width: i32,
    pub height: i32,
}

impl TreeLayout {
    /// 指定IDの配置を検索
    pub fn find(&self, id: &NodeId) -> Option<&NodeBox> {
        self.boxes.iter().find(|b| b.id == *id)
    }
}

/// ツリーを再帰的な水平スタッキングで配置する
///
/// サブツリーの幅は「自身の枠幅」と「子サブツリー幅の合計 + ギャップ」の
/// 大きい方。子は左から順に並び、親はそのブロックの中央に置かれる。
pub fn layout_tree(root: &Node, zoom: f64) -> TreeLayout {
    let metrics = CellMetrics::for_zoom(zoom);
    let mut boxes = Vec::with_capacity(root.count());
    let total_width = subtree_width(root, &metrics);

    place_subtree(root, 0, 0, 1, None, &metrics, &mut boxes);

    let height = boxes
        .iter()
        .map(|b| b.y + b.height)
        .max()
        .unwrap_or(0);

    TreeLayout {
        boxes,
        width: total_width,
        height,
    }
}

fn subtree_width(node: &Node, metrics: &CellMetrics) -> i32 {
    if node.children.is_empty() {
        return metrics.node_width;
    }

    let children_width: i32 = node
        .children
        .iter()
        .map(|c| subtree_width(c, metrics))
        .sum::<i32>()
        + metrics.h_gap * (node.children.len() as i32 - 1);

    children_width.max(metrics.node_width)
}

fn place_subtree(
    node: &Node,
    x: i32,
    y: i32,
    depth: usize,
    parent_anchor: Option<(i32, i32)>,
    metrics: &CellMetrics,
    boxes: &mut Vec<NodeBox>,
) {
    let width = subtree_width(node, metrics);
    let node_x = x + (width - metrics.node_width) / 2;

    let placed = NodeBox {
        id: node.id.clone(),
        x: node_x,
        y,
        width: metrics.node_width,
        height: metrics.node_height,
        depth,
        parent_anchor,
    };
    let anchor = placed.bottom_anchor();
    boxes.push(placed);

    let mut child_x = x;
    let child_y = y + metrics.row_height();
    for child in &node.children {
        place_subtree(
            child,
            child_x,
            child_y,
            depth + 1,
            Some(anchor),
            metrics,
            boxes,
        );
        child_x += subtree_width(child, metrics) + metrics.h_gap;
    }
}

/// ラベルを表示幅に収まるよう切り詰める
///
/// 全角文字は2セルとして数える。
pub fn truncate_label(text: &str, max_width: usize) -> String {
    let mut width = 0usize;
    let mut result = String::new();

    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(children_per_level: &[usize]) -> Node {
        fn build(id: &mut u32, levels: &[usize]) -> Node {
            let mut node = Node::new(NodeId::new(format!("node-{}", *id)));
            *id += 1;
            if let Some((&count, rest)) = levels.split_first() {
                for _ in 0..count {
                    node.children.push(build(id, rest));
                }
            }
            node
        }
        let mut id = 0;
        build(&mut id, children_per_level)
    }

    #[test]
    fn test_layout_small_screen_is_rejected() {
        let result = calculate_layout(Rect::new(0, 0, 10, 5));
        assert!(matches!(
            result,
            Err(EdahaError::Ui(UiError::ScreenTooSmall { .. }))
        ));
    }

    #[test]
    fn test_layout_splits_header_canvas_minibuffer() {
        let layout = calculate_layout(Rect::new(0, 0, 80, 24)).unwrap();
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.minibuffer.height, 1);
        assert_eq!(layout.canvas.height, 22);
    }

    #[test]
    fn test_single_node_layout() {
        let root = tree(&[]);
        let layout = layout_tree(&root, 1.0);

        assert_eq!(layout.boxes.len(), 1);
        assert_eq!(layout.boxes[0].depth, 1);
        assert_eq!(layout.boxes[0].parent_anchor, None);
    }

    #[test]
    fn test_siblings_do_not_overlap() {
        let root = tree(&[3]);
        let layout = layout_tree(&root, 1.0);

        let mut children: Vec<&NodeBox> =
            layout.boxes.iter().filter(|b| b.depth == 2).collect();
        children.sort_by_key(|b| b.x);
        assert_eq!(children.len(), 3);

        for pair in children.windows(2) {
            assert!(pair[0].x + pair[0].width <= pair[1].x);
        }
    }

    #[test]
    fn test_parent_centered_over_children() {
        let root = tree(&[2]);
        let layout = layout_tree(&root, 1.0);

        let parent = &layout.boxes[0];
        let children: Vec<&NodeBox> =
            layout.boxes.iter().filter(|b| b.depth == 2).collect();

        let block_left = children.iter().map(|b| b.x).min().unwrap();
        let block_right = children.iter().map(|b| b.x + b.width).max().unwrap();
        let block_center = (block_left + block_right) / 2;
        let parent_center = parent.x + parent.width / 2;

        assert!((parent_center - block_center).abs() <= 1);
    }

    #[test]
    fn test_depth_maps_to_rows() {
        let root = tree(&[1, 1]);
        let layout = layout_tree(&root, 1.0);

        let ys: Vec<i32> = layout.boxes.iter().map(|b| b.y).collect();
        assert!(ys[0] < ys[1]);
        assert!(ys[1] < ys[2]);
    }

    #[test]
    fn test_zoom_scales_geometry() {
        let root = tree(&[2]);
        let small = layout_tree(&root, 0.5);
        let large = layout_tree(&root, 2.0);

        assert!(large.width > small.width);
        assert!(large.boxes[0].width > small.boxes[0].width);
    }

    #[test]
    fn test_metrics_have_floor_at_min_zoom() {
        let metrics = CellMetrics::for_zoom(0.1);
        assert!(metrics.node_width >= 6);
        assert!(metrics.node_height >= 3);
        assert!(metrics.h_gap >= 1);
    }

    #[test]
    fn test_truncate_label_counts_fullwidth_as_two() {
        assert_eq!(truncate_label("abcdef", 4), "abcd");
        assert_eq!(truncate_label("日本語", 4), "日本");
        assert_eq!(truncate_label("日本語", 5), "日本");
    }
}
