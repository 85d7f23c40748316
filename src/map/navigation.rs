//! 選択ナビゲーション
//!
//! ツリー上の選択ノードをキーボードで移動するための軽量ユーティリティ。
//! ツリー自体は変更せず、移動先のIDを解決するだけ。

use super::node::{Node, NodeId};

/// ナビゲーション操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationAction {
    /// 親ノードへ
    SelectParent,
    /// 最初の子へ
    SelectFirstChild,
    /// 次の兄弟へ
    SelectNextSibling,
    /// 前の兄弟へ
    SelectPreviousSibling,
    /// 行きがけ順で次のノードへ
    SelectNextNode,
    /// 行きがけ順で前のノードへ
    SelectPreviousNode,
}

/// 移動先のノードIDを解決する
///
/// 移動できない場合（境界、または current が見つからない場合）は None。
pub fn resolve_navigation(
    root: &Node,
    current: &NodeId,
    action: NavigationAction,
) -> Option<NodeId> {
    match action {
        NavigationAction::SelectParent => find_parent(root, current).map(|p| p.id.clone()),
        NavigationAction::SelectFirstChild => root
            .find(current)
            .and_then(|n| n.children.first())
            .map(|c| c.id.clone()),
        NavigationAction::SelectNextSibling => sibling(root, current, 1),
        NavigationAction::SelectPreviousSibling => sibling(root, current, -1),
        NavigationAction::SelectNextNode => preorder_neighbor(root, current, 1),
        NavigationAction::SelectPreviousNode => preorder_neighbor(root, current, -1),
    }
}

/// 指定ノードの親を検索
pub fn find_parent<'a>(root: &'a Node, id: &NodeId) -> Option<&'a Node> {
    if root.children.iter().any(|c| c.id == *id) {
        return Some(root);
    }
    root.children.iter().find_map(|c| find_parent(c, id))
}

fn sibling(root: &Node, current: &NodeId, offset: isize) -> Option<NodeId> {
    let parent = find_parent(root, current)?;
    let index = parent.children.iter().position(|c| c.id == *current)?;
    let target = index.checked_add_signed(offset)?;
    parent.children.get(target).map(|c| c.id.clone())
}

fn preorder_neighbor(root: &Node, current: &NodeId, offset: isize) -> Option<NodeId> {
    let ids = root.collect_ids();
    let index = ids.iter().position(|id| id == current)?;
    let target = index.checked_add_signed(offset)?;
    ids.get(target).cloned()
}
