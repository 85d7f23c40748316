//! ツリー変換操作
//!
//! すべての操作は同じ再帰的な書き換えで実装される：対象ノードで編集を適用し、
//! それ以外のノードは同じフィールドのまま、各子に同じ操作を再帰適用した結果で
//! 組み立て直す。引数のツリーは決して変更しない。
//!
//! 対象IDが存在しない場合は内容の等しいツリーが返る（安全な no-op）。
//! UI側の stale な参照と競合してもエラーにしない方針。

use super::node::{Node, NodePatch};
use super::NodeId;

/// 指定ノードの子として `child` を末尾に追加した新しいツリーを返す
///
/// IDは一意なので挿入は高々1箇所で起きる。
pub fn add_child(root: &Node, parent_id: &NodeId, child: &Node) -> Node {
    let children = if root.id == *parent_id {
        let mut next: Vec<Node> = root.children.clone();
        next.push(child.clone());
        next
    } else {
        root.children
            .iter()
            .map(|c| add_child(c, parent_id, child))
            .collect()
    };

    Node {
        id: root.id.clone(),
        title: root.title.clone(),
        text: root.text.clone(),
        children,
    }
}

/// 指定ノードをサブツリーごと取り除いた新しいツリーを返す
///
/// ルート自身は親を持たないため、この関数では決して取り除かれない。
pub fn delete_node(root: &Node, node_id: &NodeId) -> Node {
    let children = root
        .children
        .iter()
        .filter(|c| c.id != *node_id)
        .map(|c| delete_node(c, node_id))
        .collect();

    Node {
        id: root.id.clone(),
        title: root.title.clone(),
        text: root.text.clone(),
        children,
    }
}

/// 指定ノードのテキストだけを置き換えた新しいツリーを返す
pub fn update_node_text(root: &Node, node_id: &NodeId, text: &str) -> Node {
    update_node(root, node_id, &NodePatch::new().text(text))
}

/// 指定ノードの title / text を部分更新した新しいツリーを返す
///
/// patch に含まれないフィールドは元の値を保つ。
pub fn update_node(root: &Node, node_id: &NodeId, patch: &NodePatch) -> Node {
    if root.id == *node_id {
        return Node {
            id: root.id.clone(),
            title: patch.title.clone().unwrap_or_else(|| root.title.clone()),
            text: patch.text.clone().unwrap_or_else(|| root.text.clone()),
            children: root.children.clone(),
        };
    }

    Node {
        id: root.id.clone(),
        title: root.title.clone(),
        text: root.text.clone(),
        children: root
            .children
            .iter()
            .map(|c| update_node(c, node_id, patch))
            .collect(),
    }
}
