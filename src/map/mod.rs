//! マインドマップのツリーデータモデル
//!
//! 再帰的なノード構造と純粋な変換関数、およびそれらを束ねる `MindMap` を提供。
//! すべての変更操作は古いツリーを書き換えず、新しいルートを組み立てて返す。

pub mod edit;
pub mod markdown;
pub mod navigation;
pub mod node;

// 公開API
pub use edit::{add_child, delete_node, update_node, update_node_text};
pub use markdown::{convert_to_markdown, display_title, DEFAULT_TITLE};
pub use navigation::{resolve_navigation, NavigationAction};
pub use node::{IdGenerator, Node, NodeId, NodePatch};

/// ツリーとID生成器をまとめた所有者
///
/// 変更のたびにルートを丸ごと置き換える。対象IDが存在しない場合は
/// 何もしない（stale な参照からの呼び出しを許容する方針）。
#[derive(Debug, Clone)]
pub struct MindMap {
    root: Node,
    ids: IdGenerator,
}

impl MindMap {
    /// 空テキストのルートのみを持つマップを作成
    pub fn new() -> Self {
        Self {
            root: Node::new(NodeId::root()),
            ids: IdGenerator::new(),
        }
    }

    /// 現在のルートへの参照
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// ルートのID
    pub fn root_id(&self) -> &NodeId {
        &self.root.id
    }

    /// 指定IDのノードを検索
    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        self.root.find(id)
    }

    /// ツリー全体のノード数
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    /// 指定ノードに空の子ノードを追加し、新しいIDを返す
    ///
    /// 親が見つからない場合は None（ツリーは変わらず、IDも消費しない）。
    pub fn add_child(&mut self, parent_id: &NodeId) -> Option<NodeId> {
        if self.root.find(parent_id).is_none() {
            return None;
        }

        let id = self.ids.next_id();
        let child = Node::new(id.clone());
        self.root = edit::add_child(&self.root, parent_id, &child);
        Some(id)
    }

    /// 指定ノードをサブツリーごと削除
    ///
    /// ルートは親を持たないため削除できない。呼び出し側ガードとして
    /// ルートIDを明示的に拒否する。削除が起きた場合のみ true。
    pub fn delete(&mut self, node_id: &NodeId) -> bool {
        if *node_id == self.root.id {
            return false;
        }
        if self.root.find(node_id).is_none() {
            return false;
        }

        self.root = edit::delete_node(&self.root, node_id);
        true
    }

    /// 指定ノードのテキストを置き換え
    pub fn update_text(&mut self, node_id: &NodeId, text: &str) {
        self.root = edit::update_node_text(&self.root, node_id, text);
    }

    /// 指定ノードの title / text を部分更新
    pub fn update(&mut self, node_id: &NodeId, patch: &NodePatch) {
        self.root = edit::update_node(&self.root, node_id, patch);
    }

    /// 初期状態（ルートのみ）に戻す
    pub fn reset(&mut self) {
        *self = MindMap::new();
    }

    /// エクスポート用マークダウン文書を生成
    pub fn to_markdown(&self) -> String {
        markdown::convert_to_markdown(&self.root)
    }
}

impl Default for MindMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_has_single_empty_root() {
        let map = MindMap::new();
        assert_eq!(map.node_count(), 1);
        assert_eq!(map.root().text, "");
        assert!(map.root().children.is_empty());
    }

    #[test]
    fn add_child_returns_fresh_unique_id() {
        let mut map = MindMap::new();
        let root_id = map.root_id().clone();

        let c1 = map.add_child(&root_id).unwrap();
        let c2 = map.add_child(&root_id).unwrap();

        assert_ne!(c1, c2);
        assert_eq!(map.root().children.len(), 2);
        assert_eq!(map.root().children[0].id, c1);
        assert_eq!(map.root().children[1].id, c2);
    }

    #[test]
    fn add_child_to_unknown_parent_is_noop() {
        let mut map = MindMap::new();
        let before = map.root().clone();

        let result = map.add_child(&NodeId::new("node-999"));

        assert!(result.is_none());
        assert_eq!(*map.root(), before);
    }

    #[test]
    fn delete_root_is_refused() {
        let mut map = MindMap::new();
        let root_id = map.root_id().clone();
        map.add_child(&root_id);

        assert!(!map.delete(&root_id));
        assert_eq!(map.node_count(), 2);
    }

    #[test]
    fn delete_removes_whole_subtree() {
        let mut map = MindMap::new();
        let root_id = map.root_id().clone();
        let child = map.add_child(&root_id).unwrap();
        map.add_child(&child).unwrap();
        map.add_child(&child).unwrap();
        assert_eq!(map.node_count(), 4);

        assert!(map.delete(&child));
        assert_eq!(map.node_count(), 1);
    }

    #[test]
    fn reset_discards_all_nodes_and_restarts_ids() {
        let mut map = MindMap::new();
        let root_id = map.root_id().clone();
        let first = map.add_child(&root_id).unwrap();

        map.reset();
        assert_eq!(map.node_count(), 1);

        // 生成器もリセットされるので最初のIDが再び使える
        let again = map.add_child(&root_id).unwrap();
        assert_eq!(first, again);
    }
}
