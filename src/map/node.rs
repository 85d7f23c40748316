//! ノード定義
//!
//! マインドマップを構成する再帰的なノードと、ID生成・部分更新の補助型。

use std::fmt;

/// ノード識別子
///
/// ツリー内で一意な不透明文字列。生成後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// 任意の文字列からIDを作成
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// ルートノードの固定ID
    pub fn root() -> Self {
        Self("root".to_string())
    }

    /// 文字列表現への参照
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// マインドマップの1ノード
///
/// `children` の並び順は兄弟の表示順とエクスポート順を定義する。
/// `title` はルートのみが使用する表示用ラベル（エクスポートのファイル名にも使う）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    /// 空テキスト・子なしのノードを作成
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            title: String::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// テキスト付きでノードを作成（テスト・組み立て用）
    pub fn with_text(id: NodeId, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::new(id)
        }
    }

    /// 指定IDのノードを深さ優先で検索
    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        if self.id == *id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// このサブツリーに含まれるノード数
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// 行きがけ順（pre-order DFS）で全IDを収集
    pub fn collect_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(self.count());
        self.push_ids(&mut ids);
        ids
    }

    fn push_ids(&self, ids: &mut Vec<NodeId>) {
        ids.push(self.id.clone());
        for child in &self.children {
            child.push_ids(ids);
        }
    }
}

/// ノードID生成器
///
/// 要件はツリーの寿命内での一意性のみなので、単調増加カウンタで足りる。
/// 時刻や乱数に依らないためテストが決定的になる。
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// 次の一意なIDを生成
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(format!("node-{}", self.next));
        self.next += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// title / text の部分更新
///
/// None のフィールドは変更しない。両方 None なら完全な no-op。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub title: Option<String>,
    pub text: Option<String>,
}

impl NodePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// 更新対象のフィールドが一つもないか
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_nested_node() {
        let mut root = Node::new(NodeId::root());
        let mut child = Node::with_text(NodeId::new("node-1"), "子");
        child.children.push(Node::with_text(NodeId::new("node-2"), "孫"));
        root.children.push(child);

        assert_eq!(root.find(&NodeId::new("node-2")).unwrap().text, "孫");
        assert!(root.find(&NodeId::new("node-9")).is_none());
    }

    #[test]
    fn test_collect_ids_is_preorder() {
        let mut root = Node::new(NodeId::root());
        let mut c1 = Node::new(NodeId::new("node-1"));
        c1.children.push(Node::new(NodeId::new("node-2")));
        root.children.push(c1);
        root.children.push(Node::new(NodeId::new("node-3")));

        let ids: Vec<String> = root
            .collect_ids()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["root", "node-1", "node-2", "node-3"]);
    }

    #[test]
    fn test_id_generator_is_monotonic() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert_eq!(a.as_str(), "node-1");
        assert_eq!(b.as_str(), "node-2");
    }

    #[test]
    fn test_patch_builder() {
        let patch = NodePatch::new().text("hello");
        assert!(!patch.is_empty());
        assert_eq!(patch.text.as_deref(), Some("hello"));
        assert!(patch.title.is_none());

        assert!(NodePatch::new().is_empty());
    }
}
