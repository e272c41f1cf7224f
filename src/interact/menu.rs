//! Context-menu model.
//!
//! Entry order for a node target:
//!   - container actions: New File, New Folder, ─, Paste '<name>', ─
//!   - item actions (non-root only): Rename, Cut, ─, Delete
//!
//! A background target offers the same create/paste actions against the
//! root, labelled "(Root)". A trailing separator is never kept.

use crate::interact::clipboard::{basename, Clipboard};
use crate::tree::{NodeId, Tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Node(NodeId),
    Background,
}

/// What picking an entry does. Paths are captured when the menu opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    NewFile { parent: String },
    NewFolder { parent: String },
    Rename { path: String },
    Cut { path: String },
    Delete { path: String },
    Paste { destination: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item { label: String, action: MenuAction },
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub target: MenuTarget,
    pub entries: Vec<MenuEntry>,
}

impl ContextMenu {
    /// Build the menu for `target`. `None` when there is nothing to offer,
    /// i.e. a background click before any tree has arrived.
    pub fn build(tree: Option<&Tree>, target: MenuTarget, clipboard: &Clipboard) -> Option<Self> {
        let tree = tree?;
        let mut entries = Vec::new();
        match target {
            MenuTarget::Background => {
                let root = tree.root().path.clone();
                push(&mut entries, "New File (Root)", MenuAction::NewFile { parent: root.clone() });
                push(&mut entries, "New Folder (Root)", MenuAction::NewFolder { parent: root.clone() });
                if let Some(source) = clipboard.holding() {
                    entries.push(MenuEntry::Separator);
                    push(
                        &mut entries,
                        format!("Paste '{}' in Root", basename(source)),
                        MenuAction::Paste { destination: root },
                    );
                }
            }
            MenuTarget::Node(id) => {
                let node = tree.get(id)?;
                let path = node.path.clone();
                if node.is_root() || node.body.is_stellar() {
                    push(&mut entries, "New File", MenuAction::NewFile { parent: path.clone() });
                    push(&mut entries, "New Folder", MenuAction::NewFolder { parent: path.clone() });
                    entries.push(MenuEntry::Separator);
                    if let Some(source) = clipboard.holding() {
                        push(
                            &mut entries,
                            format!("Paste '{}'", basename(source)),
                            MenuAction::Paste { destination: path.clone() },
                        );
                        entries.push(MenuEntry::Separator);
                    }
                }
                if !node.is_root() {
                    push(&mut entries, "Rename", MenuAction::Rename { path: path.clone() });
                    push(&mut entries, "Cut", MenuAction::Cut { path: path.clone() });
                    entries.push(MenuEntry::Separator);
                    push(&mut entries, "Delete", MenuAction::Delete { path });
                }
            }
        }
        while matches!(entries.last(), Some(MenuEntry::Separator)) {
            entries.pop();
        }
        Some(Self { target, entries })
    }

    /// Item labels in order, separators skipped.
    pub fn labels(&self) -> Vec<&str> {
        self.items().map(|(label, _)| label).collect()
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &MenuAction)> {
        self.entries.iter().filter_map(|e| match e {
            MenuEntry::Item { label, action } => Some((label.as_str(), action)),
            MenuEntry::Separator => None,
        })
    }

    /// The action behind the entry labelled `label`.
    pub fn find(&self, label: &str) -> Option<&MenuAction> {
        self.items().find(|(l, _)| *l == label).map(|(_, a)| a)
    }
}

fn push(entries: &mut Vec<MenuEntry>, label: impl Into<String>, action: MenuAction) {
    entries.push(MenuEntry::Item { label: label.into(), action });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeRecord;

    fn tree() -> Tree {
        let rec = NodeRecord::star("proj", "/proj")
            .with_child(NodeRecord::planet("a.ts", "/proj/a.ts", 10.0, 0.0))
            .with_child(NodeRecord::star("lib", "/proj/lib"));
        Tree::from_record(&rec)
    }

    #[test]
    fn root_offers_only_create() {
        let t = tree();
        let menu = ContextMenu::build(Some(&t), MenuTarget::Node(NodeId::ROOT), &Clipboard::Empty).unwrap();
        assert_eq!(menu.labels(), ["New File", "New Folder"]);
        assert_eq!(menu.entries.len(), 2);
    }

    #[test]
    fn planet_offers_item_actions() {
        let t = tree();
        let menu = ContextMenu::build(Some(&t), MenuTarget::Node(NodeId(1)), &Clipboard::Holding("/x".into())).unwrap();
        assert_eq!(menu.labels(), ["Rename", "Cut", "Delete"]);
        assert_eq!(menu.entries[2], MenuEntry::Separator);
    }

    #[test]
    fn folder_with_clipboard_offers_paste() {
        let t = tree();
        let clip = Clipboard::Holding("/proj/a.ts".into());
        let menu = ContextMenu::build(Some(&t), MenuTarget::Node(NodeId(2)), &clip).unwrap();
        assert_eq!(menu.labels(), ["New File", "New Folder", "Paste 'a.ts'", "Rename", "Cut", "Delete"]);
        assert_eq!(
            menu.find("Paste 'a.ts'"),
            Some(&MenuAction::Paste { destination: "/proj/lib".into() })
        );
    }

    #[test]
    fn background_targets_root() {
        let t = tree();
        let clip = Clipboard::Holding("/proj/lib/b.ts".into());
        let menu = ContextMenu::build(Some(&t), MenuTarget::Background, &clip).unwrap();
        assert_eq!(menu.labels(), ["New File (Root)", "New Folder (Root)", "Paste 'b.ts' in Root"]);
        assert_eq!(menu.find("New File (Root)"), Some(&MenuAction::NewFile { parent: "/proj".into() }));
    }

    #[test]
    fn no_tree_no_menu() {
        assert!(ContextMenu::build(None, MenuTarget::Background, &Clipboard::Empty).is_none());
    }
}
