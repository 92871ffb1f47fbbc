use super::drag::{apply_drag_end, DragEnd};
use super::error::{MenuError, MenuResult};
use super::index::MenuIndex;
use super::tree::{add_item, collect_ids, edit_item, remove_item, validate_tree};
use crate::models::{ItemPatch, MenuItem};
use std::collections::HashSet;

/// One user-level edit of the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Add {
        parent_path: Vec<usize>,
        item: MenuItem,
    },
    Edit {
        path: Vec<usize>,
        patch: ItemPatch,
    },
    Remove {
        path: Vec<usize>,
    },
    Drag(DragEnd),
}

impl MenuAction {
    /// Add/remove/move change the tree's shape; edits only change fields.
    pub fn is_structural(&self) -> bool {
        !matches!(self, MenuAction::Edit { .. })
    }
}

/// The editor's local copy of the host's menu plus its id index.
///
/// Every committed action replaces `items` wholesale and rebuilds the index.
#[derive(Clone, Debug, Default)]
pub struct MenuEditorState {
    items: Vec<MenuItem>,
    index: MenuIndex,
}

impl MenuEditorState {
    pub fn new(items: Vec<MenuItem>) -> Self {
        let index = MenuIndex::build(&items);
        Self { items, index }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn index(&self) -> &MenuIndex {
        &self.index
    }

    /// Replaces the tree with a new value from the host.
    ///
    /// The value is adopted even when it breaks an invariant, so the host can
    /// still see and repair it; the first violation is returned.
    pub fn reset(&mut self, items: Vec<MenuItem>) -> MenuResult<()> {
        let checked = validate_tree(&items);
        *self = Self::new(items);
        checked
    }

    /// Every id in the added subtree must be non-blank, unused in the tree
    /// and unique within the subtree itself.
    fn check_new_ids(&self, item: &MenuItem) -> MenuResult<()> {
        let mut seen = HashSet::new();
        for id in collect_ids(std::slice::from_ref(item)) {
            if id.trim().is_empty() {
                return Err(MenuError::EmptyId);
            }
            if self.index.contains(&id) || !seen.insert(id.clone()) {
                return Err(MenuError::DuplicateId(id));
            }
        }
        Ok(())
    }

    /// Applies `action`; `Ok(None)` means the tree is unchanged.
    pub fn apply(&mut self, action: &MenuAction) -> MenuResult<Option<Vec<MenuItem>>> {
        let next = match action {
            MenuAction::Add { parent_path, item } => {
                self.check_new_ids(item)?;
                add_item(&self.items, parent_path, item.clone())?
            }
            MenuAction::Edit { path, patch } => edit_item(&self.items, path, patch)?,
            MenuAction::Remove { path } => remove_item(&self.items, path)?,
            MenuAction::Drag(ev) => match apply_drag_end(&self.items, ev)? {
                Some(next) => next,
                None => return Ok(None),
            },
        };

        *self = Self::new(next.clone());
        Ok(Some(next))
    }

    /// Applies `action` and reports the outcome the way the editor's host
    /// expects it: the whole new tree on success, a message on failure,
    /// nothing at all for a no-op. Returns whether the tree changed.
    pub fn dispatch(
        &mut self,
        action: MenuAction,
        on_change: impl FnOnce(Vec<MenuItem>),
        on_error: impl FnOnce(String),
    ) -> bool {
        match self.apply(&action) {
            Ok(Some(next)) => {
                crate::debug_log!("menu: applied {:?}", action);
                on_change(next);
                true
            }
            Ok(None) => false,
            Err(e) => {
                crate::error_log!("menu: rejected {:?}: {}", action, e);
                on_error(e.to_string());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::drag::{resolve_drop, DropTarget};
    use crate::menu::form::{FormMode, ItemDraft};
    use crate::menu::tree::Container;
    use crate::ids::RandomIds;
    use rstest::rstest;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Host {
        changes: RefCell<Vec<Vec<MenuItem>>>,
        errors: RefCell<Vec<String>>,
    }

    impl Host {
        fn dispatch(&self, state: &mut MenuEditorState, action: MenuAction) -> bool {
            state.dispatch(
                action,
                |tree| self.changes.borrow_mut().push(tree),
                |msg| self.errors.borrow_mut().push(msg),
            )
        }

        fn last_change(&self) -> Vec<MenuItem> {
            self.changes.borrow().last().cloned().expect("a change")
        }
    }

    fn submit(state: &MenuEditorState, mode: FormMode, title: &str, url: &str) -> MenuAction {
        ItemDraft {
            title: title.to_string(),
            url: url.to_string(),
            ..Default::default()
        }
        .into_action(&mode, &RandomIds, state.index())
        .expect("valid draft")
    }

    #[test]
    fn test_home_about_scenario() {
        let host = Host::default();
        let mut state = MenuEditorState::new(vec![]);

        let add_home = submit(&state, FormMode::New { parent_path: vec![] }, "Home", "/");
        assert!(host.dispatch(&mut state, add_home));
        let tree = host.last_change();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].title, "Home");
        assert!(tree[0].id.starts_with("temp-"));

        let add_about = submit(
            &state,
            FormMode::New { parent_path: vec![0] },
            "About",
            "/about",
        );
        assert!(host.dispatch(&mut state, add_about));
        let tree = host.last_change();
        assert_eq!(tree[0].children.len(), 1);
        let about_id = tree[0].children[0].id.clone();

        let ev = resolve_drop(
            state.index(),
            state.items(),
            &about_id,
            &DropTarget::Before(tree[0].id.clone()),
        )
        .unwrap();
        assert_eq!(ev.from, Container::Children(tree[0].id.clone()));
        assert!(host.dispatch(&mut state, MenuAction::Drag(ev)));

        let tree = host.last_change();
        let titles: Vec<_> = tree.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["About", "Home"]);
        assert!(tree.iter().all(|i| i.children.is_empty()));
        assert_eq!(host.changes.borrow().len(), 3);
        assert!(host.errors.borrow().is_empty());
    }

    #[test]
    fn test_noop_move_does_not_notify() {
        let host = Host::default();
        let mut state = MenuEditorState::new(vec![
            MenuItem::new("a", "A", "/a"),
            MenuItem::new("b", "B", "/b"),
        ]);

        let changed = host.dispatch(
            &mut state,
            MenuAction::Drag(DragEnd {
                from: Container::Root,
                to: Container::Root,
                old_index: Some(1),
                new_index: Some(1),
            }),
        );

        assert!(!changed);
        assert!(host.changes.borrow().is_empty());
        assert!(host.errors.borrow().is_empty());
    }

    #[test]
    fn test_failed_action_reports_and_keeps_tree() {
        let host = Host::default();
        let original = vec![MenuItem::new("a", "A", "/a")];
        let mut state = MenuEditorState::new(original.clone());

        assert!(!host.dispatch(&mut state, MenuAction::Remove { path: vec![4] }));
        assert!(!host.dispatch(
            &mut state,
            MenuAction::Drag(DragEnd {
                from: Container::Root,
                to: Container::Root,
                old_index: Some(0),
                new_index: None,
            })
        ));

        assert_eq!(state.items(), original.as_slice());
        assert!(host.changes.borrow().is_empty());
        assert_eq!(
            *host.errors.borrow(),
            vec![
                "no menu item at path [4]".to_string(),
                "drag event is missing the destination index".to_string(),
            ]
        );
    }

    #[test]
    fn test_ids_stay_unique_across_adds() {
        let host = Host::default();
        let mut state = MenuEditorState::default();

        for i in 0..20 {
            let parent_path = if i % 3 == 0 || state.items().is_empty() {
                vec![]
            } else {
                vec![state.items().len() - 1]
            };
            let action = submit(&state, FormMode::New { parent_path }, "Item", "/item");
            assert!(host.dispatch(&mut state, action));
        }

        let ids = collect_ids(state.items());
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_add_with_taken_id_is_rejected() {
        let host = Host::default();
        let mut state = MenuEditorState::new(vec![MenuItem::new("a", "A", "/a")]);

        let changed = host.dispatch(
            &mut state,
            MenuAction::Add {
                parent_path: vec![],
                item: MenuItem::new("a", "Again", "/again"),
            },
        );
        assert!(!changed);
        assert_eq!(*host.errors.borrow(), vec!["duplicate menu item id a".to_string()]);
    }

    #[rstest]
    #[case::taken_descendant(
        MenuItem::new("b", "B", "/b").with_children(vec![MenuItem::new("a", "A", "/a")]),
        MenuError::DuplicateId("a".to_string())
    )]
    #[case::repeated_within_subtree(
        MenuItem::new("b", "B", "/b").with_children(vec![MenuItem::new("b", "B2", "/b2")]),
        MenuError::DuplicateId("b".to_string())
    )]
    #[case::blank_root(MenuItem::new("", "B", "/b"), MenuError::EmptyId)]
    #[case::blank_descendant(
        MenuItem::new("b", "B", "/b").with_children(vec![MenuItem::new("  ", "C", "/c")]),
        MenuError::EmptyId
    )]
    fn test_add_checks_every_id_in_subtree(#[case] item: MenuItem, #[case] expected: MenuError) {
        let mut state = MenuEditorState::new(vec![MenuItem::new("a", "A", "/a")]);
        let before = state.items().to_vec();

        let res = state.apply(&MenuAction::Add {
            parent_path: vec![],
            item,
        });

        assert_eq!(res, Err(expected));
        assert_eq!(state.items(), &before[..]);
        assert_eq!(validate_tree(state.items()), Ok(()));
    }

    #[test]
    fn test_emitted_tree_round_trips_as_new_value() {
        let host = Host::default();
        let mut state = MenuEditorState::default();
        let add = submit(&state, FormMode::New { parent_path: vec![] }, "Home", "/");
        host.dispatch(&mut state, add);
        let add = submit(&state, FormMode::New { parent_path: vec![0] }, "Team", "/team");
        host.dispatch(&mut state, add);

        let emitted = host.last_change();
        let json = serde_json::to_string(&emitted).unwrap();
        let reloaded: Vec<MenuItem> = serde_json::from_str(&json).unwrap();

        let mut remounted = MenuEditorState::default();
        assert_eq!(remounted.reset(reloaded), Ok(()));
        assert_eq!(remounted.items(), emitted.as_slice());
    }

    #[test]
    fn test_reset_adopts_invalid_value_but_reports() {
        let mut state = MenuEditorState::default();
        let dup = vec![MenuItem::new("x", "X", "/x"), MenuItem::new("x", "Y", "/y")];

        assert_eq!(state.reset(dup), Err(MenuError::DuplicateId("x".to_string())));
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    fn test_edit_is_not_structural() {
        let edit = MenuAction::Edit {
            path: vec![0],
            patch: ItemPatch::default(),
        };
        assert!(!edit.is_structural());
        assert!(MenuAction::Remove { path: vec![0] }.is_structural());
    }
}
