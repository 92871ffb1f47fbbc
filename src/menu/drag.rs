use super::error::{MenuError, MenuResult};
use super::index::MenuIndex;
use super::tree::{children_of, move_item, Container};
use crate::models::MenuItem;

/// A finished drag gesture, in container terms.
///
/// Indices are optional because browser drag events can arrive without a
/// usable source or target; such gestures are rejected instead of guessed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragEnd {
    pub from: Container,
    pub to: Container,
    pub old_index: Option<usize>,
    pub new_index: Option<usize>,
}

impl DragEnd {
    pub fn is_noop(&self) -> bool {
        self.from == self.to && self.old_index == self.new_index
    }
}

/// Where the pointer released the dragged row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    Before(String),
    After(String),
    /// Appended at the end of a container (also used for empty sub-lists).
    End(Container),
}

/// Splices the dragged node out of its source and into its destination.
pub fn apply_drag_end(items: &[MenuItem], ev: &DragEnd) -> MenuResult<Option<Vec<MenuItem>>> {
    let old_index = ev
        .old_index
        .ok_or(MenuError::MalformedDrag("the source index"))?;
    let new_index = ev
        .new_index
        .ok_or(MenuError::MalformedDrag("the destination index"))?;

    move_item(items, &ev.from, old_index, &ev.to, new_index)
}

/// Turns "item X was dropped on target T" into a [`DragEnd`].
///
/// Both ends are looked up by id at drop time. `new_index` is the position the
/// node ends up at once it has been taken out of its source list.
pub fn resolve_drop(
    index: &MenuIndex,
    items: &[MenuItem],
    dragged_id: &str,
    target: &DropTarget,
) -> MenuResult<DragEnd> {
    let source = index
        .get(dragged_id)
        .ok_or(MenuError::MalformedDrag("a known dragged item"))?;
    let from = source.container();
    let old_index = source.position();

    let (to, raw_index) = match target {
        DropTarget::Before(target_id) | DropTarget::After(target_id) => {
            if target_id == dragged_id {
                return Ok(DragEnd {
                    to: from.clone(),
                    from,
                    old_index: Some(old_index),
                    new_index: Some(old_index),
                });
            }

            let entry = index
                .get(target_id)
                .ok_or(MenuError::MalformedDrag("a known drop target"))?;
            let after = matches!(target, DropTarget::After(_));
            (entry.container(), entry.position() + usize::from(after))
        }
        DropTarget::End(container) => {
            let len = children_of(items, container)?.len();
            (container.clone(), len)
        }
    };

    let new_index = if to == from && old_index < raw_index {
        raw_index - 1
    } else {
        raw_index
    };

    Ok(DragEnd {
        from,
        to,
        old_index: Some(old_index),
        new_index: Some(new_index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> MenuItem {
        MenuItem::new(id, id, format!("/{id}"))
    }

    fn ids(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn drop_and_apply(items: &[MenuItem], dragged: &str, target: DropTarget) -> Vec<MenuItem> {
        let index = MenuIndex::build(items);
        let ev = resolve_drop(&index, items, dragged, &target).expect("drop should resolve");
        apply_drag_end(items, &ev)
            .expect("drag should apply")
            .expect("drag should change the tree")
    }

    #[test]
    fn test_drag_child_back_to_root_front() {
        let tree = vec![item("home").with_children(vec![item("about")])];

        let ev = DragEnd {
            from: Container::Children("home".to_string()),
            to: Container::Root,
            old_index: Some(0),
            new_index: Some(0),
        };
        let next = apply_drag_end(&tree, &ev).unwrap().unwrap();

        assert_eq!(ids(&next), vec!["about", "home"]);
        assert!(next.iter().all(|i| i.children.is_empty()));
    }

    #[test]
    fn test_missing_indices_abort() {
        let tree = vec![item("a"), item("b")];
        let mut ev = DragEnd {
            from: Container::Root,
            to: Container::Root,
            old_index: None,
            new_index: Some(1),
        };
        assert_eq!(
            apply_drag_end(&tree, &ev),
            Err(MenuError::MalformedDrag("the source index"))
        );

        ev.old_index = Some(0);
        ev.new_index = None;
        assert_eq!(
            apply_drag_end(&tree, &ev),
            Err(MenuError::MalformedDrag("the destination index"))
        );
    }

    #[test]
    fn test_drop_below_next_sibling_moves_down_one() {
        let tree = vec![item("a"), item("b"), item("c")];
        let next = drop_and_apply(&tree, "a", DropTarget::After("b".into()));
        assert_eq!(ids(&next), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_drop_above_earlier_sibling() {
        let tree = vec![item("a"), item("b"), item("c")];
        let next = drop_and_apply(&tree, "c", DropTarget::Before("a".into()));
        assert_eq!(ids(&next), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_drop_onto_self_or_its_slot_is_noop() {
        let tree = vec![item("a"), item("b")];
        let index = MenuIndex::build(&tree);

        let ev = resolve_drop(&index, &tree, "a", &DropTarget::After("a".into())).unwrap();
        assert!(ev.is_noop());

        let ev = resolve_drop(&index, &tree, "a", &DropTarget::Before("b".into())).unwrap();
        assert!(ev.is_noop());
        assert_eq!(apply_drag_end(&tree, &ev), Ok(None));
    }

    #[test]
    fn test_drop_at_end_of_other_container() {
        let tree = vec![item("a").with_children(vec![item("a1")]), item("b")];
        let next = drop_and_apply(&tree, "b", DropTarget::End(Container::Children("a".into())));

        assert_eq!(ids(&next), vec!["a"]);
        assert_eq!(ids(&next[0].children), vec!["a1", "b"]);
    }

    #[test]
    fn test_drop_at_end_of_own_container() {
        let tree = vec![item("a"), item("b"), item("c")];
        let next = drop_and_apply(&tree, "a", DropTarget::End(Container::Root));
        assert_eq!(ids(&next), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_unknown_ids_are_malformed() {
        let tree = vec![item("a")];
        let index = MenuIndex::build(&tree);

        assert_eq!(
            resolve_drop(&index, &tree, "ghost", &DropTarget::End(Container::Root)),
            Err(MenuError::MalformedDrag("a known dragged item"))
        );
        assert_eq!(
            resolve_drop(&index, &tree, "a", &DropTarget::Before("ghost".into())),
            Err(MenuError::MalformedDrag("a known drop target"))
        );
    }
}
