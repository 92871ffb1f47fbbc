//! Pure edits over the menu tree.
//!
//! Every operation takes the current items by reference and hands back a new
//! `Vec<MenuItem>`; the input is never touched. Nodes are addressed either by
//! a path of sibling indices (`[2, 0]` is the first child of the third root
//! item) or, for drag moves, by the id of the container's parent.

use super::error::{MenuError, MenuResult};
use crate::models::{ItemPatch, MenuItem};
use std::collections::HashSet;

/// Root items are level 0, the deepest allowed nodes are level 2.
pub const MAX_LEVELS: usize = 3;

/// A sibling sequence: the root list or the children of one node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Container {
    Root,
    Children(String),
}

impl Container {
    pub fn of_parent(parent_id: Option<&str>) -> Self {
        match parent_id {
            Some(id) => Container::Children(id.to_string()),
            None => Container::Root,
        }
    }

    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Container::Root => None,
            Container::Children(id) => Some(id.as_str()),
        }
    }

    /// Value rendered into `data-parent-id`; empty for the root container.
    pub fn dom_parent_id(&self) -> String {
        self.parent_id().unwrap_or_default().to_string()
    }
}

/// Whether a node at `level` may receive children.
pub fn can_add_child(level: usize) -> bool {
    level + 1 < MAX_LEVELS
}

pub fn node_at<'a>(items: &'a [MenuItem], path: &[usize]) -> Option<&'a MenuItem> {
    let (first, rest) = path.split_first()?;
    let mut node = items.get(*first)?;
    for i in rest {
        node = node.children.get(*i)?;
    }
    Some(node)
}

fn node_at_mut<'a>(items: &'a mut [MenuItem], path: &[usize]) -> Option<&'a mut MenuItem> {
    let (first, rest) = path.split_first()?;
    let mut node = items.get_mut(*first)?;
    for i in rest {
        node = node.children.get_mut(*i)?;
    }
    Some(node)
}

/// Tree-wide linear search. Menus stay small enough that this is fine.
pub fn find_path(items: &[MenuItem], id: &str) -> Option<Vec<usize>> {
    for (i, item) in items.iter().enumerate() {
        if item.id == id {
            return Some(vec![i]);
        }
        if let Some(mut rest) = find_path(&item.children, id) {
            rest.insert(0, i);
            return Some(rest);
        }
    }
    None
}

/// Number of levels a subtree occupies (a leaf occupies one).
pub fn subtree_levels(item: &MenuItem) -> usize {
    1 + item
        .children
        .iter()
        .map(subtree_levels)
        .max()
        .unwrap_or(0)
}

pub fn contains_id(items: &[MenuItem], id: &str) -> bool {
    find_path(items, id).is_some()
}

/// All ids in pre-order.
pub fn collect_ids(items: &[MenuItem]) -> Vec<String> {
    fn walk(items: &[MenuItem], out: &mut Vec<String>) {
        for item in items {
            out.push(item.id.clone());
            walk(&item.children, out);
        }
    }

    let mut out = vec![];
    walk(items, &mut out);
    out
}

/// Checks the structural invariants of a tree received from the host.
pub fn validate_tree(items: &[MenuItem]) -> MenuResult<()> {
    fn walk(items: &[MenuItem], level: usize, seen: &mut HashSet<String>) -> MenuResult<()> {
        for item in items {
            if level >= MAX_LEVELS {
                return Err(MenuError::DepthExceeded);
            }
            if item.id.trim().is_empty() {
                return Err(MenuError::EmptyId);
            }
            if !seen.insert(item.id.clone()) {
                return Err(MenuError::DuplicateId(item.id.clone()));
            }
            walk(&item.children, level + 1, seen)?;
        }
        Ok(())
    }

    walk(items, 0, &mut HashSet::new())
}

pub fn children_of<'a>(
    items: &'a [MenuItem],
    container: &Container,
) -> MenuResult<&'a [MenuItem]> {
    match container {
        Container::Root => Ok(items),
        Container::Children(parent_id) => find_path(items, parent_id)
            .and_then(|path| node_at(items, &path))
            .map(|node| node.children.as_slice())
            .ok_or_else(|| MenuError::ContainerNotFound(parent_id.clone())),
    }
}

fn children_mut<'a>(
    items: &'a mut Vec<MenuItem>,
    container: &Container,
) -> MenuResult<&'a mut Vec<MenuItem>> {
    match container {
        Container::Root => Ok(items),
        Container::Children(parent_id) => {
            let path = find_path(items, parent_id)
                .ok_or_else(|| MenuError::ContainerNotFound(parent_id.clone()))?;
            node_at_mut(items, &path)
                .map(|node| &mut node.children)
                .ok_or_else(|| MenuError::ContainerNotFound(parent_id.clone()))
        }
    }
}

/// Level that items placed into `container` end up on.
fn container_level(items: &[MenuItem], container: &Container) -> MenuResult<usize> {
    match container {
        Container::Root => Ok(0),
        Container::Children(parent_id) => find_path(items, parent_id)
            .map(|path| path.len())
            .ok_or_else(|| MenuError::ContainerNotFound(parent_id.clone())),
    }
}

/// Appends `item` to the root list (empty `parent_path`) or to the children
/// of the node at `parent_path`. Level-2 nodes cannot take children.
pub fn add_item(
    items: &[MenuItem],
    parent_path: &[usize],
    item: MenuItem,
) -> MenuResult<Vec<MenuItem>> {
    if parent_path.len() + subtree_levels(&item) > MAX_LEVELS {
        return Err(MenuError::DepthExceeded);
    }

    let mut next = items.to_vec();
    if parent_path.is_empty() {
        next.push(item);
    } else {
        let parent = node_at_mut(&mut next, parent_path)
            .ok_or_else(|| MenuError::PathNotFound(parent_path.to_vec()))?;
        parent.children.push(item);
    }
    Ok(next)
}

/// Shallow-merges `patch` onto the node at `path`.
pub fn edit_item(
    items: &[MenuItem],
    path: &[usize],
    patch: &ItemPatch,
) -> MenuResult<Vec<MenuItem>> {
    let mut next = items.to_vec();
    let node =
        node_at_mut(&mut next, path).ok_or_else(|| MenuError::PathNotFound(path.to_vec()))?;
    patch.apply_to(node);
    Ok(next)
}

/// Removes the node at `path` together with its children.
pub fn remove_item(items: &[MenuItem], path: &[usize]) -> MenuResult<Vec<MenuItem>> {
    let not_found = || MenuError::PathNotFound(path.to_vec());
    let (last, parent_path) = path.split_last().ok_or_else(not_found)?;

    let mut next = items.to_vec();
    let siblings: &mut Vec<MenuItem> = if parent_path.is_empty() {
        &mut next
    } else {
        &mut node_at_mut(&mut next, parent_path)
            .ok_or_else(not_found)?
            .children
    };

    if *last >= siblings.len() {
        return Err(not_found());
    }
    siblings.remove(*last);
    Ok(next)
}

/// Moves `from[from_index]` to `to[to_index]`.
///
/// `to_index` is the final position inside the destination after the node has
/// been taken out of its source; it is clamped to the destination length.
/// Returns `Ok(None)` when the move would leave the tree as it is.
pub fn move_item(
    items: &[MenuItem],
    from: &Container,
    from_index: usize,
    to: &Container,
    to_index: usize,
) -> MenuResult<Option<Vec<MenuItem>>> {
    if from == to && from_index == to_index {
        return Ok(None);
    }

    let source = children_of(items, from)?;
    let moving = source.get(from_index).ok_or(MenuError::IndexOutOfRange {
        index: from_index,
        len: source.len(),
    })?;

    if let Container::Children(parent_id) = to {
        if *parent_id == moving.id || contains_id(&moving.children, parent_id) {
            return Err(MenuError::CyclicMove);
        }
    }

    if container_level(items, to)? + subtree_levels(moving) > MAX_LEVELS {
        return Err(MenuError::DepthExceeded);
    }

    let mut next = items.to_vec();
    let node = children_mut(&mut next, from)?.remove(from_index);
    let dest = children_mut(&mut next, to)?;
    let at = to_index.min(dest.len());
    dest.insert(at, node);

    if next.as_slice() == items {
        return Ok(None);
    }
    Ok(Some(next))
}
