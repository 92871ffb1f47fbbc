//! Menu tree editing: the pure tree model and mutation engine, the drag
//! adapter, the item form, and the `MenuTreeEditor` component on top.

mod drag;
mod editor;
mod error;
mod form;
mod index;
mod rebind;
mod state;
mod tree;

pub use drag::{apply_drag_end, resolve_drop, DragEnd, DropTarget};
pub use editor::{MenuTreeEditor, REBIND_DELAY_MS};
pub use error::{MenuError, MenuResult};
pub use form::{FormMode, ItemDraft};
pub use index::{IndexEntry, MenuIndex};
pub(crate) use rebind::Debounce;
pub use state::{MenuAction, MenuEditorState};
pub use tree::{
    add_item, can_add_child, children_of, collect_ids, contains_id, edit_item, find_path,
    move_item, node_at, remove_item, subtree_levels, validate_tree, Container, MAX_LEVELS,
};
