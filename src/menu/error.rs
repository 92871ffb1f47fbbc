use super::tree::MAX_LEVELS;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("no menu item at path {0:?}")]
    PathNotFound(Vec<usize>),

    #[error("no menu container for parent {0}")]
    ContainerNotFound(String),

    #[error("index {index} is out of range for a container of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("drag event is missing {0}")]
    MalformedDrag(&'static str),

    #[error("menus cannot be nested deeper than {MAX_LEVELS} levels")]
    DepthExceeded,

    #[error("cannot move a menu item into its own sub-items")]
    CyclicMove,

    #[error("duplicate menu item id {0}")]
    DuplicateId(String),

    #[error("menu item without an id")]
    EmptyId,

    #[error("no unused menu item id after {0} attempts")]
    IdsExhausted(usize),
}

pub type MenuResult<T> = Result<T, MenuError>;
