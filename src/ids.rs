use crate::menu::{MenuError, MenuIndex, MenuResult};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEMP_ID_PREFIX: &str = "temp-";

/// Source of ids for nodes that have not been saved yet.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// `temp-<12 hex chars>` ids backed by the platform RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> String {
        make_temp_id(&random_bytes())
    }
}

pub fn make_temp_id(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{TEMP_ID_PREFIX}{hex}")
}

pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

/// Redraws allowed before giving up on a generator that keeps colliding.
pub const MAX_ID_DRAWS: usize = 16;

/// Draws ids until one is not already in the tree.
pub fn fresh_id(ids: &dyn IdGenerator, index: &MenuIndex) -> MenuResult<String> {
    for _ in 0..MAX_ID_DRAWS {
        let id = ids.next_id();
        if !id.trim().is_empty() && !index.contains(&id) {
            return Ok(id);
        }
    }
    Err(MenuError::IdsExhausted(MAX_ID_DRAWS))
}

static COUNTER: AtomicUsize = AtomicUsize::new(1);

fn random_bytes() -> [u8; 6] {
    let mut buf = [0u8; 6];
    if getrandom::getrandom(&mut buf).is_err() {
        // No RNG available: fall back to a hashed process-wide counter.
        let mut hasher = DefaultHasher::new();
        COUNTER.fetch_add(1, Ordering::SeqCst).hash(&mut hasher);
        buf.copy_from_slice(&hasher.finish().to_le_bytes()[..6]);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MenuItem;
    use std::sync::Mutex;

    struct Scripted(Mutex<Vec<&'static str>>);

    impl IdGenerator for Scripted {
        fn next_id(&self) -> String {
            self.0.lock().unwrap().remove(0).to_string()
        }
    }

    #[test]
    fn test_random_ids_are_temp_and_distinct() {
        let a = RandomIds.next_id();
        let b = RandomIds.next_id();
        assert!(is_temp_id(&a));
        assert_eq!(a.len(), TEMP_ID_PREFIX.len() + 12);
        assert_ne!(a, b);
    }

    #[test]
    fn test_make_temp_id_hex() {
        assert_eq!(make_temp_id(&[0x00, 0xab, 0x10]), "temp-00ab10");
        assert!(!is_temp_id("42"));
    }

    #[test]
    fn test_fresh_id_skips_taken() {
        let index = MenuIndex::build(&[MenuItem::new("temp-1", "A", "/a")]);
        let ids = Scripted(Mutex::new(vec!["temp-1", "temp-2"]));
        assert_eq!(fresh_id(&ids, &index), Ok("temp-2".to_string()));
    }

    #[test]
    fn test_fresh_id_gives_up_on_a_stuck_generator() {
        struct Stuck;

        impl IdGenerator for Stuck {
            fn next_id(&self) -> String {
                "temp-1".to_string()
            }
        }

        let index = MenuIndex::build(&[MenuItem::new("temp-1", "A", "/a")]);
        assert_eq!(
            fresh_id(&Stuck, &index),
            Err(MenuError::IdsExhausted(MAX_ID_DRAWS))
        );
    }
}
