pub(crate) const TOKEN_KEY: &str = "menu_admin_token";
pub(crate) const AFFILIATE_KEY: &str = "menu_admin_affiliate_id";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_string_from_storage(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()
        .flatten()
        .filter(|v| !v.trim().is_empty())
}

/// Writes `value`, or removes the key when it is `None` or blank.
pub(crate) fn save_string_to_storage(key: &str, value: Option<&str>) {
    let Some(storage) = local_storage() else {
        return;
    };
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => {
            let _ = storage.set_item(key, v);
        }
        None => {
            let _ = storage.remove_item(key);
        }
    }
}
