//! Admin editor for a site's navigation menu: a three-level tree of links,
//! edited through a drag-and-drop Leptos component and saved wholesale to the
//! backend on every change.

mod logging;

mod api;
mod app;
mod components;
mod config;
pub mod ids;
pub mod menu;
pub mod models;
mod pages;
mod storage;

pub use app::App;
pub use ids::{IdGenerator, RandomIds};
pub use menu::{MenuError, MenuResult, MenuTreeEditor};
pub use models::{ItemPatch, LinkTarget, MenuItem};

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;


// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
