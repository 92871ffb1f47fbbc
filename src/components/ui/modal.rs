use icons::X;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_ui::clx;
use tw_merge::tw_merge;

mod components {
    use super::*;
    clx! {ModalHeader, div, "mb-3 flex flex-col gap-1 pr-6"}
    clx! {ModalTitle, h3, "text-sm font-medium"}
    clx! {ModalDescription, p, "text-xs text-muted-foreground"}
    clx! {ModalFooter, footer, "flex items-center justify-end gap-2 pt-2"}
}

pub use components::*;

/// Controlled modal: rendered while `open` is true, closed through `on_close`
/// (close button, backdrop click or Escape).
#[component]
pub fn Modal(
    #[prop(into)] open: Signal<bool>,
    on_close: Callback<()>,
    #[prop(optional, into)] class: String,
    children: ChildrenFn,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "relative w-full max-w-md rounded-md border border-border bg-background p-4 shadow-lg",
        class
    );
    let class_sv = StoredValue::new(merged_class);
    let children = StoredValue::new(children);

    let handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" && open.get_untracked() {
            ev.prevent_default();
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                data-name="ModalBackdrop"
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
                on:click=move |_| on_close.run(())
            >
                <div
                    data-name="ModalContent"
                    role="dialog"
                    aria-modal="true"
                    class=class_sv.get_value()
                    on:click=|ev| ev.stop_propagation()
                >
                    <button
                        type="button"
                        class="absolute top-3 right-3 rounded-sm p-1 text-muted-foreground hover:text-foreground [&_svg:not([class*='size-'])]:size-4"
                        aria-label="Close"
                        on:click=move |_| on_close.run(())
                    >
                        <X />
                    </button>
                    {children.with_value(|c| c())}
                </div>
            </div>
        </Show>
    }
}
