use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;

const CONTROL_CLASS: &str = "placeholder:text-muted-foreground border-input flex w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-sm shadow-xs transition-[color,box-shadow] outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50 disabled:cursor-not-allowed disabled:opacity-50 aria-invalid:border-destructive";

#[component]
pub fn Label(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] html_for: String,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!(
        "flex items-center gap-1 text-xs font-medium leading-none select-none",
        class
    );

    view! {
        <label class=class r#for=html_for>
            {children()}
        </label>
    }
}

/// Text input bound to a signal.
///
/// Wired by hand (`prop:value` + `on:input`) rather than through `bind:value`.
#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] required: bool,
    #[prop(optional)] invalid: Option<Signal<bool>>,
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!(CONTROL_CLASS, "h-9", class);

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            id=id
            required=required
            aria-invalid=move || invalid.map(|s| s.get()).unwrap_or(false).to_string()
            prop:value=move || bind_value.get()
            on:input=move |ev| bind_value.set(event_target_value(&ev))
            node_ref=node_ref
        />
    }
}

#[component]
pub fn TextArea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(default = 3)] rows: u32,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(CONTROL_CLASS, "py-2", class);

    view! {
        <textarea
            data-name="TextArea"
            class=merged_class
            placeholder=placeholder
            id=id
            rows=rows
            prop:value=move || bind_value.get()
            on:input=move |ev| bind_value.set(event_target_value(&ev))
        />
    }
}

/// Native `<select>` over `(value, label)` pairs.
#[component]
pub fn Select(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    options: Vec<(String, String)>,
    #[prop(into)] bind_value: RwSignal<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(CONTROL_CLASS, "h-9", class);

    view! {
        <select
            data-name="Select"
            class=merged_class
            id=id
            prop:value=move || bind_value.get()
            on:change=move |ev| bind_value.set(event_target_value(&ev))
        >
            {options
                .into_iter()
                .map(|(value, label)| {
                    let selected_value = value.clone();
                    view! {
                        <option
                            value=value
                            selected=move || bind_value.get() == selected_value
                        >
                            {label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
