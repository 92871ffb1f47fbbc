use super::drag::{resolve_drop, DropTarget};
use super::error::MenuError;
use super::form::{FormMode, ItemDraft};
use super::Debounce;
use super::state::{MenuAction, MenuEditorState};
use super::tree::{can_add_child, collect_ids, node_at, Container};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Label, Modal,
    ModalDescription, ModalFooter, ModalHeader, ModalTitle, Select, TextArea,
};
use crate::ids::{is_temp_id, IdGenerator, RandomIds};
use crate::models::{LinkTarget, MenuItem};
use icons::{GripVertical, Pencil, Plus, Trash2};
use leptos::prelude::*;
use std::sync::Arc;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;

/// Delay before drag handles are re-armed after a structural change.
pub const REBIND_DELAY_MS: i32 = 250;

const DRAG_DATA_TYPE: &str = "text/plain";

#[derive(Clone, Copy)]
struct EditorCtx {
    state: StoredValue<MenuEditorState>,
    dispatch: Callback<MenuAction>,
    report: Callback<String>,
    open_form: Callback<FormMode>,
    dragging: RwSignal<Option<String>>,
    drag_ready: RwSignal<bool>,
}

impl EditorCtx {
    fn drop_on(self, dragged: Option<String>, target: DropTarget) {
        self.dragging.set(None);

        let resolved = match dragged {
            Some(id) => self
                .state
                .with_value(|s| resolve_drop(s.index(), s.items(), &id, &target)),
            None => Err(MenuError::MalformedDrag("the dragged item")),
        };

        match resolved {
            Ok(ev) if ev.is_noop() => {}
            Ok(ev) => self.dispatch.run(MenuAction::Drag(ev)),
            Err(e) => self.report.run(e.to_string()),
        }
    }
}

fn dragged_id(ev: &web_sys::DragEvent, ctx: EditorCtx) -> Option<String> {
    ev.data_transfer()
        .and_then(|dt| dt.get_data(DRAG_DATA_TYPE).ok())
        .filter(|id| !id.trim().is_empty())
        .or_else(|| ctx.dragging.get_untracked())
}

fn allow_drop(ev: &web_sys::DragEvent) {
    ev.prevent_default();
    if let Some(dt) = ev.data_transfer() {
        dt.set_drop_effect("move");
    }
}

/// Lower half of the row means "after".
fn drop_after(ev: &web_sys::DragEvent) -> bool {
    ev.current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(|el| el.get_bounding_client_rect())
        .map(|rect| {
            let mid = rect.top() + rect.height() / 2.0;
            (ev.client_y() as f64) >= mid
        })
        .unwrap_or(true)
}

/// Controlled editor over a menu tree of at most three levels.
///
/// `value` is the host's tree. Every committed add/edit/remove/move hands the
/// whole new tree to `on_change`; rejected actions, malformed drags and form
/// validation failures go to `on_error`. Nothing is persisted here.
#[component]
pub fn MenuTreeEditor(
    #[prop(into)] value: Signal<Vec<MenuItem>>,
    #[prop(into)] on_change: Callback<Vec<MenuItem>>,
    #[prop(into)] on_error: Callback<String>,
    #[prop(optional)] id_generator: Option<Arc<dyn IdGenerator>>,
) -> impl IntoView {
    let ids: Arc<dyn IdGenerator> = id_generator.unwrap_or_else(|| Arc::new(RandomIds));
    let ids = StoredValue::new(ids);

    let state = StoredValue::new(MenuEditorState::default());
    let items: RwSignal<Vec<MenuItem>> = RwSignal::new(vec![]);

    // Drag state
    let dragging: RwSignal<Option<String>> = RwSignal::new(None);
    let drag_ready: RwSignal<bool> = RwSignal::new(true);
    let drag_epoch: RwSignal<u64> = RwSignal::new(0);
    let rebind = StoredValue::new(Debounce::new(REBIND_DELAY_MS));

    // Form state
    let form_mode: RwSignal<Option<FormMode>> = RwSignal::new(None);
    let form_error: RwSignal<Option<String>> = RwSignal::new(None);
    let title: RwSignal<String> = RwSignal::new(String::new());
    let url: RwSignal<String> = RwSignal::new(String::new());
    let target: RwSignal<String> = RwSignal::new(LinkTarget::default().to_string());
    let icon: RwSignal<String> = RwSignal::new(String::new());
    let description: RwSignal<String> = RwSignal::new(String::new());

    // Rows are re-rendered after every structural change; drags started on rows
    // that are about to be replaced would drop onto detached nodes, so drag is
    // off until the rebuilt rows are re-armed.
    let schedule_rebind = move || {
        drag_ready.set(false);
        rebind.with_value(|r| {
            r.schedule(move || {
                dragging.set(None);
                drag_epoch.update(|e| *e += 1);
                drag_ready.set(true);
                crate::debug_log!(
                    "menu: drag handles re-armed ({})",
                    drag_epoch.get_untracked()
                );
            })
        });
    };
    on_cleanup(move || {
        let _ = rebind.try_with_value(|r| r.cancel());
    });

    let report = Callback::new(move |msg: String| {
        crate::error_log!("menu editor: {msg}");
        on_error.run(msg);
    });

    Effect::new(move |_| {
        let next = value.get();
        let mut checked = Ok(());
        state.update_value(|s| checked = s.reset(next.clone()));
        items.set(next);
        schedule_rebind();
        if let Err(e) = checked {
            report.run(format!("invalid menu: {e}"));
        }
    });

    let dispatch = Callback::new(move |action: MenuAction| {
        let structural = action.is_structural();
        let mut committed = None;
        let mut failed = None;
        state.update_value(|s| {
            s.dispatch(
                action,
                |next| committed = Some(next),
                |msg| failed = Some(msg),
            );
        });

        if let Some(next) = committed {
            items.set(next.clone());
            on_change.run(next);
            if structural {
                schedule_rebind();
            }
        }
        if let Some(msg) = failed {
            on_error.run(msg);
        }
    });

    let open_form = Callback::new(move |mode: FormMode| {
        let draft = match &mode {
            FormMode::New { .. } => ItemDraft::default(),
            FormMode::Edit { path } => {
                match state.with_value(|s| node_at(s.items(), path).map(ItemDraft::from_item)) {
                    Some(draft) => draft,
                    None => {
                        report.run(MenuError::PathNotFound(path.clone()).to_string());
                        return;
                    }
                }
            }
        };

        title.set(draft.title);
        url.set(draft.url);
        target.set(draft.target.to_string());
        icon.set(draft.icon);
        description.set(draft.description);
        form_error.set(None);
        form_mode.set(Some(mode));
    });

    let close_form = Callback::new(move |_: ()| {
        form_mode.set(None);
        form_error.set(None);
    });

    let submit = move || {
        let Some(mode) = form_mode.get_untracked() else {
            return;
        };

        let draft = ItemDraft {
            title: title.get_untracked(),
            url: url.get_untracked(),
            target: target.get_untracked().parse().unwrap_or_default(),
            icon: icon.get_untracked(),
            description: description.get_untracked(),
        };
        let action = state.with_value(|s| {
            ids.with_value(|ids| draft.into_action(&mode, ids.as_ref(), s.index()))
        });

        match action {
            Ok(action) => {
                form_mode.set(None);
                dispatch.run(action);
            }
            Err(e) => {
                // Validation failed: keep the form open with the message inline.
                form_error.set(Some(e.to_string()));
                report.run(e.to_string());
            }
        }
    };

    let target_options = StoredValue::new(
        LinkTarget::iter()
            .map(|t| (t.to_string(), t.label().to_string()))
            .collect::<Vec<_>>(),
    );
    let title_invalid =
        Signal::derive(move || form_error.get().is_some() && title.get().trim().is_empty());
    let url_invalid =
        Signal::derive(move || form_error.get().is_some() && url.get().trim().is_empty());

    let ctx = EditorCtx {
        state,
        dispatch,
        report,
        open_form,
        dragging,
        drag_ready,
    };

    view! {
        <div
            class="menu-tree-editor flex flex-col gap-3"
            data-drag-epoch=move || drag_epoch.get().to_string()
        >
            <div class="flex items-center justify-between">
                <div class="text-xs text-muted-foreground">
                    {move || {
                        let n = items.with(|xs| collect_ids(xs).len());
                        if n == 1 { "1 item".to_string() } else { format!("{n} items") }
                    }}
                </div>
                <Button
                    size=ButtonSize::Sm
                    attr:data-action="add-root"
                    on:click=move |_| open_form.run(FormMode::New { parent_path: vec![] })
                >
                    <Plus />
                    "Add item"
                </Button>
            </div>

            <div
                class=move || {
                    if dragging.get().is_some() {
                        "main-items-container flex min-h-12 flex-col gap-1 rounded-md p-1 ring-1 ring-border"
                    } else {
                        "main-items-container flex min-h-12 flex-col gap-1 p-1"
                    }
                }
                data-parent-id=""
                on:dragover=move |ev: web_sys::DragEvent| allow_drop(&ev)
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    ctx.drop_on(dragged_id(&ev, ctx), DropTarget::End(Container::Root));
                }
            >
                {move || {
                    let all = items.get();
                    if all.is_empty() {
                        view! {
                            <div class="px-2 py-6 text-center text-xs text-muted-foreground">
                                "No menu items yet."
                            </div>
                        }
                        .into_any()
                    } else {
                        all.into_iter()
                            .enumerate()
                            .map(|(i, item)| menu_item_view(item, vec![i], &Container::Root, ctx))
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>

            <Modal open=Signal::derive(move || form_mode.get().is_some()) on_close=close_form>
                <form
                    class="flex flex-col gap-3"
                    novalidate=true
                    on:submit=move |ev| {
                        ev.prevent_default();
                        submit();
                    }
                >
                    <ModalHeader>
                        <ModalTitle>
                            {move || form_mode.get().map(|m| m.heading()).unwrap_or_default()}
                        </ModalTitle>
                        <ModalDescription>"Title and URL are required."</ModalDescription>
                    </ModalHeader>

                    <div class="flex flex-col gap-1">
                        <Label html_for="menu-item-title">"Title *"</Label>
                        <Input
                            id="menu-item-title"
                            bind_value=title
                            required=true
                            invalid=title_invalid
                        />
                    </div>
                    <div class="flex flex-col gap-1">
                        <Label html_for="menu-item-url">"URL *"</Label>
                        <Input
                            id="menu-item-url"
                            placeholder="/about or https://example.com"
                            bind_value=url
                            required=true
                            invalid=url_invalid
                        />
                    </div>
                    <div class="flex flex-col gap-1">
                        <Label html_for="menu-item-target">"Open in"</Label>
                        <Select
                            id="menu-item-target"
                            options=target_options.get_value()
                            bind_value=target
                        />
                    </div>
                    <div class="flex flex-col gap-1">
                        <Label html_for="menu-item-icon">"Icon class"</Label>
                        <Input
                            id="menu-item-icon"
                            placeholder="fa-solid fa-house"
                            bind_value=icon
                        />
                    </div>
                    <div class="flex flex-col gap-1">
                        <Label html_for="menu-item-description">"Description"</Label>
                        <TextArea id="menu-item-description" rows=2 bind_value=description />
                    </div>

                    <Show when=move || form_error.get().is_some() fallback=|| ().into_view()>
                        {move || form_error.get().map(|e| view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">
                                    {e}
                                </AlertDescription>
                            </Alert>
                        })}
                    </Show>

                    <ModalFooter>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |ev| {
                                ev.prevent_default();
                                close_form.run(());
                            }
                        >
                            "Cancel"
                        </Button>
                        <Button size=ButtonSize::Sm>"Save"</Button>
                    </ModalFooter>
                </form>
            </Modal>
        </div>
    }
}

/// One `.menu-item`, with its `.sub-items-container` when it has children.
fn menu_item_view(
    item: MenuItem,
    path: Vec<usize>,
    parent: &Container,
    ctx: EditorCtx,
) -> AnyView {
    let MenuItem {
        id,
        title,
        url,
        target,
        icon,
        description,
        children,
    } = item;

    let level = path.len() - 1;
    let unsaved = is_temp_id(&id);
    let nestable = can_add_child(level);
    let id_sv = StoredValue::new(id.clone());
    let path_sv = StoredValue::new(path.clone());
    let own_sv = StoredValue::new(Container::Children(id.clone()));

    let children_view = if !children.is_empty() {
        let own = own_sv.get_value();
        view! {
            <div
                class="sub-items-container ml-6 flex flex-col gap-1 border-l border-border pl-2"
                data-parent-id=id.clone()
                on:dragover=move |ev: web_sys::DragEvent| allow_drop(&ev)
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    ctx.drop_on(dragged_id(&ev, ctx), DropTarget::End(own_sv.get_value()));
                }
            >
                {children
                    .into_iter()
                    .enumerate()
                    .map(|(i, child)| {
                        let mut child_path = path.clone();
                        child_path.push(i);
                        menu_item_view(child, child_path, &own, ctx)
                    })
                    .collect_view()}
            </div>
        }
        .into_any()
    } else if nestable {
        // Empty leaves only show a nesting drop zone while something else is dragged.
        view! {
            <Show
                when=move || {
                    ctx.dragging.with(|d| d.as_deref().is_some_and(|d| d != id_sv.get_value()))
                }
                fallback=|| ().into_view()
            >
                <div
                    class="sub-items-container ml-6 rounded-md border border-dashed border-border px-2 py-1 text-xs text-muted-foreground"
                    data-parent-id=id_sv.get_value()
                    on:dragover=move |ev: web_sys::DragEvent| allow_drop(&ev)
                    on:drop=move |ev: web_sys::DragEvent| {
                        ev.prevent_default();
                        ev.stop_propagation();
                        ctx.drop_on(dragged_id(&ev, ctx), DropTarget::End(own_sv.get_value()));
                    }
                >
                    "Drop here to nest"
                </div>
            </Show>
        }
        .into_any()
    } else {
        ().into_any()
    };

    let dragged_here = move || {
        ctx.dragging
            .with(|d| d.as_deref() == Some(id_sv.get_value().as_str()))
    };

    view! {
        <div
            class="menu-item flex flex-col gap-1"
            data-item-id=id
            data-parent-id=parent.dom_parent_id()
            data-level=level.to_string()
        >
            <div
                class=move || {
                    if dragged_here() {
                        "flex items-center gap-2 rounded-md border border-border bg-background px-2 py-1.5 opacity-50"
                    } else {
                        "flex items-center gap-2 rounded-md border border-border bg-background px-2 py-1.5 hover:bg-accent/40"
                    }
                }
                draggable=move || if ctx.drag_ready.get() { "true" } else { "false" }
                on:dragstart=move |ev: web_sys::DragEvent| {
                    ev.stop_propagation();
                    let id = id_sv.get_value();
                    if let Some(dt) = ev.data_transfer() {
                        if dt.set_data(DRAG_DATA_TYPE, &id).is_err() {
                            crate::warn_log!("menu: could not attach {id} to the drag");
                        }
                        dt.set_effect_allowed("move");
                    }
                    ctx.dragging.set(Some(id));
                }
                on:dragend=move |_| ctx.dragging.set(None)
                on:dragover=move |ev: web_sys::DragEvent| {
                    allow_drop(&ev);
                    ev.stop_propagation();
                }
                on:drop=move |ev: web_sys::DragEvent| {
                    ev.prevent_default();
                    ev.stop_propagation();
                    let target_id = id_sv.get_value();
                    let target = if drop_after(&ev) {
                        DropTarget::After(target_id)
                    } else {
                        DropTarget::Before(target_id)
                    };
                    ctx.drop_on(dragged_id(&ev, ctx), target);
                }
            >
                <span class="cursor-grab text-muted-foreground [&_svg]:size-4" aria-hidden="true">
                    <GripVertical />
                </span>

                <div class="min-w-0 flex-1">
                    <div class="flex items-center gap-2 text-sm">
                        {icon.map(|icon| view! { <i class=icon aria-hidden="true"></i> })}
                        <span class="truncate font-medium">{title}</span>
                        {unsaved.then(|| view! {
                            <span class="rounded-sm bg-accent px-1 text-[10px] text-muted-foreground">"new"</span>
                        })}
                        {(target == LinkTarget::Blank).then(|| view! {
                            <span class="text-xs text-muted-foreground" title="Opens in a new window">"↗"</span>
                        })}
                    </div>
                    <div class="truncate text-xs text-muted-foreground">{url}</div>
                    {description.map(|d| view! {
                        <div class="truncate text-xs text-muted-foreground">{d}</div>
                    })}
                </div>

                <div class="flex shrink-0 items-center gap-1">
                    {nestable.then(|| view! {
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:title="Add sub-item"
                            attr:data-action="add-child"
                            on:click=move |_| {
                                let parent_path = path_sv.get_value();
                                ctx.open_form.run(FormMode::New { parent_path })
                            }
                        >
                            <Plus />
                        </Button>
                    })}
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:title="Edit"
                        attr:data-action="edit"
                        on:click=move |_| {
                            ctx.open_form.run(FormMode::Edit { path: path_sv.get_value() })
                        }
                    >
                        <Pencil />
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:title="Remove"
                        attr:data-action="remove"
                        on:click=move |_| {
                            ctx.dispatch.run(MenuAction::Remove { path: path_sv.get_value() })
                        }
                    >
                        <Trash2 />
                    </Button>
                </div>
            </div>

            {children_view}
        </div>
    }
    .into_any()
}
