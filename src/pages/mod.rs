use crate::api::{ApiClient, ApiErrorKind};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::config::{SessionConfig, SessionContext};
use crate::menu::MenuTreeEditor;
use crate::models::MenuItem;
use icons::RefreshCw;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SaveStatus {
    Idle,
    Saving,
    Saved,
    Failed,
}

impl SaveStatus {
    fn label(self) -> &'static str {
        match self {
            SaveStatus::Idle => "",
            SaveStatus::Saving => "Saving...",
            SaveStatus::Saved => "All changes saved",
            SaveStatus::Failed => "Not saved",
        }
    }
}

/// Outcome of the last menu load.
#[derive(Clone, Debug, PartialEq, Eq)]
enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    /// Saves replace the stored menu wholesale, so only a menu that actually
    /// came from the backend may be edited.
    fn editable(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    fn error(&self) -> Option<String> {
        match self {
            LoadState::Failed(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

/// Loads one affiliate's menu, mounts the editor on it and saves every change.
#[component]
pub fn MenuPage() -> impl IntoView {
    let session = expect_context::<SessionContext>();

    let items: RwSignal<Vec<MenuItem>> = RwSignal::new(vec![]);
    let load_state: RwSignal<LoadState> = RwSignal::new(LoadState::Loading);
    let save_error: RwSignal<Option<String>> = RwSignal::new(None);
    let editor_error: RwSignal<Option<String>> = RwSignal::new(None);
    let save_status: RwSignal<SaveStatus> = RwSignal::new(SaveStatus::Idle);

    // Guards: ignore responses of superseded loads and saves.
    let load_request_id: RwSignal<u64> = RwSignal::new(0);
    let save_request_id: RwSignal<u64> = RwSignal::new(0);

    let affiliate_draft: RwSignal<String> = RwSignal::new(
        session
            .0
            .with_untracked(|s| s.affiliate_id.clone().unwrap_or_default()),
    );
    let token_draft: RwSignal<String> =
        RwSignal::new(session.0.with_untracked(|s| s.token.clone().unwrap_or_default()));

    let load = move |cfg: SessionConfig| {
        let req_id = load_request_id.get_untracked().wrapping_add(1);
        load_request_id.set(req_id);
        // A pending save belongs to the previous menu.
        save_request_id.update(|n| *n = n.wrapping_add(1));

        load_state.set(LoadState::Loading);
        save_error.set(None);
        editor_error.set(None);
        save_status.set(SaveStatus::Idle);

        let client = ApiClient::from_session(&cfg);
        spawn_local(async move {
            let res = client.get_menu().await;
            if load_request_id.get_untracked() != req_id {
                return;
            }

            match res {
                Ok(menu) => {
                    crate::info_log!("menu page: loaded {} root items", menu.len());
                    items.set(menu);
                    load_state.set(LoadState::Ready);
                }
                Err(e) => {
                    crate::error_log!("menu page: load failed: {e}");
                    items.set(vec![]);
                    load_state.set(LoadState::Failed(e.to_string()));
                }
            }
        });
    };

    Effect::new(move |_| {
        let cfg = session.0.get();
        load(cfg);
    });

    let on_change = Callback::new(move |next: Vec<MenuItem>| {
        if !load_state.with_untracked(LoadState::editable) {
            crate::warn_log!("menu page: change ignored, no menu loaded");
            return;
        }
        items.set(next.clone());
        save_error.set(None);
        editor_error.set(None);

        let req_id = save_request_id.get_untracked().wrapping_add(1);
        save_request_id.set(req_id);
        save_status.set(SaveStatus::Saving);

        let client = ApiClient::from_session(&session.0.get_untracked());
        spawn_local(async move {
            let res = client.save_menu(&next).await;
            if save_request_id.get_untracked() != req_id {
                return;
            }

            match res {
                Ok(saved) => {
                    // The server replaces temporary ids with its own.
                    if saved != items.get_untracked() {
                        items.set(saved);
                    }
                    save_status.set(SaveStatus::Saved);
                }
                Err(e) => {
                    crate::error_log!("menu page: save failed: {e}");
                    let msg = if e.kind == ApiErrorKind::Unauthorized {
                        "Saving failed: the access token was rejected".to_string()
                    } else {
                        e.to_string()
                    };
                    save_error.set(Some(msg));
                    save_status.set(SaveStatus::Failed);
                }
            }
        });
    });

    let on_error = Callback::new(move |msg: String| editor_error.set(Some(msg)));

    let on_apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let affiliate = affiliate_draft.get_untracked();
        let token = token_draft.get_untracked();
        session.0.update(|s| {
            s.set_affiliate(&affiliate);
            s.set_token(&token);
        });
    };

    let reload = move |_| load(session.0.get_untracked());

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex w-full max-w-3xl flex-col gap-4 px-4 py-8">
                <div class="flex items-center justify-between">
                    <div class="text-sm font-medium text-foreground">"Menu admin"</div>
                    <div class="text-xs text-muted-foreground">
                        {move || session.0.with(|s| s.api_url.clone())}
                    </div>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-sm">"Site"</CardTitle>
                        <CardDescription class="text-xs">
                            "Which affiliate's menu to edit. Leave blank for the default site."
                        </CardDescription>
                    </CardHeader>
                    <CardContent>
                        <form class="flex flex-wrap items-end gap-3" on:submit=on_apply>
                            <div class="flex min-w-40 flex-1 flex-col gap-1.5">
                                <Label html_for="affiliate-id">"Affiliate id"</Label>
                                <Input
                                    id="affiliate-id"
                                    placeholder="default"
                                    bind_value=affiliate_draft
                                    class="h-8 text-sm"
                                />
                            </div>
                            <div class="flex min-w-40 flex-1 flex-col gap-1.5">
                                <Label html_for="access-token">"Access token"</Label>
                                <Input
                                    id="access-token"
                                    r#type="password"
                                    bind_value=token_draft
                                    class="h-8 text-sm"
                                />
                            </div>
                            <Button size=ButtonSize::Sm>"Apply"</Button>
                        </form>
                    </CardContent>
                </Card>

                <Show when=move || save_error.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        save_error.get().map(|e| {
                            view! {
                                <Alert class="border-destructive/30">
                                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                </Alert>
                            }
                        })
                    }}
                </Show>

                <Show when=move || editor_error.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        editor_error.get().map(|e| {
                            view! {
                                <Alert class="border-amber-500/30">
                                    <AlertDescription class="text-amber-700 text-xs">{e}</AlertDescription>
                                </Alert>
                            }
                        })
                    }}
                </Show>

                <Card>
                    <CardHeader class="flex-row items-center justify-between">
                        <div class="flex flex-col gap-1">
                            <CardTitle class="text-sm">"Navigation menu"</CardTitle>
                            <CardDescription class="text-xs">
                                "Drag items to reorder or nest them. Up to three levels."
                            </CardDescription>
                        </div>
                        <div class="flex items-center gap-2">
                            <span class="text-xs text-muted-foreground">
                                {move || save_status.get().label()}
                            </span>
                            <Button
                                variant=ButtonVariant::Ghost
                                size=ButtonSize::Icon
                                attr:title="Reload"
                                attr:disabled=move || load_state.with(|s| *s == LoadState::Loading)
                                on:click=reload
                            >
                                <RefreshCw />
                            </Button>
                        </div>
                    </CardHeader>
                    <CardContent>
                        <Show
                            when=move || load_state.with(LoadState::editable)
                            fallback=move || match load_state.with(LoadState::error) {
                                Some(e) => view! {
                                    <Alert class="border-destructive/30">
                                        <AlertDescription class="text-destructive text-xs">
                                            {e}
                                            " Reload to try again."
                                        </AlertDescription>
                                    </Alert>
                                }
                                .into_any(),
                                None => view! {
                                    <div class="flex items-center gap-2 py-6 text-xs text-muted-foreground">
                                        <Spinner />
                                        "Loading menu..."
                                    </div>
                                }
                                .into_any(),
                            }
                        >
                            <MenuTreeEditor value=items on_change=on_change on_error=on_error />
                        </Show>
                    </CardContent>
                </Card>
            </div>
        </div>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="px-4 py-8 text-xs text-muted-foreground">
            "Not found. "
            <a class="text-primary underline underline-offset-4" href="/">"Back to the menu"</a>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_status_labels() {
        assert_eq!(SaveStatus::Idle.label(), "");
        assert_eq!(SaveStatus::Saving.label(), "Saving...");
        assert_eq!(SaveStatus::Failed.label(), "Not saved");
    }

    #[test]
    fn test_editor_only_mounts_on_loaded_menu() {
        assert!(LoadState::Ready.editable());
        assert!(!LoadState::Loading.editable());

        let failed = LoadState::Failed("Loading the menu failed (500): boom".to_string());
        assert!(!failed.editable());
        assert_eq!(
            failed.error().as_deref(),
            Some("Loading the menu failed (500): boom")
        );
        assert_eq!(LoadState::Ready.error(), None);
    }
}
