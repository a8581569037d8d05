//! Accordion provider, section primitive, and effect draining for the headless controller.
//!
//! Sections register with the nearest [`Accordion`] when they are constructed and deregister in
//! `on_cleanup`, so the controller's registry always mirrors the mounted panels. All transitions
//! go through [`reduce_accordion`]; the provider only stores the new controller when it differs
//! from the previous one and drains emitted effects in order.

use std::sync::atomic::{AtomicU64, Ordering};

use accordion_core::{
    reduce_accordion, AccordionAction, AccordionConfig, AccordionController, AccordionEffect,
    AccordionSnapshot, DomPosition, FocusMove, MountRequest, OpenNames, OpenPolicy, SectionId,
};
use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use wasm_bindgen::JsCast;

static NEXT_SECTION_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy)]
/// Leptos context for reading accordion state and dispatching [`AccordionAction`] values.
pub struct AccordionContext {
    /// Reactive controller state.
    pub state: RwSignal<AccordionController>,
    /// Queue of effects emitted by the reducer and drained by the provider.
    pub effects: RwSignal<Vec<AccordionEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<AccordionAction>,
}

impl AccordionContext {
    /// Dispatches a reducer action through the context callback.
    pub fn dispatch_action(&self, action: AccordionAction) {
        self.dispatch.call(action);
    }

    /// Reactive open flag for `section_id`.
    pub fn is_open(&self, section_id: SectionId) -> bool {
        self.state.with(|controller| controller.is_open(section_id))
    }

    /// Current policy and open section names, for persistence.
    pub fn snapshot(&self) -> AccordionSnapshot {
        self.state.with_untracked(AccordionController::snapshot)
    }

    /// Restores a snapshot captured with [`AccordionContext::snapshot`].
    pub fn restore(&self, snapshot: AccordionSnapshot) {
        self.dispatch_action(AccordionAction::Restore { snapshot });
    }
}

#[component]
/// Collapsible section list that provides [`AccordionContext`] to its [`AccordionSection`]
/// children.
///
/// `allow_multiple_sections_open` and `active_section_name` seed the controller and are
/// re-applied whenever the signals behind them change.
pub fn Accordion(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] allow_multiple_sections_open: MaybeSignal<bool>,
    #[prop(optional, into)] active_section_name: Option<MaybeSignal<OpenNames>>,
    #[prop(optional)] on_toggle: Option<Callback<Vec<String>>>,
    children: Children,
) -> impl IntoView {
    let config = AccordionConfig {
        allow_multiple_sections_open: allow_multiple_sections_open.get_untracked(),
        active_section_name: active_section_name.as_ref().map(|names| names.get_untracked()),
    };
    let state = create_rw_signal(AccordionController::from_config(&config));
    let effects = create_rw_signal(Vec::<AccordionEffect>::new());

    let dispatch = Callback::new(move |action: AccordionAction| {
        let mut controller = state.get_untracked();
        let previous = controller.clone();

        match reduce_accordion(&mut controller, action) {
            Ok(new_effects) => {
                if controller != previous {
                    state.set(controller);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("accordion reducer error: {err}"),
        }
    });

    let accordion = AccordionContext {
        state,
        effects,
        dispatch,
    };
    provide_context(accordion);

    create_effect(move |previous: Option<bool>| {
        let allow_multiple = allow_multiple_sections_open.get();
        if previous.is_some() {
            accordion.dispatch_action(AccordionAction::SetPolicy {
                policy: OpenPolicy::from_allow_multiple(allow_multiple),
            });
        }
        allow_multiple
    });
    if let Some(active_section_name) = active_section_name {
        create_effect(move |previous: Option<()>| {
            let names = active_section_name.get();
            if previous.is_some() {
                accordion.dispatch_action(AccordionAction::SetOpenNames { names });
            }
        });
    }
    install_effect_executor(accordion, on_toggle);

    view! {
        <div
            class=merge_layout_class("ui-accordion", layout_class)
            data-ui-primitive="true"
            data-ui-kind="accordion"
            data-ui-multiple=move || {
                bool_token(state.with(|controller| controller.policy().allows_multiple()))
            }
        >
            {children()}
        </div>
    }
}

#[component]
/// One collapsible panel inside an [`Accordion`].
///
/// `position` is the panel's document-order key; updating it reorders the section for
/// next/previous navigation and for choosing the section opened when an open panel unmounts.
pub fn AccordionSection(
    #[prop(into)] name: String,
    #[prop(optional, into)] label: Option<String>,
    #[prop(optional, into)] description: Option<String>,
    #[prop(into)] position: MaybeSignal<DomPosition>,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: ChildrenFn,
) -> impl IntoView {
    let accordion = use_accordion();
    let section_id = next_section_id();
    let label = label.unwrap_or_else(|| name.clone());

    accordion.dispatch_action(AccordionAction::Mount(
        MountRequest::new(name, position.get_untracked())
            .with_id(section_id)
            .with_label(label.clone()),
    ));
    create_effect(move |previous: Option<()>| {
        let position = position.get();
        if previous.is_some() {
            accordion.dispatch_action(AccordionAction::Reposition {
                section_id,
                position,
            });
        }
    });
    on_cleanup(move || accordion.dispatch_action(AccordionAction::Unmount { section_id }));

    let expanded = Signal::derive(move || accordion.is_open(section_id));
    let header_id = header_dom_id(section_id);
    let body_id = body_dom_id(section_id);
    let controls_id = body_id.clone();
    let labelled_by = header_id.clone();

    view! {
        <section
            class=merge_layout_class("ui-accordion-section", layout_class)
            data-ui-primitive="true"
            data-ui-kind="accordion-section"
            data-ui-state=move || if expanded.get() { "open" } else { "closed" }
            data-ui-expanded=move || bool_token(expanded.get())
        >
            <SectionHeader
                id=header_id
                controls=controls_id
                expanded=expanded
                on_click=Callback::new(move |_| {
                    accordion.dispatch_action(AccordionAction::Select { section_id });
                })
                on_keydown=Callback::new(move |ev: KeyboardEvent| {
                    if let Some(motion) = focus_move_for_key(&ev.key()) {
                        ev.prevent_default();
                        accordion.dispatch_action(AccordionAction::Focus {
                            from: Some(section_id),
                            motion,
                        });
                    }
                })
            >
                <span data-ui-slot="copy">
                    <span data-ui-slot="title">{label}</span>
                    {description.map(|description| view! { <span data-ui-slot="description">{description}</span> })}
                </span>
                <span data-ui-slot="indicator" aria-hidden="true">
                    {move || if expanded.get() { "Hide" } else { "Show" }}
                </span>
            </SectionHeader>
            <Show when=move || expanded.get() fallback=|| ()>
                <div
                    id=body_id.clone()
                    role="region"
                    aria-labelledby=labelled_by.clone()
                    data-ui-slot="body"
                >
                    {children()}
                </div>
            </Show>
        </section>
    }
}

#[component]
/// Toggle button heading one section; wires the disclosure ARIA attributes to `expanded`.
fn SectionHeader(
    id: String,
    controls: String,
    expanded: Signal<bool>,
    on_click: Callback<MouseEvent>,
    on_keydown: Callback<KeyboardEvent>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="ui-button ui-accordion-toggle"
            id=id
            aria-controls=controls
            aria-expanded=move || bool_token(expanded.get())
            data-ui-primitive="true"
            data-ui-kind="button"
            data-ui-slot="toggle"
            data-ui-variant="quiet"
            data-ui-state=move || if expanded.get() { "selected" } else { "idle" }
            on:click=move |ev| on_click.call(ev)
            on:keydown=move |ev| on_keydown.call(ev)
        >
            {children()}
        </button>
    }
}

/// Returns the current [`AccordionContext`].
///
/// # Panics
///
/// Panics if called outside [`Accordion`].
pub fn use_accordion() -> AccordionContext {
    use_context::<AccordionContext>().expect("AccordionContext not provided")
}

fn install_effect_executor(accordion: AccordionContext, on_toggle: Option<Callback<Vec<String>>>) {
    // Clear the queue before draining so effects dispatched from a toggle listener land in a
    // fresh batch.
    create_effect(move |_| {
        let queued = accordion.effects.get();
        if queued.is_empty() {
            return;
        }

        accordion.effects.set(Vec::new());

        for effect in queued {
            match effect {
                AccordionEffect::SectionToggle { open_sections } => {
                    if let Some(on_toggle) = on_toggle.as_ref() {
                        on_toggle.call(open_sections);
                    }
                }
                AccordionEffect::FocusSection(section_id) => focus_header(section_id),
            }
        }
    });
}

fn focus_header(section_id: SectionId) {
    let dom_id = header_dom_id(section_id);
    let Some(element) = document().get_element_by_id(&dom_id) else {
        logging::warn!("accordion focus target `{dom_id}` is not mounted");
        return;
    };
    match element.dyn_into::<web_sys::HtmlElement>() {
        Ok(header) => {
            if let Err(err) = header.focus() {
                logging::warn!("accordion header focus failed: {err:?}");
            }
        }
        Err(_) => logging::warn!("accordion focus target `{dom_id}` is not an html element"),
    }
}

fn next_section_id() -> SectionId {
    SectionId(NEXT_SECTION_ID.fetch_add(1, Ordering::Relaxed))
}

fn header_dom_id(section_id: SectionId) -> String {
    format!("ui-accordion-section-{section_id}-header")
}

fn body_dom_id(section_id: SectionId) -> String {
    format!("ui-accordion-section-{section_id}-body")
}

fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn focus_move_for_key(key: &str) -> Option<FocusMove> {
    match key {
        "ArrowDown" | "ArrowRight" => Some(FocusMove::Next),
        "ArrowUp" | "ArrowLeft" => Some(FocusMove::Previous),
        "Home" => Some(FocusMove::First),
        "End" => Some(FocusMove::Last),
        _ => None,
    }
}
