use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use greeting_core::{
    intersect, EdgeMargin, RevealConfig, RevealOnVisible, RevealState, RevealSurface,
    VisibilityEntry, VisibilityObserver,
};

use crate::app_runtime;
use crate::input::{element_rect, viewport_rect};

const HIDDEN_TRANSFORM: &str = "translateY(30px)";
const REVEALED_TRANSFORM: &str = "translateY(0)";
const REVEAL_TRANSITION: &str = "all 0.8s ease";

type DomReveal = RevealOnVisible<Element, InlineStyleSurface, DomVisibility>;
type EntrySink = Rc<dyn Fn(Vec<VisibilityEntry<Element>>)>;

pub(crate) struct InlineStyleSurface;

impl RevealSurface<Element> for InlineStyleSurface {
    fn apply(&mut self, handle: &Element, state: RevealState) {
        let Some(element) = handle.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = element.style();
        match state {
            RevealState::Hidden => {
                let _ = style.set_property("opacity", "0");
                let _ = style.set_property("transform", HIDDEN_TRANSFORM);
                let _ = style.set_property("transition", REVEAL_TRANSITION);
            }
            RevealState::Revealed => {
                let _ = style.set_property("opacity", "1");
                let _ = style.set_property("transform", REVEALED_TRANSFORM);
            }
        }
    }
}

pub(crate) struct IntersectionVisibility {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl IntersectionVisibility {
    fn new(threshold: f64, margin: EdgeMargin, sink: EntrySink) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let batch = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| VisibilityEntry {
                        handle: entry.target(),
                        intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    })
                    .collect::<Vec<_>>();
                sink(batch);
            },
        );
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(&margin.root_margin());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

/// Fallback for hosts without `IntersectionObserver`: re-checks bounding
/// rects on scroll and resize.
pub(crate) struct ScrollPollVisibility {
    targets: Rc<RefCell<Vec<Element>>>,
    _listeners: Vec<EventListener>,
    _initial_check: Timeout,
}

impl ScrollPollVisibility {
    fn new(margin: EdgeMargin, sink: EntrySink) -> Option<Self> {
        let window = web_sys::window()?;
        let targets = Rc::new(RefCell::new(Vec::<Element>::new()));
        let check: Rc<dyn Fn()> = {
            let targets = targets.clone();
            Rc::new(move || {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let Some(viewport) = viewport_rect(&window) else {
                    return;
                };
                let observed = targets.borrow().clone();
                if observed.is_empty() {
                    return;
                }
                let batch = observed
                    .into_iter()
                    .map(|element| {
                        let hit = intersect(element_rect(&element), viewport, margin);
                        VisibilityEntry {
                            handle: element,
                            intersecting: hit.intersecting,
                            ratio: hit.ratio,
                        }
                    })
                    .collect::<Vec<_>>();
                sink(batch);
            })
        };
        let listeners = ["scroll", "resize"]
            .into_iter()
            .map(|event_type| {
                let check = check.clone();
                EventListener::new_with_options(
                    &window,
                    event_type,
                    EventListenerOptions::run_in_capture_phase(),
                    move |_| check(),
                )
            })
            .collect();
        let initial_check = {
            let check = check.clone();
            Timeout::new(0, move || check())
        };
        Some(Self {
            targets,
            _listeners: listeners,
            _initial_check: initial_check,
        })
    }
}

pub(crate) enum DomVisibility {
    Intersection(IntersectionVisibility),
    ScrollPoll(ScrollPollVisibility),
}

impl VisibilityObserver<Element> for DomVisibility {
    fn observe(&mut self, handle: &Element) {
        match self {
            DomVisibility::Intersection(inner) => inner.observer.observe(handle),
            DomVisibility::ScrollPoll(inner) => inner.targets.borrow_mut().push(handle.clone()),
        }
    }

    fn unobserve(&mut self, handle: &Element) {
        match self {
            DomVisibility::Intersection(inner) => inner.observer.unobserve(handle),
            DomVisibility::ScrollPoll(inner) => {
                inner.targets.borrow_mut().retain(|element| element != handle)
            }
        }
    }

    fn disconnect(&mut self) {
        match self {
            DomVisibility::Intersection(inner) => inner.observer.disconnect(),
            DomVisibility::ScrollPoll(inner) => inner.targets.borrow_mut().clear(),
        }
    }
}

fn intersection_observer_supported() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn build_visibility(config: &RevealConfig, sink: EntrySink) -> Option<DomVisibility> {
    if intersection_observer_supported() {
        match IntersectionVisibility::new(config.effective_threshold(), config.edge_margin, sink.clone()) {
            Ok(inner) => return Some(DomVisibility::Intersection(inner)),
            Err(err) => {
                gloo::console::warn!("reveal: IntersectionObserver failed, polling instead", err);
            }
        }
    }
    ScrollPollVisibility::new(config.edge_margin, sink).map(DomVisibility::ScrollPoll)
}

pub(crate) fn query_targets(selectors: &str) -> Vec<Element> {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selectors) else {
        gloo::console::warn!("reveal: invalid selector", selectors.to_string());
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Live reveal group; dropping it detaches every observer.
pub(crate) struct RevealHandle {
    reveal: Rc<RefCell<Option<DomReveal>>>,
}

impl RevealHandle {
    pub(crate) fn revealed_count(&self) -> usize {
        self.reveal
            .borrow()
            .as_ref()
            .map(|reveal| reveal.revealed_count())
            .unwrap_or(0)
    }

    pub(crate) fn target_count(&self) -> usize {
        self.reveal
            .borrow()
            .as_ref()
            .map(|reveal| reveal.target_count())
            .unwrap_or(0)
    }

    pub(crate) fn detach(&self) {
        if let Some(mut reveal) = self.reveal.borrow_mut().take() {
            reveal.detach();
        }
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

fn deliver(slot: &Weak<RefCell<Option<DomReveal>>>, batch: Vec<VisibilityEntry<Element>>) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let mut slot = slot.borrow_mut();
    let Some(reveal) = slot.as_mut() else {
        return;
    };
    let mut live = Vec::with_capacity(batch.len());
    for entry in batch {
        if entry.handle.is_connected() {
            live.push(entry);
        } else {
            reveal.forget(&entry.handle);
        }
    }
    reveal.on_visibility(live);
}

pub(crate) fn attach_elements(targets: Vec<Element>, config: RevealConfig) -> Option<RevealHandle> {
    attach_with(targets, config, build_visibility)
}

fn attach_with<B>(targets: Vec<Element>, config: RevealConfig, build: B) -> Option<RevealHandle>
where
    B: FnOnce(&RevealConfig, EntrySink) -> Option<DomVisibility>,
{
    if targets.is_empty() {
        return None;
    }
    let slot: Rc<RefCell<Option<DomReveal>>> = Rc::new(RefCell::new(None));
    let sink: EntrySink = {
        let weak = Rc::downgrade(&slot);
        Rc::new(move |batch| deliver(&weak, batch))
    };
    let Some(visibility) = build(&config, sink) else {
        gloo::console::warn!("reveal: no window, skipping");
        return None;
    };
    let reveal = RevealOnVisible::attach(targets, config, InlineStyleSurface, visibility);
    *slot.borrow_mut() = Some(reveal);
    Some(RevealHandle { reveal: slot })
}

pub(crate) fn attach_reveal(selectors: &str, config: RevealConfig) -> Option<RevealHandle> {
    attach_elements(query_targets(selectors), config)
}

#[hook]
pub(crate) fn use_reveal_on_visible(selectors: &'static str) {
    use_effect_with(selectors, move |selectors| {
        let selectors: &'static str = *selectors;
        let config = app_runtime::page_config().reveal;
        let handle = attach_reveal(selectors, config);
        move || {
            if let Some(handle) = handle {
                gloo::console::log!(
                    "reveal detached",
                    selectors,
                    format!("{}/{}", handle.revealed_count(), handle.target_count())
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(class: &str, top_px: u32) -> HtmlElement {
        mount_at(class, "absolute", top_px as f64)
    }

    fn mount_at(class: &str, position: &str, top_px: f64) -> HtmlElement {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let element = document
            .create_element("div")
            .expect("create div")
            .dyn_into::<HtmlElement>()
            .expect("html element");
        element.set_class_name(class);
        let style = element.style();
        style.set_property("position", position).expect("position");
        style.set_property("top", &format!("{top_px}px")).expect("top");
        style.set_property("height", "100px").expect("height");
        style.set_property("width", "100px").expect("width");
        document
            .body()
            .expect("body available")
            .append_child(&element)
            .expect("append");
        element
    }

    fn poll_only(config: &RevealConfig, sink: EntrySink) -> Option<DomVisibility> {
        ScrollPollVisibility::new(config.edge_margin, sink).map(DomVisibility::ScrollPoll)
    }

    fn viewport_height() -> f64 {
        web_sys::window()
            .and_then(|window| window.inner_height().ok())
            .and_then(|height| height.as_f64())
            .expect("viewport height")
    }

    fn opacity(element: &HtmlElement) -> String {
        element.style().get_property_value("opacity").expect("opacity")
    }

    #[wasm_bindgen_test(async)]
    async fn polling_respects_bottom_edge_margin() {
        let visible = mount_at("poll-test-visible", "fixed", 0.0);
        let edge = mount_at("poll-test-edge", "fixed", viewport_height() - 40.0);
        edge.style().set_property("height", "30px").expect("height");
        let targets = vec![Element::from(visible.clone()), Element::from(edge.clone())];
        let handle =
            attach_with(targets, RevealConfig::default(), poll_only).expect("handle");
        assert_eq!(opacity(&visible), "0");
        assert_eq!(opacity(&edge), "0");

        TimeoutFuture::new(50).await;
        assert_eq!(opacity(&visible), "1");
        assert_eq!(opacity(&edge), "0");
        assert_eq!(handle.revealed_count(), 1);
        visible.remove();
        edge.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn removed_element_is_forgotten_by_polling() {
        let element = mount_at("poll-test-removed", "fixed", 0.0);
        let handle = attach_with(
            vec![Element::from(element.clone())],
            RevealConfig::default(),
            poll_only,
        )
        .expect("handle");
        assert_eq!(handle.target_count(), 1);
        element.remove();

        TimeoutFuture::new(50).await;
        assert_eq!(opacity(&element), "0");
        assert_eq!(handle.revealed_count(), 0);
        assert_eq!(handle.target_count(), 0);
    }

    #[wasm_bindgen_test]
    fn empty_selection_attaches_nothing() {
        assert!(attach_reveal(".no-such-reveal-target", RevealConfig::default()).is_none());
    }

    #[wasm_bindgen_test(async)]
    async fn visible_element_is_revealed_once() {
        let element = mount("reveal-test-visible", 0);
        let handle = attach_reveal(".reveal-test-visible", RevealConfig::default())
            .expect("handle");
        assert_eq!(element.style().get_property_value("opacity").unwrap(), "0");

        TimeoutFuture::new(100).await;
        assert_eq!(element.style().get_property_value("opacity").unwrap(), "1");
        assert_eq!(handle.revealed_count(), 1);

        element.style().set_property("opacity", "0.5").unwrap();
        TimeoutFuture::new(50).await;
        assert_eq!(element.style().get_property_value("opacity").unwrap(), "0.5");
        element.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn detach_stops_reveal() {
        let element = mount("reveal-test-detached", 0);
        let handle = attach_reveal(".reveal-test-detached", RevealConfig::default())
            .expect("handle");
        handle.detach();
        assert_eq!(handle.revealed_count(), 0);
        TimeoutFuture::new(100).await;
        assert_eq!(element.style().get_property_value("opacity").unwrap(), "0");
        element.remove();
    }

    #[wasm_bindgen_test(async)]
    async fn far_element_stays_hidden() {
        let element = mount("reveal-test-far", 100_000);
        let handle = attach_reveal(".reveal-test-far", RevealConfig::default())
            .expect("handle");
        TimeoutFuture::new(100).await;
        assert_eq!(element.style().get_property_value("opacity").unwrap(), "0");
        assert_eq!(handle.revealed_count(), 0);
        element.remove();
    }
}
