#![cfg(target_arch = "wasm32")]

use greeting_core::{PageConfig, DEFAULT_EDGE_MARGIN, DEFAULT_REVEAL_THRESHOLD};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{IntersectionObserver, IntersectionObserverInit};

wasm_bindgen_test_configure!(run_in_browser);

fn observer(threshold: f64, root_margin: &str) -> IntersectionObserver {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |_entries: js_sys::Array, _observer: IntersectionObserver| {},
    );
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    init.set_root_margin(root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .expect("observer accepts options");
    callback.forget();
    observer
}

#[wasm_bindgen_test]
fn browser_accepts_default_edge_margin() {
    let observer = observer(DEFAULT_REVEAL_THRESHOLD, &DEFAULT_EDGE_MARGIN.root_margin());
    assert_eq!(observer.root_margin(), "0px 0px -50px 0px");
    let thresholds = observer.thresholds();
    assert_eq!(thresholds.length(), 1);
    assert_eq!(thresholds.get(0).as_f64(), Some(DEFAULT_REVEAL_THRESHOLD));
    observer.disconnect();
}

#[wasm_bindgen_test]
fn bundled_reveal_settings_are_observer_ready() {
    let config = PageConfig::bundled().expect("bundled config");
    let reveal = config.reveal;
    let observer = observer(reveal.effective_threshold(), &reveal.edge_margin.root_margin());
    assert_eq!(observer.root_margin(), reveal.edge_margin.root_margin());
    observer.disconnect();
}
