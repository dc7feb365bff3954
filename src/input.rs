use wasm_bindgen::JsCast;
use web_sys::{DomRect, Element, Event, TouchEvent, WheelEvent, Window};

use greeting_core::Rect;

pub(crate) fn wheel_delta_y(event: &Event) -> Option<f64> {
    let event = event.dyn_ref::<WheelEvent>()?;
    let delta = event.delta_y();
    delta.is_finite().then_some(delta)
}

/// Screen-X of the first changed touch, if the event carries one.
pub(crate) fn changed_touch_screen_x(event: &Event) -> Option<f32> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let touch = event.changed_touches().get(0)?;
    Some(touch.screen_x() as f32)
}

pub(crate) trait HasClientRect {
    fn client_rect(&self) -> DomRect;
}

impl HasClientRect for Element {
    fn client_rect(&self) -> DomRect {
        self.get_bounding_client_rect()
    }
}

pub(crate) fn element_rect(element: &impl HasClientRect) -> Rect {
    let rect = element.client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub(crate) fn viewport_rect(window: &Window) -> Option<Rect> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Rect::new(0.0, 0.0, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::WheelEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn reads_wheel_delta() {
        let init = WheelEventInit::new();
        init.set_delta_y(40.0);
        let event = WheelEvent::new_with_event_init_dict("wheel", &init).expect("wheel event");
        assert_eq!(wheel_delta_y(&event), Some(40.0));
    }

    #[wasm_bindgen_test]
    fn plain_events_carry_no_pointer_data() {
        let event = Event::new("touchend").expect("event");
        assert_eq!(wheel_delta_y(&event), None);
        assert_eq!(changed_touch_screen_x(&event), None);
    }

    #[wasm_bindgen_test]
    fn viewport_has_size() {
        let window = web_sys::window().expect("window available");
        let rect = viewport_rect(&window).expect("viewport rect");
        assert!(rect.width > 0.0);
        assert!(rect.height > 0.0);
    }
}
