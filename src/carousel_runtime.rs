use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::timers::callback::Timeout;

use greeting_core::{
    CarouselController, CarouselError, CarouselSettings, NavigationIntent, SubmitOutcome,
    Submission, SwipeTracker,
};

pub(crate) type IndexHook = Rc<dyn Fn(usize)>;

struct DriverState {
    controller: CarouselController,
    swipe: SwipeTracker,
    cooldown_timer: Option<Timeout>,
    on_change: Option<IndexHook>,
    shut_down: bool,
}

/// Browser side of the carousel: feeds intents into the controller and owns
/// the timer that ends each cooldown.
#[derive(Clone)]
pub(crate) struct CarouselDriver {
    state: Rc<RefCell<DriverState>>,
}

impl CarouselDriver {
    pub(crate) fn new(item_count: usize, settings: CarouselSettings) -> Result<Self, CarouselError> {
        let item_count = i64::try_from(item_count).unwrap_or(i64::MAX);
        let controller = CarouselController::with_cooldown(item_count, settings.cooldown_ms)?;
        Ok(Self {
            state: Rc::new(RefCell::new(DriverState {
                controller,
                swipe: SwipeTracker::with_threshold(settings.swipe_threshold_px),
                cooldown_timer: None,
                on_change: None,
                shut_down: false,
            })),
        })
    }

    pub(crate) fn set_change_hook(&self, hook: Option<IndexHook>) {
        self.state.borrow_mut().on_change = hook;
    }

    pub(crate) fn submit(&self, intent: NavigationIntent) -> Submission {
        let (submission, hook) = {
            let mut state = self.state.borrow_mut();
            if state.shut_down {
                let index = state.controller.current_index();
                return Submission {
                    index,
                    outcome: SubmitOutcome::Dropped,
                };
            }
            let submission = state.controller.submit(intent);
            let SubmitOutcome::Moved { cooldown_ms } = submission.outcome else {
                return submission;
            };
            let weak = Rc::downgrade(&self.state);
            state.cooldown_timer = Some(Timeout::new(cooldown_ms, move || end_cooldown(&weak)));
            (submission, state.on_change.clone())
        };
        gloo::console::log!(
            "carousel",
            format!("{:?} -> {}", intent, submission.index)
        );
        if let Some(hook) = hook {
            hook(submission.index);
        }
        submission
    }

    pub(crate) fn touch_start(&self, screen_x: Option<f32>) {
        self.state.borrow_mut().swipe.start(screen_x);
    }

    pub(crate) fn touch_end(&self, screen_x: Option<f32>) -> Option<Submission> {
        let intent = self.state.borrow_mut().swipe.end(screen_x)?;
        Some(self.submit(intent))
    }

    /// Cancels the pending cooldown reset and stops accepting input.
    pub(crate) fn shutdown(&self) {
        let mut state = self.state.borrow_mut();
        state.shut_down = true;
        state.on_change = None;
        state.swipe.cancel();
        state.cooldown_timer.take();
    }

    pub(crate) fn item_count(&self) -> usize {
        self.state.borrow().controller.item_count()
    }

    #[cfg(test)]
    pub(crate) fn cooldown_active(&self) -> bool {
        self.state.borrow().controller.cooldown_active()
    }

    pub(crate) fn translate_style(&self) -> String {
        self.state.borrow().controller.translate_style()
    }

    pub(crate) fn counter_label(&self) -> String {
        self.state.borrow().controller.counter_label()
    }

    pub(crate) fn is_active_dot(&self, index: usize) -> bool {
        self.state.borrow().controller.is_active_dot(index)
    }
}

impl PartialEq for CarouselDriver {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

fn end_cooldown(state: &Weak<RefCell<DriverState>>) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let Ok(mut state) = state.try_borrow_mut() else {
        return;
    };
    if state.shut_down {
        return;
    }
    state.controller.end_cooldown();
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn driver(cooldown_ms: u32) -> CarouselDriver {
        CarouselDriver::new(
            6,
            CarouselSettings {
                cooldown_ms,
                ..CarouselSettings::default()
            },
        )
        .expect("driver")
    }

    #[wasm_bindgen_test]
    fn empty_photo_list_is_rejected() {
        assert!(CarouselDriver::new(0, CarouselSettings::default()).is_err());
    }

    #[wasm_bindgen_test(async)]
    async fn cooldown_expires_on_timer() {
        let driver = driver(30);
        assert_eq!(driver.submit(NavigationIntent::Next).index, 1);
        assert_eq!(driver.submit(NavigationIntent::Next).index, 1);
        assert!(driver.cooldown_active());

        TimeoutFuture::new(80).await;
        assert!(!driver.cooldown_active());
        assert_eq!(driver.submit(NavigationIntent::Next).index, 2);
    }

    #[wasm_bindgen_test(async)]
    async fn shutdown_cancels_pending_reset() {
        let driver = driver(30);
        let calls = Rc::new(Cell::new(0u32));
        {
            let calls = calls.clone();
            driver.set_change_hook(Some(Rc::new(move |_| calls.set(calls.get() + 1))));
        }
        driver.submit(NavigationIntent::Next);
        driver.shutdown();

        TimeoutFuture::new(80).await;
        assert!(driver.cooldown_active());
        assert_eq!(driver.submit(NavigationIntent::Previous).outcome, SubmitOutcome::Dropped);
        assert_eq!(calls.get(), 1);
    }

    #[wasm_bindgen_test]
    fn swipe_below_threshold_is_ignored() {
        let driver = driver(30);
        driver.touch_start(Some(200.0));
        assert_eq!(driver.touch_end(Some(160.0)), None);
        driver.touch_start(Some(200.0));
        let submission = driver.touch_end(Some(100.0)).expect("swipe accepted");
        assert_eq!(submission.index, 1);
        assert_eq!(driver.counter_label(), "2 / 6");
        assert_eq!(driver.translate_style(), "transform: translateX(-100%)");
    }
}
