use crate::carousel::NavigationIntent;

pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

pub fn intent_from_wheel(delta_y: f64) -> NavigationIntent {
    if delta_y > 0.0 {
        NavigationIntent::Next
    } else {
        NavigationIntent::Previous
    }
}

pub fn intent_from_dot(index: usize) -> NavigationIntent {
    NavigationIntent::JumpTo(i64::try_from(index).unwrap_or(i64::MAX))
}

pub fn intent_from_swipe(start_x: f32, end_x: f32, threshold: f32) -> Option<NavigationIntent> {
    let diff = start_x - end_x;
    if !diff.is_finite() || diff.abs() <= threshold {
        return None;
    }
    if diff > 0.0 {
        Some(NavigationIntent::Next)
    } else {
        Some(NavigationIntent::Previous)
    }
}

/// Horizontal swipe between a touch start and the matching touch end.
#[derive(Clone, Copy, Debug)]
pub struct SwipeTracker {
    start_x: Option<f32>,
    threshold: f32,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::with_threshold(SWIPE_THRESHOLD_PX)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            start_x: None,
            threshold: threshold.max(0.0),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_armed(&self) -> bool {
        self.start_x.is_some()
    }

    pub fn start(&mut self, screen_x: Option<f32>) {
        self.start_x = screen_x.filter(|x| x.is_finite());
    }

    pub fn end(&mut self, screen_x: Option<f32>) -> Option<NavigationIntent> {
        let start_x = self.start_x.take()?;
        let end_x = screen_x.filter(|x| x.is_finite())?;
        intent_from_swipe(start_x, end_x, self.threshold)
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new()
    }
}
