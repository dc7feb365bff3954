//! Photo carousel navigation.
//!
//! The controller owns the current index and a cooldown flag. It never touches
//! a timer itself: when an intent is accepted it reports the cooldown window in
//! [`SubmitOutcome::Moved`] and the host arms whatever timer it has, calling
//! [`CarouselController::end_cooldown`] when it fires.

pub const DEFAULT_COOLDOWN_MS: u32 = 700;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationIntent {
    Next,
    Previous,
    JumpTo(i64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarouselState {
    pub current_index: usize,
    pub item_count: usize,
    pub cooldown_active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Index changed; the host must call `end_cooldown` after `cooldown_ms`.
    Moved { cooldown_ms: u32 },
    Unchanged,
    Dropped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Submission {
    pub index: usize,
    pub outcome: SubmitOutcome,
}

impl Submission {
    pub fn cooldown_started(&self) -> bool {
        matches!(self.outcome, SubmitOutcome::Moved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CarouselError {
    #[error("carousel needs at least one item, got {item_count}")]
    InvalidConfiguration { item_count: i64 },
}

#[derive(Clone, Debug)]
pub struct CarouselController {
    state: CarouselState,
    cooldown_ms: u32,
}

impl CarouselController {
    pub fn initialize(item_count: i64) -> Result<Self, CarouselError> {
        Self::with_cooldown(item_count, DEFAULT_COOLDOWN_MS)
    }

    pub fn with_cooldown(item_count: i64, cooldown_ms: u32) -> Result<Self, CarouselError> {
        if item_count <= 0 {
            return Err(CarouselError::InvalidConfiguration { item_count });
        }
        let item_count = usize::try_from(item_count)
            .map_err(|_| CarouselError::InvalidConfiguration { item_count })?;
        Ok(Self {
            state: CarouselState {
                current_index: 0,
                item_count,
                cooldown_active: false,
            },
            cooldown_ms,
        })
    }

    pub fn submit(&mut self, intent: NavigationIntent) -> Submission {
        if self.state.cooldown_active {
            return Submission {
                index: self.state.current_index,
                outcome: SubmitOutcome::Dropped,
            };
        }
        let target = self.clamp_target(intent);
        if target == self.state.current_index {
            return Submission {
                index: target,
                outcome: SubmitOutcome::Unchanged,
            };
        }
        self.state.current_index = target;
        self.state.cooldown_active = true;
        Submission {
            index: target,
            outcome: SubmitOutcome::Moved {
                cooldown_ms: self.cooldown_ms,
            },
        }
    }

    pub fn end_cooldown(&mut self) {
        self.state.cooldown_active = false;
    }

    fn clamp_target(&self, intent: NavigationIntent) -> usize {
        let current = self.state.current_index as i64;
        let raw = match intent {
            NavigationIntent::Next => current.saturating_add(1),
            NavigationIntent::Previous => current.saturating_sub(1),
            NavigationIntent::JumpTo(index) => index,
        };
        let last = (self.state.item_count - 1) as i64;
        raw.clamp(0, last) as usize
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn item_count(&self) -> usize {
        self.state.item_count
    }

    pub fn cooldown_active(&self) -> bool {
        self.state.cooldown_active
    }

    pub fn cooldown_ms(&self) -> u32 {
        self.cooldown_ms
    }

    pub fn offset_percent(&self) -> i64 {
        -(self.state.current_index as i64) * 100
    }

    pub fn translate_style(&self) -> String {
        format!("transform: translateX({}%)", self.offset_percent())
    }

    pub fn is_active_dot(&self, index: usize) -> bool {
        index == self.state.current_index
    }

    pub fn counter_label(&self) -> String {
        format!("{} / {}", self.state.current_index + 1, self.state.item_count)
    }
}
