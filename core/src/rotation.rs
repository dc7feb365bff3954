pub const DEFAULT_BACKGROUND_INTERVAL_MS: u32 = 5000;

/// Round-robin cursor over the background images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackgroundRotation {
    index: usize,
    len: usize,
}

impl BackgroundRotation {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.len > 0 && index == self.index
    }

    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_around() {
        let mut rotation = BackgroundRotation::new(3);
        assert_eq!(rotation.advance(), 1);
        assert_eq!(rotation.advance(), 2);
        assert_eq!(rotation.advance(), 0);
        assert!(rotation.is_active(0));
    }

    #[test]
    fn empty_never_moves() {
        let mut rotation = BackgroundRotation::new(0);
        assert_eq!(rotation.advance(), 0);
        assert!(!rotation.is_active(0));
    }
}
