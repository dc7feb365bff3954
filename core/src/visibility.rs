use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Viewport edge adjustment in CSS pixels. Negative values pull that edge
/// inwards, the same convention as `IntersectionObserver`'s `rootMargin`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgeMargin {
    pub const fn bottom(bottom: f64) -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom,
            left: 0.0,
        }
    }

    pub fn root_margin(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }

    pub fn apply(&self, viewport: Rect) -> Rect {
        let left = viewport.left - self.left;
        let top = viewport.top - self.top;
        let right = viewport.right() + self.right;
        let bottom = viewport.bottom() + self.bottom;
        Rect::new(left, top, right - left, bottom - top)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub intersecting: bool,
    pub ratio: f64,
}

pub fn intersect(element: Rect, viewport: Rect, margin: EdgeMargin) -> Intersection {
    let root = margin.apply(viewport);
    let left = element.left.max(root.left);
    let top = element.top.max(root.top);
    let right = element.right().min(root.right());
    let bottom = element.bottom().min(root.bottom());
    let overlap_w = right - left;
    let overlap_h = bottom - top;
    if overlap_w < 0.0 || overlap_h < 0.0 {
        return Intersection {
            intersecting: false,
            ratio: 0.0,
        };
    }
    let area = element.area();
    let ratio = if area > 0.0 {
        (overlap_w * overlap_h / area).clamp(0.0, 1.0)
    } else {
        1.0
    };
    Intersection {
        intersecting: true,
        ratio,
    }
}

pub fn visible_fraction(element: Rect, viewport: Rect, margin: EdgeMargin) -> f64 {
    intersect(element, viewport, margin).ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn root_margin_string() {
        assert_eq!(EdgeMargin::bottom(-50.0).root_margin(), "0px 0px -50px 0px");
    }

    #[test]
    fn fully_visible_element() {
        let element = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(visible_fraction(element, VIEWPORT, EdgeMargin::default()), 1.0);
    }

    #[test]
    fn negative_bottom_margin_hides_bottom_strip() {
        let element = Rect::new(0.0, 560.0, 100.0, 40.0);
        let margin = EdgeMargin::bottom(-50.0);
        assert_eq!(visible_fraction(element, VIEWPORT, EdgeMargin::default()), 1.0);
        let hit = intersect(element, VIEWPORT, margin);
        assert!(!hit.intersecting);
        assert_eq!(hit.ratio, 0.0);
    }

    #[test]
    fn partial_overlap_ratio() {
        let element = Rect::new(0.0, 500.0, 100.0, 200.0);
        let ratio = visible_fraction(element, VIEWPORT, EdgeMargin::bottom(-50.0));
        assert!((ratio - 0.25).abs() < 1e-9);
    }

    #[test]
    fn element_below_viewport() {
        let element = Rect::new(0.0, 900.0, 100.0, 100.0);
        let hit = intersect(element, VIEWPORT, EdgeMargin::default());
        assert!(!hit.intersecting);
    }
}
