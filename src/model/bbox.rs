//! Axis-aligned bounding boxes in OCR image coordinates.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in the pixel space of the image the OCR engine
/// processed. Origin is top-left; `x1 >= x0` and `y1 >= y0` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: i32,
    /// Top edge
    pub y0: i32,
    /// Right edge
    pub x1: i32,
    /// Bottom edge
    pub y1: i32,
}

impl BoundingBox {
    /// Create a box from two corners, swapping coordinates when they arrive
    /// out of order.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Area in square pixels.
    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }

    /// Vertical center.
    pub fn center_y(&self) -> f64 {
        (self.y0 as f64 + self.y1 as f64) / 2.0
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Union of every box in the iterator, `None` when it is empty.
    pub fn union_all<'a, I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BoundingBox>, b| match acc {
                Some(u) => Some(u.union(b)),
                None => Some(*b),
            })
    }

    /// Overlapping region of the two boxes, `None` when they do not overlap.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1);
        let y1 = self.y1.min(other.y1);
        if x1 > x0 && y1 > y0 {
            Some(BoundingBox { x0, y0, x1, y1 })
        } else {
            None
        }
    }

    /// Fraction of this box's own area covered by `other`.
    ///
    /// Returns 0.0 for a zero-area box.
    pub fn overlap_ratio(&self, other: &BoundingBox) -> f64 {
        let area = self.area();
        if area <= 0 {
            return 0.0;
        }
        match self.intersection(other) {
            Some(inter) => inter.area() as f64 / area as f64,
            None => 0.0,
        }
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }

    /// Restrict this box to `bounds`.
    pub fn clamp_to(&self, bounds: &BoundingBox) -> BoundingBox {
        let x0 = self.x0.clamp(bounds.x0, bounds.x1);
        let y0 = self.y0.clamp(bounds.y0, bounds.y1);
        let x1 = self.x1.clamp(x0, bounds.x1);
        let y1 = self.y1.clamp(y0, bounds.y1);
        BoundingBox { x0, y0, x1, y1 }
    }

    /// Scale by a per-axis linear factor, rounding outward so the scaled box
    /// still covers every pixel of the original.
    pub fn scaled(&self, sx: f64, sy: f64) -> BoundingBox {
        if !(sx.is_finite() && sy.is_finite()) || sx <= 0.0 || sy <= 0.0 {
            return *self;
        }
        BoundingBox::new(
            (self.x0 as f64 * sx).floor() as i32,
            (self.y0 as f64 * sy).floor() as i32,
            (self.x1 as f64 * sx).ceil() as i32,
            (self.y1 as f64 * sy).ceil() as i32,
        )
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x0, self.y0, self.x1, self.y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_corners() {
        let b = BoundingBox::new(50, 40, 10, 20);
        assert_eq!(b, BoundingBox::new(10, 20, 50, 40));
        assert_eq!(b.width(), 40);
        assert_eq!(b.height(), 20);
    }

    #[test]
    fn test_union_all() {
        let boxes = [
            BoundingBox::new(10, 10, 20, 20),
            BoundingBox::new(30, 5, 40, 15),
        ];
        assert_eq!(
            BoundingBox::union_all(boxes.iter()),
            Some(BoundingBox::new(10, 5, 40, 20))
        );
        assert_eq!(BoundingBox::union_all(std::iter::empty()), None);
    }

    #[test]
    fn test_overlap_ratio() {
        let line = BoundingBox::new(0, 0, 100, 10);
        let half = BoundingBox::new(50, 0, 200, 10);
        assert!((line.overlap_ratio(&half) - 0.5).abs() < 1e-9);

        let disjoint = BoundingBox::new(0, 20, 100, 30);
        assert_eq!(line.overlap_ratio(&disjoint), 0.0);

        let flat = BoundingBox::new(0, 0, 100, 0);
        assert_eq!(flat.overlap_ratio(&line), 0.0);
    }

    #[test]
    fn test_clamp_and_contains() {
        let bounds = BoundingBox::new(0, 0, 100, 50);
        let b = BoundingBox::new(-10, 10, 120, 40).clamp_to(&bounds);
        assert_eq!(b, BoundingBox::new(0, 10, 100, 40));
        assert!(bounds.contains(&b));
    }

    #[test]
    fn test_scaled_rounds_outward() {
        let b = BoundingBox::new(1, 1, 3, 3);
        assert_eq!(b.scaled(1.5, 0.5), BoundingBox::new(1, 0, 5, 2));
        assert_eq!(b.scaled(0.0, 1.0), b);
    }
}
