//! Axis-aligned 2D bounds accumulated from points.
//!
//! Used to place the synthetic bootstrap vertices of the sweep outside the
//! input. An empty box has `min = +∞`, `max = −∞` until a point is added.

use nalgebra::Vector2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds2 {
    #[inline]
    pub fn empty() -> Self {
        Self {
            min: Vector2::new(f64::INFINITY, f64::INFINITY),
            max: Vector2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Vector2<f64>]) -> Self {
        let mut b = Self::empty();
        for p in points {
            b.add_point(*p);
        }
        b
    }

    /// Grow to include `p`.
    #[inline]
    pub fn add_point(&mut self, p: Vector2<f64>) {
        self.min = self.min.inf(&p);
        self.max = self.max.sup(&p);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.x - self.min.x
        }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.max.y - self.min.y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn accumulates_points() {
        let mut b = Bounds2::empty();
        assert!(b.is_empty());
        assert_eq!(b.width(), 0.0);
        b.add_point(vector![1.0, -2.0]);
        b.add_point(vector![-3.0, 4.0]);
        assert!(!b.is_empty());
        assert_eq!(b.min, vector![-3.0, -2.0]);
        assert_eq!(b.max, vector![1.0, 4.0]);
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 6.0);
    }

    #[test]
    fn single_point_is_degenerate_but_not_empty() {
        let b = Bounds2::from_points(&[vector![0.5, 0.5]]);
        assert!(!b.is_empty());
        assert_eq!(b.width(), 0.0);
        assert_eq!(b.height(), 0.0);
    }
}
