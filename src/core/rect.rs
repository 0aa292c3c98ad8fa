// Axis-aligned rectangles in texture and world space

use glam::Vec2;

/// Integer rectangle used for texture regions.
///
/// A negative `width` reads the region right-to-left, which is how sprites
/// are mirrored horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check if the region is read right-to-left
    pub fn is_mirrored(&self) -> bool {
        self.width < 0
    }

    /// Size ignoring the mirror sign
    pub fn abs_size(&self) -> Vec2 {
        Vec2::new(self.width.abs() as f32, self.height.abs() as f32)
    }
}

/// Floating point rectangle (left/top corner plus size) in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl FloatRect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x < self.right()
            && point.y >= self.top
            && point.y < self.bottom()
    }

    /// Overlapping region, if the rectangles share a non-empty area
    pub fn intersects(&self, other: &FloatRect) -> Option<FloatRect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(FloatRect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }
}
