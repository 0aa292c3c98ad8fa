use glam::Vec2;
use log::trace;
use parry2d::bounding_volume::{Aabb, BoundingVolume};
use parry2d::na::Point2;

use crate::core::FloatRect;

/// How far (in pixels) an edge may already be inside a tile and still count
/// as approaching from that side
const CONTACT_EPSILON: f32 = 0.5;

fn to_aabb(rect: &FloatRect) -> Aabb {
    Aabb::new(
        Point2::new(rect.left, rect.top),
        Point2::new(rect.right(), rect.bottom()),
    )
}

fn to_rect(aabb: &Aabb) -> FloatRect {
    FloatRect::new(
        aabb.mins.x,
        aabb.mins.y,
        aabb.maxs.x - aabb.mins.x,
        aabb.maxs.y - aabb.mins.y,
    )
}

/// Width and height of the shared area of two boxes (non-positive if they
/// only touch or are apart)
fn overlap(a: &Aabb, b: &Aabb) -> Vec2 {
    Vec2::new(
        a.maxs.x.min(b.maxs.x) - a.mins.x.max(b.mins.x),
        a.maxs.y.min(b.maxs.y) - a.mins.y.max(b.mins.y),
    )
}

/// Outcome of pushing a moving body out of the solid tiles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resolution {
    /// Correction to add to the body's position
    pub offset: Vec2,
    /// Body rests on top of a tile
    pub grounded: bool,
    /// Tile hit from below (the one with the widest contact)
    pub ceiling: Option<usize>,
    /// Body was pushed out sideways
    pub blocked_x: bool,
}

/// Static solid tiles a moving body collides with
#[derive(Debug, Default)]
pub struct CollisionManager {
    solids: Vec<Aabb>,
}

impl CollisionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid tile, returning its index
    pub fn add_solid(&mut self, rect: FloatRect) -> usize {
        self.solids.push(to_aabb(&rect));
        self.solids.len() - 1
    }

    pub fn solid(&self, index: usize) -> Option<FloatRect> {
        self.solids.get(index).map(to_rect)
    }

    pub fn len(&self) -> usize {
        self.solids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Smallest rectangle containing every solid tile
    pub fn world_bounds(&self) -> Option<FloatRect> {
        let (first, rest) = self.solids.split_first()?;
        let merged = rest.iter().fold(*first, |acc, aabb| acc.merged(aabb));
        Some(to_rect(&merged))
    }

    /// Push a body that moved from `previous` to `current` with `velocity`
    /// out of every tile it overlaps.
    ///
    /// A tile is landed on when the body's previous bottom was at or above
    /// the tile's top while moving down, hit from below when the previous top
    /// was at or below the tile's bottom while moving up, and pushed against
    /// sideways otherwise.
    pub fn resolve(&self, previous: FloatRect, current: FloatRect, velocity: Vec2) -> Resolution {
        let mut resolution = Resolution {
            ceiling: self.ceiling_contact(previous, current, velocity),
            ..Default::default()
        };
        let mut body = current;

        for tile in &self.solids {
            let shared = overlap(tile, &to_aabb(&body));
            if shared.x <= 0.0 || shared.y <= 0.0 {
                continue;
            }

            if velocity.y >= 0.0 && previous.bottom() <= tile.mins.y + CONTACT_EPSILON {
                body.top = tile.mins.y - body.height;
                resolution.grounded = true;
            } else if velocity.y < 0.0 && previous.top >= tile.maxs.y - CONTACT_EPSILON {
                body.top = tile.maxs.y;
            } else {
                let tile_center_x = (tile.mins.x + tile.maxs.x) / 2.0;
                body.left = if body.center().x < tile_center_x {
                    tile.mins.x - body.width
                } else {
                    tile.maxs.x
                };
                resolution.blocked_x = true;
            }
        }

        resolution.offset = body.position() - current.position();
        if resolution.offset != Vec2::ZERO {
            trace!("Collision pushed body by {:?}", resolution.offset);
        }
        resolution
    }

    /// Tile hit from below, preferring the one with the widest overlap
    fn ceiling_contact(
        &self,
        previous: FloatRect,
        current: FloatRect,
        velocity: Vec2,
    ) -> Option<usize> {
        if velocity.y >= 0.0 {
            return None;
        }

        let body = to_aabb(&current);
        let mut best: Option<(usize, f32)> = None;

        for (index, tile) in self.solids.iter().enumerate() {
            if !tile.intersects(&body) || previous.top < tile.maxs.y - CONTACT_EPSILON {
                continue;
            }
            let shared = overlap(tile, &body);
            if shared.x <= 0.0 || shared.y <= 0.0 {
                continue;
            }
            if best.map_or(true, |(_, width)| shared.x > width) {
                best = Some((index, shared.x));
            }
        }

        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TILE: f32 = 50.0;

    fn floor(count: usize, top: f32) -> CollisionManager {
        let mut collision = CollisionManager::new();
        for i in 0..count {
            collision.add_solid(FloatRect::new(i as f32 * TILE, top, TILE, TILE));
        }
        collision
    }

    #[test]
    fn test_landing_on_floor() {
        let collision = floor(3, 500.0);
        let previous = FloatRect::new(20.0, 448.0, TILE, TILE);
        let current = FloatRect::new(20.0, 454.0, TILE, TILE);

        let resolution = collision.resolve(previous, current, Vec2::new(0.0, 360.0));
        assert!(resolution.grounded);
        assert!(!resolution.blocked_x);
        assert_relative_eq!(resolution.offset.y, -4.0);
        assert_eq!(resolution.offset.x, 0.0);
    }

    #[test]
    fn test_touching_is_not_a_collision() {
        let collision = floor(1, 500.0);
        let body = FloatRect::new(0.0, 450.0, TILE, TILE);

        let resolution = collision.resolve(body, body, Vec2::ZERO);
        assert_eq!(resolution, Resolution::default());
    }

    #[test]
    fn test_ceiling_reports_widest_tile() {
        let collision = floor(3, 100.0);
        // Head pokes into tiles 0 and 1, mostly under tile 1
        let previous = FloatRect::new(40.0, 151.0, TILE, TILE);
        let current = FloatRect::new(40.0, 145.0, TILE, TILE);

        let resolution = collision.resolve(previous, current, Vec2::new(0.0, -400.0));
        assert_eq!(resolution.ceiling, Some(1));
        assert!(!resolution.grounded);
        assert_relative_eq!(resolution.offset.y, 5.0);
    }

    #[test]
    fn test_wall_pushes_sideways() {
        let mut collision = floor(4, 500.0);
        let wall = collision.add_solid(FloatRect::new(150.0, 450.0, TILE, TILE));
        assert_eq!(wall, 4);

        let previous = FloatRect::new(98.0, 450.0, TILE, TILE);
        let current = FloatRect::new(104.0, 450.3, TILE, TILE);

        let resolution = collision.resolve(previous, current, Vec2::new(360.0, 18.0));
        assert!(resolution.grounded);
        assert!(resolution.blocked_x);
        assert_relative_eq!(resolution.offset.x, -4.0);
        assert_relative_eq!(resolution.offset.y, -0.3, epsilon = 1e-4);
    }

    #[test]
    fn test_world_bounds_merges_tiles() {
        let mut collision = floor(2, 500.0);
        collision.add_solid(FloatRect::new(300.0, 100.0, TILE, TILE));

        assert_eq!(
            collision.world_bounds(),
            Some(FloatRect::new(0.0, 100.0, 350.0, 450.0))
        );
        assert!(CollisionManager::new().world_bounds().is_none());
        assert_eq!(collision.solid(2), Some(FloatRect::new(300.0, 100.0, TILE, TILE)));
    }
}
