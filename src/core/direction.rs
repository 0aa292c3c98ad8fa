// Horizontal facing direction

/// Which way a character faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// -1 for left, 1 for right
    pub fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// Direction of a horizontal axis value; `None` when it is zero
    pub fn from_axis(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(Direction::Right)
        } else if value < 0.0 {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(Direction::Left.sign(), -1);
        assert_eq!(Direction::Right.sign(), 1);
        assert_eq!(Direction::default(), Direction::Right);
    }

    #[test]
    fn test_from_axis() {
        assert_eq!(Direction::from_axis(0.7), Some(Direction::Right));
        assert_eq!(Direction::from_axis(-1.0), Some(Direction::Left));
        assert_eq!(Direction::from_axis(0.0), None);
    }
}
