use crate::model::Direction;

/// Walk-cycle frame selection. Advances on wall-clock time whether or not the
/// player is moving.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SpriteAnimator {
    pub frame: u32,
    pub elapsed_ms: f64,
}

impl SpriteAnimator {
    pub fn advance(&mut self, dt_ms: f64, interval_ms: f64, frames: u32) {
        if frames == 0 || interval_ms <= 0.0 {
            return;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        while self.elapsed_ms >= interval_ms {
            self.elapsed_ms -= interval_ms;
            self.frame = (self.frame + 1) % frames;
        }
    }

    /// Source rectangle `(sx, sy, w, h)` on the sprite sheet: columns are
    /// frames, rows are facing directions.
    pub fn source_rect(&self, facing: Direction, cell: f64) -> (f64, f64, f64, f64) {
        (
            self.frame as f64 * cell,
            facing.sheet_row() as f64 * cell,
            cell,
            cell,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_once_per_interval_and_wraps() {
        let mut anim = SpriteAnimator::default();
        anim.advance(199.0, 200.0, 4);
        assert_eq!(anim.frame, 0);
        anim.advance(1.0, 200.0, 4);
        assert_eq!(anim.frame, 1);
        anim.advance(600.0, 200.0, 4);
        assert_eq!(anim.frame, 0);
    }

    #[test]
    fn long_stall_keeps_remainder() {
        let mut anim = SpriteAnimator::default();
        anim.advance(450.0, 200.0, 4);
        assert_eq!(anim.frame, 2);
        assert!((anim.elapsed_ms - 50.0).abs() < 1e-9);
    }

    #[test]
    fn source_rect_uses_frame_column_and_facing_row() {
        let anim = SpriteAnimator {
            frame: 3,
            elapsed_ms: 0.0,
        };
        assert_eq!(anim.source_rect(Direction::Down, 64.0), (192.0, 0.0, 64.0, 64.0));
        assert_eq!(anim.source_rect(Direction::Left, 64.0), (192.0, 64.0, 64.0, 64.0));
        assert_eq!(anim.source_rect(Direction::Right, 64.0), (192.0, 128.0, 64.0, 64.0));
        assert_eq!(anim.source_rect(Direction::Up, 64.0), (192.0, 192.0, 64.0, 64.0));
    }
}
