use crate::config::Size;

// Scroll offset of the visible window into the world, in world pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Camera {
    /// Centres the viewport on `(x, y)` and clamps each axis so the window
    /// never shows anything past the world edges.
    pub fn follow(x: f64, y: f64, world: Size, viewport: Size) -> Self {
        Self {
            offset_x: clamp_axis(x - viewport.width / 2.0, world.width - viewport.width),
            offset_y: clamp_axis(y - viewport.height / 2.0, world.height - viewport.height),
        }
    }

    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.offset_x, y - self.offset_y)
    }
}

// A world smaller than the viewport pins the axis at 0.
fn clamp_axis(v: f64, max: f64) -> f64 {
    v.min(max).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Size = Size {
        width: 1280.0,
        height: 800.0,
    };
    const VIEW: Size = Size {
        width: 500.0,
        height: 500.0,
    };

    #[test]
    fn centred_in_the_middle_of_the_world() {
        let cam = Camera::follow(640.0, 400.0, WORLD, VIEW);
        assert_eq!(cam.offset_x, 390.0);
        assert_eq!(cam.offset_y, 150.0);
        assert_eq!(cam.to_screen(640.0, 400.0), (250.0, 250.0));
    }

    #[test]
    fn stays_within_bounds_at_every_corner() {
        let corners = [
            (0.0, 0.0),
            (WORLD.width, 0.0),
            (0.0, WORLD.height),
            (WORLD.width, WORLD.height),
            (-200.0, -200.0),
            (5000.0, 5000.0),
        ];
        for (x, y) in corners {
            let cam = Camera::follow(x, y, WORLD, VIEW);
            assert!((0.0..=WORLD.width - VIEW.width).contains(&cam.offset_x), "x at {x},{y}");
            assert!((0.0..=WORLD.height - VIEW.height).contains(&cam.offset_y), "y at {x},{y}");
        }
    }

    #[test]
    fn sweep_never_leaves_bounds() {
        let mut x = -100.0;
        while x < WORLD.width + 100.0 {
            let cam = Camera::follow(x, x * 0.6, WORLD, VIEW);
            assert!(cam.offset_x >= 0.0 && cam.offset_x <= WORLD.width - VIEW.width);
            assert!(cam.offset_y >= 0.0 && cam.offset_y <= WORLD.height - VIEW.height);
            x += 7.5;
        }
    }

    #[test]
    fn world_smaller_than_viewport_pins_to_origin() {
        let small = Size {
            width: 300.0,
            height: 200.0,
        };
        let cam = Camera::follow(150.0, 100.0, small, VIEW);
        assert_eq!(cam, Camera::default());
    }
}
