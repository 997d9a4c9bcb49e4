use crate::state::input::JoystickDir;

// Drag distance (px) before a direction registers.
const DEAD_ZONE: f64 = 10.0;
// Knob travel shown on screen.
pub const RADIUS: f64 = 50.0;

/// Dynamic virtual joystick: appears where the finger lands and reports the
/// dominant drag axis until released.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct TouchJoystick {
    pub origin: Option<(f64, f64)>,
    pub knob_x: f64,
    pub knob_y: f64,
    pub dir: JoystickDir,
}

impl TouchJoystick {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
        self.knob_x = x;
        self.knob_y = y;
        self.dir = JoystickDir::None;
    }

    /// Returns the new direction when it changed.
    pub fn drag(&mut self, x: f64, y: f64) -> Option<JoystickDir> {
        let (ox, oy) = self.origin?;
        let (dx, dy) = (x - ox, y - oy);
        let dist = (dx * dx + dy * dy).sqrt();
        if dist > RADIUS {
            self.knob_x = ox + dx / dist * RADIUS;
            self.knob_y = oy + dy / dist * RADIUS;
        } else {
            self.knob_x = x;
            self.knob_y = y;
        }
        let dir = if dist < DEAD_ZONE {
            JoystickDir::None
        } else if dx.abs() > dy.abs() {
            if dx > 0.0 { JoystickDir::Right } else { JoystickDir::Left }
        } else if dy > 0.0 {
            JoystickDir::Down
        } else {
            JoystickDir::Up
        };
        if dir == self.dir {
            return None;
        }
        self.dir = dir;
        Some(dir)
    }

    pub fn end(&mut self) -> JoystickDir {
        self.origin = None;
        self.dir = JoystickDir::None;
        JoystickDir::None
    }

    pub fn active(&self) -> bool {
        self.origin.is_some()
    }
}
