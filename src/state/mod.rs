pub mod animation;
pub mod camera;
pub mod collision;
pub mod countdown;
pub mod entities;
pub mod input;
pub mod joystick;

pub use animation::SpriteAnimator;
pub use camera::Camera;
pub use collision::check_collisions;
pub use countdown::Countdown;
pub use entities::EntityRegistry;
pub use input::{InputCommand, InputState, Key};
pub use joystick::TouchJoystick;
