use bevy_math::Mat4;
use bevy_math::Vec3;

pub const VK_LEFT: u8 = 0x25;
pub const VK_UP: u8 = 0x26;
pub const VK_RIGHT: u8 = 0x27;
pub const VK_DOWN: u8 = 0x28;

/// Pitch limit in radians, keeps the camera from flipping over the poles.
pub const PITCH_LIMIT: f32 = 1.5;

/// Arrow keys currently held down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// Records a key transition. Returns false for keys the camera ignores.
    pub fn set(&mut self, key: u8, held: bool) -> bool {
        let flag = match key {
            VK_LEFT => &mut self.left,
            VK_RIGHT => &mut self.right,
            VK_UP => &mut self.up,
            VK_DOWN => &mut self.down,
            _ => return false,
        };
        *flag = held;
        true
    }
}

/// Camera orbiting the origin at a fixed distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Radians per second.
    pub speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.3,
            distance: 3.0,
            speed: 1.0,
        }
    }
}

impl OrbitCamera {
    pub fn advanced(self, keys: HeldKeys, delta_secs: f32) -> Self {
        let step = self.speed * delta_secs.max(0.0);
        let mut next = self;
        if keys.left {
            next.yaw -= step;
        }
        if keys.right {
            next.yaw += step;
        }
        if keys.up {
            next.pitch += step;
        }
        if keys.down {
            next.pitch -= step;
        }
        next.pitch = next.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        next
    }

    pub fn update(&mut self, keys: HeldKeys, delta_secs: f32) {
        *self = self.advanced(keys, delta_secs);
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.distance * Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye(), Vec3::ZERO, Vec3::Y)
    }
}
