use glam::Vec3;

// Shared tuning constants and storage keys used by the core and the web frontend.

// Camera defaults
pub const CAMERA_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const CAMERA_DEFAULT_POSITION: [f32; 3] = [4.0, 3.0, 6.0];
pub const CAMERA_DEFAULT_TARGET: [f32; 3] = [0.0, 0.6, 0.0];

// Orbit controller
pub const ORBIT_ROTATE_SPEED: f32 = std::f32::consts::PI; // radians per full NDC sweep
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05; // fraction of pending rotation applied per tick
pub const ORBIT_ZOOM_SPEED: f32 = 0.95; // radius multiplier per wheel notch
pub const ORBIT_MIN_RADIUS: f32 = 1.0;
pub const ORBIT_MAX_RADIUS: f32 = 40.0;
pub const ORBIT_MIN_POLAR: f32 = 0.05; // keep away from the poles
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2 - 0.02; // stay above the floor

// Gizmo drags
pub const DRAG_ROTATE_GAIN: f32 = std::f32::consts::PI; // radians per full NDC sweep
pub const DRAG_SCALE_GAIN: f32 = 1.5; // scale multiplier exponent per NDC unit
pub const DRAG_MIN_SCALE: f32 = 0.05;

// Dimension readout
pub const DIMENSION_DECIMALS: i32 = 2;

// Ray casting
pub const RAY_EPSILON: f32 = 1e-7;

// Persistent store keys
pub const KEY_CAR_TYPE: &str = "carType";
pub const KEY_LOCAL_MODELS: &str = "localModels";
pub const KEY_SAVED_SCENE: &str = "savedScene";
pub const KEY_CAMERA_POSITION: [&str; 3] = [
    "camera.position.x",
    "camera.position.y",
    "camera.position.z",
];
pub const KEY_CAMERA_ROTATION: [&str; 3] = [
    "camera.rotation.x",
    "camera.rotation.y",
    "camera.rotation.z",
];

// Whole-scene document metadata
pub const SCENE_DOCUMENT_VERSION: u32 = 1;
pub const SCENE_DOCUMENT_GENERATOR: &str = "builder-core";

#[inline]
pub fn camera_default_position() -> Vec3 {
    Vec3::from_array(CAMERA_DEFAULT_POSITION)
}

#[inline]
pub fn camera_default_target() -> Vec3 {
    Vec3::from_array(CAMERA_DEFAULT_TARGET)
}
