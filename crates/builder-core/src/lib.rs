pub mod camera;
pub mod catalog;
pub mod constants;
pub mod dimensions;
pub mod document;
pub mod error;
pub mod gizmo;
pub mod persistence;
pub mod pick;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod session;
pub mod vehicle;

pub use camera::*;
pub use catalog::*;
pub use constants::*;
pub use dimensions::*;
pub use document::*;
pub use error::*;
pub use gizmo::*;
pub use persistence::*;
pub use pick::*;
pub use registry::*;
pub use scene::*;
pub use selection::*;
pub use session::*;
pub use vehicle::*;
