pub mod buttons;
pub mod keyboard;
pub mod pointer;

pub use buttons::*;
pub use keyboard::*;
pub use pointer::*;
