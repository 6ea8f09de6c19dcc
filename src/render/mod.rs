//! Rendering pipeline: styles, strips, compositor, frame painting and the
//! crossterm terminal driver.

pub mod compositor;
pub mod draw;
pub mod driver;
pub mod paint;
pub mod strip;
pub mod style;

pub use compositor::{CellUpdate, Compositor};
pub use driver::Driver;
pub use paint::paint;
pub use strip::{Strip, StyledCell};
pub use style::{Align, CellStyle, Color, ParseColorError, Style};
