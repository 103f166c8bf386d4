pub use display::{Display, DEFAULT_SCALE};

mod display;
