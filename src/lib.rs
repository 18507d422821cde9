pub mod camera;
pub mod driver;
pub mod error;
pub mod marcher;
pub mod math;

pub use error::{Error, Result};
