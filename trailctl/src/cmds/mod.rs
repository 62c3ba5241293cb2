pub use info::*;
pub use segment::*;

mod info;
mod segment;
