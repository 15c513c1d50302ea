mod busy;
mod component;
pub use busy::*;
pub use component::*;
