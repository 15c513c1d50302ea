mod component;
mod dropped;
pub use component::*;
pub use dropped::*;
