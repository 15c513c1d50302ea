mod component;
mod queue;
pub use component::*;
pub use queue::*;
