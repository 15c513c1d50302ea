mod documents;
mod fields;
mod items;
mod send;

pub use send::{SendMovementPage, SendShipment};
