pub mod error;
pub mod feature_flags;

// Stock movement domain
pub mod fields;
pub mod files;
pub mod session;
pub mod shipment;
pub mod stock_movement;

pub use error::*;
pub use feature_flags::*;

pub use files::*;
pub use session::*;
pub use shipment::*;
pub use stock_movement::*;
// Field tables are used through `shared_types::fields::*` so that `Widget`
// and friends stay namespaced.
