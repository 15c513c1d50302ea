// Standalone components
pub mod button;
pub mod card;
pub mod data_table;
pub mod form;
pub mod form_select;
pub mod input;
pub mod page_header;

// Primitive wrappers
pub mod alert_dialog;
pub mod toast;

// Shipment screen widgets
pub mod file_drop;
pub mod search_select;
pub mod spinner;

pub use alert_dialog::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use file_drop::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use search_select::*;
pub use spinner::*;
pub use toast::*;
