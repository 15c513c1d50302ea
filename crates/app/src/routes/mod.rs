pub mod not_found;
pub mod stock_movements;

use dioxus::prelude::*;

use not_found::NotFound;
use stock_movements::SendShipment;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/stock-movements/:id/send")]
    SendShipment { id: String },
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}
