use dioxus::prelude::*;
use shared_types::SendStep;
use shared_ui::components::{DataTable, DataTableCell, DataTableRow};

const COLUMNS: &[&str] = &[
    "Pallet",
    "Box",
    "Code",
    "Product",
    "Lot",
    "Expiry",
    "Qty",
    "Bin location",
    "Recipient",
];

/// Rows being shipped. Bin locations are hidden for supplier movements.
#[component]
pub fn ShipmentItems(step: SendStep) -> Element {
    let supplier = step.supplier;
    let columns: Vec<&'static str> = COLUMNS
        .iter()
        .copied()
        .filter(|c| !(supplier && *c == "Bin location"))
        .collect();

    rsx! {
        DataTable {
            columns,
            row_count: step.table_items.len(),
            empty: "No items to ship".to_string(),
            for (idx, item) in step.table_items.iter().enumerate() {
                DataTableRow { key: "{idx}",
                    DataTableCell { {item.pallet_name.clone().unwrap_or_default()} }
                    DataTableCell { {item.box_name.clone().unwrap_or_default()} }
                    DataTableCell { "{item.code()}" }
                    DataTableCell { "{item.display_name()}" }
                    DataTableCell { {item.lot_number.clone().unwrap_or_default()} }
                    DataTableCell { {item.expiration_date.clone().unwrap_or_default()} }
                    DataTableCell { numeric: true, "{item.quantity_display()}" }
                    if !supplier {
                        DataTableCell { {item.bin_location_name.clone().unwrap_or_default()} }
                    }
                    DataTableCell { "{item.recipient_name()}" }
                }
            }
        }
    }
}
