use serde::{Deserialize, Deserializer, Serialize};

/// Status code a stock movement carries once it has been sent.
pub const STATUS_ISSUED: &str = "ISSUED";

/// Location type code of supplier locations. Shipments from a supplier may
/// be sent from any current location.
pub const LOCATION_TYPE_SUPPLIER: &str = "SUPPLIER";

/// Wizard step whose projection this screen fetches.
pub const SEND_STEP_NUMBER: u32 = 6;

/// Wizard step that generates the printable documents shown on this screen.
pub const DOCUMENT_STEP_NUMBER: u32 = 5;

/// Shipment statuses after which the destination can no longer change.
pub const RECEIVED_SHIPMENT_STATUSES: &[&str] = &["PARTIALLY_RECEIVED", "RECEIVED"];

/// Envelope used by every backend JSON response: `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// Shipment type row from the generic reference API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentType {
    pub id: String,
    pub name: String,
}

/// Shipment type as offered by the select input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentTypeOption {
    pub value: String,
    pub label: String,
}

impl From<ShipmentType> for ShipmentTypeOption {
    /// Names carry localized variants after a `|` (`"Air|fr:Avion"`); only
    /// the part before the first separator is displayed.
    fn from(t: ShipmentType) -> Self {
        let label = t.name.split('|').next().unwrap_or_default().to_string();
        Self { value: t.id, label }
    }
}

/// `{id, name}` reference used for stocklists, requesters and shipment types.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedRef {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationType {
    pub location_type_code: Option<String>,
    pub description: Option<String>,
}

/// Location as embedded in stock movements and location search results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationRef {
    pub id: String,
    pub name: String,
    /// Flattened location type code, present on origins.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location_type: Option<LocationType>,
}

impl LocationRef {
    /// Location type code, preferring the flattened `type` field.
    pub fn type_code(&self) -> Option<&str> {
        self.kind.as_deref().or_else(|| {
            self.location_type
                .as_ref()
                .and_then(|t| t.location_type_code.as_deref())
        })
    }
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRef {
    pub product_code: Option<String>,
    pub name: Option<String>,
}

/// A shipped line, either a packed pallet/box row or a raw line item.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableItem {
    pub pallet_name: Option<String>,
    pub box_name: Option<String>,
    pub product_code: Option<String>,
    pub product_name: Option<String>,
    pub product: Option<ProductRef>,
    pub lot_number: Option<String>,
    pub expiration_date: Option<String>,
    pub quantity_shipped: Option<f64>,
    pub quantity_requested: Option<f64>,
    pub bin_location_name: Option<String>,
    pub recipient: Option<NamedRef>,
}

impl TableItem {
    pub fn code(&self) -> &str {
        non_empty(self.product_code.as_deref())
            .or_else(|| self.product.as_ref().and_then(|p| p.product_code.as_deref()))
            .unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        non_empty(self.product_name.as_deref())
            .or_else(|| self.product.as_ref().and_then(|p| p.name.as_deref()))
            .unwrap_or_default()
    }

    /// Shipped quantity, or the requested quantity when nothing (or zero)
    /// was shipped.
    pub fn quantity(&self) -> Option<f64> {
        match self.quantity_shipped {
            Some(q) if q != 0.0 => Some(q),
            _ => self.quantity_requested.or(self.quantity_shipped),
        }
    }

    pub fn quantity_display(&self) -> String {
        self.quantity().map(format_quantity).unwrap_or_default()
    }

    pub fn recipient_name(&self) -> &str {
        self.recipient
            .as_ref()
            .and_then(|r| r.name.as_deref())
            .unwrap_or_default()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

/// Format a quantity the way en-US locale formatting does: thousands
/// separators and at most three fraction digits.
pub fn format_quantity(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let whole = rounded.trunc() as u64;
    let fraction = ((rounded - rounded.trunc()) * 1000.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative && (whole > 0 || fraction > 0) {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction > 0 {
        let frac = format!("{fraction:03}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Generated or uploaded document attached to a stock movement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub name: String,
    pub uri: String,
    pub step_number: Option<u32>,
    pub hidden: bool,
    pub document_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Associations {
    #[serde(deserialize_with = "null_as_default")]
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackPage {
    #[serde(deserialize_with = "null_as_default")]
    pub pack_page_items: Vec<TableItem>,
}

// ---------------------------------------------------------------------------
// Stock movement projection
// ---------------------------------------------------------------------------

/// Step-6 projection of a stock movement as returned by
/// `GET /api/stockMovements/{id}?stepNumber=6`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StockMovement {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub origin: Option<LocationRef>,
    pub destination: Option<LocationRef>,
    pub stocklist: Option<NamedRef>,
    pub requested_by: Option<NamedRef>,
    pub date_requested: Option<String>,
    pub date_shipped: Option<String>,
    pub shipment_type: Option<NamedRef>,
    pub tracking_number: Option<String>,
    pub driver_name: Option<String>,
    pub comments: Option<String>,
    pub status_code: Option<String>,
    pub shipment_status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub line_items: Vec<TableItem>,
    pub pack_page: Option<PackPage>,
    #[serde(deserialize_with = "null_as_default")]
    pub associations: Associations,
}

/// What the send screen shows besides the form: the shipped rows and the
/// documents generated by the previous step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SendStep {
    pub table_items: Vec<TableItem>,
    /// `true` when rows come from raw line items; hides the bin location
    /// column.
    pub supplier: bool,
    pub documents: Vec<Document>,
}

impl SendStep {
    pub fn from_movement(movement: &StockMovement) -> Self {
        let packed = movement
            .pack_page
            .as_ref()
            .map(|p| p.pack_page_items.as_slice())
            .unwrap_or_default();

        let (table_items, supplier) = if packed.is_empty() {
            (movement.line_items.clone(), true)
        } else {
            (packed.to_vec(), false)
        };

        let documents = movement
            .associations
            .documents
            .iter()
            .filter(|d| d.step_number == Some(DOCUMENT_STEP_NUMBER))
            .cloned()
            .collect();

        Self {
            table_items,
            supplier,
            documents,
        }
    }

    /// Documents to render as buttons.
    pub fn visible_documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| !d.hidden)
    }
}
