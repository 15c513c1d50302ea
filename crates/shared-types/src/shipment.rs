use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::AppError;
use crate::stock_movement::{
    LocationRef, NamedRef, StockMovement, LOCATION_TYPE_SUPPLIER, RECEIVED_SHIPMENT_STATUSES,
    STATUS_ISSUED,
};

/// Translation key attached to every missing required field.
pub const REQUIRED_FIELD_ERROR: &str = "error.requiredField.label";

/// Shown when the user tries to send from somewhere other than the origin.
pub const WRONG_LOCATION_MESSAGE: &str =
    "You are not able to send shipment from a location other than origin. Change your current location.";

/// Ship date format used by the backend (`MM/DD/YYYY HH:mm Z`).
pub const DATE_SHIPPED_FORMAT: &str = "%m/%d/%Y %H:%M %:z";

/// Location search only queries the backend from this many characters.
pub const LOCATION_SEARCH_MIN_CHARS: usize = 3;

/// Lenient variant of [`DATE_SHIPPED_FORMAT`]: also takes `Z` and offsets
/// without a colon.
const DATE_SHIPPED_PARSE_FORMAT: &str = "%m/%d/%Y %H:%M %#z";

/// Value format of an HTML `datetime-local` input.
const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Destination as held by the form; `label` is what the select displays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Destination {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: String,
    pub label: String,
}

impl Destination {
    pub fn from_location(location: &LocationRef) -> Self {
        let description = location
            .location_type
            .as_ref()
            .and_then(|t| t.description.as_deref());
        let label = match description {
            Some(d) => format!("{} [{}]", location.name, d),
            None => location.name.clone(),
        };
        Self {
            id: location.id.clone(),
            kind: location.type_code().map(str::to_string),
            name: location.name.clone(),
            label,
        }
    }
}

/// Editable shipment record mirrored from the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipmentFormValues {
    pub stock_movement_id: String,
    pub date_shipped: Option<String>,
    /// Selected shipment type id.
    pub shipment_type: Option<String>,
    pub tracking_number: Option<String>,
    pub driver_name: Option<String>,
    pub comments: Option<String>,
    pub name: Option<String>,
    pub destination: Option<Destination>,

    // Echoed from the backend, never edited here.
    pub description: Option<String>,
    pub origin: Option<LocationRef>,
    pub stocklist: Option<NamedRef>,
    pub requested_by: Option<NamedRef>,
    pub date_requested: Option<String>,
    pub status_code: Option<String>,
    pub shipment_status: Option<String>,
}

impl ShipmentFormValues {
    pub fn new(stock_movement_id: impl Into<String>) -> Self {
        Self {
            stock_movement_id: stock_movement_id.into(),
            ..Self::default()
        }
    }

    pub fn is_issued(&self) -> bool {
        self.status_code.as_deref() == Some(STATUS_ISSUED)
    }

    /// An issued shipment may still have its header edited until goods
    /// start arriving at the destination.
    pub fn can_be_edited(&self) -> bool {
        self.is_issued()
            && !self
                .shipment_status
                .as_deref()
                .is_some_and(|s| RECEIVED_SHIPMENT_STATUSES.contains(&s))
    }

    pub fn has_stock_list(&self) -> bool {
        self.stocklist
            .as_ref()
            .and_then(|s| s.id.as_deref())
            .is_some_and(|id| !id.is_empty())
    }

    /// Fold a freshly fetched step projection into the form.
    pub fn merge_step(&mut self, movement: &StockMovement) {
        self.date_shipped = movement.date_shipped.clone();
        self.shipment_type = movement.shipment_type.as_ref().and_then(|t| t.id.clone());
        self.tracking_number = movement.tracking_number.clone();
        self.driver_name = movement.driver_name.clone();
        self.comments = movement.comments.clone();
        self.name = movement.name.clone();
        self.destination = movement.destination.as_ref().map(Destination::from_location);

        self.description = movement.description.clone();
        self.origin = movement.origin.clone();
        self.stocklist = movement.stocklist.clone();
        self.requested_by = movement.requested_by.clone();
        self.date_requested = movement.date_requested.clone();
        self.status_code = movement.status_code.clone();
        self.shipment_status = movement.shipment_status.clone();
    }

    /// Apply an edit coming from a text-like input. Returns `false` for keys
    /// that are not editable through text.
    pub fn set_field(&mut self, key: &str, value: String) -> bool {
        let blank_as_none = |v: String| if v.is_empty() { None } else { Some(v) };
        match key {
            "dateShipped" => self.date_shipped = blank_as_none(value),
            "shipmentType" => self.shipment_type = blank_as_none(value),
            "trackingNumber" => self.tracking_number = Some(value),
            "driverName" => self.driver_name = Some(value),
            "comments" => self.comments = Some(value),
            "name" => self.name = Some(value),
            _ => return false,
        }
        true
    }

    /// Header fields sent both by Save (before issue) and by Send.
    pub fn header_payload(&self) -> ShipmentHeader {
        ShipmentHeader {
            date_shipped: self.date_shipped.clone(),
            shipment_type_id: self.shipment_type.clone(),
            tracking_number: self.tracking_number.clone().unwrap_or_default(),
            driver_name: self.driver_name.clone().unwrap_or_default(),
            comments: self.comments.clone().unwrap_or_default(),
        }
    }

    /// Payload for the Save button. Once issued, only the destination, the
    /// shipment name and the type can still change.
    pub fn save_payload(&self) -> SaveShipmentPayload {
        if self.is_issued() {
            SaveShipmentPayload::DestinationChange(DestinationChange {
                destination_id: self.destination.as_ref().map(|d| d.id.clone()),
                name: self.name.clone(),
                shipment_type_id: self.shipment_type.clone(),
            })
        } else {
            SaveShipmentPayload::Header(self.header_payload())
        }
    }
}

/// Validate the form. Returns field key → error key; empty when valid.
pub fn validate(values: &ShipmentFormValues) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    let missing = |v: &Option<String>| v.as_deref().map_or(true, str::is_empty);

    if missing(&values.date_shipped) {
        errors.insert("dateShipped".to_string(), REQUIRED_FIELD_ERROR.to_string());
    }
    if missing(&values.shipment_type) {
        errors.insert("shipmentType".to_string(), REQUIRED_FIELD_ERROR.to_string());
    }
    errors
}

/// A shipment may only be sent from its origin, unless the origin is a
/// supplier.
pub fn check_origin(
    current_location_id: Option<&str>,
    values: &ShipmentFormValues,
) -> Result<(), AppError> {
    let origin_id = values.origin.as_ref().map(|o| o.id.as_str());
    let origin_type = values.origin.as_ref().and_then(|o| o.type_code());

    if current_location_id != origin_id && origin_type != Some(LOCATION_TYPE_SUPPLIER) {
        return Err(AppError::forbidden(WRONG_LOCATION_MESSAGE));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Shipment header as posted to `POST /api/stockMovements/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentHeader {
    #[serde(rename = "dateShipped", skip_serializing_if = "Option::is_none")]
    pub date_shipped: Option<String>,
    #[serde(rename = "shipmentType.id", skip_serializing_if = "Option::is_none")]
    pub shipment_type_id: Option<String>,
    #[serde(rename = "trackingNumber")]
    pub tracking_number: String,
    #[serde(rename = "driverName")]
    pub driver_name: String,
    pub comments: String,
}

/// Edit of an already issued shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationChange {
    #[serde(rename = "destination.id")]
    pub destination_id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "shipmentType.id")]
    pub shipment_type_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SaveShipmentPayload {
    Header(ShipmentHeader),
    DestinationChange(DestinationChange),
}

impl SaveShipmentPayload {
    /// Flat JSON body in the backend's dotted-key format.
    pub fn to_body(&self) -> serde_json::Value {
        let body = match self {
            SaveShipmentPayload::Header(h) => serde_json::to_value(h),
            SaveShipmentPayload::DestinationChange(d) => serde_json::to_value(d),
        };
        body.unwrap_or(serde_json::Value::Null)
    }
}

/// Body of `POST /api/stockMovements/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub status: String,
}

impl StatusTransition {
    pub fn issued() -> Self {
        Self {
            status: STATUS_ISSUED.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Ship date conversion
// ---------------------------------------------------------------------------

/// Parse a backend ship date. The offset may be `+01:00`, `+0100` or `Z`.
pub fn parse_date_shipped(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, DATE_SHIPPED_FORMAT)
        .or_else(|_| DateTime::parse_from_str(value, DATE_SHIPPED_PARSE_FORMAT))
        .ok()
}

/// Backend ship date → `datetime-local` input value. Unparseable values
/// render as an empty input.
pub fn date_shipped_input_value(value: Option<&str>) -> String {
    value
        .and_then(parse_date_shipped)
        .map(|d| d.format(DATETIME_INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

/// `datetime-local` input value → backend ship date. The offset of the
/// previous value is kept; without one the time is taken as UTC.
pub fn date_shipped_from_input(input: &str, previous: Option<&str>) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(input, DATETIME_INPUT_FORMAT).ok()?;
    let offset = previous
        .and_then(parse_date_shipped)
        .map(|d| *d.offset())
        .or_else(|| FixedOffset::east_opt(0))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|d| d.format(DATE_SHIPPED_FORMAT).to_string())
}
