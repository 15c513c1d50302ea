//! Declarative field tables for the send-shipment form.
//!
//! Each entry names a form value, the widget used to render it and the
//! attributes that depend on the movement's state. Widget choice and
//! attributes are derived at render time from a [`FieldContext`].

use crate::shipment::ShipmentFormValues;
use crate::stock_movement::ShipmentTypeOption;

/// Display format shown next to the ship date picker.
pub const DATE_SHIPPED_DISPLAY_FORMAT: &str = "MM/DD/YYYY HH:mm Z";

/// Widget used to render a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    /// Read-only text.
    Label,
    Text,
    Date,
    /// Select over static options (shipment types).
    Select,
    /// Select searching locations on the backend.
    LocationSelect,
}

/// State the dynamic parts of the tables are derived from.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldContext<'a> {
    pub issued: bool,
    pub can_be_edited: bool,
    pub has_stock_list: bool,
    pub shipment_types: &'a [ShipmentTypeOption],
}

impl<'a> FieldContext<'a> {
    pub fn for_values(
        values: &ShipmentFormValues,
        shipment_types: &'a [ShipmentTypeOption],
    ) -> Self {
        Self {
            issued: values.is_issued(),
            can_be_edited: values.can_be_edited(),
            has_stock_list: values.has_stock_list(),
            shipment_types,
        }
    }
}

/// Attributes handed to the widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAttrs {
    pub required: bool,
    pub disabled: bool,
    pub show_time_select: bool,
    pub date_format: Option<&'static str>,
    pub options: Vec<ShipmentTypeOption>,
}

/// One row of a field table.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    /// Form value key, dotted for nested read-only values.
    pub key: &'static str,
    /// Translation key of the label.
    pub label: &'static str,
    pub default_message: &'static str,
    pub required: bool,
    pub widget: fn(&FieldContext) -> Widget,
    pub dynamic_attrs: Option<fn(&FieldContext) -> FieldAttrs>,
    /// Text shown by label widgets.
    pub display: fn(&ShipmentFormValues) -> String,
}

/// A field with its widget and attributes evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub key: &'static str,
    pub label: &'static str,
    pub default_message: &'static str,
    pub widget: Widget,
    pub attrs: FieldAttrs,
}

impl FieldSpec {
    pub fn resolve(&self, ctx: &FieldContext) -> ResolvedField {
        let mut attrs = self.dynamic_attrs.map(|f| f(ctx)).unwrap_or_default();
        attrs.required |= self.required;
        ResolvedField {
            key: self.key,
            label: self.label,
            default_message: self.default_message,
            widget: (self.widget)(ctx),
            attrs,
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec").field("key", &self.key).finish()
    }
}

fn label(_: &FieldContext) -> Widget {
    Widget::Label
}

fn text(_: &FieldContext) -> Widget {
    Widget::Text
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn disabled_when_issued(ctx: &FieldContext) -> FieldAttrs {
    FieldAttrs {
        disabled: ctx.issued,
        ..FieldAttrs::default()
    }
}

fn destination_editable(ctx: &FieldContext) -> bool {
    ctx.can_be_edited && !ctx.has_stock_list
}

/// Shipment summary shown at the top of the page.
pub const SHIPMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "description",
        label: "stockMovement.description.label",
        default_message: "Description",
        required: false,
        widget: label,
        dynamic_attrs: None,
        display: |v| opt(&v.description),
    },
    FieldSpec {
        key: "origin.name",
        label: "stockMovement.origin.label",
        default_message: "Origin",
        required: false,
        widget: label,
        dynamic_attrs: None,
        display: |v| v.origin.as_ref().map(|o| o.name.clone()).unwrap_or_default(),
    },
    FieldSpec {
        key: "destination",
        label: "stockMovement.destination.label",
        default_message: "Destination",
        required: false,
        widget: |ctx| {
            if destination_editable(ctx) {
                Widget::LocationSelect
            } else {
                Widget::Label
            }
        },
        dynamic_attrs: Some(|ctx| FieldAttrs {
            required: destination_editable(ctx),
            ..FieldAttrs::default()
        }),
        display: |v| v.destination.as_ref().map(|d| d.name.clone()).unwrap_or_default(),
    },
    FieldSpec {
        key: "stocklist.name",
        label: "stockMovement.stocklist.label",
        default_message: "Stocklist",
        required: false,
        widget: label,
        dynamic_attrs: None,
        display: |v| v.stocklist.as_ref().and_then(|s| s.name.clone()).unwrap_or_default(),
    },
    FieldSpec {
        key: "requestedBy.name",
        label: "stockMovement.requestedBy.label",
        default_message: "Requested by",
        required: false,
        widget: label,
        dynamic_attrs: None,
        display: |v| {
            v.requested_by
                .as_ref()
                .and_then(|r| r.name.clone())
                .unwrap_or_default()
        },
    },
    FieldSpec {
        key: "dateRequested",
        label: "stockMovement.dateRequested.label",
        default_message: "Date requested",
        required: false,
        widget: label,
        dynamic_attrs: None,
        display: |v| opt(&v.date_requested),
    },
    FieldSpec {
        key: "name",
        label: "stockMovement.shipmentName.label",
        default_message: "Shipment name",
        required: false,
        widget: |ctx| if ctx.issued { Widget::Text } else { Widget::Label },
        dynamic_attrs: None,
        display: |v| opt(&v.name),
    },
];

/// Shipment details the user fills in before sending.
pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        key: "dateShipped",
        label: "stockMovement.shipDate.label",
        default_message: "Shipment date",
        required: true,
        widget: |_| Widget::Date,
        dynamic_attrs: Some(|ctx| FieldAttrs {
            disabled: ctx.issued,
            show_time_select: true,
            date_format: Some(DATE_SHIPPED_DISPLAY_FORMAT),
            ..FieldAttrs::default()
        }),
        display: |v| opt(&v.date_shipped),
    },
    FieldSpec {
        key: "shipmentType",
        label: "stockMovement.shipmentType.label",
        default_message: "Shipment type",
        required: true,
        widget: |_| Widget::Select,
        dynamic_attrs: Some(|ctx| FieldAttrs {
            options: ctx.shipment_types.to_vec(),
            ..FieldAttrs::default()
        }),
        display: |v| opt(&v.shipment_type),
    },
    FieldSpec {
        key: "trackingNumber",
        label: "stockMovement.trackingNumber.label",
        default_message: "Tracking number",
        required: false,
        widget: text,
        dynamic_attrs: Some(disabled_when_issued),
        display: |v| opt(&v.tracking_number),
    },
    FieldSpec {
        key: "driverName",
        label: "stockMovement.driverName.label",
        default_message: "Driver name",
        required: false,
        widget: text,
        dynamic_attrs: Some(disabled_when_issued),
        display: |v| opt(&v.driver_name),
    },
    FieldSpec {
        key: "comments",
        label: "stockMovement.comments.label",
        default_message: "Comments",
        required: false,
        widget: text,
        dynamic_attrs: Some(disabled_when_issued),
        display: |v| opt(&v.comments),
    },
];

/// Look a field up by key in either table.
pub fn find_field(key: &str) -> Option<&'static FieldSpec> {
    SHIPMENT_FIELDS
        .iter()
        .chain(FIELDS.iter())
        .find(|f| f.key == key)
}
