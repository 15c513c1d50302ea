use dioxus::prelude::*;

/// Scrollable read-only table with co-located styles.
///
/// `columns` become the header row; children are the body rows. When
/// `empty` is set and no rows are given, it is shown in place of the body.
#[component]
pub fn DataTable(
    columns: Vec<&'static str>,
    #[props(default)] empty: Option<String>,
    #[props(default)] row_count: usize,
    children: Element,
) -> Element {
    let span = columns.len().to_string();
    let show_empty = row_count == 0 && empty.is_some();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                thead {
                    tr {
                        for column in columns {
                            th { "{column}" }
                        }
                    }
                }
                tbody {
                    if show_empty {
                        tr { class: "data-table-empty",
                            td { colspan: "{span}", {empty.unwrap_or_default()} }
                        }
                    } else {
                        {children}
                    }
                }
            }
        }
    }
}

#[component]
pub fn DataTableRow(children: Element) -> Element {
    rsx! {
        tr { class: "data-table-row", {children} }
    }
}

#[component]
pub fn DataTableCell(
    #[props(default)] numeric: bool,
    children: Element,
) -> Element {
    rsx! {
        td { class: if numeric { "numeric" } else { "" }, {children} }
    }
}
