//! Plain-text rendering of catalog listings and page outputs

use std::fmt::Write;

use domain::{Catalog, Page};

/// One line per station and API, grouped under headings
pub fn catalog_listing(catalog: &Catalog, default_api: &str) -> String {
    let mut out = String::from("Stations:\n");
    for station in catalog.stations() {
        let _ = writeln!(
            out,
            "  {:<20} {} ({})",
            station.id.as_str(),
            station.label(),
            station.coordinates
        );
    }

    out.push_str("APIs:\n");
    for api in catalog.apis() {
        let marker = if api.id.as_str() == default_api { " *" } else { "" };
        let _ = writeln!(out, "  {:<20} {}{marker}", api.id.as_str(), api.name);
    }
    out
}

/// The text of each named output element, headed by its id
pub fn page_outputs<'a>(page: &Page, ids: impl IntoIterator<Item = &'a str>) -> String {
    ids.into_iter()
        .map(|id| format!("[{id}]\n{}", page.output(id).unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
