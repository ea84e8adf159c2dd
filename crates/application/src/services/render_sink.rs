//! Render sink
//!
//! Formats a selection or a forecast result as a fixed two-line template and
//! writes it into a named output element, replacing whatever was there.

use domain::{DomainError, ForecastResult, ForecastStatus, Selection};

use crate::ports::OutputSink;

/// Something the render sink knows how to display
#[derive(Debug, Clone, Copy)]
pub enum RenderData<'a> {
    Selection(&'a Selection),
    Result(&'a ForecastResult),
}

impl<'a> From<&'a Selection> for RenderData<'a> {
    fn from(selection: &'a Selection) -> Self {
        Self::Selection(selection)
    }
}

impl<'a> From<&'a ForecastResult> for RenderData<'a> {
    fn from(result: &'a ForecastResult) -> Self {
        Self::Result(result)
    }
}

/// `Station: {label}` / `Identifier: {id}`
pub fn format_selection(selection: &Selection) -> String {
    format!(
        "Station: {}\nIdentifier: {}",
        selection.label, selection.id
    )
}

/// Status line followed by the payload, the error or a loading marker
pub fn format_result(result: &ForecastResult) -> String {
    match result.status() {
        ForecastStatus::Pending => "Status: pending\nForecast: loading".to_string(),
        ForecastStatus::Ok => format!(
            "Status: ok\nForecast: {}",
            result
                .payload()
                .map_or_else(|| "null".to_string(), ToString::to_string)
        ),
        ForecastStatus::Error => format!(
            "Status: error\nError: {}",
            result.error_message().unwrap_or_default()
        ),
    }
}

/// Render `data` into the output element `target_id`
///
/// # Errors
///
/// Returns `TargetNotFound` if the sink has no such element.
pub fn render_station_info<'a, S>(
    sink: &mut S,
    target_id: &str,
    data: impl Into<RenderData<'a>>,
) -> Result<(), DomainError>
where
    S: OutputSink + ?Sized,
{
    let text = match data.into() {
        RenderData::Selection(selection) => format_selection(selection),
        RenderData::Result(result) => format_result(result),
    };
    sink.replace_text(target_id, text)
}
