//! Selection reader

use domain::{DomainError, Selection};

use crate::ports::ControlSource;

/// Read the option currently chosen in `control_id`
///
/// Never cached: every call reflects the live state of the control.
///
/// # Errors
///
/// Returns `NotFound` if the control does not exist and `EmptySelection`
/// if nothing is selected.
pub fn read_selection<S>(source: &S, control_id: &str) -> Result<Selection, DomainError>
where
    S: ControlSource + ?Sized,
{
    source
        .control(control_id)
        .ok_or_else(|| DomainError::not_found("Control", control_id))?
        .selection()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{API_CONTROL, Page, STATION_CONTROL, SelectControl, SelectOption};

    fn page() -> Page {
        Page::new()
            .with_control(SelectControl::new(
                STATION_CONTROL,
                vec![
                    SelectOption::new("S1", "Alpha"),
                    SelectOption::new("S2", "Beta"),
                ],
            ))
            .with_control(SelectControl::new(API_CONTROL, vec![]))
    }

    #[test]
    fn returns_value_and_label() {
        let mut page = page();
        page.select(STATION_CONTROL, "S2").unwrap();
        let selection = read_selection(&page, STATION_CONTROL).unwrap();
        assert_eq!(selection, Selection::new("S2", "Beta"));
    }

    #[test]
    fn reflects_live_selection() {
        let mut page = page();
        page.select(STATION_CONTROL, "S1").unwrap();
        assert_eq!(read_selection(&page, STATION_CONTROL).unwrap().id, "S1");
        page.select(STATION_CONTROL, "S2").unwrap();
        assert_eq!(read_selection(&page, STATION_CONTROL).unwrap().id, "S2");
    }

    #[test]
    fn missing_control_is_not_found() {
        assert!(matches!(
            read_selection(&page(), "nope"),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn nothing_selected_is_empty_selection() {
        assert_eq!(
            read_selection(&page(), API_CONTROL),
            Err(DomainError::EmptySelection(API_CONTROL.into()))
        );
    }
}
