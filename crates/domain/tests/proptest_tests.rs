//! Property-based tests for URL construction, selections and results
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{
    Coordinates, ForecastResult, ForecastStatus, Page, STATION_CONTROL, SelectControl,
    SelectOption, build_forecast_url, expand_forecast_template, is_valid_identifier,
};
use proptest::prelude::*;
use serde_json::json;

fn station_id() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.-]{1,64}"
}

fn origin() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "https?://[a-z]{1,12}\\.[a-z]{2,3}(:[0-9]{2,5})?",
    ]
}

// ============================================================================
// build_forecast_url Property Tests
// ============================================================================

mod forecast_url_tests {
    use super::*;

    proptest! {
        #[test]
        fn url_has_documented_form(origin in origin(), id in station_id()) {
            let url = build_forecast_url(&origin, &id).unwrap();
            prop_assert_eq!(url, format!("{origin}/API/{id}/forecast?station={id}"));
        }

        #[test]
        fn station_id_appears_in_path_and_query(origin in origin(), id in station_id()) {
            let url = build_forecast_url(&origin, &id).unwrap();
            let path = format!("/API/{id}/forecast");
            let query = format!("?station={id}");
            prop_assert!(url.contains(&path));
            prop_assert!(url.ends_with(&query));
        }

        #[test]
        fn url_is_deterministic(origin in origin(), id in station_id()) {
            prop_assert_eq!(
                build_forecast_url(&origin, &id).unwrap(),
                build_forecast_url(&origin, &id).unwrap()
            );
        }

        #[test]
        fn trailing_slash_is_ignored(origin in origin(), id in station_id()) {
            prop_assert_eq!(
                build_forecast_url(&format!("{origin}/"), &id).unwrap(),
                build_forecast_url(&origin, &id).unwrap()
            );
        }

        #[test]
        fn malformed_ids_are_rejected(
            origin in origin(),
            id in "[A-Za-z0-9]{0,8}[/?&# %][A-Za-z0-9]{0,8}"
        ) {
            prop_assert!(!is_valid_identifier(&id));
            prop_assert!(build_forecast_url(&origin, &id).is_err());
        }
    }
}

// ============================================================================
// Template expansion Property Tests
// ============================================================================

mod template_tests {
    use super::*;

    proptest! {
        #[test]
        fn placeholders_are_fully_replaced(
            lat in -90.0f64..=90.0f64,
            long in -180.0f64..=180.0f64
        ) {
            let coords = Coordinates::new(lat, long).unwrap();
            let url = expand_forecast_template(
                "https://api.example/forecast?latitude=LAT&longitude=LONG",
                &coords,
            )
            .unwrap();
            prop_assert!(!url.contains("LAT"));
            prop_assert!(!url.contains("LONG"));
            let expected = format!("latitude={lat}&longitude={long}");
            prop_assert!(url.ends_with(&expected));
        }
    }
}

// ============================================================================
// Selection Property Tests
// ============================================================================

mod selection_tests {
    use super::*;

    fn options() -> impl Strategy<Value = Vec<SelectOption>> {
        prop::collection::btree_set(station_id(), 1..10).prop_map(|ids| {
            ids.into_iter()
                .map(|id| SelectOption::new(id.clone(), format!("Station {id}")))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn reading_a_selection_is_repeatable(options in options(), pick in any::<prop::sample::Index>()) {
            let index = pick.index(options.len());
            let mut control = SelectControl::new(STATION_CONTROL, options.clone());
            control.select_index(index).unwrap();
            let page = Page::new().with_control(control);

            let control = page.control(STATION_CONTROL).unwrap();
            let first = control.selection().unwrap();
            let second = control.selection().unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&first.id, &options[index].value);
        }

        #[test]
        fn unknown_value_keeps_previous_selection(options in options()) {
            let mut control = SelectControl::new(STATION_CONTROL, options.clone());
            control.select(&options[0].value).unwrap();
            prop_assert!(control.select("not/an/option").is_err());
            prop_assert_eq!(&control.selection().unwrap().id, &options[0].value);
        }
    }
}

// ============================================================================
// ForecastResult Property Tests
// ============================================================================

mod result_tests {
    use super::*;

    proptest! {
        #[test]
        fn settles_exactly_once(message in ".{0,40}", n in any::<i64>(), error_first in any::<bool>()) {
            let mut result = ForecastResult::pending();
            if error_first {
                result.resolve_error(message.clone()).unwrap();
                prop_assert!(result.resolve_ok(json!(n)).is_err());
                prop_assert_eq!(result.status(), ForecastStatus::Error);
                prop_assert_eq!(result.error_message(), Some(message.as_str()));
            } else {
                result.resolve_ok(json!(n)).unwrap();
                prop_assert!(result.resolve_error(message).is_err());
                prop_assert_eq!(result.status(), ForecastStatus::Ok);
                prop_assert_eq!(result.payload(), Some(&json!(n)));
            }
        }
    }
}
