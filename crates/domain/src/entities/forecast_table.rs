//! Tabular view of one section of an upstream forecast payload
//!
//! Upstream APIs disagree on layout: Open-Meteo returns columns
//! (`{"time": [..], "temperature_2m_max": [..]}`) while MeteoConcept returns
//! rows (`[{"day": 0, "tmin": 3}, ..]`). Both are normalised into named
//! columns, renamed from API field names to canonical names.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::DomainError;

/// Canonical column name -> API field name, in declaration order
///
/// A `None` field marks a column the API does not provide. Tables built
/// from the map keep its column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap(Vec<(String, Option<String>)>);

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `name` to `field`, replacing an earlier mapping in place
    pub fn insert(&mut self, name: impl Into<String>, field: Option<String>) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = field,
            None => self.0.push((name, field)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Option<String>> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(n, f)| (n.as_str(), f.as_deref()))
    }
}

impl FromIterator<(String, Option<String>)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, field) in iter {
            map.insert(name, field);
        }
        map
    }
}

impl Serialize for ColumnMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(n, f)| (n, f)))
    }
}

impl<'de> Deserialize<'de> for ColumnMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ColumnMapVisitor;

        impl<'de> Visitor<'de> for ColumnMapVisitor {
            type Value = ColumnMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column names to field names or null")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ColumnMap, A::Error> {
                let mut map = ColumnMap::new();
                while let Some((name, field)) = access.next_entry::<String, Option<String>>()? {
                    map.insert(name, field);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ColumnMapVisitor)
    }
}

/// Rows of forecast values under canonical column names
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl ForecastTable {
    /// Extract `payload[section_key]` using `column_map` (canonical -> API field)
    ///
    /// An empty map keeps every field under its own name. Unmapped fields
    /// and fields missing from the payload become `null`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the section is missing or is neither an
    /// object of arrays nor an array of objects.
    pub fn from_section(
        payload: &Value,
        section_key: &str,
        column_map: &ColumnMap,
    ) -> Result<Self, DomainError> {
        let section = payload.get(section_key).ok_or_else(|| {
            DomainError::ValidationError(format!("payload has no '{section_key}' section"))
        })?;

        match section {
            Value::Object(columns) => Ok(Self::from_columns(columns, column_map)),
            Value::Array(rows) => Self::from_rows(rows, column_map),
            _ => Err(DomainError::ValidationError(format!(
                "section '{section_key}' is neither columns nor rows"
            ))),
        }
    }

    fn mapping(
        column_map: &ColumnMap,
        fields: impl Iterator<Item = String>,
    ) -> Vec<(String, Option<String>)> {
        if column_map.is_empty() {
            fields.map(|f| (f.clone(), Some(f))).collect()
        } else {
            column_map
                .iter()
                .map(|(name, field)| (name.to_string(), field.map(str::to_string)))
                .collect()
        }
    }

    fn from_columns(columns: &Map<String, Value>, column_map: &ColumnMap) -> Self {
        let mapping = Self::mapping(column_map, columns.keys().cloned());
        let series: Vec<&[Value]> = mapping
            .iter()
            .map(|(_, field)| {
                field
                    .as_deref()
                    .and_then(|f| columns.get(f))
                    .and_then(Value::as_array)
                    .map_or(&[][..], Vec::as_slice)
            })
            .collect();
        let len = series.iter().map(|s| s.len()).max().unwrap_or(0);

        let rows = (0..len)
            .map(|i| {
                series
                    .iter()
                    .map(|s| s.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self {
            columns: mapping.into_iter().map(|(name, _)| name).collect(),
            rows,
        }
    }

    fn from_rows(rows: &[Value], column_map: &ColumnMap) -> Result<Self, DomainError> {
        let objects = rows
            .iter()
            .map(|row| {
                row.as_object().ok_or_else(|| {
                    DomainError::ValidationError("row section contains a non-object".to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let first_fields = objects
            .first()
            .map(|o| o.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        let mapping = Self::mapping(column_map, first_fields.into_iter());

        let rows = objects
            .iter()
            .map(|object| {
                mapping
                    .iter()
                    .map(|(_, field)| {
                        field
                            .as_deref()
                            .and_then(|f| object.get(f))
                            .cloned()
                            .unwrap_or(Value::Null)
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            columns: mapping.into_iter().map(|(name, _)| name).collect(),
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace negative numbers in `name` with `null`
    ///
    /// Returns how many cells were cleared; an unknown column clears none.
    pub fn mask_negative(&mut self, name: &str) -> usize {
        let Some(index) = self.columns.iter().position(|c| c == name) else {
            return 0;
        };
        let mut cleared = 0;
        for cell in self.rows.iter_mut().filter_map(|row| row.get_mut(index)) {
            if cell.as_f64().is_some_and(|v| v < 0.0) {
                *cell = Value::Null;
                cleared += 1;
            }
        }
        cleared
    }

    /// All values of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Tab-separated, header first
impl fmt::Display for ForecastTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join("\t"))?;
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(cell).collect();
            writeln!(f, "{}", line.join("\t"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, &str)]) -> ColumnMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), Some((*v).to_string())))
            .collect()
    }

    #[test]
    fn columnar_section_is_renamed() {
        let payload = json!({
            "daily": {
                "time": ["2022-03-01", "2022-03-02"],
                "temperature_2m_max": [12.5, 14.0],
                "temperature_2m_min": [2.0, 3.5]
            }
        });
        let table = ForecastTable::from_section(
            &payload,
            "daily",
            &map(&[("date", "time"), ("temp_max", "temperature_2m_max")]),
        )
        .unwrap();

        assert_eq!(table.columns(), ["date", "temp_max"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.column("temp_max").unwrap(), [&json!(12.5), &json!(14.0)]);
        assert!(table.column("temperature_2m_min").is_none());
    }

    #[test]
    fn row_section_is_renamed() {
        let payload = json!({
            "forecast": [
                {"datetime": "2022-03-01T01:00:00+0100", "tmin": 1, "tmax": 11, "rr10": 0.2},
                {"datetime": "2022-03-02T01:00:00+0100", "tmin": 2, "tmax": 13}
            ]
        });
        let table = ForecastTable::from_section(
            &payload,
            "forecast",
            &map(&[("date", "datetime"), ("precip", "rr10"), ("temp_min", "tmin")]),
        )
        .unwrap();

        assert_eq!(table.columns(), ["date", "precip", "temp_min"]);
        assert_eq!(table.rows()[1][1], Value::Null);
        assert_eq!(table.column("temp_min").unwrap(), [&json!(1), &json!(2)]);
    }

    #[test]
    fn empty_map_keeps_all_fields() {
        let payload = json!({"hourly": {"time": ["t0"], "temp": [5]}});
        let table = ForecastTable::from_section(&payload, "hourly", &ColumnMap::new()).unwrap();
        assert_eq!(table.columns().len(), 2);
        assert_eq!(table.column("temp").unwrap(), [&json!(5)]);
    }

    #[test]
    fn unavailable_column_is_null() {
        let payload = json!({"daily": {"time": ["a", "b"]}});
        let mut columns = map(&[("date", "time")]);
        columns.insert("etp".to_string(), None);

        let table = ForecastTable::from_section(&payload, "daily", &columns).unwrap();

        assert_eq!(table.columns(), ["date", "etp"]);
        assert_eq!(table.column("etp").unwrap(), [&Value::Null, &Value::Null]);
    }

    #[test]
    fn columns_follow_map_order() {
        let payload = json!({"daily": {"time": ["a"], "tmin": [1], "tmax": [9], "etp": [0.5]}});
        let columns: ColumnMap =
            serde_json::from_str(r#"{"date": "time", "temp_min": "tmin", "temp_max": "tmax", "etp": "etp"}"#)
                .unwrap();

        let table = ForecastTable::from_section(&payload, "daily", &columns).unwrap();

        assert_eq!(table.columns(), ["date", "temp_min", "temp_max", "etp"]);
        assert_eq!(
            serde_json::to_string(&columns).unwrap(),
            r#"{"date":"time","temp_min":"tmin","temp_max":"tmax","etp":"etp"}"#
        );
    }

    #[test]
    fn column_map_insert_replaces_in_place() {
        let mut columns = map(&[("date", "time"), ("etp", "etp")]);
        columns.insert("date", Some("datetime".into()));
        assert_eq!(columns.len(), 2);
        assert_eq!(columns.iter().next(), Some(("date", Some("datetime"))));
    }

    #[test]
    fn negative_values_are_masked() {
        let payload = json!({
            "forecast": [
                {"datetime": "d0", "etp": -1, "tmin": -3},
                {"datetime": "d1", "etp": 2.5, "tmin": 1},
                {"datetime": "d2", "etp": 0, "tmin": 0}
            ]
        });
        let mut table = ForecastTable::from_section(
            &payload,
            "forecast",
            &map(&[("date", "datetime"), ("etp", "etp"), ("temp_min", "tmin")]),
        )
        .unwrap();

        assert_eq!(table.mask_negative("etp"), 1);
        assert_eq!(table.mask_negative("missing"), 0);

        assert_eq!(table.column("etp").unwrap(), [&Value::Null, &json!(2.5), &json!(0)]);
        assert_eq!(table.column("temp_min").unwrap()[0], &json!(-3));
        assert_eq!(table.column("date").unwrap()[0], &json!("d0"));
    }

    #[test]
    fn ragged_columns_pad_with_null() {
        let payload = json!({"daily": {"time": ["a", "b"], "etp": [1.0]}});
        let table = ForecastTable::from_section(
            &payload,
            "daily",
            &map(&[("date", "time"), ("etp", "etp")]),
        )
        .unwrap();
        assert_eq!(table.rows()[1], vec![json!("b"), Value::Null]);
    }

    #[test]
    fn missing_or_scalar_section_is_rejected() {
        let payload = json!({"daily": 3});
        assert!(ForecastTable::from_section(&payload, "hourly", &ColumnMap::new()).is_err());
        assert!(ForecastTable::from_section(&payload, "daily", &ColumnMap::new()).is_err());
        let payload = json!({"forecast": [1, 2]});
        assert!(ForecastTable::from_section(&payload, "forecast", &ColumnMap::new()).is_err());
    }

    #[test]
    fn display_is_tab_separated() {
        let payload = json!({"daily": {"time": ["2022-03-01"], "temp": [5]}});
        let table = ForecastTable::from_section(
            &payload,
            "daily",
            &map(&[("date", "time"), ("temp", "temp")]),
        )
        .unwrap();
        assert_eq!(table.to_string(), "date\ttemp\n2022-03-01\t5\n");
    }
}
