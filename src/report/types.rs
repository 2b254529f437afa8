//! Data types used by the order report.

use serde::{Serialize, Serializer};

/// The fields of one export row the report needs, as raw text.
///
/// Empty or absent fields are `None`. Nothing is validated until
/// [`OrderRecord::from_raw`].
#[derive(Debug, Default)]
pub struct RawOrderRow {
    pub(crate) email: Option<String>,
    pub(crate) food_name: Option<String>,
    pub(crate) quantity: Option<String>,
}

/// A validated order row: it has an email and a numeric quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub email: String,
    pub food_name: String,
    pub quantity: f64,
}

impl OrderRecord {
    /// Returns `None` for rows without an email; those rows take no part in the report.
    pub fn from_raw(raw: RawOrderRow) -> Option<Self> {
        let email = raw.email.filter(|e| !e.is_empty())?;

        Some(Self {
            email,
            food_name: raw.food_name.unwrap_or_default(),
            quantity: raw.quantity.as_deref().map(parse_quantity).unwrap_or(0.0),
        })
    }
}

/// One food line inside a user's summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub food_name: String,
    #[serde(serialize_with = "serialize_number")]
    pub quantity: f64,
    #[serde(serialize_with = "serialize_number")]
    pub total_calories: f64,
}

/// Every order placed by one user, sorted by food name, with the calorie total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrderSummary {
    pub email: String,
    pub orders: Vec<OrderLine>,
    #[serde(serialize_with = "serialize_number")]
    pub calorie_count: f64,
}

/// Cumulative quantity ordered for one food, shaped for a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodPopularityEntry {
    pub label: String,
    #[serde(serialize_with = "serialize_number")]
    pub value: f64,
}

/// Complete report built from one pass over the order export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub sorted_user_orders: Vec<UserOrderSummary>,
    pub pie_chart_data: Vec<FoodPopularityEntry>,
}

/// Parses the leading numeric prefix of `raw`, the way a lenient float parse
/// does: `"3"`, `" 2.5kg"` and `"1e2x"` all yield numbers, while text with no
/// numeric prefix yields 0.
pub fn parse_quantity(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - frac_start;
        end = j;
    }

    if digits == 0 {
        return 0.0;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut j = end + 1;
        if j < len && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().unwrap_or(0.0)
}

/// Largest integer an `f64` holds exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Writes whole numbers as integers (`2`, not `2.0`) and non-finite values as `null`.
pub(crate) fn serialize_number<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return s.serialize_none();
    }
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT {
        return s.serialize_i64(*value as i64);
    }
    s.serialize_f64(*value)
}

/// Text form matching [`serialize_number`], for CSV output.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(email: Option<&str>, food: Option<&str>, qty: Option<&str>) -> RawOrderRow {
        RawOrderRow {
            email: email.map(str::to_string),
            food_name: food.map(str::to_string),
            quantity: qty.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_quantity_plain_numbers() {
        assert_eq!(parse_quantity("2"), 2.0);
        assert_eq!(parse_quantity("2.5"), 2.5);
        assert_eq!(parse_quantity("-3"), -3.0);
        assert_eq!(parse_quantity("+4"), 4.0);
        assert_eq!(parse_quantity(".5"), 0.5);
    }

    #[test]
    fn test_parse_quantity_takes_numeric_prefix() {
        assert_eq!(parse_quantity("  3 plates"), 3.0);
        assert_eq!(parse_quantity("2.5kg"), 2.5);
        assert_eq!(parse_quantity("1e2x"), 100.0);
        assert_eq!(parse_quantity("7e"), 7.0);
        assert_eq!(parse_quantity("1.2.3"), 1.2);
    }

    #[test]
    fn test_parse_quantity_garbage_is_zero() {
        assert_eq!(parse_quantity("abc"), 0.0);
        assert_eq!(parse_quantity(""), 0.0);
        assert_eq!(parse_quantity("-"), 0.0);
        assert_eq!(parse_quantity("."), 0.0);
        assert_eq!(parse_quantity("NaN"), 0.0);
    }

    #[test]
    fn test_parse_quantity_infinity() {
        assert_eq!(parse_quantity("Infinity"), f64::INFINITY);
        assert_eq!(parse_quantity("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_from_raw_requires_email() {
        assert!(OrderRecord::from_raw(raw(None, Some("Pizza"), Some("1"))).is_none());
        assert!(OrderRecord::from_raw(raw(Some(""), Some("Pizza"), Some("1"))).is_none());
    }

    #[test]
    fn test_from_raw_defaults() {
        let record = OrderRecord::from_raw(raw(Some("a@x.com"), None, None)).unwrap();
        assert_eq!(record.food_name, "");
        assert_eq!(record.quantity, 0.0);

        let record = OrderRecord::from_raw(raw(Some("a@x.com"), Some("Pizza"), Some("abc"))).unwrap();
        assert_eq!(record.food_name, "Pizza");
        assert_eq!(record.quantity, 0.0);
    }

    #[test]
    fn test_report_serializes_camel_case_with_integer_numbers() {
        let report = Report {
            sorted_user_orders: vec![UserOrderSummary {
                email: "a@x.com".to_string(),
                orders: vec![OrderLine {
                    food_name: "Pizza".to_string(),
                    quantity: 2.0,
                    total_calories: 620.0,
                }],
                calorie_count: 620.0,
            }],
            pie_chart_data: vec![FoodPopularityEntry {
                label: "Pizza".to_string(),
                value: 2.5,
            }],
        };

        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"sortedUserOrders":[{"email":"a@x.com","orders":[{"foodName":"Pizza","quantity":2,"totalCalories":620}],"calorieCount":620}],"pieChartData":[{"label":"Pizza","value":2.5}]}"#
        );
    }

    #[test]
    fn test_non_finite_numbers_serialize_as_null() {
        let entry = FoodPopularityEntry {
            label: "Pizza".to_string(),
            value: f64::INFINITY,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"label":"Pizza","value":null}"#);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(620.0), "620");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(12.75), "12.75");
    }
}
