use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::error::FetchError;
use super::types::Point;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([\]}])").expect("trailing comma pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trust {
    /// Body parsed as-is; every tuple element must be a JSON number.
    Clean,
    /// Body only parsed after repair; numeric strings are accepted too.
    Repaired,
}

/// Decode one hour's body into validated points.
///
/// A body that fails to parse gets a single repair pass (see [`repair_json`]) before
/// being given up on. Entries that are not 3-tuples or carry out-of-range
/// coordinates are dropped silently. Numbers beyond `f64` range only cost their own
/// entry, since serde_json parses with arbitrary precision here.
pub fn decode_snapshot(body: &str) -> Result<Vec<Point>, FetchError> {
    let (value, trust) = match serde_json::from_str::<Value>(body) {
        Ok(value) => (value, Trust::Clean),
        Err(_) => {
            let repaired = repair_json(body);
            (serde_json::from_str::<Value>(&repaired)?, Trust::Repaired)
        }
    };

    let Value::Array(entries) = value else {
        return Err(FetchError::NotAnArray);
    };

    Ok(entries
        .iter()
        .filter_map(|entry| parse_entry(entry, trust))
        .collect())
}

/// Strip trailing commas before closing brackets and braces and collapse newlines.
pub fn repair_json(body: &str) -> String {
    let without_commas = TRAILING_COMMA.replace_all(body, "$1");
    without_commas.replace('\n', " ").trim().to_string()
}

fn parse_entry(entry: &Value, trust: Trust) -> Option<Point> {
    let [lat, lon, alt] = entry.as_array()?.as_slice() else {
        return None;
    };
    Point::new(
        coordinate(lat, trust)?,
        coordinate(lon, trust)?,
        coordinate(alt, trust)?,
    )
}

fn coordinate(value: &Value, trust: Trust) -> Option<f64> {
    match (value, trust) {
        (Value::Number(n), _) => n.as_f64(),
        (Value::String(s), Trust::Repaired) => s.trim().parse().ok(),
        _ => None,
    }
}
