//! Wire format of the trends service.
//!
//! Every JSON response is prefixed with an anti-hijacking guard such as `)]}'` that has to
//! be removed before parsing.

use crate::trends::error::TrendDataError;
use crate::types::frames::trend_series::INTEREST_COLUMN;
use crate::types::frames::weather_table::DATE_COLUMN;
use chrono::{DateTime, NaiveDate};
use log::debug;
use polars::df;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const TIMESERIES_WIDGET_ID: &str = "TIMESERIES";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExploreRequest<'a> {
    pub comparison_item: Vec<ComparisonItem<'a>>,
    pub category: u32,
    pub property: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ComparisonItem<'a> {
    pub keyword: &'a str,
    pub time: &'a str,
    pub geo: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    request: Value,
}

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: TimelineBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineBody {
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelinePoint {
    /// Unix seconds, transmitted as a string.
    time: String,
    value: Vec<i64>,
    #[serde(default)]
    is_partial: bool,
}

/// Drops everything before the first JSON object.
fn strip_guard<'a>(body: &'a str, url: &str) -> Result<&'a str, TrendDataError> {
    body.find('{')
        .map(|start| &body[start..])
        .ok_or_else(|| TrendDataError::MissingPayload(url.to_string()))
}

fn parse_json<'a, T: Deserialize<'a>>(body: &'a str, url: &str) -> Result<T, TrendDataError> {
    serde_json::from_str(strip_guard(body, url)?).map_err(|e| TrendDataError::JsonParse {
        url: url.to_string(),
        source: e,
    })
}

/// Extracts the request payload and token of the interest-over-time widget.
pub(crate) fn timeseries_widget(
    body: &str,
    url: &str,
    keyword: &str,
) -> Result<(Value, String), TrendDataError> {
    let response: ExploreResponse = parse_json(body, url)?;
    response
        .widgets
        .into_iter()
        .find(|widget| widget.id == TIMESERIES_WIDGET_ID)
        .and_then(|widget| widget.token.map(|token| (widget.request, token)))
        .ok_or_else(|| TrendDataError::MissingTimeseriesWidget(keyword.to_string()))
}

fn point_date(time: &str) -> Result<NaiveDate, TrendDataError> {
    time.parse::<i64>()
        .ok()
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
        .map(|datetime| datetime.date_naive())
        .ok_or_else(|| TrendDataError::InvalidTimestamp(time.to_string()))
}

/// Parses an interest-over-time response into a `date` / `interest` frame.
///
/// The service flags the most recent, still incomplete week as partial; that flag is not
/// kept but the row is.
pub fn parse_timeline(body: &str, keyword: &str) -> Result<DataFrame, TrendDataError> {
    let response: MultilineResponse = parse_json(body, "timeline response")?;
    let points = response.default.timeline_data;

    let partial = points.iter().filter(|point| point.is_partial).count();
    if partial > 0 {
        debug!("{} partial data points in trend for '{}'", partial, keyword);
    }

    let dates = points
        .iter()
        .map(|point| point_date(&point.time))
        .collect::<Result<Vec<_>, _>>()?;
    let values: Vec<Option<i64>> = points
        .iter()
        .map(|point| point.value.first().copied())
        .collect();

    Ok(df!(DATE_COLUMN => dates, INTEREST_COLUMN => values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{date_values, float_values};

    const TIMELINE: &str = r#")]}',
{"default":{"timelineData":[
{"time":"1577577600","formattedTime":"Dec 29, 2019 - Jan 4, 2020","value":[41],"hasData":[true],"formattedValue":["41"]},
{"time":"1578182400","formattedTime":"Jan 5 - 11, 2020","value":[38],"hasData":[true],"formattedValue":["38"]},
{"time":"1578787200","formattedTime":"Jan 12 - 18, 2020","value":[0],"hasData":[false],"formattedValue":["0"],"isPartial":true}
],"averages":[]}}"#;

    const EXPLORE: &str = r#")]}'
{"widgets":[
{"id":"GEO_MAP","token":"geo-token","request":{"geo":{"country":"AU"}}},
{"id":"TIMESERIES","token":"APP6_UEAAAAA","request":{"time":"2019-12-29 2024-12-29","resolution":"WEEK"}}
]}"#;

    #[test]
    fn timeline_becomes_weekly_frame() -> Result<(), Box<dyn std::error::Error>> {
        let frame = parse_timeline(TIMELINE, "firewood")?;

        assert_eq!(frame.get_column_names_str(), ["date", "interest"]);
        assert_eq!(
            date_values(&frame, "date")?,
            vec![
                NaiveDate::from_ymd_opt(2019, 12, 29),
                NaiveDate::from_ymd_opt(2020, 1, 5),
                NaiveDate::from_ymd_opt(2020, 1, 12),
            ]
        );
        assert_eq!(
            float_values(&frame, "interest")?,
            vec![Some(41.0), Some(38.0), Some(0.0)]
        );
        Ok(())
    }

    #[test]
    fn keyword_never_names_a_column() -> Result<(), Box<dyn std::error::Error>> {
        let body = r#"{"default":{"timelineData":[{"time":"1578182400","value":[38]}]}}"#;

        for keyword in ["date", "interest"] {
            let frame = parse_timeline(body, keyword)?;
            assert_eq!(frame.get_column_names_str(), ["date", "interest"]);
            assert_eq!(float_values(&frame, "interest")?, vec![Some(38.0)]);
        }
        Ok(())
    }

    #[test]
    fn timeseries_widget_is_selected_by_id() -> Result<(), TrendDataError> {
        let (request, token) = timeseries_widget(EXPLORE, "explore", "firewood")?;
        assert_eq!(token, "APP6_UEAAAAA");
        assert_eq!(request["resolution"], "WEEK");
        Ok(())
    }

    #[test]
    fn missing_widget_is_reported() {
        let body = r#")]}'{"widgets":[{"id":"RELATED_QUERIES","token":"t","request":{}}]}"#;
        assert!(matches!(
            timeseries_widget(body, "explore", "firewood"),
            Err(TrendDataError::MissingTimeseriesWidget(keyword)) if keyword == "firewood"
        ));
    }

    #[test]
    fn bad_timestamps_are_rejected() {
        let body = r#"{"default":{"timelineData":[{"time":"soon","value":[1]}]}}"#;
        assert!(matches!(
            parse_timeline(body, "firewood"),
            Err(TrendDataError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn body_without_json_is_reported() {
        assert!(matches!(
            parse_timeline("<html>rate limited</html>", "firewood"),
            Err(TrendDataError::MissingPayload(_))
        ));
    }
}
