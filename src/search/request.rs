//! Typed `_search` request body, serialized exactly once.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::timerange::TimeRange;

/// Full request body: result size, the boolean query, and an optional
/// aggregation block.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub size: u32,
    pub query: QueryClause,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggs: Option<Aggregations>,
}

impl SearchRequest {
    /// Free-text query over the window. The text goes through serde string
    /// escaping, so arbitrary input cannot break the body syntax.
    pub fn new(text: &str, size: u32, range: TimeRange) -> Self {
        Self {
            size,
            query: QueryClause {
                boolean: BoolClause {
                    must: vec![
                        MustClause::QueryString(QueryStringClause {
                            analyze_wildcard: true,
                            query: text.to_string(),
                        }),
                        MustClause::Range(RangeClause {
                            timestamp: TimestampRange {
                                gte: range.start_millis(),
                                lte: range.end_millis(),
                                format: "epoch_millis",
                                time_zone: "UTC",
                            },
                        }),
                    ],
                },
            },
            aggs: None,
        }
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggs = Some(Aggregations { tps: aggregation });
        self
    }

    /// Request body bytes. A failure here is an internal templating bug.
    pub fn to_body(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Error::Template)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryClause {
    #[serde(rename = "bool")]
    pub boolean: BoolClause,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoolClause {
    pub must: Vec<MustClause>,
}

#[derive(Debug, Clone, Serialize)]
pub enum MustClause {
    #[serde(rename = "query_string")]
    QueryString(QueryStringClause),
    #[serde(rename = "range")]
    Range(RangeClause),
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryStringClause {
    pub analyze_wildcard: bool,
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeClause {
    #[serde(rename = "@timestamp")]
    pub timestamp: TimestampRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimestampRange {
    pub gte: i64,
    pub lte: i64,
    pub format: &'static str,
    pub time_zone: &'static str,
}

/// Aggregation block keyed the way the dashboard reads it back.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregations {
    pub tps: Aggregation,
}

/// Supported aggregation kinds. A single kind today; the tag leaves room
/// for more without loosening the rest of the body.
#[derive(Debug, Clone, Serialize)]
pub enum Aggregation {
    #[serde(rename = "date_histogram")]
    DateHistogram(DateHistogram),
}

impl Aggregation {
    /// Documents-per-interval histogram over `@timestamp`. The interval
    /// literal is passed to the store verbatim.
    pub fn date_histogram(interval: &str) -> Self {
        Self::DateHistogram(DateHistogram {
            field: "@timestamp",
            interval: interval.to_string(),
            time_zone: "UTC",
            min_doc_count: 1,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DateHistogram {
    pub field: &'static str,
    pub interval: String,
    pub time_zone: &'static str,
    pub min_doc_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde_json::{Value, json};

    fn window() -> TimeRange {
        let at = |s: &str| -> DateTime<Utc> {
            DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
        };
        TimeRange {
            start: at("2017-05-20T07:00:00Z"),
            end: at("2017-05-27T07:00:00Z"),
        }
    }

    #[test]
    fn body_without_aggregation_matches_the_wire_shape() {
        let request = SearchRequest::new("status:500", 3, window());
        let body: Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "size": 3,
                "query": {"bool": {"must": [
                    {"query_string": {"analyze_wildcard": true, "query": "status:500"}},
                    {"range": {"@timestamp": {
                        "gte": 1495263600000i64,
                        "lte": 1495868400000i64,
                        "format": "epoch_millis",
                        "time_zone": "UTC"
                    }}}
                ]}}
            })
        );
    }

    #[test]
    fn aggregation_adds_the_histogram_and_keeps_the_rest() {
        let request =
            SearchRequest::new("*", 3, window()).with_aggregation(Aggregation::date_histogram("1m"));
        let body: Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();

        assert_eq!(body["size"], 3);
        assert_eq!(
            body["query"]["bool"]["must"][0]["query_string"]["query"],
            "*"
        );
        let histogram = &body["aggs"]["tps"]["date_histogram"];
        assert_eq!(histogram["field"], "@timestamp");
        assert_eq!(histogram["interval"], "1m");
        assert_eq!(histogram["time_zone"], "UTC");
        assert_eq!(histogram["min_doc_count"], 1);
    }

    #[test]
    fn range_bounds_are_exact_epoch_millis() {
        let request = SearchRequest::new("*", 0, window());
        let body: Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();
        let range = &body["query"]["bool"]["must"][1]["range"]["@timestamp"];
        assert_eq!(range["gte"], 1495263600000i64);
        assert_eq!(range["lte"], 1495868400000i64);
    }

    #[test]
    fn hostile_query_text_stays_inside_the_string_literal() {
        let request = SearchRequest::new(r#"a"},{"boom":true"#, 1, window());
        let body: Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();
        assert_eq!(
            body["query"]["bool"]["must"][0]["query_string"]["query"],
            r#"a"},{"boom":true"#
        );
    }
}
