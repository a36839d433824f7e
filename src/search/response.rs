//! `_search` response decoding.

use serde::Deserialize;

use crate::error::{Error, Result};

/// Decoded search response. Every level tolerates absent fields so a
/// response without hits or aggregations decodes to zero values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: AggregationResults,
}

impl SearchResponse {
    pub fn from_body(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(Error::Decode)
    }

    /// Buckets of the `tps` histogram; empty when no aggregation was
    /// requested or nothing matched.
    pub fn buckets(&self) -> &[Bucket] {
        &self.aggregations.tps.buckets
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hits {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id", default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregationResults {
    #[serde(default)]
    pub tps: Histogram,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Histogram {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Bucket {
    #[serde(default)]
    pub key_as_string: Option<String>,
    #[serde(default)]
    pub key: i64,
    #[serde(default)]
    pub doc_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_response_decodes() {
        let body = r#"{
            "took": 3,
            "hits": {"total": 42, "hits": [{"_id": "AVx", "_source": {"path": "/"}}]},
            "aggregations": {"tps": {"buckets": [
                {"key_as_string": "2017-05-27T07:00:00.000Z", "key": 1495868400000, "doc_count": 7},
                {"key": 1495868460000, "doc_count": 2}
            ]}}
        }"#;
        let response = SearchResponse::from_body(body).unwrap();
        assert_eq!(response.hits.total, 42);
        assert_eq!(response.hits.hits[0].id, "AVx");
        let buckets = response.buckets();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].doc_count, 7);
        assert_eq!(
            buckets[0].key_as_string.as_deref(),
            Some("2017-05-27T07:00:00.000Z")
        );
        assert_eq!(buckets[1].key, 1495868460000);
        assert!(buckets[1].key_as_string.is_none());
    }

    #[test]
    fn missing_fields_default_to_zero_values() {
        let response = SearchResponse::from_body("{}").unwrap();
        assert_eq!(response.hits.total, 0);
        assert!(response.hits.hits.is_empty());
        assert!(response.buckets().is_empty());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = SearchResponse::from_body("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
