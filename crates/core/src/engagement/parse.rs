//! Campaign extraction from loosely-typed upstream payloads.
//!
//! The analytics endpoint does not guarantee a shape: sometimes a bare
//! array, sometimes an object wrapping the array under a provider-chosen
//! key. Field names for id and name also vary between API revisions, so
//! extraction tries an ordered list of candidates and the first non-empty
//! value wins.

use serde_json::Value;

use super::types::Campaign;

/// Candidate field names for the campaign id, in priority order.
const ID_FIELDS: &[&str] = &["id", "campaignId", "campaign_id"];

/// Candidate field names for the campaign name, in priority order.
const NAME_FIELDS: &[&str] = &["name", "campaignName", "title"];

/// Id assigned on the basic tier when the upstream row has none.
pub const UNKNOWN_ID: &str = "unknown";

/// Name assigned when the upstream row has none.
pub const UNKNOWN_NAME: &str = "N/A";

/// Extract campaigns from an analytics-tier response.
///
/// Accepts a bare array, or an object whose immediate keys are searched for
/// one that suggests "campaign" and holds an array. Elements without a
/// resolvable id are discarded. Returns `None` when no array can be located
/// at all, which callers treat as a failed tier.
pub fn campaigns_from_analytics(payload: &Value) -> Option<Vec<Campaign>> {
    let items = locate_campaign_array(payload)?;
    Some(
        items
            .iter()
            .filter_map(|item| {
                let id = extract_field(item, ID_FIELDS)?;
                let name =
                    extract_field(item, NAME_FIELDS).unwrap_or_else(|| UNKNOWN_NAME.to_string());
                Some(Campaign { id, name })
            })
            .collect(),
    )
}

/// Extract campaigns from the basic-tier response, a plain `{id, name}`
/// array. Unlike the analytics tier, rows without an id are kept with a
/// sentinel id instead of being dropped.
pub fn campaigns_from_basic(payload: &Value) -> Option<Vec<Campaign>> {
    let items = payload.as_array()?;
    Some(
        items
            .iter()
            .map(|item| Campaign {
                id: extract_field(item, ID_FIELDS).unwrap_or_else(|| UNKNOWN_ID.to_string()),
                name: extract_field(item, NAME_FIELDS)
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            })
            .collect(),
    )
}

/// Find the array of campaign objects inside the payload.
fn locate_campaign_array(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(items) => Some(items),
        Value::Object(map) => map
            .iter()
            .find(|(key, value)| key.to_lowercase().contains("campaign") && value.is_array())
            .and_then(|(_, value)| value.as_array()),
        _ => None,
    }
}

/// Try candidate field names in order; first non-empty value wins.
/// Numeric ids are rendered as strings.
fn extract_field(item: &Value, candidates: &[&str]) -> Option<String> {
    let obj = item.as_object()?;
    for key in candidates {
        match obj.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analytics_bare_array() {
        let payload = json!([
            {"id": "c1", "name": "Spring"},
            {"id": "c2", "name": "Summer"},
        ]);
        let campaigns = campaigns_from_analytics(&payload).unwrap();
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].id, "c1");
        assert_eq!(campaigns[1].name, "Summer");
    }

    #[test]
    fn test_analytics_object_wrapper() {
        let payload = json!({
            "total": 2,
            "campaigns": [
                {"id": "c1", "name": "Spring"},
                {"id": "c2", "name": "Summer"},
            ],
        });
        let campaigns = campaigns_from_analytics(&payload).unwrap();
        assert_eq!(campaigns.len(), 2);
    }

    #[test]
    fn test_analytics_wrapper_key_match_is_fuzzy() {
        let payload = json!({
            "userCampaignsList": [{"id": "c9", "name": "Autumn"}],
        });
        let campaigns = campaigns_from_analytics(&payload).unwrap();
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].id, "c9");
    }

    #[test]
    fn test_analytics_no_array_anywhere_fails() {
        let payload = json!({"campaigns": {"nested": true}, "count": 3});
        assert!(campaigns_from_analytics(&payload).is_none());

        let payload = json!("not even an object");
        assert!(campaigns_from_analytics(&payload).is_none());
    }

    #[test]
    fn test_analytics_candidate_field_order() {
        let payload = json!([
            {"campaignId": "from-alt", "campaignName": "Alt Name"},
            {"campaign_id": 42, "title": "Numeric"},
        ]);
        let campaigns = campaigns_from_analytics(&payload).unwrap();
        assert_eq!(campaigns[0].id, "from-alt");
        assert_eq!(campaigns[0].name, "Alt Name");
        assert_eq!(campaigns[1].id, "42");
        assert_eq!(campaigns[1].name, "Numeric");
    }

    #[test]
    fn test_analytics_drops_elements_without_id() {
        let payload = json!([
            {"name": "No Id"},
            {"id": "", "name": "Empty Id"},
            {"id": "c1", "name": "Kept"},
        ]);
        let campaigns = campaigns_from_analytics(&payload).unwrap();
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].id, "c1");
    }

    #[test]
    fn test_analytics_missing_name_defaults() {
        let payload = json!([{"id": "c1"}]);
        let campaigns = campaigns_from_analytics(&payload).unwrap();
        assert_eq!(campaigns[0].name, UNKNOWN_NAME);
    }

    #[test]
    fn test_basic_keeps_rows_without_id() {
        let payload = json!([
            {"name": "No Id"},
            {"id": "x", "name": "Y"},
        ]);
        let campaigns = campaigns_from_basic(&payload).unwrap();
        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].id, UNKNOWN_ID);
        assert_eq!(campaigns[1].id, "x");
        assert_eq!(campaigns[1].name, "Y");
    }

    #[test]
    fn test_basic_non_array_fails() {
        let payload = json!({"campaigns": []});
        assert!(campaigns_from_basic(&payload).is_none());
    }
}
