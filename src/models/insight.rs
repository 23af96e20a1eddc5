use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "insight_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    #[default]
    Story,
    /// Any tag other than `story` asks for an analytical reflection.
    #[serde(other)]
    Analysis,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::Story => "story",
            InsightType::Analysis => "analysis",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AiInsight {
    pub insight_id: Uuid,
    pub user_id: String,
    pub content: String,
    pub insight_type: InsightType,
    pub generated_at: DateTime<Utc>,
}

impl AiInsight {
    pub fn new(user_id: String, content: String, insight_type: InsightType) -> Self {
        Self {
            insight_id: Uuid::new_v4(),
            user_id,
            content,
            insight_type,
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateInsightRequest {
    pub user_id: Option<String>,
    /// Absent means `story`; any present value other than `"story"`,
    /// including `null`, means `analysis`.
    #[serde(rename = "type", default, deserialize_with = "insight_type_from_any")]
    pub insight_type: InsightType,
}

fn insight_type_from_any<'de, D>(deserializer: D) -> Result<InsightType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value.as_str() {
        Some("story") => InsightType::Story,
        _ => InsightType::Analysis,
    })
}

/// Which branch produced the insight text.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Generated,
    Fallback,
}

#[derive(Debug, Serialize)]
pub struct InsightBody {
    pub content: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub generated_at: DateTime<Utc>,
    pub source: ContentSource,
}

#[derive(Debug, Serialize)]
pub struct GenerateInsightResponse {
    pub success: bool,
    pub insight: InsightBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_type_defaults_to_story() {
        let req: GenerateInsightRequest = serde_json::from_str(r#"{"user_id":"u1"}"#).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("u1"));
        assert_eq!(req.insight_type, InsightType::Story);
    }

    #[test]
    fn test_unknown_type_is_analysis() {
        let req: GenerateInsightRequest =
            serde_json::from_str(r#"{"user_id":"u1","type":"motivation"}"#).unwrap();
        assert_eq!(req.insight_type, InsightType::Analysis);
    }

    #[test]
    fn test_null_or_non_string_type_is_analysis() {
        let req: GenerateInsightRequest =
            serde_json::from_str(r#"{"user_id":"u1","type":null}"#).unwrap();
        assert_eq!(req.insight_type, InsightType::Analysis);

        let req: GenerateInsightRequest =
            serde_json::from_str(r#"{"user_id":"u1","type":3}"#).unwrap();
        assert_eq!(req.insight_type, InsightType::Analysis);
    }

    #[test]
    fn test_missing_user_id_still_deserializes() {
        let req: GenerateInsightRequest = serde_json::from_str(r#"{"type":"analysis"}"#).unwrap();
        assert!(req.user_id.is_none());
    }

    #[test]
    fn test_insight_body_serializes_type_field() {
        let body = InsightBody {
            content: "A star was born.".into(),
            insight_type: InsightType::Analysis,
            generated_at: Utc::now(),
            source: ContentSource::Fallback,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["type"], "analysis");
        assert_eq!(json["source"], "fallback");
        assert!(json.get("insight_type").is_none());
    }
}
