use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::generation::labels::Tone;
use crate::models::analytics::{TonePreferenceRow, ToneRatingSummary, ToneUsageRow};

pub const RECOMMENDED_THRESHOLD: f64 = 80.0;
pub const ADJUST_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Recommended,
    NeedsAdjustment,
    NeedsImprovement,
    InsufficientData,
}

impl Recommendation {
    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Recommended => "推奨",
            Recommendation::NeedsAdjustment => "要調整",
            Recommendation::NeedsImprovement => "改善が必要",
            Recommendation::InsufficientData => "データ不足",
        }
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Mean rating on a 0–100 scale, rounded to two decimals. 0 when nothing is rated.
pub fn success_rate(average_rating: Option<f64>) -> f64 {
    match average_rating {
        Some(avg) => ((avg / 5.0) * 100.0 * 100.0).round() / 100.0,
        None => 0.0,
    }
}

pub fn recommend(success_rate: f64, rated_count: i64) -> Recommendation {
    if rated_count == 0 {
        Recommendation::InsufficientData
    } else if success_rate >= RECOMMENDED_THRESHOLD {
        Recommendation::Recommended
    } else if success_rate >= ADJUST_THRESHOLD {
        Recommendation::NeedsAdjustment
    } else {
        Recommendation::NeedsImprovement
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ToneAnalysisEntry {
    pub tone: String,
    pub label: String,
    pub usage_count: i32,
    pub last_used_at: Option<DateTime<Utc>>,
    pub rated_count: i64,
    pub success_rate: f64,
    pub preference_score: Option<i16>,
    pub recommendation: Recommendation,
}

/// One entry per tone the user has used, most used first.
pub fn build_tone_analysis(
    usage: &[ToneUsageRow],
    ratings: &[ToneRatingSummary],
    preferences: &[TonePreferenceRow],
) -> Vec<ToneAnalysisEntry> {
    let mut entries: Vec<ToneAnalysisEntry> = usage
        .iter()
        .map(|u| {
            let summary = ratings.iter().find(|r| r.tone == u.tone);
            let rated_count = summary.map_or(0, |r| r.rated_count);
            let rate = success_rate(summary.and_then(|r| r.average_rating));
            let label = Tone::from_tag(&u.tone)
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| u.tone.clone());

            ToneAnalysisEntry {
                tone: u.tone.clone(),
                label,
                usage_count: u.usage_count,
                last_used_at: Some(u.last_used_at),
                rated_count,
                success_rate: rate,
                preference_score: preferences
                    .iter()
                    .find(|p| p.tone == u.tone)
                    .map(|p| p.preference_score),
                recommendation: recommend(rate, rated_count),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
    entries
}
