use serde::Serialize;

/// Days covered by the windowed dashboard stats.
pub const DASHBOARD_WINDOW_DAYS: i64 = 30;

/// Reported when the window holds no journal entries.
pub const DEFAULT_AVG_MOOD: f64 = 5.0;

/// Raw counts gathered from the store before rounding.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardCounts {
    pub total_entries: i64,
    pub recent_entries: i64,
    pub avg_mood: Option<f64>,
    pub total_habits: i64,
    pub completed_habits: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_entries: i64,
    pub recent_entries: i64,
    pub avg_mood: f64,
    pub completion_rate: f64,
    pub total_habits: i64,
    pub completed_habits: i64,
    /// Count of journal entries in the window, not a consecutive-day streak.
    pub streak_days: i64,
}

impl From<DashboardCounts> for DashboardStats {
    fn from(c: DashboardCounts) -> Self {
        let completion_rate = if c.total_habits > 0 {
            c.completed_habits as f64 / c.total_habits as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_entries: c.total_entries,
            recent_entries: c.recent_entries,
            avg_mood: round1(c.avg_mood.unwrap_or(DEFAULT_AVG_MOOD)),
            completion_rate: round1(completion_rate),
            total_habits: c.total_habits,
            completed_habits: c.completed_habits,
            streak_days: c.recent_entries,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_uses_defaults() {
        let stats = DashboardStats::from(DashboardCounts::default());
        assert_eq!(stats.avg_mood, 5.0);
        assert_eq!(stats.completion_rate, 0.0);
        assert_eq!(stats.streak_days, 0);
    }

    #[test]
    fn test_completion_rate_is_percentage() {
        let stats = DashboardStats::from(DashboardCounts {
            total_habits: 3,
            completed_habits: 2,
            ..Default::default()
        });
        assert_eq!(stats.completion_rate, 66.7);
    }

    #[test]
    fn test_avg_mood_rounded_to_one_decimal() {
        let stats = DashboardStats::from(DashboardCounts {
            total_entries: 5,
            recent_entries: 3,
            avg_mood: Some(22.0 / 3.0),
            ..Default::default()
        });
        assert_eq!(stats.avg_mood, 7.3);
        assert_eq!(stats.streak_days, 3);
        assert_eq!(stats.total_entries, 5);
    }
}
