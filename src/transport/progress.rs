//! Progress display values.

/// Seek slider position and time labels for one poll tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Slider position, 0-100
    pub percent: f64,
    /// Current time as `M:SS`
    pub current: String,
    /// Total time as `M:SS`
    pub total: String,
}

impl Progress {
    pub fn new(current_secs: f64, duration_secs: f64) -> Self {
        let percent = if duration_secs > 0.0 && duration_secs.is_finite() {
            (current_secs / duration_secs * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            percent: if percent.is_nan() { 0.0 } else { percent },
            current: format_time(current_secs),
            total: format_time(duration_secs),
        }
    }
}

/// Format seconds as `M:SS`. Minutes are not capped at 60.
pub fn format_time(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(125.4), "2:05");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.99), "0:59");
        assert_eq!(format_time(3661.0), "61:01");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn test_progress_percent() {
        let progress = Progress::new(30.0, 120.0);
        assert!((progress.percent - 25.0).abs() < f64::EPSILON);
        assert_eq!(progress.current, "0:30");
        assert_eq!(progress.total, "2:00");
    }

    #[test]
    fn test_progress_unknown_duration() {
        let progress = Progress::new(12.0, 0.0);
        assert_eq!(progress.percent, 0.0);
        assert_eq!(progress.total, "0:00");
    }
}
