//! Text formatting for timer readouts and the burning-wick progress line.

/// Number of segments in the wick.
pub const WICK_SEGMENTS: usize = 10;

const FLAME: &str = "🔥";
const UNBURNT: char = '-';

/// `MM:SS`, with minutes allowed past 59.
pub fn format_mm_ss(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// `HH:MM:SS`, with hours allowed past 23.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Index of the flame along the wick for a progress fraction in `0.0..=1.0`.
///
/// Out-of-range and NaN progress clamp to the ends.
pub fn flame_index(progress: f64) -> usize {
    let last = WICK_SEGMENTS - 1;
    if progress.is_nan() || progress <= 0.0 {
        return 0;
    }
    if progress >= 1.0 {
        return last;
    }
    ((progress * last as f64) as usize).min(last)
}

/// Render the wick: lit segments up to and including the flame, unburnt after.
pub fn render_wick(progress: f64) -> String {
    let flame = flame_index(progress);
    let mut wick = String::with_capacity(WICK_SEGMENTS * FLAME.len());
    for i in 0..WICK_SEGMENTS {
        if i <= flame {
            wick.push_str(FLAME);
        } else {
            wick.push(UNBURNT);
        }
    }
    wick
}

/// Elapsed fraction of a countdown of `period_secs` with `remaining_secs` left.
pub fn countdown_progress(period_secs: u64, remaining_secs: u64) -> f64 {
    if period_secs == 0 {
        return 1.0;
    }
    let remaining = remaining_secs.min(period_secs);
    (period_secs - remaining) as f64 / period_secs as f64
}

/// One-line status readout, redrawn in place.
pub fn status_line(label: &str, total_secs: u64, progress: f64) -> String {
    format!(
        "\r{label} Mode | {} | {}  ",
        format_hms(total_secs),
        render_wick(progress)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hms_formats() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(60), "00:01:00");
        assert_eq!(format_hms(3600), "01:00:00");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(86_399), "23:59:59");
        assert_eq!(format_hms(100 * 3600), "100:00:00");
    }

    #[test]
    fn mm_ss_formats() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(330), "05:30");
        assert_eq!(format_mm_ss(25 * 60), "25:00");
        assert_eq!(format_mm_ss(125 * 60 + 1), "125:01");
    }

    #[test]
    fn flame_walks_the_wick() {
        assert_eq!(flame_index(0.0), 0);
        assert_eq!(flame_index(0.5), 4);
        assert_eq!(flame_index(0.99), 8);
        assert_eq!(flame_index(1.0), 9);
        assert_eq!(flame_index(-3.0), 0);
        assert_eq!(flame_index(7.0), 9);
        assert_eq!(flame_index(f64::NAN), 0);
    }

    #[test]
    fn wick_renders_lit_then_unburnt() {
        assert_eq!(render_wick(0.0), format!("{FLAME}---------"));
        assert_eq!(render_wick(1.0), FLAME.repeat(WICK_SEGMENTS));
        let half = render_wick(0.5);
        assert_eq!(half.matches(FLAME).count(), 5);
        assert!(half.ends_with("-----"));
    }

    #[test]
    fn status_line_layout() {
        let line = status_line("Rest", 61, 1.0);
        assert_eq!(line, format!("\rRest Mode | 00:01:01 | {}  ", FLAME.repeat(WICK_SEGMENTS)));
    }

    #[test]
    fn countdown_progress_clamps() {
        assert_eq!(countdown_progress(100, 100), 0.0);
        assert_eq!(countdown_progress(100, 25), 0.75);
        assert_eq!(countdown_progress(100, 0), 1.0);
        assert_eq!(countdown_progress(100, 500), 0.0);
        assert_eq!(countdown_progress(0, 0), 1.0);
    }
}
