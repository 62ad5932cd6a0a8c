use std::io::Write;

const BAR_LENGTH: usize = 30;

/// Render the progress indicator, e.g. `[██████░░░...]  20% (1/5)`.
pub fn render_progress(current: usize, total: usize, bar_length: usize) -> String {
    let percent = if total == 0 {
        1.0
    } else {
        current as f64 / total as f64
    };
    let filled = (bar_length as f64 * percent).round() as usize;
    let filled = filled.min(bar_length);
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_length - filled);
    format!(
        "[{}] {:>3}% ({}/{})",
        bar,
        (percent * 100.0).round() as u32,
        current,
        total
    )
}

/// Single-line terminal progress indicator, redrawn in place with `\r`.
pub struct ProgressLine {
    total: usize,
}

impl ProgressLine {
    pub fn start(total: usize) -> Self {
        let line = Self { total };
        line.redraw(0);
        line
    }

    pub fn redraw(&self, current: usize) {
        print!("\rUploading: {}", render_progress(current, self.total, BAR_LENGTH));
        let _ = std::io::stdout().flush();
    }

    /// Print a message on its own line without corrupting the indicator;
    /// goes through the same writer as the bar so the two cannot
    /// interleave. The caller redraws afterwards.
    pub fn interrupt(&self, message: &str) {
        println!("\n{message}");
        let _ = std::io::stdout().flush();
    }

    pub fn finish(&self) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bar_at_start() {
        let bar = render_progress(0, 10, 10);
        assert_eq!(bar, "[░░░░░░░░░░]   0% (0/10)");
    }

    #[test]
    fn test_full_bar_at_end() {
        let bar = render_progress(10, 10, 10);
        assert_eq!(bar, "[██████████] 100% (10/10)");
    }

    #[test]
    fn test_partial_fill_is_proportional() {
        let bar = render_progress(7, 15, 30);
        let filled = bar.matches('█').count();
        let empty = bar.matches('░').count();
        assert_eq!(filled, 14); // 7/15 of 30, rounded
        assert_eq!(empty, 16);
        assert!(bar.contains("47%"));
        assert!(bar.contains("(7/15)"));
    }

    #[test]
    fn test_zero_total_counts_as_done() {
        let bar = render_progress(0, 0, 10);
        assert!(bar.contains("100%"));
    }
}
