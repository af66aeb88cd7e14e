//! Tests for progress bar bookkeeping

#[cfg(test)]
mod tests {
    use gallery_scatter::io::progress::{ProgressManager, report_cells};

    #[test]
    fn test_runs_are_tracked() {
        let mut manager = ProgressManager::hidden();
        let first = manager.start_run("1440px", 225);
        let _second = manager.start_run("800px", 196);

        assert_eq!(manager.runs(), 2);
        assert_eq!(first.length(), Some(225));
        manager.finish();
        assert!(first.is_finished());
    }

    #[test]
    fn test_report_cells() {
        let mut manager = ProgressManager::hidden();
        let bar = manager.start_run("run", 100);

        report_cells(Some(&bar), 40, 12);
        assert_eq!(bar.position(), 40);
        assert_eq!(bar.message(), "(12 tiles)");

        // No bar is a no-op
        report_cells(None, 50, 13);
    }
}
