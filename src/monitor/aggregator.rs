use crate::transfer::FileStatus;

/// Per-file completion counts plus the one file worth showing to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub completed: usize,
    pub total: usize,
    pub current: Option<String>,
}

/// Counts completed files and picks the current one: the first incomplete file that has
/// already received data, otherwise the first incomplete file.
pub fn aggregate(files: &[FileStatus]) -> FileSummary {
    let mut completed = 0;
    let mut first_incomplete = None;
    let mut active = None;
    for file in files {
        if file.is_complete() {
            completed += 1;
        } else if file.is_started() {
            active.get_or_insert(file);
        } else {
            first_incomplete.get_or_insert(file);
        }
    }
    FileSummary {
        completed,
        total: files.len(),
        current: active
            .or(first_incomplete)
            .map(|file| file.display_path.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        assert_eq!(aggregate(&[]), FileSummary::default());
    }

    #[test]
    fn prefers_file_with_partial_progress() {
        let files = [
            FileStatus::new("A", 100, 100),
            FileStatus::new("B", 100, 0),
            FileStatus::new("C", 100, 50),
        ];

        let summary = aggregate(&files);

        assert_eq!(summary.completed, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.current.as_deref(), Some("C"));
    }

    #[test]
    fn falls_back_to_first_incomplete() {
        let files = [FileStatus::new("A", 100, 0), FileStatus::new("B", 50, 0)];

        let summary = aggregate(&files);

        assert_eq!(summary.completed, 0);
        assert_eq!(summary.current.as_deref(), Some("A"));
    }

    #[test]
    fn first_active_file_wins() {
        let files = [
            FileStatus::new("A", 100, 0),
            FileStatus::new("B", 100, 10),
            FileStatus::new("C", 100, 90),
        ];

        assert_eq!(aggregate(&files).current.as_deref(), Some("B"));
    }

    #[test]
    fn all_complete_has_no_current_file() {
        let files = [
            FileStatus::new("A", 100, 100),
            FileStatus::new("empty", 0, 0),
        ];

        let summary = aggregate(&files);

        assert_eq!(summary.completed, 2);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.current, None);
    }
}
