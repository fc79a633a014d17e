use crate::engine::apply_edit;
use crate::error::EditError;
use crate::types::{EditOutcome, EditRequest, MarkerStyle, Mode, Report};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;

    const PHP: &str = "<?php\nrequire 'autoload.php';\n?>";
    const TZ: &str = "date_default_timezone_set('Asia/Colombo');";

    fn setup(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("index.php");
        fs::write(&file_path, content).unwrap();
        (temp_dir, file_path)
    }

    fn backups(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.to_string_lossy().contains(".bak."))
            .collect()
    }

    fn tz_request(path: &Path) -> EditRequest {
        EditRequest::new(path, Mode::After, TZ)
            .unwrap()
            .with_pattern(Some("/require.+autoload\\.php;/"))
            .with_marker(Some("tz_set"), MarkerStyle::Block)
            .unwrap()
    }

    #[test]
    fn test_after_anchor_in_php_file() {
        let (_dir, path) = setup(PHP);
        let request = EditRequest::new(&path, Mode::After, TZ)
            .unwrap()
            .with_pattern(Some("require 'autoload\\.php';"))
            .skip_backup(true);

        let outcome = apply_edit(&request).unwrap();
        assert_eq!(outcome, EditOutcome::Applied { backup: None });
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("<?php\nrequire 'autoload.php';\n{}\n?>", TZ)
        );
    }

    #[test]
    fn test_marked_edit_is_idempotent() {
        let (dir, path) = setup(PHP);
        let request = tz_request(&path);

        let first = apply_edit(&request).unwrap();
        assert!(matches!(first, EditOutcome::Applied { backup: Some(_) }));
        let after_first = fs::read_to_string(&path).unwrap();
        assert!(after_first.contains("/* AUTOEDIT: tz_set START */"));
        assert!(after_first.contains("/* AUTOEDIT: tz_set END */"));

        let second = apply_edit(&request).unwrap();
        assert_eq!(
            second,
            EditOutcome::AlreadyPresent {
                marker: "tz_set".to_string()
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
        // The skipped run makes no backup either.
        assert_eq!(backups(dir.path()).len(), 1);
    }

    #[test]
    fn test_force_inserts_again() {
        let (_dir, path) = setup(PHP);
        let request = tz_request(&path).skip_backup(true);
        apply_edit(&request).unwrap();

        apply_edit(&request.clone().force(true)).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("/* AUTOEDIT: tz_set START */").count(), 2);
    }

    #[test]
    fn test_dangling_start_marker_blocks_insert() {
        let content = "<?php\n/* AUTOEDIT: tz_set START */\nrequire 'autoload.php';\n?>";
        let (_dir, path) = setup(content);

        let outcome = apply_edit(&tz_request(&path)).unwrap();
        assert!(matches!(outcome, EditOutcome::AlreadyPresent { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_marker_guard_runs_before_pattern_check() {
        let content = "/* AUTOEDIT: m START */\nx\n/* AUTOEDIT: m END */";
        let (_dir, path) = setup(content);
        let request = EditRequest::new(&path, Mode::Replace, "y")
            .unwrap()
            .with_marker(Some("m"), MarkerStyle::Block)
            .unwrap();

        let outcome = apply_edit(&request).unwrap();
        assert!(matches!(outcome, EditOutcome::AlreadyPresent { .. }));
    }

    #[test]
    fn test_marker_style_changes_guard_string() {
        let (_dir, path) = setup("# AUTOEDIT: m START\n");
        let request = EditRequest::new(&path, Mode::Append, "y")
            .unwrap()
            .with_marker(Some("m"), MarkerStyle::Block)
            .unwrap()
            .skip_backup(true);

        // A hash-style marker does not count as the block-style one.
        let outcome = apply_edit(&request).unwrap();
        assert!(matches!(outcome, EditOutcome::Applied { .. }));
    }

    #[test]
    fn test_backup_matches_pre_edit_content() {
        let (_dir, path) = setup(PHP);
        let request = EditRequest::new(&path, Mode::Append, "echo 'Hi';").unwrap();

        let outcome = apply_edit(&request).unwrap();
        let backup = match outcome {
            EditOutcome::Applied { backup: Some(backup) } => backup,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(fs::read_to_string(&backup).unwrap(), PHP);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<?php\nrequire 'autoload.php';\n\necho 'Hi';\n?>"
        );
    }

    #[test]
    fn test_skip_backup() {
        let (dir, path) = setup("a");
        let request = EditRequest::new(&path, Mode::Prepend, "b")
            .unwrap()
            .skip_backup(true);

        apply_edit(&request).unwrap();
        assert!(backups(dir.path()).is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "b\na");
    }

    #[test]
    fn test_failures_leave_file_untouched() {
        let (dir, path) = setup(PHP);

        let not_found = EditRequest::new(&path, Mode::Before, "x")
            .unwrap()
            .with_pattern(Some("no such anchor"));
        let missing = EditRequest::new(&path, Mode::Replace, "x").unwrap();
        let invalid = EditRequest::new(&path, Mode::After, "x")
            .unwrap()
            .with_pattern(Some("[unclosed"));

        for request in [not_found, missing, invalid] {
            let err = apply_edit(&request).unwrap_err();
            assert_eq!(err.exit_code(), 2);
            assert_eq!(fs::read_to_string(&path).unwrap(), PHP);
        }
        assert!(backups(dir.path()).is_empty());
    }

    #[test]
    fn test_empty_pattern_is_missing_pattern() {
        let (dir, path) = setup("body");
        let request = EditRequest::new(&path, Mode::After, "S")
            .unwrap()
            .with_pattern(Some(""));

        let err = apply_edit(&request).unwrap_err();
        assert!(matches!(err, EditError::MissingPattern("after")));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "body");
        assert!(backups(dir.path()).is_empty());
    }

    #[test]
    fn test_latin1_file_is_edited_bytewise() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("legacy.php");
        let original: &[u8] = b"<?php\n$s = 'caf\xe9';\n?>";
        fs::write(&path, original).unwrap();
        let request = EditRequest::new(&path, Mode::Append, "echo $s;")
            .unwrap()
            .with_marker(Some("echo"), MarkerStyle::Line)
            .unwrap();

        let outcome = apply_edit(&request).unwrap();
        let backup = match outcome {
            EditOutcome::Applied { backup: Some(backup) } => backup,
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(fs::read(&backup).unwrap(), original);
        assert_eq!(
            fs::read(&path).unwrap(),
            b"<?php\n$s = 'caf\xe9';\n\n// AUTOEDIT: echo START\necho $s;\n// AUTOEDIT: echo END\n?>"
                .to_vec()
        );

        let again = apply_edit(&request).unwrap();
        assert!(matches!(again, EditOutcome::AlreadyPresent { .. }));
    }

    #[test]
    fn test_empty_marker_inserts_unwrapped() {
        let (_dir, path) = setup("a");
        let request = EditRequest::new(&path, Mode::Prepend, "b")
            .unwrap()
            .with_marker(Some(""), MarkerStyle::Block)
            .unwrap()
            .skip_backup(true);

        apply_edit(&request).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "b\na");
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let request =
            EditRequest::new(temp_dir.path().join("gone.php"), Mode::Append, "x").unwrap();

        let err = apply_edit(&request).unwrap_err();
        assert!(matches!(err, EditError::FileNotFound(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (dir, path) = setup(PHP);
        let request = tz_request(&path).dry_run(true);

        let outcome = apply_edit(&request).unwrap();
        match outcome {
            EditOutcome::DryRun { content } => {
                let content = String::from_utf8(content).unwrap();
                assert!(content.contains(TZ));
                assert!(content.ends_with("?>"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), PHP);
        assert!(backups(dir.path()).is_empty());
    }

    #[test]
    fn test_replace_keeps_later_matches() {
        let (_dir, path) = setup("debug=false\ndebug=false\n");
        let request = EditRequest::new(&path, Mode::Replace, "debug=true")
            .unwrap()
            .with_pattern(Some("debug=\\w+"))
            .skip_backup(true);

        apply_edit(&request).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "debug=true\ndebug=false\n"
        );
    }

    #[test]
    fn test_report_fields() {
        let request = EditRequest::new("site.conf", Mode::Before, "x")
            .unwrap()
            .with_marker(Some("m1"), MarkerStyle::Hash)
            .unwrap();
        let outcome = EditOutcome::Applied {
            backup: Some(PathBuf::from("site.conf.bak.20260101120000")),
        };

        let json = serde_json::to_value(Report::new(&request, &outcome)).unwrap();
        assert_eq!(json["status"], "applied");
        assert_eq!(json["mode"], "before");
        assert_eq!(json["marker"], "m1");
        assert_eq!(json["backup"], "site.conf.bak.20260101120000");
        assert!(json.get("content").is_none());

        let skipped = EditOutcome::AlreadyPresent {
            marker: "m1".to_string(),
        };
        let json = serde_json::to_value(Report::new(&request, &skipped)).unwrap();
        assert_eq!(json["status"], "skipped");
        assert!(json["backup"].is_null());

        let dry = EditOutcome::DryRun {
            content: b"new text".to_vec(),
        };
        let json = serde_json::to_value(Report::new(&request, &dry)).unwrap();
        assert_eq!(json["status"], "dry_run");
        assert_eq!(json["content"], "new text");
    }
}
