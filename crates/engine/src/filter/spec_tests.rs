use super::*;
use chrono::{Local, TimeZone};
use smallvec::smallvec;
use std::path::PathBuf;

fn record(path: &str, size: u64, permissions: &str) -> FileRecord {
    FileRecord {
        path: PathBuf::from(path),
        size,
        owner: "alice".into(),
        permissions: permissions.into(),
        modified: Local
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .earliest()
            .expect("valid local time"),
    }
}

#[test]
fn from_flag_recognises_short_and_long_spellings() {
    let cases: &[(&str, Option<FilterKind>)] = &[
        ("-e", Some(FilterKind::ExtensionIn)),
        ("ext", Some(FilterKind::ExtensionIn)),
        ("--ext", Some(FilterKind::ExtensionIn)),
        ("-g", Some(FilterKind::SizeGreaterThan)),
        ("size-gt", Some(FilterKind::SizeGreaterThan)),
        ("-l", Some(FilterKind::SizeLessThan)),
        ("--size-lt", Some(FilterKind::SizeLessThan)),
        ("-t", Some(FilterKind::TimeRange)),
        ("time", Some(FilterKind::TimeRange)),
        ("-p", Some(FilterKind::PermissionsEqual)),
        ("perm", Some(FilterKind::PermissionsEqual)),
        ("-z", None),
        ("e", None),
        ("-E", None),
        ("", None),
    ];

    for (flag, expected) in cases {
        assert_eq!(FilterKind::from_flag(flag), *expected, "flag {:?}", flag);
    }
}

#[test]
fn parse_builds_typed_specs() {
    let cases: Vec<(&str, &str, FilterSpec)> = vec![
        (
            "-e",
            "txt,.log, md",
            FilterSpec::ExtensionIn(smallvec!["txt".to_string(), "log".to_string(), "md".to_string()]),
        ),
        ("-e", "txt,txt", FilterSpec::ExtensionIn(smallvec!["txt".to_string()])),
        ("-e", "txt,,", FilterSpec::ExtensionIn(smallvec!["txt".to_string()])),
        (
            "-e",
            "., txt",
            FilterSpec::ExtensionIn(smallvec![String::new(), "txt".to_string()]),
        ),
        ("-g", "100", FilterSpec::SizeGreaterThan(100)),
        ("size-gt", "1K", FilterSpec::SizeGreaterThan(1024)),
        ("-l", "2MB", FilterSpec::SizeLessThan(2 * 1024 * 1024)),
        ("-p", "-rw-r--r--", FilterSpec::PermissionsEqual("-rw-r--r--".into())),
    ];

    for (flag, value, expected) in cases {
        let got = FilterSpec::parse(flag, value).expect("valid filter");
        assert_eq!(got, expected, "{flag} {value}");
    }

    let spec = FilterSpec::parse("-t", "2024-01-01:2024-01-31").expect("valid range");
    assert!(matches!(spec, FilterSpec::TimeRange(_)));
    assert_eq!(spec.to_string(), "time 2024-01-01:2024-01-31");
}

#[test]
fn parse_reports_unknown_flags() {
    assert_eq!(
        FilterSpec::parse("-z", "whatever"),
        Err(FilterError::UnknownFilter("-z".into()))
    );
}

#[test]
fn parse_reports_invalid_values_with_the_flag() {
    let cases: &[(&str, &str)] = &[
        ("-e", ""),
        ("-e", " , "),
        ("-g", "big"),
        ("-l", "-1"),
        ("-t", "2024-01-01"),
        ("-t", "2024-13-01:2024-12-01"),
        ("-t", "2024-02-01:2024-01-01"),
        ("-p", ""),
    ];

    for (flag, value) in cases {
        match FilterSpec::parse(flag, value) {
            Err(FilterError::InvalidValue { flag: f, value: v, .. }) => {
                assert_eq!(f, *flag);
                assert_eq!(v, *value);
            }
            other => panic!("{flag} {value:?}: expected InvalidValue, got {other:?}"),
        }
    }
}

#[test]
fn extension_match_is_exact_and_case_sensitive() {
    let spec = FilterSpec::parse("-e", "txt").expect("valid");

    let cases: &[(&str, bool)] = &[
        ("/r/a.txt", true),
        ("/r/a.TXT", false),
        ("/r/a.txt.bak", false),
        ("/r/txt", false),
        ("/r/.txt", true),
        ("/r/dir.txt/readme", false),
    ];

    for (path, expected) in cases {
        assert_eq!(
            spec.matches(&record(path, 1, "-rw-r--r--")),
            *expected,
            "path {:?}",
            path
        );
    }
}

#[test]
fn lone_dot_selects_files_without_extension() {
    let spec = FilterSpec::parse("-e", ".,md").expect("valid");
    assert_eq!(spec.to_string(), "ext .,md");

    let cases: &[(&str, bool)] = &[
        ("/r/Makefile", true),
        ("/r/notes.", true),
        ("/r/README.md", true),
        ("/r/a.txt", false),
        ("/r/.bashrc", false),
    ];

    for (path, expected) in cases {
        assert_eq!(
            spec.matches(&record(path, 1, "-rw-r--r--")),
            *expected,
            "path {:?}",
            path
        );
    }
}

#[cfg(unix)]
#[test]
fn extension_match_ignores_undecodable_stem() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let spec = FilterSpec::parse("-e", "txt").expect("valid");
    let mut rec = record("/r/x", 1, "-rw-r--r--");
    rec.path = PathBuf::from(OsStr::from_bytes(b"/r/r\xe9sum\xe9.txt"));

    assert!(spec.matches(&rec));
}

#[test]
fn size_filters_are_strict() {
    let gt = FilterSpec::SizeGreaterThan(100);
    let lt = FilterSpec::SizeLessThan(100);

    let cases: &[(u64, bool, bool)] = &[(99, false, true), (100, false, false), (101, true, false)];

    for (size, expect_gt, expect_lt) in cases {
        let rec = record("/r/f", *size, "-rw-r--r--");
        assert_eq!(gt.matches(&rec), *expect_gt, "size {size} > 100");
        assert_eq!(lt.matches(&rec), *expect_lt, "size {size} < 100");
    }
}

#[test]
fn permissions_compare_as_strings() {
    let spec = FilterSpec::PermissionsEqual("-rw-r--r--".into());

    assert!(spec.matches(&record("/r/f", 1, "-rw-r--r--")));
    assert!(!spec.matches(&record("/r/f", 1, "-rwxr--r--")));
    // same bits, different spelling
    let octal = FilterSpec::PermissionsEqual("644".into());
    assert!(!octal.matches(&record("/r/f", 1, "-rw-r--r--")));
}

#[test]
fn time_range_filter_uses_modification_time() {
    let june = FilterSpec::parse("-t", "2024-06-01:2024-06-01").expect("valid");
    let july = FilterSpec::parse("-t", "2024-07-01:2024-07-31").expect("valid");

    let rec = record("/r/f", 1, "-rw-r--r--");
    assert!(june.matches(&rec));
    assert!(!july.matches(&rec));
}

#[test]
fn filter_error_display() {
    assert_eq!(
        FilterError::UnknownFilter("-z".into()).to_string(),
        "unknown filter `-z`"
    );

    let err = FilterSpec::parse("-g", "big").expect_err("invalid size");
    assert_eq!(
        err.to_string(),
        "invalid value `big` for filter `-g`: expected a byte size such as 100, 10K or 5MB"
    );
}
