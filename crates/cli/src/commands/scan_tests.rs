use super::*;
use clap::Parser;
use std::fs;

#[derive(Debug, Parser)]
struct TestCli {
    #[command(flatten)]
    scan: ScanArgs,
}

fn parse(args: &[&str]) -> ScanArgs {
    TestCli::try_parse_from(std::iter::once("sieve").chain(args.iter().copied()))
        .expect("valid arguments")
        .scan
}

fn same_code(a: ExitCode, b: ExitCode) -> bool {
    format!("{a:?}") == format!("{b:?}")
}

#[test]
fn filter_pairs_keep_order_and_hyphenated_values() {
    let args = parse(&[
        "-f", "-p", "-rw-r--r--", "--filter", "ext", "txt", "-f", "-g", "10K", "/data",
    ]);

    let pairs: Vec<(&str, &str)> = args.filter_pairs().collect();
    assert_eq!(
        pairs,
        vec![("-p", "-rw-r--r--"), ("ext", "txt"), ("-g", "10K")]
    );
    assert_eq!(args.root, PathBuf::from("/data"));
}

#[test]
fn filter_requires_flag_and_value() {
    let res = TestCli::try_parse_from(["sieve", "/data", "-f", "-e"]);
    assert!(res.is_err());
}

#[test]
fn output_options_defaults() {
    let args = parse(&["/data"]);

    assert!(args.filter.is_empty());
    assert!(args.exclude.is_empty());
    assert_eq!(args.threads, None);
    assert_eq!(args.output.output, None);
    assert_eq!(args.output.format(), OutputFormat::Human);

    let args = parse(&["--json", "--color", "never", "-o", "out.txt", "-j", "3", "/data"]);
    assert_eq!(args.output.format(), OutputFormat::Json);
    assert!(!args.output.use_color());
    assert_eq!(args.output.output, Some(PathBuf::from("out.txt")));
    assert_eq!(args.threads, Some(3));
}

#[test]
fn report_file_is_never_colored_in_auto_mode() {
    let args = parse(&["-o", "out.txt", "/data"]);
    assert!(!args.output.use_color());
}

#[test]
fn execute_writes_report_file() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("tree");
    fs::create_dir(&root).expect("create root");
    fs::write(root.join("a.txt"), vec![b'a'; 500]).expect("write");
    fs::write(root.join("c.txt"), vec![b'c'; 50]).expect("write");
    let report = tmp.path().join("report.txt");

    let args = parse(&[
        "-f",
        "-e",
        "txt",
        "-f",
        "-g",
        "100",
        "-o",
        report.to_str().expect("utf-8 path"),
        root.to_str().expect("utf-8 path"),
    ]);

    assert!(same_code(execute(args).expect("execute ok"), ExitCode::SUCCESS));

    let text = fs::read_to_string(&report).expect("report written");
    assert!(text.starts_with(&format!("File report for {}\n", root.display())));
    assert!(text.contains(&format!("  {}  500 bytes  ", root.join("a.txt").display())));
    assert!(!text.contains("c.txt"));
    assert!(text.ends_with("  Total files: 1\n  Total size: 500 bytes\n"));
}

#[test]
fn execute_unknown_filter_is_a_config_error_and_writes_nothing() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let report = tmp.path().join("report.txt");

    let args = parse(&[
        "-f",
        "-z",
        "1",
        "-o",
        report.to_str().expect("utf-8 path"),
        tmp.path().to_str().expect("utf-8 path"),
    ]);

    let code = execute(args).expect("handled as exit code");
    assert!(same_code(code, ExitCode::from(EXIT_CONFIG)));
    assert!(!report.exists());
}

#[test]
fn execute_invalid_root_is_a_config_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("missing");

    let args = parse(&[missing.to_str().expect("utf-8 path")]);
    let code = execute(args).expect("handled as exit code");
    assert!(same_code(code, ExitCode::from(EXIT_CONFIG)));
}
