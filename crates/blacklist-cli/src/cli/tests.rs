use super::*;
use blacklist_core::output::Destination;
use blacklist_core::source::Source;
use std::fs;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_defaults() {
    let cli = parse(&["blacklist_parser"]);
    assert!(!cli.verbose);
    assert!(!cli.stdout);
    assert!(cli.source.is_none());
    assert!(cli.dest.is_none());
    assert!(cli.header.is_none());
}

#[test]
fn cli_parse_all_flags() {
    let cli = parse(&[
        "blacklist_parser",
        "--verbose",
        "--source",
        "https://example.com/list.csv",
        "--dest",
        "out.report",
        "--stdout",
        "--group-by",
        "Reason",
        "--header",
        "absent",
    ]);
    assert!(cli.verbose);
    assert!(cli.stdout);
    assert_eq!(cli.source.as_deref(), Some("https://example.com/list.csv"));
    assert_eq!(cli.dest, Some(PathBuf::from("out.report")));
    assert_eq!(cli.group_by.as_deref(), Some("Reason"));
    assert_eq!(cli.header, Some(HeaderArg::Absent));
}

#[test]
fn cli_rejects_unknown_header_mode() {
    assert!(Cli::try_parse_from(["blacklist_parser", "--header", "maybe"]).is_err());
}

#[test]
fn cli_rejects_positional_args() {
    assert!(Cli::try_parse_from(["blacklist_parser", "list.csv"]).is_err());
}

#[test]
fn cli_help_is_display_help() {
    let err = Cli::try_parse_from(["blacklist_parser", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn overrides_map_to_run_config() {
    let cli = parse(&[
        "blacklist_parser",
        "--source",
        "feeds/list.csv",
        "--dest",
        "ignored.report",
        "--stdout",
    ]);
    let cfg = RunConfig::resolve_now(&config::FileConfig::default(), &cli.overrides()).unwrap();
    assert_eq!(cfg.source, Source::Local(PathBuf::from("feeds/list.csv")));
    assert_eq!(cfg.destination, Destination::Stdout);
}

#[test]
fn run_writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("list.csv");
    let dest = dir.path().join("out.report");
    let config = dir.path().join("config.toml");
    fs::write(&src, "id,reason\n10.0.0.1,spam\n10.0.0.2,abuse\n").unwrap();
    fs::write(&config, "").unwrap();

    let cli = parse(&[
        "blacklist_parser",
        "--config",
        config.to_str().unwrap(),
        "--source",
        src.to_str().unwrap(),
        "--dest",
        dest.to_str().unwrap(),
    ]);
    cli.run().unwrap();
    let report = fs::read_to_string(&dest).unwrap();
    assert!(report.contains("10.0.0.1 — spam\n10.0.0.2 — abuse\n"));
}

#[test]
fn verbose_does_not_change_report() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("list.csv");
    let config = dir.path().join("config.toml");
    fs::write(
        &src,
        "# abuse.ch SSLBL IP Blacklist (CSV)\n# Number of entries: 5\n# DstIP,DstPort,Reason\n1.2.3.4,443,TrickBot C&C\n",
    )
    .unwrap();
    fs::write(&config, "").unwrap();

    let mut outputs = Vec::new();
    for verbose in [true, false] {
        let dest = dir.path().join(format!("verbose-{}.report", verbose));
        let mut args = vec![
            "blacklist_parser",
            "--config",
            config.to_str().unwrap(),
            "--source",
            src.to_str().unwrap(),
            "--dest",
            dest.to_str().unwrap(),
        ];
        if verbose {
            args.push("--verbose");
        }
        let cli = parse(&args);
        assert_eq!(cli.verbose, verbose);
        blacklist_core::logging::init_logging(cli.verbose);
        cli.run().unwrap();
        outputs.push(fs::read(&dest).unwrap());
    }
    assert_eq!(outputs[0], outputs[1]);
    assert!(String::from_utf8_lossy(&outputs[0]).contains("1.2.3.4 — 443, TrickBot C&C"));
}

#[test]
fn missing_source_maps_to_source_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let dest = dir.path().join("out.report");
    fs::write(&config, "").unwrap();
    let cli = parse(&[
        "blacklist_parser",
        "--config",
        config.to_str().unwrap(),
        "--source",
        dir.path().join("absent.csv").to_str().unwrap(),
        "--dest",
        dest.to_str().unwrap(),
    ]);

    let err = cli.run().unwrap_err();
    assert_eq!(exit_code_for(&err), codes::SOURCE_UNAVAILABLE);
    assert!(format!("{:#}", err).contains("source not found"));
    assert!(!dest.exists());
}

#[test]
fn bad_config_maps_to_config_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let cli = parse(&[
        "blacklist_parser",
        "--config",
        dir.path().join("missing.toml").to_str().unwrap(),
    ]);
    let err = cli.run().unwrap_err();
    assert_eq!(exit_code_for(&err), codes::CONFIG_ERROR);
}
