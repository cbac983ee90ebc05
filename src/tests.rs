#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, write};
    use std::path::PathBuf;
    use tempfile::tempdir;

    use crate::commands;
    use crate::config::{load_config, Config};
    use crate::models::ViolationReport;
    use crate::parsers::{parse_report, parse_report_file, read_violations, ReaderOptions};
    use crate::ReportError;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<pmd version="oclint-0.13">
<file name="Foo.m">
<violation begincolumn="5" endcolumn="6" beginline="10" endline="12" priority="3" rule="EMPTY_IF" ruleset="empty">Empty if statement</violation>
<violation begincolumn="5" endcolumn="6" beginline="10" endline="12" priority="3" rule="EMPTY_IF" ruleset="empty"></violation>
</file>
<file name="Bar.m">
<violation priority="3" rule="LONG_LINE" ruleset="size" description="Line too long" message=""/>
</file>
</pmd>
"#;

    #[test]
    fn duplicate_keeps_first_message() {
        let out = parse_report(SAMPLE.as_bytes(), &ReaderOptions::default());
        assert!(out.is_complete());

        let foo: Vec<_> = out
            .violations()
            .iter()
            .filter(|v| v.resource_key == "Foo.m")
            .collect();
        assert_eq!(foo.len(), 1);
        assert_eq!(foo[0].line, Some(10));
        assert_eq!(foo[0].rule_key, "EMPTY_IF");
        assert_eq!(foo[0].message.as_deref(), Some("Empty if statement"));
    }

    #[test]
    fn missing_line_uses_rule_description() {
        let out = parse_report(SAMPLE.as_bytes(), &ReaderOptions::default());
        let bar = out
            .violations()
            .iter()
            .find(|v| v.resource_key == "Bar.m")
            .expect("Bar.m violation");
        assert_eq!(bar.line, None);
        assert_eq!(bar.rule_key, "LONG_LINE");
        assert_eq!(bar.message.as_deref(), Some("Line too long"));
    }

    #[test]
    fn raw_read_preserves_document_order_and_duplicates() {
        let out = read_violations(SAMPLE.as_bytes(), &ReaderOptions::default());
        let rules: Vec<_> = out
            .violations()
            .iter()
            .map(|v| (v.resource_key.as_str(), v.rule_key.as_str()))
            .collect();
        assert_eq!(
            rules,
            vec![("Foo.m", "EMPTY_IF"), ("Foo.m", "EMPTY_IF"), ("Bar.m", "LONG_LINE")]
        );
        assert_eq!(out.violations()[1].message, None);
    }

    #[test]
    fn nonexistent_file_gives_empty_result() {
        let td = tempdir().expect("tempdir");
        let missing = td.path().join("nope.xml");

        let out = parse_report_file(&missing, &ReaderOptions::default());
        assert!(out.violations().is_empty());
        match out.error() {
            Some(ReportError::Io { path, .. }) => assert_eq!(path, &missing),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn directory_instead_of_file_gives_empty_result() {
        let td = tempdir().expect("tempdir");
        let out = parse_report_file(td.path(), &ReaderOptions::default());
        assert!(!out.is_complete());
        assert!(out.violations().is_empty());
    }

    #[test]
    fn truncated_stream_returns_records_read_so_far() {
        let xml = r#"<pmd version="oclint-0.13">
<file name="A.m">
<violation beginline="1" rule="R1">first</violation>
<violation beginline="2" rule="R2" description="second rule"></violation>
<violation beginline="3" rule="R3"#;

        let out = parse_report(xml.as_bytes(), &ReaderOptions::default());
        assert!(!out.is_complete());
        let v = out.violations();
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].message.as_deref(), Some("first"));
        assert_eq!(v[1].message.as_deref(), Some("second rule"));
    }

    #[test]
    fn document_missing_closing_tags_is_truncated() {
        let xml = r#"<pmd><file name="A.m"><violation beginline="1" rule="R1"/><violation beginline="2" rule="R2"/>"#;
        let out = parse_report(xml.as_bytes(), &ReaderOptions::default());
        assert!(matches!(out.error(), Some(ReportError::Truncated { open: 2, .. })));
        assert_eq!(out.violations().len(), 2);
    }

    #[test]
    fn empty_stream_is_malformed() {
        let out = parse_report("".as_bytes(), &ReaderOptions::default());
        assert!(matches!(out.error(), Some(ReportError::NoRoot)));
        assert!(out.violations().is_empty());

        let out = parse_report("<?xml version=\"1.0\"?>\n".as_bytes(), &ReaderOptions::default());
        assert!(matches!(out.error(), Some(ReportError::NoRoot)));
    }

    #[test]
    fn non_xml_stream_is_malformed() {
        let out = parse_report("this is not xml".as_bytes(), &ReaderOptions::default());
        assert!(matches!(out.error(), Some(ReportError::TextOutsideRoot { .. })));
        assert!(out.violations().is_empty());
    }

    #[test]
    fn empty_report_file_is_not_complete() {
        let td = tempdir().expect("tempdir");
        let report = td.path().join("oclint.xml");
        write(&report, "").expect("write report");

        let out = parse_report_file(&report, &ReaderOptions::default());
        assert!(!out.is_complete());
        assert!(out.violations().is_empty());
    }

    #[test]
    fn file_entry_point_reads_from_disk() {
        let td = tempdir().expect("tempdir");
        let report = td.path().join("oclint.xml");
        write(&report, SAMPLE).expect("write report");

        let out = parse_report_file(&report, &ReaderOptions::default());
        assert!(out.is_complete());
        assert_eq!(out.violations().len(), 2);
    }

    #[test]
    fn convert_command_writes_json_report() {
        let td = tempdir().expect("tempdir");
        let base = td.path();
        let report = base.join("oclint.xml");
        write(&report, SAMPLE).expect("write report");
        let out_json = base.join("out.json");

        let args = commands::convert::ConvertArgs {
            report: Some(report.clone()),
            format: Some("json".to_string()),
            output: Some(out_json.clone()),
            ..Default::default()
        };
        commands::convert::run(args, &Config::default()).expect("convert should succeed");

        let bytes = std::fs::read(out_json).expect("read out.json");
        let parsed: ViolationReport = serde_json::from_slice(&bytes).expect("parse json");
        assert!(parsed.complete);
        assert_eq!(parsed.summary.total_violations, 2);
        assert_eq!(parsed.violations[1].message.as_deref(), Some("Line too long"));
    }

    #[test]
    fn convert_strict_fails_on_missing_report() {
        let td = tempdir().expect("tempdir");
        let args = commands::convert::ConvertArgs {
            report: Some(td.path().join("missing.xml")),
            output: Some(td.path().join("out.txt")),
            strict: true,
            ..Default::default()
        };
        assert!(commands::convert::run(args, &Config::default()).is_err());
    }

    #[test]
    fn init_then_load_config_roundtrips_defaults() {
        let td = tempdir().expect("tempdir");
        let cfg_path = commands::init::run_init(td.path(), false).expect("init");
        assert!(cfg_path.exists());
        assert!(commands::init::run_init(td.path(), false).is_err());
        commands::init::run_init(td.path(), true).expect("forced init");

        let cfg = load_config(None, td.path()).expect("load config");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn project_config_sets_report_path_and_base_dir() {
        let td = tempdir().expect("tempdir");
        let dot = td.path().join(".ocreport");
        create_dir_all(&dot).expect("mkdir");
        write(
            dot.join("config.toml"),
            r#"[report]
path = "build/oclint.xml"
base_dir = "/work/app"

[output]
format = "yaml"
"#,
        )
        .expect("write config");

        let cfg = load_config(None, td.path()).expect("load config");
        assert_eq!(cfg.report.path, PathBuf::from("build/oclint.xml"));
        assert_eq!(cfg.report.base_dir, Some(PathBuf::from("/work/app")));
        assert_eq!(cfg.output.format, "text");
    }

    #[test]
    fn explicit_config_must_parse() {
        let td = tempdir().expect("tempdir");
        let bad = td.path().join("bad.toml");
        write(&bad, "[report\npath = 1").expect("write");
        assert!(load_config(Some(bad.as_path()), td.path()).is_err());
    }
}
