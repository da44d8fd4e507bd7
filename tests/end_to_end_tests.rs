use api_diff::commands::{execute_generate, execute_run, GenerateArgs, RunArgs};
use api_diff::output::read_report;
use mockito::{Matcher, Server, ServerGuard};
use pretty_assertions::assert_eq;
use std::path::Path;

fn write_config(dir: &Path, server: &ServerGuard, extra: &str) -> std::path::PathBuf {
    let config = format!(
        r#"
rate_limit_calls: 100
rate_limit_period: 1
rate_limit_retries: 0
param_mapping:
  - csv_column: version
    request_param: v
    value: "v1"
  - csv_column: letter
    request_param: l
    values: ["a", "b"]
old_api:
  url: {url}/old
  headers:
    X-Env: old
new_api:
  url: {url}/new
{extra}
"#,
        url = server.url(),
        extra = extra
    );
    let path = dir.join("api_diff.yaml");
    std::fs::write(&path, config).unwrap();
    path
}

#[test]
fn test_full_run_writes_two_diff_rows() {
    let mut server = Server::new();
    let old = server
        .mock("GET", "/old")
        .match_query(Matcher::Any)
        .match_header("x-env", "old")
        .with_body(r#"{"x": 1}"#)
        .expect(2)
        .create();
    let new = server
        .mock("GET", "/new")
        .match_query(Matcher::Any)
        .with_body(r#"{"x": 2}"#)
        .expect(2)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        config: write_config(dir.path(), &server, ""),
        output: dir.path().join("output/report.json"),
    };

    let stats = execute_run(&args).unwrap();
    old.assert();
    new.assert();

    assert_eq!(stats.processed, 2);
    assert_eq!(stats.diffs, 2);

    let rows = read_report(&args.output).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["version"], "v1");
    assert_eq!(rows[0]["letter"], "a");
    assert_eq!(rows[1]["letter"], "b");
    for row in &rows {
        assert_eq!(row["has_diff"], true);
        assert_eq!(row["has_data"], true);
        assert!(row["diff"].as_str().unwrap().contains("values_changed"));
    }
}

#[test]
fn test_full_run_writes_xlsx() {
    let mut server = Server::new();
    let _old = server
        .mock("GET", "/old")
        .match_query(Matcher::Any)
        .with_body(r#"{"x": [1, 2]}"#)
        .create();
    let _new = server
        .mock("GET", "/new")
        .match_query(Matcher::Any)
        .with_body(r#"{"x": [2, 1]}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        config: write_config(dir.path(), &server, ""),
        output: dir.path().join("output/api_diff.xlsx"),
    };

    let stats = execute_run(&args).unwrap();
    assert_eq!(stats.diffs, 0);
    assert!(args.output.exists());
}

#[test]
fn test_server_error_aborts_without_report() {
    let mut server = Server::new();
    let old = server
        .mock("GET", "/old")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(1)
        .create();
    let new = server
        .mock("GET", "/new")
        .match_query(Matcher::Any)
        .expect(0)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let args = RunArgs {
        config: write_config(dir.path(), &server, ""),
        output: dir.path().join("output/report.json"),
    };

    let err = execute_run(&args).unwrap_err();
    old.assert();
    new.assert();

    assert!(format!("{:#}", err).contains("500"));
    assert!(!args.output.exists());
}

#[test]
fn test_tabular_run_uses_csv_rows() {
    let mut server = Server::new();
    let _old = server
        .mock("GET", "/old")
        .match_query(Matcher::UrlEncoded("l".into(), "z".into()))
        .with_body(r#"{"x": 1}"#)
        .create();
    let _new = server
        .mock("GET", "/new")
        .match_query(Matcher::UrlEncoded("l".into(), "z".into()))
        .with_body(r#"{"x": 1}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cases.csv"), "version;letter\nv9;z\n").unwrap();
    let args = RunArgs {
        config: write_config(dir.path(), &server, "csv_file: cases.csv"),
        output: dir.path().join("report.json"),
    };

    let stats = execute_run(&args).unwrap();
    assert_eq!(stats.total_cases, 1);
    assert_eq!(stats.diffs, 0);

    let rows = read_report(&args.output).unwrap();
    assert_eq!(rows[0]["version"], "v9");
    assert_eq!(rows[0]["has_data"], true);
}

#[test]
fn test_invalid_config_fails_before_requests() {
    let mut server = Server::new();
    let old = server.mock("GET", Matcher::Any).expect(0).create();

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("api_diff.yaml");
    std::fs::write(
        &config,
        format!(
            "rate_limit_calls: 1\nrate_limit_period: 1\nparam_mapping:\n  - csv_column: id\nold_api: {{url: \"{0}/old\"}}\nnew_api: {{url: \"{0}/new\"}}\n",
            server.url()
        ),
    )
    .unwrap();

    let err = execute_run(&RunArgs {
        config,
        output: dir.path().join("report.json"),
    })
    .unwrap_err();

    old.assert();
    assert!(format!("{:#}", err).contains("id"));
}

#[test]
fn test_generate_writes_permutations() {
    let server = Server::new();
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("config/test_data.csv");

    let rows = execute_generate(&GenerateArgs {
        config: write_config(dir.path(), &server, ""),
        output: output.clone(),
    })
    .unwrap();

    assert_eq!(rows, 2);
    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents, "version,letter\nv1,a\nv1,b\n");
}
