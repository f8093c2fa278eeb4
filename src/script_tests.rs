//! Tests for script parsing and the command loop.

use super::*;
use crate::model::{FetchError, PageRequest, PageResponse};
use crate::source::MemorySource;
use crate::state::ControllerConfig;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// ===== Test Helpers =====

fn records(n: u32) -> Vec<Value> {
    (0..n)
        .map(|i| json!({"id": i, "name": format!("item {i}")}))
        .collect()
}

fn driver_over(source: MemorySource) -> ListDriver<Value> {
    let config = ControllerConfig::new(10).with_debounce(Duration::from_millis(250));
    ListDriver::<Value>::spawn(Arc::new(source), config).unwrap()
}

fn run_script(driver: &mut ListDriver<Value>, script: &str, verbose: bool) -> String {
    let mut out = Vec::new();
    run(driver, script.as_bytes(), &mut out, ScriptOptions { verbose }).unwrap();
    String::from_utf8(out).unwrap()
}

// ===== parse_command =====

#[test]
fn parses_simple_commands() {
    assert_eq!(parse_command("more"), Ok(Some(ScriptCommand::More)));
    assert_eq!(parse_command("refresh"), Ok(Some(ScriptCommand::Refresh)));
    assert_eq!(parse_command("retry"), Ok(Some(ScriptCommand::Retry)));
    assert_eq!(parse_command("show"), Ok(Some(ScriptCommand::Show)));
    assert_eq!(parse_command("wait"), Ok(Some(ScriptCommand::Wait)));
    assert_eq!(parse_command("quit"), Ok(Some(ScriptCommand::Quit)));
    assert_eq!(parse_command("exit\r\n"), Ok(Some(ScriptCommand::Quit)));
}

#[test]
fn search_keeps_text_verbatim() {
    assert_eq!(
        parse_command("search  two  spaces "),
        Ok(Some(ScriptCommand::Search(" two  spaces ".to_string())))
    );
    assert_eq!(
        parse_command("search"),
        Ok(Some(ScriptCommand::Search(String::new())))
    );
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    assert_eq!(parse_command(""), Ok(None));
    assert_eq!(parse_command("   "), Ok(None));
    assert_eq!(parse_command("# setup"), Ok(None));
}

#[test]
fn select_needs_a_valid_index() {
    assert_eq!(parse_command("select 3"), Ok(Some(ScriptCommand::Select(3))));
    assert_eq!(
        parse_command("select"),
        Err(ScriptError::MissingArgument("select"))
    );
    assert_eq!(
        parse_command("select -1"),
        Err(ScriptError::InvalidIndex("-1".to_string()))
    );
}

#[test]
fn unknown_command_is_an_error() {
    assert_eq!(
        parse_command("jump 4"),
        Err(ScriptError::UnknownCommand("jump".to_string()))
    );
}

// ===== format_status =====

#[test]
fn status_line_marks_unknown_totals() {
    let items = [1u32, 2, 3];
    let snapshot = ListSnapshot {
        items: &items,
        is_loading: false,
        is_fetching: true,
        is_refreshing: false,
        has_more_pages: true,
        search_text: "ab",
        search_query: "a\"b",
        ready: true,
        error: None,
        current_page: 1,
        total_pages: None,
        total_count: None,
    };

    insta::assert_snapshot!(
        format_status(&snapshot),
        @r#"page=1/? items=3 total=? more=true loading=false fetching=true refreshing=false query="a\"b""#
    );
}

// ===== run =====

#[test]
fn script_pages_searches_and_selects() {
    let mut driver = driver_over(MemorySource::new(records(25)));

    let output = run_script(
        &mut driver,
        "more\nmore\nmore\nsearch item 1\nwait\nselect 0\nselect 99\nbogus\nshow\n",
        false,
    );

    insta::assert_snapshot!(output, @r#"
    page=1/3 items=10 total=25 more=true loading=false fetching=false refreshing=false query=""
    page=2/3 items=20 total=25 more=true loading=false fetching=false refreshing=false query=""
    page=3/3 items=25 total=25 more=false loading=false fetching=false refreshing=false query=""
    page=3/3 items=25 total=25 more=false loading=false fetching=false refreshing=false query=""
    page=3/3 items=25 total=25 more=false loading=false fetching=false refreshing=false query=""
    page=1/2 items=10 total=11 more=true loading=false fetching=false refreshing=false query="item 1"
    selected: {"id":1,"name":"item 1"}
    selection cancelled: no item at index 99
    error: unknown command: bogus
    page=1/2 items=10 total=11 more=true loading=false fetching=false refreshing=false query="item 1"
    "#);
    assert_eq!(driver.fetch_count(), 4);
}

#[test]
fn script_refresh_collapses_to_first_page() {
    let mut driver = driver_over(MemorySource::new(records(25)));

    let output = run_script(&mut driver, "more\nrefresh\n", false);

    let last = output.lines().last().unwrap();
    assert_eq!(
        last,
        "page=1/3 items=10 total=25 more=true loading=false fetching=false refreshing=false query=\"\""
    );
}

#[test]
fn script_without_totals_infers_pages() {
    let mut driver = driver_over(MemorySource::new(records(15)).omit_totals(true));

    let output = run_script(&mut driver, "more\nmore\n", false);

    insta::assert_snapshot!(output, @r#"
    page=1/2 items=10 total=? more=true loading=false fetching=false refreshing=false query=""
    page=2/2 items=15 total=? more=false loading=false fetching=false refreshing=false query=""
    page=2/2 items=15 total=? more=false loading=false fetching=false refreshing=false query=""
    "#);
}

#[test]
fn script_verbose_lists_items() {
    let mut driver = driver_over(MemorySource::new(records(2)));

    let output = run_script(&mut driver, "", true);

    insta::assert_snapshot!(output, @r#"
    page=1/1 items=2 total=2 more=false loading=false fetching=false refreshing=false query=""
      {"id":0,"name":"item 0"}
      {"id":1,"name":"item 1"}
    "#);
}

#[test]
fn script_reports_failure_and_retries() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let source = move |request: &PageRequest| -> Result<PageResponse<Value>, FetchError> {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(FetchError::Status {
                code: 503,
                message: "maintenance".to_string(),
            });
        }
        Ok(PageResponse::new(vec![json!("a")], request.page(), request.limit()).with_totals(1, 1))
    };
    let config = ControllerConfig::new(10).with_debounce(Duration::from_millis(250));
    let mut driver = ListDriver::<Value>::spawn(Arc::new(source), config).unwrap();

    let output = run_script(&mut driver, "retry\n", false);

    insta::assert_snapshot!(output, @r#"
    page=0/? items=0 total=? more=false loading=false fetching=false refreshing=false query=""
    error: Backend returned status 503: maintenance
    page=1/1 items=1 total=1 more=false loading=false fetching=false refreshing=false query=""
    "#);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn quit_stops_reading() {
    let mut driver = driver_over(MemorySource::new(records(25)));

    let output = run_script(&mut driver, "quit\nmore\n", false);

    assert_eq!(output.lines().count(), 1);
    assert_eq!(driver.fetch_count(), 1);
}
