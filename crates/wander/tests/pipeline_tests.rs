//! End-to-end pipeline tests.
//!
//! Tests verify the full pipeline: source → lex → parse → eval → rendered
//! value, for the canonical scripts and for a failure in each stage.

use std::rc::Rc;

use wander::{
    parse_script, run, run_to_result, run_with, version, CollectingLogSink, Dataset, Element,
    InMemoryDataset, RunOptions, RunResult, Stage, WanderError,
};
use wander::parser::MAX_NESTING_DEPTH;
use wander_types::{EvalError, TokenizeError, DEFAULT_CALL_LIMIT};

// ══════════════════════════════════════════════════════════════════════════════
// Canonical Wander sources
// ══════════════════════════════════════════════════════════════════════════════

const PEOPLE: &str = r#"
-- Build a small graph of people.
let people = graph()
add(people [<alice>, <name>, "Alice"])
add(people [<bob>, <name>, "Bob"])
add(people [<alice>, <knows>, <bob>])
people
"#;

const CHECKS: &str = r#"
let flags = [true, not(false), and(true true)]
let check = (flag) -> {
  log(flag)
  ensure(flag)
}
each(flags check)
filter(flags (f) -> { not(f) })
"#;

const BRANCHES: &str = r#"
let pick = (a b) -> {
  if a "first"
  else if b "second"
  else "neither"
}
[pick(true false), pick(false true), pick(false false)]
map([pick(true false), pick(false true), pick(false false)] (x) -> { x })
"#;

fn collect(source: &str, options: &RunOptions) -> (Result<Element, WanderError>, Vec<String>) {
    let sink = Rc::new(CollectingLogSink::new());
    let result = run_with(source, options, sink.clone(), None);
    (result, sink.lines())
}

// ══════════════════════════════════════════════════════════════════════════════
// 1. Canonical scripts run end to end
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn people_script_builds_graph() {
    let result = run_to_result(PEOPLE, &RunOptions::default(), None);
    assert!(result.success, "{:?}", result.diagnostic);
    assert_eq!(
        result.value.as_deref(),
        Some(r#"{<alice> <knows> <bob>, <alice> <name> "Alice", <bob> <name> "Bob"}"#)
    );
}

#[test]
fn checks_script_logs_each_flag() {
    let (result, logs) = collect(CHECKS, &RunOptions::default());
    assert_eq!(result, Ok(Element::Seq(vec![])));
    assert_eq!(logs, vec!["true", "true", "true"]);
}

#[test]
fn branches_script_picks_each_arm() {
    let result = run_to_result(BRANCHES, &RunOptions::default(), None);
    assert_eq!(result.value.as_deref(), Some("[first, second, neither]"));
}

#[test]
fn run_with_default_sink() {
    assert_eq!(run("log(\"hi\") true"), Ok(Element::BooleanLiteral(true)));
}

#[test]
fn parse_script_does_not_evaluate() {
    let script = parse_script("ensure(false) missing").unwrap();
    assert_eq!(script.elements.len(), 2);
}

#[test]
fn empty_source_is_nothing() {
    let result = run_to_result("", &RunOptions::default(), None);
    assert!(result.success);
    assert_eq!(result.value.as_deref(), Some("nothing"));
}

// ══════════════════════════════════════════════════════════════════════════════
// 2. Failures in each stage
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn tokenize_failure() {
    assert_eq!(
        run("let x = @"),
        Err(WanderError::Tokenize(TokenizeError {
            offset: 8,
            line: 1,
            column: 9
        }))
    );
}

#[test]
fn tokenize_failure_diagnostic() {
    let options = RunOptions::default().with_source_name("bad.wander");
    let result = run_to_result("let x = 1\nlet y = @", &options, None);
    assert!(!result.success);
    assert!(result.value.is_none());
    let diagnostic = result.diagnostic.unwrap();
    assert_eq!(diagnostic.file, "bad.wander");
    assert_eq!(diagnostic.stage, Stage::Tokenize);
    assert_eq!((diagnostic.line, diagnostic.column), (Some(2), Some(9)));
    assert_eq!(diagnostic.source_line.as_deref(), Some("let y = @"));
}

#[test]
fn parse_failure_diagnostic() {
    let result = run_to_result("let x =", &RunOptions::default(), None);
    let diagnostic = result.diagnostic.unwrap();
    assert_eq!(diagnostic.stage, Stage::Parse);
    assert_eq!(
        diagnostic.message,
        "could not parse script at token 3, expected one of: expression"
    );
    assert_eq!((diagnostic.line, diagnostic.column), (Some(1), Some(8)));
}

#[test]
fn eval_failure() {
    assert_eq!(
        run("missing"),
        Err(WanderError::Eval(EvalError::undefined("missing")))
    );
}

#[test]
fn deeply_nested_source_is_a_parse_error() {
    let source = format!("{}1{}", "[".repeat(50_000), "]".repeat(50_000));
    match run(&source) {
        Err(WanderError::Parse(e)) => assert_eq!(e.nesting_limit, Some(MAX_NESTING_DEPTH)),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn unbounded_recursion_is_an_eval_error() {
    assert_eq!(
        run("let f = (x) -> { f(x) } f(1)"),
        Err(WanderError::Eval(EvalError::CallDepthExceeded {
            limit: DEFAULT_CALL_LIMIT
        }))
    );
}

#[test]
fn logs_before_failure_are_kept() {
    let result = run_to_result("log(1) ensure(false) log(2)", &RunOptions::default(), None);
    assert!(!result.success);
    assert_eq!(result.logs, vec!["1"]);
    let diagnostic = result.diagnostic.unwrap();
    assert_eq!(diagnostic.stage, Stage::Eval);
    assert_eq!(diagnostic.message, "ensure failed");
    assert_eq!(diagnostic.line, None);
}

// ══════════════════════════════════════════════════════════════════════════════
// 3. Options
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn step_limit_from_json() {
    let options = RunOptions::from_json(r#"{ "step_limit": 50 }"#).unwrap();
    let (result, _) = collect("let spin = (f) -> { f(f) } spin(spin)", &options);
    assert_eq!(
        result,
        Err(WanderError::Eval(EvalError::StepLimitExceeded { limit: 50 }))
    );
}

#[test]
fn call_limit_from_json() {
    let options = RunOptions::from_json(r#"{ "call_limit": 8 }"#).unwrap();
    let (result, _) = collect("let f = (x) -> { f(x) } f(1)", &options);
    assert_eq!(
        result,
        Err(WanderError::Eval(EvalError::CallDepthExceeded { limit: 8 }))
    );
}

#[test]
fn unbounded_by_default() {
    let (result, logs) = collect(CHECKS, &RunOptions::default());
    assert!(result.is_ok());
    assert_eq!(logs.len(), 3);
}

// ══════════════════════════════════════════════════════════════════════════════
// 4. Dataset
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn dataset_is_visible_to_script() {
    let dataset = Rc::new(InMemoryDataset::new("contacts"));
    let source = r#"
datasetAdd([<alice>, <email>, "alice@example.com"])
datasetName()
"#;
    let result = run_to_result(
        source,
        &RunOptions::default(),
        Some(dataset.clone() as Rc<dyn Dataset>),
    );
    assert_eq!(result.value.as_deref(), Some("contacts"));
    assert_eq!(dataset.statements().len(), 1);
}

// ══════════════════════════════════════════════════════════════════════════════
// 5. Determinism across full pipeline
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn full_pipeline_determinism_100_iterations() {
    let sources = [("people", PEOPLE), ("checks", CHECKS), ("branches", BRANCHES)];

    for (name, source) in &sources {
        let reference = run_to_result(source, &RunOptions::default(), None);
        for i in 0..100 {
            let result = run_to_result(source, &RunOptions::default(), None);
            assert_eq!(
                (&result.value, &result.logs),
                (&reference.value, &reference.logs),
                "{} output differs at iteration {}",
                name,
                i
            );
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// 6. Structured JSON output
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn success_result_serializes_to_json() {
    let result = run_to_result(CHECKS, &RunOptions::default(), None);
    let parsed: serde_json::Value = serde_json::to_value(&result).unwrap();
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["value"], "[]");
    assert_eq!(parsed["logs"].as_array().unwrap().len(), 3);
    assert!(parsed.get("diagnostic").is_none());
}

#[test]
fn failure_result_serializes_to_json() {
    let result = run_to_result("foo(1 2", &RunOptions::default(), None);
    let parsed: serde_json::Value = serde_json::to_value(&result).unwrap();
    assert_eq!(parsed["success"], false);
    assert!(parsed["value"].is_null());
    assert_eq!(parsed["diagnostic"]["stage"], "parse");
}

#[test]
fn run_result_json_roundtrip() {
    let result = run_to_result("log(<a>) y", &RunOptions::default(), None);
    let json = serde_json::to_string(&result).unwrap();
    let rt: RunResult = serde_json::from_str(&json).unwrap();
    assert_eq!(rt.success, result.success);
    assert_eq!(rt.logs, vec!["<a>"]);
    assert_eq!(rt.diagnostic, result.diagnostic);
}

#[test]
fn error_json_roundtrip() {
    let error = run("ensure(1)").unwrap_err();
    let json = serde_json::to_string(&error).unwrap();
    let rt: WanderError = serde_json::from_str(&json).unwrap();
    assert_eq!(rt, error);
}

#[test]
fn version_is_set() {
    assert!(!version().is_empty());
}
