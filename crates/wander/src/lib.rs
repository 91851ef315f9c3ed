//! Wander: run a script from source text in one call.
//!
//! ```text
//! Wander Source → Lexer → Parser → Evaluator → Element
//! ```
//!
//! The stage crates are re-exported for hosts that need finer control, for
//! example to install extra native functions before evaluation.

mod error;
mod options;

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::{Diagnostic, Stage, WanderError};
pub use options::RunOptions;

pub use wander_eval::{
    CollectingLogSink, Dataset, InMemoryDataset, LogSink, TracingLogSink,
};
pub use wander_types::{write, Bindings, Element, Graph, Identifier, Script, Statement, Value};

pub use wander_eval as eval;
pub use wander_lexer as lexer;
pub use wander_parser as parser;
pub use wander_types as types;

use wander_types::SourceFile;

/// Tokenize and parse `source` without evaluating it.
pub fn parse_script(source: &str) -> Result<Script, WanderError> {
    let tokens = wander_lexer::tokenize(source)?;
    debug!(tokens = tokens.len(), "tokenized");
    let script = wander_parser::parse(tokens)?;
    debug!(elements = script.elements.len(), "parsed");
    Ok(script)
}

/// Run `source` with default options, logging through `tracing`.
pub fn run(source: &str) -> Result<Element, WanderError> {
    run_with(source, &RunOptions::default(), Rc::new(TracingLogSink), None)
}

/// Run `source` against fresh standard bindings.
///
/// `log` output goes to `sink`. When `dataset` is given the dataset
/// builtins are installed as well.
pub fn run_with(
    source: &str,
    options: &RunOptions,
    sink: Rc<dyn LogSink>,
    dataset: Option<Rc<dyn Dataset>>,
) -> Result<Element, WanderError> {
    debug!(source = %options.source_name, "running");
    let script = parse_script(source)?;
    let bindings = match options.step_limit {
        Some(limit) => Bindings::with_step_limit(limit),
        None => Bindings::new(),
    };
    let mut bindings = bindings.with_call_limit(options.call_limit);
    wander_eval::install_standard(&mut bindings, sink, dataset);
    Ok(wander_eval::eval_script(&script, &mut bindings)?)
}

/// The structured JSON output of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    /// Rendered value of the script, present on success.
    pub value: Option<String>,
    /// Lines written by `log`, including those before a failure.
    pub logs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub diagnostic: Option<Diagnostic>,
}

/// Run `source` and capture the outcome as a [`RunResult`].
pub fn run_to_result(
    source: &str,
    options: &RunOptions,
    dataset: Option<Rc<dyn Dataset>>,
) -> RunResult {
    let sink = Rc::new(CollectingLogSink::new());
    let outcome = run_with(source, options, sink.clone(), dataset);
    let logs = sink.lines();
    match outcome {
        Ok(value) => RunResult {
            success: true,
            value: Some(write(&value)),
            logs,
            diagnostic: None,
        },
        Err(error) => {
            let file = SourceFile::new(options.source_name.as_str(), source);
            RunResult {
                success: false,
                value: None,
                logs,
                diagnostic: Some(Diagnostic::new(&error, &file)),
            }
        }
    }
}

/// Crate version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
