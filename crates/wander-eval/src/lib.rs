//! Wander tree-walking evaluator.
//!
//! Evaluates a parsed [`Script`](wander_types::Script) against a
//! [`Bindings`](wander_types::Bindings) scope chain populated with the
//! standard library and any host-supplied natives.

mod dataset;
mod evaluator;
mod sink;
mod stdlib;

pub use dataset::{Dataset, InMemoryDataset};
pub use evaluator::{call_function, eval, eval_all, eval_script};
pub use sink::{CollectingLogSink, LogSink, TracingLogSink};
pub use stdlib::{common_bindings, dataset_bindings, install_standard, standard_bindings};
