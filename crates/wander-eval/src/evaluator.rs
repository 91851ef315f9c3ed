//! Core element evaluator.
//!
//! Walks the Element tree against a [`Bindings`] scope chain. Evaluation is
//! strictly left-to-right and depth-first, and the first error aborts the
//! enclosing evaluation. Every frame pushed here is popped on every exit
//! path through a scope guard.

use tracing::{debug, trace};
use wander_types::{
    Bindings, Element, EvalError, EvalResult, FunctionCall, IfExpression, Script,
};

/// Evaluate a whole script in the outermost frame of `bindings`.
///
/// Top-level `let` statements stay bound after the call returns. The result
/// is the value of the last element, or `Nothing` for an empty script.
pub fn eval_script(script: &Script, bindings: &mut Bindings) -> EvalResult<Element> {
    debug!(elements = script.elements.len(), "evaluating script");
    let result = eval_all(&script.elements, bindings);
    debug!(steps = bindings.steps(), ok = result.is_ok(), "script evaluated");
    result
}

/// Evaluate `elements` in order, returning the last value (`Nothing` if empty).
pub fn eval_all(elements: &[Element], bindings: &mut Bindings) -> EvalResult<Element> {
    let mut result = Element::Nothing;
    for element in elements {
        result = eval(element, bindings)?;
    }
    Ok(result)
}

/// Evaluate a single element.
pub fn eval(element: &Element, bindings: &mut Bindings) -> EvalResult<Element> {
    bindings.tick()?;
    match element {
        Element::BooleanLiteral(_)
        | Element::StringLiteral(_)
        | Element::IntegerLiteral(_)
        | Element::IdentifierLiteral(_)
        | Element::Seq(_)
        | Element::Nothing
        | Element::Graph(_)
        | Element::Lambda(_)
        | Element::Native(_) => Ok(element.clone()),

        Element::Name(name) => bindings.read(name),

        Element::LetStatement(statement) => {
            let value = eval(&statement.value, bindings)?;
            bindings.bind(statement.name.clone(), value);
            Ok(Element::Nothing)
        }

        Element::Scope(body) => {
            let mut scope = bindings.scope();
            eval_all(body, &mut scope)
        }

        Element::FunctionCall(call) => eval_call(call, bindings),
        Element::IfExpression(expr) => eval_if(expr, bindings),
    }
}

// ── Calls ─────────────────────────────────────────────────────────────────────

fn eval_call(call: &FunctionCall, bindings: &mut Bindings) -> EvalResult<Element> {
    let function = bindings.read(&call.name)?;
    check_callable(&call.name, &function, call.arguments.len())?;
    let arguments = call
        .arguments
        .iter()
        .map(|argument| eval(argument, bindings))
        .collect::<EvalResult<Vec<_>>>()?;
    trace!(function = %call.name, arguments = arguments.len(), "call");
    call_function(&call.name, &function, arguments, bindings)
}

/// Fail unless `function` is a function taking `found` arguments.
fn check_callable(name: &str, function: &Element, found: usize) -> EvalResult<()> {
    let parameters = function.parameters().ok_or_else(|| EvalError::NotCallable {
        name: name.to_string(),
        found: function.kind_name().to_string(),
    })?;
    if parameters.len() != found {
        return Err(EvalError::ArityMismatch {
            function: name.to_string(),
            expected: parameters.len(),
            found,
        });
    }
    Ok(())
}

/// Call a function value with already-evaluated arguments.
///
/// A fresh frame binding each parameter to its argument is pushed on
/// `bindings` for the duration of the call. Lambda bodies are evaluated in
/// that frame; native callbacks read their arguments from it by name.
/// Fails with `CallDepthExceeded` when too many calls are already active.
/// `name` is only used in error messages.
pub fn call_function(
    name: &str,
    function: &Element,
    arguments: Vec<Element>,
    bindings: &mut Bindings,
) -> EvalResult<Element> {
    check_callable(name, function, arguments.len())?;
    let mut frame = bindings.call_scope()?;
    if let Some(parameters) = function.parameters() {
        for (parameter, argument) in parameters.iter().zip(arguments) {
            frame.bind(parameter.clone(), argument);
        }
    }
    match function {
        Element::Lambda(lambda) => eval_all(&lambda.body, &mut frame),
        Element::Native(native) => native.call(&mut frame),
        other => Err(EvalError::NotCallable {
            name: name.to_string(),
            found: other.kind_name().to_string(),
        }),
    }
}

// ── Conditionals ──────────────────────────────────────────────────────────────

fn eval_if(expr: &IfExpression, bindings: &mut Bindings) -> EvalResult<Element> {
    let branches = std::iter::once(expr.if_conditional.as_ref()).chain(&expr.else_ifs);
    for conditional in branches {
        if condition_holds(&conditional.condition, bindings)? {
            return eval(&conditional.body, bindings);
        }
    }
    match &expr.else_body {
        Some(body) => eval(body, bindings),
        None => Ok(Element::Nothing),
    }
}

fn condition_holds(condition: &Element, bindings: &mut Bindings) -> EvalResult<bool> {
    match eval(condition, bindings)? {
        Element::BooleanLiteral(value) => Ok(value),
        other => Err(EvalError::NonBooleanCondition {
            found: other.kind_name().to_string(),
        }),
    }
}
