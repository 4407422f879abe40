//! Quadrature task read from a task document (see `Utils::task_parser`).
//!
//! ```text
//! integral
//! expression: sin(x)
//! variable: x
//! bounds: 0, pi
//! steps: 100
//! rule: 1
//! logging
//! loglevel: info
//! log_file: quad.log
//! ```
//! `log_file: auto` writes to a time-stamped `log_<date>_<time>.txt`.
//! The `integral` section is turned into the six `ramlib` arguments, so a task
//! goes through exactly the same checks as a direct call.
use crate::Utils::logger::{DEFAULT_LOGLEVEL, default_log_file_name, parse_loglevel};
use crate::Utils::task_parser::{DocumentMap, SectionMap, Value, parse_document};
use crate::numerical::ram_errors::IntegrationError;
use crate::numerical::ramlib::ramlib;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_evaluator::ExpressionEvaluator;
use simplelog::LevelFilter;
use std::fs;
use std::path::Path;

const INTEGRAL_KEYS: [&str; 5] = ["expression", "variable", "bounds", "steps", "rule"];
const LOGGING_KEYS: [&str; 2] = ["loglevel", "log_file"];

#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureTask {
    /// the six ramlib arguments, in call order
    pub args: Vec<Expr>,
    pub loglevel: LevelFilter,
    pub log_file: Option<String>,
}

fn template() -> DocumentMap {
    let section = |keys: &[&str]| -> SectionMap {
        keys.iter().map(|key| (key.to_string(), None)).collect()
    };
    let mut template = DocumentMap::new();
    template.insert("integral".to_string(), section(&INTEGRAL_KEYS));
    template.insert("logging".to_string(), section(&LOGGING_KEYS));
    template
}

fn required<'a>(section: &'a SectionMap, key: &str) -> Result<&'a Vec<Value>, String> {
    match section.get(key) {
        Some(Some(values)) if !values.is_empty() => Ok(values),
        _ => Err(format!("integral: key '{}' is missing", key)),
    }
}

fn single<'a>(section: &'a SectionMap, key: &str) -> Result<&'a Value, String> {
    let values = required(section, key)?;
    if values.len() != 1 {
        return Err(format!(
            "integral: key '{}' takes one value, got {}",
            key,
            values.len()
        ));
    }
    Ok(&values[0])
}

fn to_expr(value: &Value, key: &str) -> Result<Expr, String> {
    Expr::parse_expression(&value.to_string()).map_err(|e| format!("integral: {}: {}", key, e))
}

impl QuadratureTask {
    pub fn from_document(document: &DocumentMap) -> Result<Self, String> {
        let integral = document
            .get("integral")
            .ok_or_else(|| "section 'integral' is missing".to_string())?;
        let bounds = required(integral, "bounds")?;
        if bounds.len() != 2 {
            return Err(format!(
                "integral: bounds takes lower and upper value, got {} values",
                bounds.len()
            ));
        }
        let args = vec![
            to_expr(single(integral, "expression")?, "expression")?,
            to_expr(single(integral, "variable")?, "variable")?,
            to_expr(&bounds[0], "bounds")?,
            to_expr(&bounds[1], "bounds")?,
            to_expr(single(integral, "steps")?, "steps")?,
            to_expr(single(integral, "rule")?, "rule")?,
        ];

        let logging = document.get("logging");
        let first_value = |key: &str| -> Option<String> {
            logging
                .and_then(|section| section.get(key))
                .and_then(|values| values.as_ref())
                .and_then(|values| values.first())
                .map(|value| value.to_string())
        };
        let loglevel = match first_value("loglevel") {
            Some(level) => parse_loglevel(&level)?,
            None => DEFAULT_LOGLEVEL,
        };
        Ok(QuadratureTask {
            args,
            loglevel,
            // "auto" picks a time-stamped name
            log_file: first_value("log_file").map(|name| match name.as_str() {
                "auto" => default_log_file_name(),
                _ => name,
            }),
        })
    }

    pub fn parse(input: &str) -> Result<Self, String> {
        let document = parse_document(input, Some(&template()))?;
        Self::from_document(&document)
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read task file {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    /// Runs the integral through the `ramlib` entry point.
    pub fn run<E>(&self, evaluator: &E) -> Result<f64, IntegrationError>
    where
        E: ExpressionEvaluator<Expression = Expr> + ?Sized,
    {
        ramlib(&self.args, evaluator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::symbolic_evaluator::SymbolicEvaluator;
    use approx::assert_relative_eq;
    use std::io::Write;

    const TASK: &str = "
    integral
    expression: sin(x)
    variable: x
    bounds: 0, pi
    steps: 200
    rule: 3
    logging
    loglevel: debug
    ";

    #[test]
    fn test_task_from_text() {
        let task = QuadratureTask::parse(TASK).unwrap();
        assert_eq!(task.args.len(), 6);
        assert_eq!(task.args[1], Expr::Var("x".to_string()));
        assert_eq!(task.loglevel, LevelFilter::Debug);
        assert_eq!(task.log_file, None);
        let res = task.run(&SymbolicEvaluator::new()).unwrap();
        assert_relative_eq!(res, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_task_without_logging_section() {
        let doc = "integral\nexpression: 2\nvariable: t\nbounds: 1, 4\nsteps: 3\nrule: 0";
        let task = QuadratureTask::parse(doc).unwrap();
        assert_eq!(task.loglevel, DEFAULT_LOGLEVEL);
        let res = task.run(&SymbolicEvaluator::new()).unwrap();
        assert_relative_eq!(res, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_missing_key_reported() {
        let doc = "integral\nexpression: x\nvariable: x\nbounds: 0, 1\nrule: 0";
        let err = QuadratureTask::parse(doc).unwrap_err();
        assert!(err.contains("steps"));
        let doc = "integral\nexpression: x\nvariable: x\nbounds: 0\nsteps: 2\nrule: 0";
        let err = QuadratureTask::parse(doc).unwrap_err();
        assert!(err.contains("bounds"));
    }

    #[test]
    fn test_log_file_names() {
        let base =
            "integral\nexpression: x\nvariable: x\nbounds: 0, 1\nsteps: 2\nrule: 0\nlogging\n";
        let task = QuadratureTask::parse(&format!("{}log_file: quad.log", base)).unwrap();
        assert_eq!(task.log_file.as_deref(), Some("quad.log"));
        let task = QuadratureTask::parse(&format!("{}log_file: auto", base)).unwrap();
        let name = task.log_file.unwrap();
        assert!(name.starts_with("log_") && name.ends_with(".txt"));
    }

    #[test]
    fn test_bad_loglevel_reported() {
        let doc = "integral\nexpression: x\nvariable: x\nbounds: 0, 1\nsteps: 2\nrule: 0\n\
                   logging\nloglevel: loud";
        assert!(QuadratureTask::parse(doc).is_err());
    }

    #[test]
    fn test_task_errors_come_from_ramlib() {
        let doc = "integral\nexpression: x+y\nvariable: x\nbounds: 0, 1\nsteps: 2\nrule: 0";
        let task = QuadratureTask::parse(doc).unwrap();
        let err = task.run(&SymbolicEvaluator::new()).unwrap_err();
        assert!(matches!(err, IntegrationError::InvalidArgument(_)));
    }

    #[test]
    fn test_task_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", TASK).unwrap();
        let task = QuadratureTask::from_file(file.path()).unwrap();
        assert_eq!(task.args[5], Expr::Const(3.0));
        assert!(QuadratureTask::from_file(Path::new("no/such/task.txt")).is_err());
    }
}
