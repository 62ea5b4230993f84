//! Python bindings for revex
//!
//! This module exposes compiled reversible patterns to Python. Values are
//! passed as dicts mapping a group name (or `""` for positional groups) to a
//! string or a list of strings.

use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::collections::HashMap as StdHashMap;

use revex_lib::{RevertError, TemplateMode, ValueBag};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

fn revert_error(e: RevertError) -> PyErr {
    match e {
        RevertError::MissingVariable { .. } => PyErr::new::<PyKeyError, _>(e.to_string()),
        RevertError::Mismatch(_) => value_error(e),
    }
}

fn parse_mode(mode: &str) -> PyResult<TemplateMode> {
    match mode {
        "host" => Ok(TemplateMode::Host),
        "path" => Ok(TemplateMode::Path),
        "prefix" => Ok(TemplateMode::PathPrefix),
        other => Err(value_error(format!(
            "unknown mode {other:?}, expected \"host\", \"path\" or \"prefix\""
        ))),
    }
}

/// Build a bag from a dict of `str -> str | list[str]`
fn to_bag(values: &Bound<'_, PyDict>) -> PyResult<ValueBag> {
    let mut bag = ValueBag::new();
    for (key, value) in values.iter() {
        let key: String = key.extract()?;
        if let Ok(single) = value.extract::<String>() {
            bag.add(key, single);
        } else {
            let many: Vec<String> = value.extract()?;
            bag.extend(many.into_iter().map(|v| (key.clone(), v)));
        }
    }
    Ok(bag)
}

/// Store what is left of the pattern's keys back into the dict
///
/// Keys with no values left are deleted. Keys the pattern does not use are
/// not touched.
fn write_back(values: &Bound<'_, PyDict>, bag: &ValueBag, keys: &[&str]) -> PyResult<()> {
    for &key in keys {
        let left = bag.get_all(key);
        if left.is_empty() {
            if values.contains(key)? {
                values.del_item(key)?;
            }
        } else {
            values.set_item(key, left)?;
        }
    }
    Ok(())
}

/// A compiled reversible pattern
#[pyclass(name = "ReverseRegex")]
pub struct PyReverseRegex {
    inner: revex_lib::ReverseRegex,
}

#[pymethods]
impl PyReverseRegex {
    /// Compile a regex pattern
    #[new]
    fn new(pattern: &str) -> PyResult<Self> {
        let inner = revex_lib::compile(pattern).map_err(value_error)?;
        Ok(PyReverseRegex { inner })
    }

    /// Compile a brace template such as `/users/{id:[0-9]+}`
    #[staticmethod]
    #[pyo3(signature = (template, mode="path", strict_slash=false))]
    fn from_template(template: &str, mode: &str, strict_slash: bool) -> PyResult<Self> {
        let inner = revex_lib::compile_template(template, parse_mode(mode)?, strict_slash)
            .map_err(value_error)?;
        Ok(PyReverseRegex { inner })
    }

    /// Check if the pattern matches the string
    fn is_match(&self, string: &str) -> bool {
        self.inner.is_match(string)
    }

    /// Values of the outermost groups, or None if the string does not match
    fn values(&self, string: &str) -> Option<StdHashMap<String, Vec<String>>> {
        let bag = self.inner.values(string)?;
        Some(
            bag.iter()
                .map(|(key, queue)| (key.to_string(), queue.iter().cloned().collect()))
                .collect(),
        )
    }

    /// Build a string from values without checking it
    ///
    /// Used values are removed from the dict. What is left of a key the
    /// pattern uses is stored back as a list, and used-up keys are deleted.
    /// On `KeyError` the dict is not modified.
    fn revert(&self, values: &Bound<'_, PyDict>) -> PyResult<String> {
        let mut bag = to_bag(values)?;
        let reverted = self.inner.revert(&mut bag).map_err(revert_error)?;
        write_back(values, &bag, &self.inner.group_names())?;
        Ok(reverted)
    }

    /// Build a string from values and check that it matches
    ///
    /// Values are consumed as in `revert`, even when the check fails.
    fn revert_valid(&self, values: &Bound<'_, PyDict>) -> PyResult<String> {
        let mut bag = to_bag(values)?;
        let reverted = self.inner.revert_valid(&mut bag);
        if !matches!(reverted, Err(RevertError::MissingVariable { .. })) {
            write_back(values, &bag, &self.inner.group_names())?;
        }
        reverted.map_err(revert_error)
    }

    /// The pattern as given
    #[getter]
    fn pattern(&self) -> &str {
        self.inner.as_str()
    }

    /// The reverse template, with `{}` for each group
    #[getter]
    fn template(&self) -> String {
        self.inner.template().to_string()
    }

    /// Names of the outermost groups, `""` for positional ones
    #[getter]
    fn groups(&self) -> Vec<String> {
        self.inner.group_names().into_iter().map(String::from).collect()
    }

    #[getter]
    fn indices(&self) -> Vec<usize> {
        self.inner.indices()
    }

    fn __repr__(&self) -> String {
        format!("ReverseRegex({:?})", self.inner.as_str())
    }
}

/// Compile a regex pattern
#[pyfunction]
fn compile(pattern: &str) -> PyResult<PyReverseRegex> {
    PyReverseRegex::new(pattern)
}

/// Convert a brace template to regex source
#[pyfunction(signature = (template, mode="path", strict_slash=false))]
fn translate(template: &str, mode: &str, strict_slash: bool) -> PyResult<String> {
    revex_lib::translate(template, parse_mode(mode)?, strict_slash).map_err(value_error)
}

/// Revex Python module
#[pymodule(name = "revex")]
fn revex(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyReverseRegex>()?;
    m.add_function(wrap_pyfunction!(compile, m)?)?;
    m.add_function(wrap_pyfunction!(translate, m)?)?;
    Ok(())
}
