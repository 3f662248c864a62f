//! Radio link frequency assignment (RLFAP) instances.
//!
//! An instance is three flat text files: `var<ID>.txt` mapping each variable
//! to a domain-table index, `dom<ID>.txt` listing the admissible frequencies
//! per table entry, and `ctr<ID>.txt` listing binary constraints of the form
//! `x y op k` with `op` either `=` (equality with offset, `|a - b| == k`) or
//! `>` (minimum separation, `|a - b| > k`). Each file starts with a count
//! header line.
//!
//! This module is the concrete instantiation of the solver's
//! [`BinaryRelation`] contract; nothing in the search strategies knows about
//! frequencies.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::{
    error::{Result, SolverError},
    solver::problem::{BinaryRelation, Problem, Value, VariableId},
};

/// The two constraint operators RLFAP instances use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Satisfied iff `|a - b| == k`.
    EqualityWithOffset,
    /// Satisfied iff `|a - b| > k`.
    MinimumSeparation,
}

/// The binary relation for an instance: an O(1) lookup from a directed
/// variable pair to its operator and threshold. Pairs without a constraint
/// are trivially compatible (the solver only evaluates neighbor pairs).
#[derive(Debug)]
pub struct RlfapRelation {
    table: HashMap<(VariableId, VariableId), (ConstraintOp, i32)>,
}

impl BinaryRelation for RlfapRelation {
    fn check(&self, a: VariableId, x: Value, b: VariableId, y: Value) -> bool {
        match self.table.get(&(a, b)) {
            Some((ConstraintOp::EqualityWithOffset, k)) => (x - y).abs() == *k,
            Some((ConstraintOp::MinimumSeparation, k)) => (x - y).abs() > *k,
            None => true,
        }
    }
}

/// A parsed instance, ready to be turned into a [`Problem`].
#[derive(Debug)]
pub struct RlfapInstance {
    domains: Vec<Vec<Value>>,
    edges: Vec<(VariableId, VariableId)>,
    table: HashMap<(VariableId, VariableId), (ConstraintOp, i32)>,
}

impl RlfapInstance {
    /// Loads `var<id>.txt`, `dom<id>.txt` and `ctr<id>.txt` from `dir`.
    pub fn load(dir: &Path, id: &str) -> Result<Self> {
        let read = |artifact: String| -> Result<(String, String)> {
            let path = dir.join(&artifact);
            let text = fs::read_to_string(&path).map_err(|source| SolverError::Io {
                artifact: path.display().to_string(),
                source,
            })?;
            Ok((artifact, text))
        };
        let (var_name, var_text) = read(format!("var{id}.txt"))?;
        let (dom_name, dom_text) = read(format!("dom{id}.txt"))?;
        let (ctr_name, ctr_text) = read(format!("ctr{id}.txt"))?;
        Self::parse(
            (var_name.as_str(), var_text.as_str()),
            (dom_name.as_str(), dom_text.as_str()),
            (ctr_name.as_str(), ctr_text.as_str()),
        )
    }

    /// Parses the three artifacts from in-memory text. Each argument is an
    /// `(artifact name, contents)` pair; the name is only used in errors.
    pub fn parse(
        var: (&str, &str),
        dom: (&str, &str),
        ctr: (&str, &str),
    ) -> Result<Self> {
        let variables = parse_variables(var.0, var.1)?;
        let domain_table = parse_domains(dom.0, dom.1)?;

        // Map external variable ids to dense indices in file order.
        let mut index_of: HashMap<i64, VariableId> = HashMap::new();
        let mut domains: Vec<Vec<Value>> = Vec::with_capacity(variables.len());
        for (line, (ext_id, dom_index)) in &variables {
            let Some(domain) = domain_table.get(dom_index) else {
                return Err(SolverError::Parse {
                    artifact: var.0.to_string(),
                    line: *line,
                    message: format!("variable {ext_id} references unknown domain {dom_index}"),
                }
                .into());
            };
            if index_of.insert(*ext_id, domains.len()).is_some() {
                return Err(SolverError::Parse {
                    artifact: var.0.to_string(),
                    line: *line,
                    message: format!("duplicate variable id {ext_id}"),
                }
                .into());
            }
            domains.push(domain.clone());
        }

        let mut edges = Vec::new();
        let mut table = HashMap::new();
        for (line, (ext_a, ext_b, op, k)) in parse_constraints(ctr.0, ctr.1)? {
            let resolve = |ext: i64| -> Result<VariableId> {
                index_of.get(&ext).copied().ok_or_else(|| {
                    SolverError::Parse {
                        artifact: ctr.0.to_string(),
                        line,
                        message: format!("constraint references unknown variable {ext}"),
                    }
                    .into()
                })
            };
            let a = resolve(ext_a)?;
            let b = resolve(ext_b)?;
            // Symmetric registration: the relation must answer for both
            // directions of the pair.
            let _ = table.insert((a, b), (op, k));
            let _ = table.insert((b, a), (op, k));
            edges.push((a, b));
        }

        Ok(Self {
            domains,
            edges,
            table,
        })
    }

    pub fn num_variables(&self) -> usize {
        self.domains.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.edges.len()
    }

    pub fn into_problem(self) -> Problem {
        let Self {
            domains,
            edges,
            table,
        } = self;
        Problem::new(domains, &edges, Box::new(RlfapRelation { table }))
    }
}

/// Data lines of an artifact, skipping the count header but keeping 1-based
/// line numbers for error reporting. Blank lines are ignored.
fn data_lines<'a>(
    artifact: &str,
    text: &'a str,
) -> Result<Vec<(usize, Vec<&'a str>)>> {
    let mut lines = Vec::new();
    let mut saw_header = false;
    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if !saw_header {
            // The header is a count line; only its well-formedness matters.
            let _ = parse_int(artifact, line, tokens[0])?;
            saw_header = true;
            continue;
        }
        lines.push((line, tokens));
    }
    Ok(lines)
}

fn parse_int(artifact: &str, line: usize, token: &str) -> Result<i64> {
    token.parse().map_err(|_| {
        SolverError::Parse {
            artifact: artifact.to_string(),
            line,
            message: format!("expected an integer, found {token:?}"),
        }
        .into()
    })
}

/// A value or threshold field; out-of-range integers are a parse error, not
/// a silent truncation.
fn parse_value(artifact: &str, line: usize, token: &str) -> Result<Value> {
    let wide = parse_int(artifact, line, token)?;
    Value::try_from(wide).map_err(|_| {
        SolverError::Parse {
            artifact: artifact.to_string(),
            line,
            message: format!("integer {wide} is out of range"),
        }
        .into()
    })
}

/// A non-negative index or count field.
fn parse_index(artifact: &str, line: usize, token: &str) -> Result<usize> {
    let wide = parse_int(artifact, line, token)?;
    usize::try_from(wide).map_err(|_| {
        SolverError::Parse {
            artifact: artifact.to_string(),
            line,
            message: format!("expected a non-negative integer, found {wide}"),
        }
        .into()
    })
}

/// `variable-id domain-index` pairs, in file order.
fn parse_variables(artifact: &str, text: &str) -> Result<Vec<(usize, (i64, usize))>> {
    let mut variables = Vec::new();
    for (line, tokens) in data_lines(artifact, text)? {
        if tokens.len() != 2 {
            return Err(SolverError::Parse {
                artifact: artifact.to_string(),
                line,
                message: format!("expected 2 fields, found {}", tokens.len()),
            }
            .into());
        }
        let ext_id = parse_int(artifact, line, tokens[0])?;
        let dom_index = parse_index(artifact, line, tokens[1])?;
        variables.push((line, (ext_id, dom_index)));
    }
    Ok(variables)
}

/// `index value-count v1 v2 ...` lines into a domain table.
fn parse_domains(artifact: &str, text: &str) -> Result<HashMap<usize, Vec<Value>>> {
    let mut table = HashMap::new();
    for (line, tokens) in data_lines(artifact, text)? {
        if tokens.len() < 2 {
            return Err(SolverError::Parse {
                artifact: artifact.to_string(),
                line,
                message: format!("expected at least 2 fields, found {}", tokens.len()),
            }
            .into());
        }
        let index = parse_index(artifact, line, tokens[0])?;
        let count = parse_index(artifact, line, tokens[1])?;
        let values: Vec<Value> = tokens[2..]
            .iter()
            .map(|token| parse_value(artifact, line, token))
            .collect::<Result<_>>()?;
        if values.len() != count {
            return Err(SolverError::Parse {
                artifact: artifact.to_string(),
                line,
                message: format!("domain {index} declares {count} values but lists {}", values.len()),
            }
            .into());
        }
        let _ = table.insert(index, values);
    }
    Ok(table)
}

/// `x y op k` constraint lines.
#[allow(clippy::type_complexity)]
fn parse_constraints(
    artifact: &str,
    text: &str,
) -> Result<Vec<(usize, (i64, i64, ConstraintOp, i32))>> {
    let mut constraints = Vec::new();
    for (line, tokens) in data_lines(artifact, text)? {
        if tokens.len() != 4 {
            return Err(SolverError::Parse {
                artifact: artifact.to_string(),
                line,
                message: format!("expected 4 fields, found {}", tokens.len()),
            }
            .into());
        }
        let a = parse_int(artifact, line, tokens[0])?;
        let b = parse_int(artifact, line, tokens[1])?;
        let op = match tokens[2] {
            "=" => ConstraintOp::EqualityWithOffset,
            ">" => ConstraintOp::MinimumSeparation,
            other => {
                return Err(SolverError::Parse {
                    artifact: artifact.to_string(),
                    line,
                    message: format!("unknown operator {other:?}"),
                }
                .into())
            }
        };
        let k = parse_value(artifact, line, tokens[3])?;
        constraints.push((line, (a, b, op, k)));
    }
    Ok(constraints)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::SolverError;

    const VAR: &str = "3\n1 0\n2 0\n3 0\n";
    const DOM: &str = "1\n0 2 1 2\n";
    const CTR: &str = "2\n1 2 > 0\n2 3 > 0\n";

    fn parse_reference() -> RlfapInstance {
        RlfapInstance::parse(("var.txt", VAR), ("dom.txt", DOM), ("ctr.txt", CTR)).unwrap()
    }

    #[test]
    fn parses_the_reference_instance() {
        let instance = parse_reference();
        assert_eq!(instance.num_variables(), 3);
        assert_eq!(instance.num_constraints(), 2);
        assert_eq!(instance.domains, vec![vec![1, 2], vec![1, 2], vec![1, 2]]);
    }

    #[test]
    fn relation_is_registered_symmetrically() {
        let problem = parse_reference().into_problem();
        // Minimum separation with k = 0 means the values must differ.
        assert!(!problem.relation_check(0, 5, 1, 5));
        assert!(!problem.relation_check(1, 5, 0, 5));
        assert!(problem.relation_check(0, 5, 1, 6));
    }

    #[test]
    fn equality_with_offset_semantics() {
        let instance = RlfapInstance::parse(
            ("var.txt", "2\n1 0\n2 0\n"),
            ("dom.txt", "1\n0 3 10 12 14\n"),
            ("ctr.txt", "1\n1 2 = 2\n"),
        )
        .unwrap();
        let problem = instance.into_problem();
        assert!(problem.relation_check(0, 10, 1, 12));
        assert!(problem.relation_check(0, 12, 1, 10));
        assert!(!problem.relation_check(0, 10, 1, 14));
    }

    #[test]
    fn wrong_token_count_names_artifact_and_line() {
        let err = RlfapInstance::parse(
            ("var7.txt", "1\n1 0 9\n"),
            ("dom.txt", DOM),
            ("ctr.txt", "0\n"),
        )
        .unwrap_err();
        match err.inner() {
            SolverError::Parse {
                artifact, line, ..
            } => {
                assert_eq!(artifact, "var7.txt");
                assert_eq!(*line, 2);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn non_integer_field_is_a_parse_error() {
        let err = RlfapInstance::parse(
            ("var.txt", "1\n1 0\n"),
            ("dom.txt", "1\n0 1 banana\n"),
            ("ctr.txt", "0\n"),
        )
        .unwrap_err();
        assert!(matches!(err.inner(), SolverError::Parse { .. }));
    }

    #[test]
    fn domain_count_mismatch_is_a_parse_error() {
        let err = RlfapInstance::parse(
            ("var.txt", "1\n1 0\n"),
            ("dom.txt", "1\n0 3 1 2\n"),
            ("ctr.txt", "0\n"),
        )
        .unwrap_err();
        assert!(matches!(err.inner(), SolverError::Parse { .. }));
    }

    #[test]
    fn out_of_range_frequency_is_a_parse_error() {
        let err = RlfapInstance::parse(
            ("var.txt", "1\n1 0\n"),
            ("dom.txt", "1\n0 1 4294967296\n"),
            ("ctr.txt", "0\n"),
        )
        .unwrap_err();
        match err.inner() {
            SolverError::Parse { artifact, line, .. } => {
                assert_eq!(artifact, "dom.txt");
                assert_eq!(*line, 2);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_threshold_is_a_parse_error() {
        let err = RlfapInstance::parse(
            ("var.txt", "2\n1 0\n2 0\n"),
            ("dom.txt", DOM),
            ("ctr.txt", "1\n1 2 > 9999999999\n"),
        )
        .unwrap_err();
        assert!(matches!(err.inner(), SolverError::Parse { .. }));
    }

    #[test]
    fn negative_domain_index_is_a_parse_error() {
        let err = RlfapInstance::parse(
            ("var.txt", "1\n1 -1\n"),
            ("dom.txt", DOM),
            ("ctr.txt", "0\n"),
        )
        .unwrap_err();
        assert!(matches!(err.inner(), SolverError::Parse { .. }));
    }

    #[test]
    fn unknown_constraint_operator_is_rejected() {
        let err = RlfapInstance::parse(
            ("var.txt", "2\n1 0\n2 0\n"),
            ("dom.txt", DOM),
            ("ctr.txt", "1\n1 2 < 0\n"),
        )
        .unwrap_err();
        assert!(matches!(err.inner(), SolverError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RlfapInstance::load(Path::new("/nonexistent"), "42").unwrap_err();
        assert!(matches!(err.inner(), SolverError::Io { .. }));
    }

    #[test]
    fn external_variable_ids_are_mapped_densely() {
        // Variable ids in the files need not be contiguous.
        let instance = RlfapInstance::parse(
            ("var.txt", "2\n100 0\n200 0\n"),
            ("dom.txt", DOM),
            ("ctr.txt", "1\n100 200 > 0\n"),
        )
        .unwrap();
        let problem = instance.into_problem();
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.neighbors(0), &[1]);
    }
}
