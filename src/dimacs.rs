//! Reader for the [DIMACS CNF](https://jix.github.io/varisat/manual/0.2.0/formats/dimacs.html) format

use crate::{Expr, Literal};
use anyhow::{bail, Context, Result};

/// Parse a DIMACS CNF file into an expression tree in CNF
///
/// ```rust
/// use uipsat::dimacs;
///
/// let expr = dimacs::parse("c example\np cnf 3 2\n1 -2 0\n2 3\n0\n").unwrap();
/// assert_eq!(expr.to_string(), "(x1 ∨ ¬x2) ∧ (x2 ∨ x3)");
/// ```
pub fn parse(input: &str) -> Result<Expr> {
    let mut header: Option<(usize, usize)> = None;
    let mut clauses = Vec::new();
    let mut current = Vec::new();

    for (lineno, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        // End marker used by SATLIB instances
        if line.starts_with('%') {
            break;
        }
        if let Some(rest) = line.strip_prefix('p') {
            header = Some(parse_header(rest).with_context(|| format!("Line {}", lineno + 1))?);
            continue;
        }
        for token in line.split_whitespace() {
            let value: i32 = token
                .parse()
                .with_context(|| format!("Line {}: invalid literal `{token}`", lineno + 1))?;
            if value != 0 {
                current.push(Expr::literal(Literal::new(value)));
                continue;
            }
            let Some(clause) = Expr::disjunction(std::mem::take(&mut current)) else {
                bail!("Line {}: empty clause", lineno + 1);
            };
            clauses.push(clause);
        }
    }
    if !current.is_empty() {
        bail!("Last clause is not terminated by 0");
    }

    if let Some((_, num_clauses)) = header {
        if num_clauses != clauses.len() {
            log::warn!(
                "Header declares {} clauses, but {} are found",
                num_clauses,
                clauses.len()
            );
        }
    }
    Expr::conjunction(clauses).context("Formula without clauses")
}

fn parse_header(rest: &str) -> Result<(usize, usize)> {
    let fields: Vec<&str> = rest.split_whitespace().collect();
    let [format, variables, clauses] = fields.as_slice() else {
        bail!("Malformed header `p{rest}`");
    };
    if *format != "cnf" {
        bail!("Unsupported format `{format}`");
    }
    Ok((
        variables.parse().context("Number of variables")?,
        clauses.parse().context("Number of clauses")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clause, flatten};

    #[test]
    fn clauses_in_order() {
        let expr = parse("p cnf 4 3\n1 2 0 -3 0\n4 -1 0\n").unwrap();
        assert_eq!(
            flatten(&expr).unwrap(),
            vec![clause![1, 2], clause![-3], clause![-1, 4]]
        );
    }

    #[test]
    fn satlib_end_marker() {
        let expr = parse("p cnf 1 1\n 1 0\n%\n0\n").unwrap();
        assert_eq!(flatten(&expr).unwrap(), vec![clause![1]]);
    }

    #[test]
    fn errors() {
        assert!(parse("").is_err());
        assert!(parse("c only comments\n").is_err());
        assert!(parse("1 2").is_err());
        assert!(parse("1 0 0").is_err());
        assert!(parse("1 a 0").is_err());
        assert!(parse("p dnf 1 1\n1 0").is_err());
        assert!(parse("p cnf 1\n1 0").is_err());
    }
}
