use super::query::{AtomicQuery, Query, Value};
use crate::error::Result;
use crate::session::Session;

/// Cross product of every multi-valued field.
///
/// `[genre: [Rock, Jazz], artist: Miles]` becomes
/// `[genre Rock artist Miles]` and `[genre Jazz artist Miles]`, first field
/// major. An empty query expands to nothing.
pub fn expand(query: &Query) -> Vec<AtomicQuery> {
    let mut constraints = query.constraints().iter();
    let Some(first) = constraints.next() else {
        return Vec::new();
    };

    let mut queries: Vec<AtomicQuery> = first
        .value
        .values()
        .iter()
        .map(|v| AtomicQuery::default().with(&first.field, v))
        .collect();

    for constraint in constraints {
        match &constraint.value {
            Value::Single(v) => {
                for q in &mut queries {
                    q.push(&constraint.field, v);
                }
            }
            Value::Multi(values) => {
                queries = queries
                    .iter()
                    .flat_map(|q| values.iter().map(move |v| q.with(&constraint.field, v)))
                    .collect();
            }
        }
    }

    queries
}

/// Run `op` once per atomic query and concatenate the results in
/// expansion order. The first failure aborts the whole run.
pub fn run_expanded<T, F>(query: &Query, mut op: F) -> Result<Vec<T>>
where
    F: FnMut(&AtomicQuery) -> Result<Vec<T>>,
{
    let mut results = Vec::new();
    for atomic in expand(query) {
        results.extend(op(&atomic)?);
    }
    Ok(results)
}

/// Values of `field` consistent with everything already in `query`
pub fn narrow_values(session: &mut dyn Session, query: &Query, field: &str) -> Result<Vec<String>> {
    if query.is_empty() {
        return session.list_values(field, &AtomicQuery::default());
    }
    run_expanded(query, |atomic| session.list_values(field, atomic))
}
