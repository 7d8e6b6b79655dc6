use crate::error::Result;
use crate::picker::{Picker, Selection};
use tracing::debug;

/// Pseudo-field matching any tag
pub const ANY_FIELD: &str = "any";

/// One accepted value, or several alternatives for the same field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Single(String),
    Multi(Vec<String>),
}

impl Value {
    /// `None` for an empty pick, `Single` for exactly one value
    pub fn from_choices(mut choices: Vec<String>) -> Option<Self> {
        match choices.len() {
            0 => None,
            1 => choices.pop().map(Value::Single),
            _ => Some(Value::Multi(choices)),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            Value::Single(v) => std::slice::from_ref(v),
            Value::Multi(vs) => vs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub field: String,
    pub value: Value,
}

/// Ordered constraint list; a field may appear more than once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    constraints: Vec<Constraint>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, value: Value) {
        self.constraints.push(Constraint {
            field: field.into(),
            value,
        });
    }

    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.push(field, value);
        self
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

/// Fully concrete `(field, value)` terms, what one backend call accepts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomicQuery {
    terms: Vec<(String, String)>,
}

impl AtomicQuery {
    pub fn from_terms(terms: Vec<(String, String)>) -> Self {
        Self { terms }
    }

    pub fn push(&mut self, field: &str, value: &str) {
        self.terms.push((field.to_string(), value.to_string()));
    }

    pub fn with(&self, field: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.push(field, value);
        next
    }

    pub fn terms(&self) -> &[(String, String)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Interactive filter construction.
///
/// Each round asks for a field, then for its value(s). Values on offer are
/// narrowed by everything chosen so far, so picking `Genre: Jazz` first
/// only lists jazz artists afterwards.
pub struct QueryBuilder {
    fields: Vec<String>,
    free_text_fields: Vec<String>,
}

impl QueryBuilder {
    pub fn new(fields: Vec<String>, free_text_fields: Vec<String>) -> Self {
        Self {
            fields,
            free_text_fields,
        }
    }

    fn accepts_free_text(&self, field: &str) -> bool {
        self.free_text_fields
            .iter()
            .any(|f| f.eq_ignore_ascii_case(field))
    }

    /// Extend `existing` until the user cancels the field prompt.
    ///
    /// `narrow(query, field)` lists the values of `field` that still match
    /// `query`. Callers must check `is_empty()` on the result; the query
    /// comes back unchanged when the first prompt is cancelled.
    pub fn build<N>(&self, picker: &mut dyn Picker, existing: Query, mut narrow: N) -> Result<Query>
    where
        N: FnMut(&Query, &str) -> Result<Vec<String>>,
    {
        let mut query = existing;
        let mut types = vec!["Any".to_string()];
        types.extend(self.fields.iter().cloned());

        loop {
            let label = match picker.pick(&types, "Type:", false)? {
                Selection::Cancelled => break,
                Selection::Empty => continue,
                Selection::Chosen(chosen) => chosen.into_iter().next().unwrap_or_default(),
            };
            let field = label.to_lowercase();

            let picked = if field == ANY_FIELD {
                picker.ask(&[], "Any tag")?
            } else {
                let mut candidates = narrow(&query, &field)?;
                candidates.sort();
                candidates.dedup();
                let prompt = format!("{}:", label);
                picker.pick(&candidates, &prompt, self.accepts_free_text(&field))?
            };

            let Selection::Chosen(values) = picked else {
                continue;
            };
            if let Some(value) = Value::from_choices(values) {
                debug!("filter += {} = {:?}", field, value);
                query.push(field, value);
            }
        }

        Ok(query)
    }
}
