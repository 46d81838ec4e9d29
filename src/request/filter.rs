//! Filter expressions attached to a reporting request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A predicate on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operator")]
pub enum Filter {
    #[serde(rename = "=")]
    Equality { field: String, value: String },

    /// Membership: the column must take one of `values`.
    #[serde(rename = "in")]
    In { field: String, values: Vec<String> },

    #[serde(rename = "between")]
    Between {
        field: String,
        from: String,
        to: String,
    },

    #[serde(rename = "like")]
    Like { field: String, value: String },
}

impl Filter {
    pub fn equality(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Equality {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn in_values<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Filter::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn between(
        field: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Filter::Between {
            field: field.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Name of the filtered column.
    pub fn field(&self) -> &str {
        match self {
            Filter::Equality { field, .. }
            | Filter::In { field, .. }
            | Filter::Between { field, .. }
            | Filter::Like { field, .. } => field,
        }
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Equality { field, value } => write!(f, "{} = {}", field, quote(value)),
            Filter::In { field, values } => {
                let list: Vec<String> = values.iter().map(|v| quote(v)).collect();
                write!(f, "{} IN ({})", field, list.join(", "))
            }
            Filter::Between { field, from, to } => {
                write!(f, "{} BETWEEN {} AND {}", field, quote(from), quote(to))
            }
            Filter::Like { field, value } => write!(f, "{} LIKE {}", field, quote(value)),
        }
    }
}
