//! Inclusion rules: an ordered forest of `{ key, include }` entries.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TrimError;

/// One inclusion directive. An empty `include` keeps the key's whole value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
    /// Matched against the text of mapping keys exactly as written, so
    /// `1.50`, `0x1F` and `True` are not normalised.
    pub key: String,
    #[serde(
        default,
        deserialize_with = "nullable_rules",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub include: Vec<Rule>,
}

impl Rule {
    pub fn leaf(key: impl Into<String>) -> Self {
        Rule {
            key: key.into(),
            include: Vec::new(),
        }
    }

    pub fn nested(key: impl Into<String>, include: Vec<Rule>) -> Self {
        Rule {
            key: key.into(),
            include,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.include.is_empty()
    }
}

#[derive(Deserialize)]
struct RuleDocument {
    include: Vec<Rule>,
}

/// Parses rule text of the form `include: [{ key, include: [...] }, ...]`.
///
/// Other top-level fields (`input`, `output`, `cache`) are ignored here.
pub fn parse_rules(text: &str) -> Result<Vec<Rule>, TrimError> {
    let doc: RuleDocument = serde_yaml::from_str(text)?;
    Ok(doc.include)
}

/// Indented outline of a rule forest, one key per line.
pub fn outline(rules: &[Rule]) -> Vec<String> {
    fn walk(rules: &[Rule], depth: usize, out: &mut Vec<String>) {
        for rule in rules {
            out.push(format!("{}{}", "  ".repeat(depth), rule.key));
            walk(&rule.include, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    walk(rules, 0, &mut out);
    out
}

/// Counts every rule in the forest, nested ones included.
pub fn count(rules: &[Rule]) -> usize {
    rules.iter().map(|r| 1 + count(&r.include)).sum()
}

fn nullable_rules<'de, D>(deserializer: D) -> Result<Vec<Rule>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Rule>>::deserialize(deserializer)?.unwrap_or_default())
}
