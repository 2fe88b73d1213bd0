use crate::error::{Error, Result};
use clap::ValueEnum;
use std::fmt;

/// How attribute and label tokens are turned into booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TokenPolicy {
    /// `"0"` is false, anything else is true.
    #[default]
    Permissive,
    /// Only `"0"` and `"1"` are accepted.
    Strict,
}

impl TokenPolicy {
    /// Converts a single token. `None` means the token was rejected.
    pub fn parse_token(self, token: &str) -> Option<bool> {
        let token = token.trim();
        match self {
            TokenPolicy::Permissive => Some(token != "0"),
            TokenPolicy::Strict => match token {
                "0" => Some(false),
                "1" => Some(true),
                _ => None,
            },
        }
    }
}

/// A single data point: a boolean attribute vector with an optional label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    attributes: Vec<bool>,
    label: Option<bool>,
}

impl Instance {
    pub fn new(attributes: Vec<bool>, label: Option<bool>) -> Self {
        Instance { attributes, label }
    }

    /// Parses one whitespace-separated row. When `labeled` is set the last
    /// token is the class label. `row` is only used for error reporting.
    pub fn parse(line: &str, labeled: bool, policy: TokenPolicy, row: usize) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(Error::MalformedRow {
                row,
                reason: "empty line".to_string(),
            });
        }
        if labeled && tokens.len() < 2 {
            return Err(Error::MalformedRow {
                row,
                reason: "labeled row needs an attribute and a label, found only one token"
                    .to_string(),
            });
        }

        let to_bool = |token: &str| {
            policy.parse_token(token).ok_or_else(|| Error::MalformedRow {
                row,
                reason: format!("unrecognized token {:?}", token),
            })
        };

        let (attribute_tokens, label) = match tokens.split_last() {
            Some((label, rest)) if labeled => (rest, Some(to_bool(*label)?)),
            _ => (&tokens[..], None),
        };

        let attributes = attribute_tokens
            .iter()
            .map(|token| to_bool(*token))
            .collect::<Result<Vec<_>>>()?;

        Ok(Instance { attributes, label })
    }

    pub fn attributes(&self) -> &[bool] {
        &self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn label(&self) -> Option<bool> {
        self.label
    }

    /// Returns a copy of this instance carrying `label`.
    pub fn with_label(&self, label: bool) -> Self {
        Instance {
            attributes: self.attributes.clone(),
            label: Some(label),
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<&str> = self
            .attributes
            .iter()
            .map(|&value| if value { "1" } else { "0" })
            .collect();
        write!(f, "[{}]", values.join(" "))?;
        match self.label {
            Some(label) => write!(f, " => {}", if label { "TRUE" } else { "FALSE" }),
            None => write!(f, " => ?"),
        }
    }
}
