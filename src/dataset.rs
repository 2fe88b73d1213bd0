use crate::error::{Error, Result};
use crate::instance::{Instance, TokenPolicy};

/// Options for turning text rows into a [`Dataset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub policy: TokenPolicy,
}

/// An ordered set of instances that all share one attribute count.
///
/// Each instance remembers the 1-based source row it came from so that
/// skipped rows and predictions can be reported against the input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    instances: Vec<Instance>,
    rows: Vec<usize>,
    num_attributes: Option<usize>,
}

/// The outcome of parsing a batch of rows: the dataset plus every row that
/// was rejected along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRows {
    pub dataset: Dataset,
    pub skipped: Vec<Error>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty dataset whose instances must have `num_attributes` attributes.
    pub fn with_attributes(num_attributes: usize) -> Self {
        Dataset {
            num_attributes: Some(num_attributes),
            ..Self::default()
        }
    }

    /// Parses labeled or unlabeled `rows` one by one. Rows that fail to
    /// parse, or whose attribute count differs from the first accepted row,
    /// are logged and skipped.
    pub fn from_rows<I, S>(rows: I, labeled: bool, options: ParseOptions) -> ParsedRows
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = ParsedRows::default();
        for (row, result) in parse_each(rows, labeled, options) {
            if let Err(err) = result.and_then(|instance| parsed.dataset.push(row, instance)) {
                skip(&mut parsed.skipped, row, err);
            }
        }
        log_parsed(&parsed, labeled);
        parsed
    }

    /// Parses unlabeled `rows` that must each carry `num_attributes`
    /// attributes. Malformed rows are logged and skipped, but a row of any
    /// other width fails the whole batch.
    pub fn from_unlabeled_rows<I, S>(
        rows: I,
        num_attributes: usize,
        options: ParseOptions,
    ) -> Result<ParsedRows>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = ParsedRows {
            dataset: Dataset::with_attributes(num_attributes),
            skipped: Vec::new(),
        };
        for (row, result) in parse_each(rows, false, options) {
            match result.and_then(|instance| parsed.dataset.push(row, instance)) {
                Ok(()) => {}
                Err(err @ Error::DimensionMismatch { .. }) => return Err(err),
                Err(err) => skip(&mut parsed.skipped, row, err),
            }
        }
        log_parsed(&parsed, false);
        Ok(parsed)
    }

    /// Builds a dataset from instances numbered from row 1.
    pub fn from_instances(instances: Vec<Instance>) -> Result<Self> {
        let mut dataset = Dataset::new();
        for (i, instance) in instances.into_iter().enumerate() {
            dataset.push(i + 1, instance)?;
        }
        Ok(dataset)
    }

    /// Appends an instance read from source row `row`. Unless the dataset
    /// was created with a fixed width, the first instance fixes the
    /// attribute count for the rest of the dataset.
    pub fn push(&mut self, row: usize, instance: Instance) -> Result<()> {
        if instance.is_empty() {
            return Err(Error::MalformedRow {
                row,
                reason: "instance has no attributes".to_string(),
            });
        }
        match self.num_attributes {
            Some(expected) if instance.len() != expected => {
                return Err(Error::DimensionMismatch {
                    row: Some(row),
                    expected,
                    found: instance.len(),
                });
            }
            Some(_) => {}
            None => self.num_attributes = Some(instance.len()),
        }
        self.instances.push(instance);
        self.rows.push(row);
        Ok(())
    }

    /// Attribute count shared by every instance, `None` until fixed.
    pub fn num_attributes(&self) -> Option<usize> {
        self.num_attributes
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    /// Iterates `(source row, instance)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Instance)> + '_ {
        self.rows.iter().copied().zip(self.instances.iter())
    }
}

fn parse_each<I, S>(
    rows: I,
    labeled: bool,
    options: ParseOptions,
) -> impl Iterator<Item = (usize, Result<Instance>)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rows.into_iter().enumerate().map(move |(i, line)| {
        let row = i + 1;
        (row, Instance::parse(line.as_ref(), labeled, options.policy, row))
    })
}

fn skip(skipped: &mut Vec<Error>, row: usize, err: Error) {
    tracing::warn!(row, error = %err, "skipping row");
    skipped.push(err);
}

fn log_parsed(parsed: &ParsedRows, labeled: bool) {
    tracing::info!(
        instances = parsed.dataset.len(),
        skipped = parsed.skipped.len(),
        labeled,
        "parsed rows"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_fixes_the_attribute_count() {
        let parsed = Dataset::from_rows(
            ["1 0 1", "1 1 1 0", "0 0 0"],
            true,
            ParseOptions::default(),
        );
        assert_eq!(parsed.dataset.len(), 2);
        assert_eq!(parsed.dataset.num_attributes(), Some(2));
        assert_eq!(
            parsed.skipped,
            vec![Error::DimensionMismatch {
                row: Some(2),
                expected: 2,
                found: 3,
            }]
        );
    }

    #[test]
    fn malformed_rows_are_skipped_with_their_row_numbers() {
        let rows = vec!["1 0 1", "", "1", "0 1 0"];
        let parsed = Dataset::from_rows(&rows, true, ParseOptions::default());

        let skipped: Vec<usize> = parsed
            .skipped
            .iter()
            .map(|err| match err {
                Error::MalformedRow { row, .. } => *row,
                other => panic!("unexpected error {:?}", other),
            })
            .collect();
        assert_eq!(skipped, vec![2, 3]);

        let rows: Vec<usize> = parsed.dataset.iter().map(|(row, _)| row).collect();
        assert_eq!(rows, vec![1, 4]);
    }

    #[test]
    fn strict_policy_skips_rows_with_unknown_tokens() {
        let options = ParseOptions {
            policy: TokenPolicy::Strict,
        };
        let parsed = Dataset::from_rows(["1 0 1", "1 x 1"], true, options);
        assert_eq!(parsed.dataset.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);
    }

    #[test]
    fn empty_input_gives_empty_dataset() {
        let parsed = Dataset::from_rows(Vec::<String>::new(), false, ParseOptions::default());
        assert!(parsed.dataset.is_empty());
        assert_eq!(parsed.dataset.num_attributes(), None);
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn from_instances_rejects_mixed_lengths() {
        let err = Dataset::from_instances(vec![
            Instance::new(vec![true], Some(true)),
            Instance::new(vec![true, false], Some(false)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                row: Some(2),
                expected: 1,
                found: 2,
            }
        );
    }

    #[test]
    fn instances_without_attributes_are_rejected() {
        let err = Dataset::from_instances(vec![Instance::new(vec![], Some(true))]).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { row: 1, .. }));
        assert_eq!(
            Dataset::new()
                .push(3, Instance::new(vec![], None))
                .unwrap_err(),
            Error::MalformedRow {
                row: 3,
                reason: "instance has no attributes".to_string(),
            }
        );
    }

    #[test]
    fn fixed_width_rejects_a_wrong_first_row() {
        for rows in [["1 0 1", "1 0"], ["1 0", "1 0 1"]] {
            let err = Dataset::from_unlabeled_rows(rows, 2, ParseOptions::default()).unwrap_err();
            assert!(matches!(
                err,
                Error::DimensionMismatch {
                    expected: 2,
                    found: 3,
                    ..
                }
            ));
        }
    }

    #[test]
    fn fixed_width_still_skips_malformed_rows() {
        let parsed = Dataset::from_unlabeled_rows(["1 0", "", "0 1"], 2, ParseOptions::default())
            .unwrap();
        assert_eq!(parsed.dataset.len(), 2);
        assert!(matches!(
            parsed.skipped.as_slice(),
            [Error::MalformedRow { row: 2, .. }]
        ));
    }
}
