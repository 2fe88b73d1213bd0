//! Binary Naive Bayes classification over fixed-length boolean feature vectors.
//!
//! Rows are whitespace-separated tokens where `"0"` is false and anything
//! else is true; labeled rows carry the class label as their last token.
//!
//! ```
//! use binary_bayes::{classify, train, NaiveBayesClassifier, ParseOptions};
//!
//! let rows = ["1 0 1", "0 0 0", "1 1 1", "0 1 0"];
//! let model = train(rows, ParseOptions::default(), &NaiveBayesClassifier::new())
//!     .unwrap()
//!     .model;
//! let result = classify(["1 0"], &model, ParseOptions::default()).unwrap();
//! assert!(result.predictions[0].label);
//! ```

pub mod bayes;
pub mod dataset;
pub mod error;
pub mod instance;
pub mod io;

pub use bayes::{FrequencyTable, NaiveBayesClassifier, Prediction, ProbabilityModel};
pub use dataset::{Dataset, ParseOptions, ParsedRows};
pub use error::{Error, Result};
pub use instance::{Instance, TokenPolicy};

/// A model trained from text rows, plus the rows that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Training {
    pub model: ProbabilityModel,
    pub skipped: Vec<Error>,
}

/// Predictions for a batch of unlabeled rows, plus the rows that were skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub predictions: Vec<Prediction>,
    pub skipped: Vec<Error>,
}

/// Parses labeled `rows` and trains a model on them. Malformed rows are
/// logged, left out of training and returned in [`Training::skipped`].
pub fn train<I, S>(
    rows: I,
    options: ParseOptions,
    classifier: &NaiveBayesClassifier,
) -> Result<Training>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ParsedRows { dataset, skipped } = Dataset::from_rows(rows, true, options);
    let model = classifier.train(&dataset)?;
    Ok(Training { model, skipped })
}

/// Parses unlabeled `rows` and predicts a label for each one. Malformed
/// rows are skipped, but any row whose width differs from the model's fails
/// the whole call.
pub fn classify<I, S>(
    rows: I,
    model: &ProbabilityModel,
    options: ParseOptions,
) -> Result<Classification>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ParsedRows { dataset, skipped } =
        Dataset::from_unlabeled_rows(rows, model.num_attributes(), options)?;
    let predictions = model.predict(&dataset)?;
    Ok(Classification {
        predictions,
        skipped,
    })
}
