use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::instance::Instance;

/// Table slot for a boolean class or attribute value.
#[inline]
fn slot(value: bool) -> usize {
    value as usize
}

/// Per-class attribute value counts gathered from a labeled dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    // counts[class][attribute][value]
    counts: [Vec<[usize; 2]>; 2],
    class_counts: [usize; 2],
}

impl FrequencyTable {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let num_attributes = match dataset.num_attributes() {
            Some(n) if !dataset.is_empty() => n,
            _ => return Err(Error::EmptyDataset { context: "training" }),
        };

        let mut counts = [vec![[0; 2]; num_attributes], vec![[0; 2]; num_attributes]];
        let mut class_counts = [0; 2];

        for (row, instance) in dataset.iter() {
            let label = instance.label().ok_or_else(|| Error::MalformedRow {
                row,
                reason: "training row has no label".to_string(),
            })?;

            class_counts[slot(label)] += 1;
            for (j, &value) in instance.attributes().iter().enumerate() {
                counts[slot(label)][j][slot(value)] += 1;
            }
        }

        tracing::info!(
            instances = dataset.len(),
            attributes = num_attributes,
            negatives = class_counts[0],
            positives = class_counts[1],
            "built frequency table"
        );

        Ok(FrequencyTable {
            counts,
            class_counts,
        })
    }

    pub fn count(&self, class: bool, attribute: usize, value: bool) -> usize {
        self.counts[slot(class)][attribute][slot(value)]
    }

    /// Number of training instances labeled `class`.
    pub fn class_count(&self, class: bool) -> usize {
        self.class_counts[slot(class)]
    }

    pub fn total(&self) -> usize {
        self.class_counts[0] + self.class_counts[1]
    }

    pub fn num_attributes(&self) -> usize {
        self.counts[0].len()
    }
}

/// Class priors and per-class attribute-conditional probabilities.
///
/// Built once by [`NaiveBayesClassifier::train`] and only read afterwards, so
/// a single model can serve any number of concurrent `classify` calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityModel {
    class_priors: [f64; 2],
    // conditional[class][attribute][value]
    conditional: [Vec<[f64; 2]>; 2],
}

impl ProbabilityModel {
    /// Estimates probabilities from `table`, adding `smoothing` to every
    /// count. A smoothing of zero gives the raw maximum-likelihood estimate.
    pub fn from_frequencies(table: &FrequencyTable, smoothing: f64) -> Result<Self> {
        if !smoothing.is_finite() || smoothing < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "smoothing must be a finite non-negative number, got {}",
                smoothing
            )));
        }

        for class in [false, true] {
            if table.class_count(class) == 0 {
                return Err(Error::InsufficientData(format!(
                    "no training instances labeled {}",
                    class
                )));
            }
        }

        // Calculate the conditional probabilities:
        let mut conditional = [Vec::new(), Vec::new()];
        for class in [false, true] {
            let probabilities = &mut conditional[slot(class)];
            for j in 0..table.num_attributes() {
                let num_false = table.count(class, j, false) as f64;
                let num_true = table.count(class, j, true) as f64;
                // Never zero: every instance of `class` contributes one value.
                let total = num_false + num_true + 2.0 * smoothing;
                let p_false = (num_false + smoothing) / total;
                let p_true = (num_true + smoothing) / total;
                tracing::debug!(class, attribute = j, p_false, p_true, "conditional probability");
                probabilities.push([p_false, p_true]);
            }
        }

        // Calculate the class priors:
        let total = table.total() as f64;
        let class_priors = [
            table.class_count(false) as f64 / total,
            table.class_count(true) as f64 / total,
        ];
        tracing::info!(
            prior_false = class_priors[0],
            prior_true = class_priors[1],
            "trained model"
        );

        Ok(ProbabilityModel {
            class_priors,
            conditional,
        })
    }

    /// `[P(false), P(true)]`.
    pub fn class_priors(&self) -> [f64; 2] {
        self.class_priors
    }

    /// P(attribute = value | class).
    pub fn conditional(&self, class: bool, attribute: usize, value: bool) -> f64 {
        self.conditional[slot(class)][attribute][slot(value)]
    }

    pub fn num_attributes(&self) -> usize {
        self.conditional[0].len()
    }

    /// Unnormalized posterior scores `[score(false), score(true)]`.
    ///
    /// The evidence term is left out since it is the same for both classes.
    pub fn scores(&self, instance: &Instance) -> Result<[f64; 2]> {
        if instance.len() != self.num_attributes() {
            return Err(Error::DimensionMismatch {
                row: None,
                expected: self.num_attributes(),
                found: instance.len(),
            });
        }

        let score = |class: bool| {
            let probabilities = &self.conditional[slot(class)];
            instance
                .attributes()
                .iter()
                .zip(probabilities)
                .fold(self.class_priors[slot(class)], |acc, (&value, p)| {
                    acc * p[slot(value)]
                })
        };

        Ok([score(false), score(true)])
    }

    /// Predicts the label of `instance`. An exact tie goes to `false`.
    pub fn classify(&self, instance: &Instance) -> Result<bool> {
        let [score_false, score_true] = self.scores(instance)?;
        Ok(score_false < score_true)
    }

    /// Classifies each instance independently, in order. A dimension
    /// mismatch reports the 1-based position of the offending instance.
    pub fn classify_batch(&self, instances: &[Instance]) -> Result<Vec<bool>> {
        if instances.is_empty() {
            return Err(Error::EmptyDataset {
                context: "classification",
            });
        }

        instances
            .iter()
            .enumerate()
            .map(|(i, instance)| self.classify(instance).map_err(|err| err.at(i + 1)))
            .collect()
    }

    /// Classifies every instance of `dataset`, keeping its source rows.
    pub fn predict(&self, dataset: &Dataset) -> Result<Vec<Prediction>> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset {
                context: "classification",
            });
        }

        dataset
            .iter()
            .map(|(row, instance)| {
                let scores = self.scores(instance).map_err(|err| err.at(row))?;
                let label = scores[0] < scores[1];
                tracing::debug!(
                    row,
                    score_false = scores[0],
                    score_true = scores[1],
                    label,
                    "classified instance"
                );
                Ok(Prediction {
                    row,
                    instance: instance.with_label(label),
                    label,
                    scores,
                })
            })
            .collect()
    }
}

/// A classified instance. `instance` is a copy of the input carrying the
/// predicted label; the input itself is left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub row: usize,
    pub instance: Instance,
    pub label: bool,
    pub scores: [f64; 2],
}

/// Trains a [`ProbabilityModel`] from a labeled [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaiveBayesClassifier {
    smoothing: f64,
}

impl Default for NaiveBayesClassifier {
    fn default() -> Self {
        NaiveBayesClassifier { smoothing: 0.0 }
    }
}

impl NaiveBayesClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the additive smoothing constant. Zero (the default) disables it.
    pub fn smoothing(mut self, alpha: f64) -> Self {
        self.smoothing = alpha;
        self
    }

    pub fn train(&self, dataset: &Dataset) -> Result<ProbabilityModel> {
        let frequencies = FrequencyTable::from_dataset(dataset)?;
        ProbabilityModel::from_frequencies(&frequencies, self.smoothing)
    }
}
