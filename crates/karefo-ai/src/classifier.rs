//! Pre-trained word classifiers.
//!
//! Two model families are supported, both loaded from a JSON artifact tagged
//! by `kind`:
//!
//! - `linear`: one weight row per class, top score wins. Covers logistic
//!   regression, linear SVMs, and multinomial naive Bayes exported as log
//!   probabilities.
//! - `centroid`: one unit vector per label, nearest by cosine similarity wins.

use std::collections::BTreeMap;

use karefo_core::Label;
use serde::Deserialize;

use crate::error::PredictionError;
use crate::vectorizer::SparseVector;

/// Maps a feature vector to a single top label.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &SparseVector) -> Result<Label, PredictionError>;
}

/// Any classifier that can be loaded from disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    Linear(LinearClassifier),
    Centroid(CentroidClassifier),
}

impl ClassifierModel {
    /// Labels the model can emit.
    pub fn classes(&self) -> Vec<&str> {
        match self {
            Self::Linear(m) => m.classes.iter().map(|c| c.as_str()).collect(),
            Self::Centroid(m) => m.centroids.keys().map(|c| c.as_str()).collect(),
        }
    }

    /// Feature dimensionality expected by the model.
    pub fn dim(&self) -> usize {
        match self {
            Self::Linear(m) => m.dim(),
            Self::Centroid(m) => m.dim(),
        }
    }
}

impl Classifier for ClassifierModel {
    fn predict(&self, features: &SparseVector) -> Result<Label, PredictionError> {
        match self {
            Self::Linear(m) => m.predict(features),
            Self::Centroid(m) => m.predict(features),
        }
    }
}

// ── Linear ──

#[derive(Debug, Clone, Deserialize)]
pub struct RawLinear {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f32>>,
    pub intercept: Vec<f32>,
}

/// Linear decision function `coef · x + intercept`.
///
/// With two classes and a single weight row the model is binary: a positive
/// score selects `classes[1]`, anything else `classes[0]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawLinear")]
pub struct LinearClassifier {
    classes: Vec<String>,
    coef: Vec<Vec<f32>>,
    intercept: Vec<f32>,
}

impl TryFrom<RawLinear> for LinearClassifier {
    type Error = String;

    fn try_from(raw: RawLinear) -> Result<Self, Self::Error> {
        if raw.classes.is_empty() {
            return Err("linear model has no classes".into());
        }

        let binary = raw.classes.len() == 2 && raw.coef.len() == 1;
        if !binary && raw.coef.len() != raw.classes.len() {
            return Err(format!(
                "{} weight rows for {} classes",
                raw.coef.len(),
                raw.classes.len()
            ));
        }
        if raw.intercept.len() != raw.coef.len() {
            return Err(format!(
                "{} intercepts for {} weight rows",
                raw.intercept.len(),
                raw.coef.len()
            ));
        }

        let dim = raw.coef[0].len();
        if let Some(row) = raw.coef.iter().position(|r| r.len() != dim) {
            return Err(format!(
                "weight row {row} has {} features, expected {dim}",
                raw.coef[row].len()
            ));
        }
        for (row, weights) in raw.coef.iter().enumerate() {
            ensure_finite(weights, || format!("weight row {row}"))?;
        }
        ensure_finite(&raw.intercept, || "intercept".to_string())?;

        Ok(Self {
            classes: raw.classes,
            coef: raw.coef,
            intercept: raw.intercept,
        })
    }
}

impl LinearClassifier {
    pub fn dim(&self) -> usize {
        self.coef.first().map_or(0, |r| r.len())
    }

    /// Raw decision scores, one per weight row.
    pub fn decision_function(
        &self,
        features: &SparseVector,
    ) -> Result<Vec<f32>, PredictionError> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| Ok(features.dot(row)? + b))
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &SparseVector) -> Result<Label, PredictionError> {
        let scores = self.decision_function(features)?;
        if scores.iter().any(|s| s.is_nan()) {
            return Err(PredictionError::NoScore);
        }

        if scores.len() == 1 && self.classes.len() == 2 {
            let idx = usize::from(scores[0] > 0.0);
            return Ok(Label::new(self.classes[idx].as_str()));
        }

        // First maximum wins on ties, so prediction is deterministic.
        let mut best: Option<(usize, f32)> = None;
        for (i, &score) in scores.iter().enumerate() {
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((i, score));
            }
        }

        let (idx, _) = best.ok_or(PredictionError::EmptyModel)?;
        Ok(Label::new(self.classes[idx].as_str()))
    }
}

// ── Centroid ──

#[derive(Debug, Clone, Deserialize)]
pub struct RawCentroid {
    pub centroids: BTreeMap<String, Vec<f32>>,
}

/// Nearest-centroid classifier.
///
/// Centroids are L2-normalized at load time; the input is normalized per
/// call, so the dot product is the cosine similarity.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawCentroid")]
pub struct CentroidClassifier {
    centroids: BTreeMap<String, Vec<f32>>,
    dim: usize,
}

impl TryFrom<RawCentroid> for CentroidClassifier {
    type Error = String;

    fn try_from(raw: RawCentroid) -> Result<Self, Self::Error> {
        let dim = raw
            .centroids
            .values()
            .next()
            .map(|v| v.len())
            .ok_or("centroid model has no classes")?;

        let mut centroids = BTreeMap::new();
        for (label, mut centroid) in raw.centroids {
            if centroid.len() != dim {
                return Err(format!(
                    "centroid '{label}' has {} features, expected {dim}",
                    centroid.len()
                ));
            }
            ensure_finite(&centroid, || format!("centroid '{label}'"))?;
            normalize(&mut centroid);
            centroids.insert(label, centroid);
        }

        Ok(Self { centroids, dim })
    }
}

impl CentroidClassifier {
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Best label and its cosine similarity.
    pub fn best_match(&self, features: &SparseVector) -> Result<(String, f32), PredictionError> {
        if self.centroids.is_empty() {
            return Err(PredictionError::EmptyModel);
        }
        let norm = features.norm_l2();
        if norm == 0.0 {
            return Err(PredictionError::EmptyInput);
        }

        let mut best: Option<(&String, f32)> = None;
        for (label, centroid) in &self.centroids {
            let sim = features.dot(centroid)? / norm;
            if !sim.is_nan() && best.is_none_or(|(_, s)| sim > s) {
                best = Some((label, sim));
            }
        }

        best.map(|(label, sim)| (label.clone(), sim))
            .ok_or(PredictionError::NoScore)
    }
}

impl Classifier for CentroidClassifier {
    fn predict(&self, features: &SparseVector) -> Result<Label, PredictionError> {
        let (label, _) = self.best_match(features)?;
        Ok(Label::from(label))
    }
}

/// L2-normalize a vector in place. The norm is accumulated in f64 so large
/// finite components do not overflow.
fn normalize(v: &mut [f32]) {
    let norm = v
        .iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x = (f64::from(*x) / norm) as f32;
        }
    }
}

fn ensure_finite(values: &[f32], what: impl FnOnce() -> String) -> Result<(), String> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(format!("{} has non-finite value at {i}", what())),
        None => Ok(()),
    }
}
