//! # cortex-retrieval
//!
//! What the deliberation pipeline does with retrieved and translated
//! content: risk-scoring it (TruthGuard, C8), reaching consensus on a
//! paraphrase of the raw query (TranslatorGate, C9), predicting and
//! scoring surprise (PredictionEngine, C10), and classifying failed
//! attempts into actionable impasses (ImpasseDetector, C11).

mod fifo_cache;
mod impasse_detector;
mod prediction_engine;
mod similarity;
mod translator_gate;
pub mod truth_guard;

pub use impasse_detector::{classify, infer_domain, DetectionContext, ImpasseDetector};
pub use prediction_engine::{Prediction, PredictionEngine, PredictionErrorRecord, PredictionSource};
pub use similarity::jaccard;
pub use translator_gate::{GateResult, TranslatorGate};
pub use truth_guard::RiskAssessment;
