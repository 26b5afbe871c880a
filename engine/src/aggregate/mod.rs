//! Runs the detectors in their fixed order, scores the running candidate list
//! after each one, and drops degenerate candidates.

use log::{debug, info};

use crate::{
    EngineConfig, Result, TableCandidate,
    detectors::{
        Detector, DetectorKind,
        blocks::{ClassBlocks, DenseBlocks, SemanticBlocks, VisualBlocks},
        cards::Cards,
        html_table::HtmlTable,
        patterns::Patterns,
        positional::TextNumeric,
        repeated::RepeatedStructure,
    },
    document::Document,
    textutil::is_numeric_convertible,
};

/// Diagnostic score recorded after one detector ran. It never affects which
/// candidates are returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DetectorScore {
    pub detector: DetectorKind,
    /// Candidates collected so far, this detector's included, before
    /// filtering.
    pub candidates_so_far: usize,
    /// Number of those candidates with at least one numeric column.
    pub score: usize,
}

/// Output of one engine run.
#[derive(Debug)]
pub struct Extraction {
    /// Surviving candidates, in detector order, then emission order.
    pub candidates: Vec<TableCandidate>,
    /// One entry per detector that ran, in run order.
    pub scores: Vec<DetectorScore>,
}

/// The configured detector pipeline. Construction compiles everything the
/// detectors need, so an `Engine` can be reused across documents.
pub struct Engine {
    config: EngineConfig,
    detectors: Vec<Box<dyn Detector>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("detectors", &self.detector_kinds())
            .finish()
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let all: Vec<Box<dyn Detector>> = vec![
            Box::new(HtmlTable),
            Box::new(RepeatedStructure),
            Box::new(VisualBlocks),
            Box::new(ClassBlocks),
            Box::new(DenseBlocks),
            Box::new(SemanticBlocks),
            Box::new(Patterns::new()?),
            Box::new(TextNumeric),
            Box::new(Cards),
        ];
        let detectors = all
            .into_iter()
            .filter(|detector| config.is_enabled(detector.kind()))
            .collect();
        Ok(Self { config, detectors })
    }

    /// Kinds of the detectors that run, in run order.
    pub fn detector_kinds(&self) -> Vec<DetectorKind> {
        self.detectors.iter().map(|detector| detector.kind()).collect()
    }

    pub fn extract(&self, doc: &Document) -> Extraction {
        let mut candidates: Vec<TableCandidate> = Vec::new();
        let mut scores = Vec::with_capacity(self.detectors.len());
        let mut score = 0;

        for detector in &self.detectors {
            let kind = detector.kind();
            let found = detector.detect(doc, &self.config);
            debug!("{kind} proposed {} candidates", found.len());

            score += found.iter().filter(|cand| has_numeric_column(cand)).count();
            candidates.extend(found);
            info!("{kind}: {score}");
            scores.push(DetectorScore {
                detector: kind,
                candidates_so_far: candidates.len(),
                score,
            });
        }

        let before = candidates.len();
        candidates.retain(|cand| !cand.is_degenerate());
        debug!(
            "kept {} of {before} candidates after dropping degenerate ones",
            candidates.len()
        );

        Extraction { candidates, scores }
    }

    /// Parses `html` and runs [Engine::extract] on it.
    pub fn extract_html(&self, html: &str) -> Result<Extraction> {
        let doc = Document::parse(html)?;
        Ok(self.extract(&doc))
    }
}

/// Whether any column converts to numbers as a whole.
pub fn has_numeric_column(candidate: &TableCandidate) -> bool {
    (0..candidate.width()).any(|idx| is_numeric_convertible(candidate.column(idx)))
}
