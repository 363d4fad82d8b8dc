// Resume analyzer: keyword detection, ATS score heuristics and the
// strength/suggestion tables that turn a job target into an AnalysisResult.

pub mod engine;
pub mod feedback;
pub mod handlers;
pub mod keywords;
pub mod scoring;
