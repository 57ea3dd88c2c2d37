use thiserror::Error;

/// Error taxonomy of the graphing pipeline.
///
/// `Parse` and `Evaluation` are deterministic functions of the input and
/// propagate to the caller; the batch runner catches them per item. An
/// undefined sample point is NOT an error - it is a NaN in the series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrapherError {
    /// Input text is not a valid expression in one free variable.
    #[error("parse error: {0}")]
    Parse(String),
    /// A symbolic expression has no numeric lowering (e.g. an unevaluated
    /// integral left over from symbolic integration).
    #[error("cannot lower expression to a numeric function: {0}")]
    Evaluation(String),
    /// The entry-point mapping is missing a required key.
    #[error("missing required input key '{0}'")]
    MissingInput(String),
    /// Caller handed the renderer a series whose length differs from the
    /// domain length.
    #[error("series length {series} does not match domain length {domain}")]
    LengthMismatch { series: usize, domain: usize },
    /// Drawing backend failure while rendering the chart.
    #[error("chart rendering failed: {0}")]
    Render(String),
}
