use thiserror::Error;

/// Error types for manifold construction and geometric operations.
#[derive(Debug, Error, PartialEq)]
pub enum ManifoldError {
    /// The number of copies k of the product manifold is zero.
    #[error("k must be an integer no less than 1, got {0}")]
    InvalidBatchSize(usize),

    /// The requested geometric structure is not known.
    #[error("Unknown structure: {0}")]
    UnknownStructure(String),

    /// The operation exists in the interface but is not supported by this structure.
    #[error("{operation} has not been implemented yet")]
    Unsupported {
        /// Name of the unsupported operation.
        operation: &'static str,
    },

    /// A statistic was requested for an empty data set.
    #[error("Cannot compute a mean of an empty data set")]
    EmptyData,
}
