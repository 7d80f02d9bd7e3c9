use thiserror::Error;

/// Failure taxonomy for the analysis round trip. The `Display` text of a
/// variant is exactly what the transient notice shows.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    /// Bad or missing local input; no request is sent.
    #[error("{0}")]
    Validation(String),
    /// The request never completed.
    #[error("Could not reach the analysis service. Please try again.")]
    Network,
    /// Non-success status, or a success body that does not match the
    /// expected shape.
    #[error("{0}")]
    Server(String),
}

impl AnalysisError {
    pub fn no_file() -> Self {
        AnalysisError::Validation("Please select an image first.".to_string())
    }

    pub fn not_an_image() -> Self {
        AnalysisError::Validation("Please upload an image file.".to_string())
    }

    pub fn malformed_response() -> Self {
        AnalysisError::Server("The analysis service returned an unexpected response.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_the_notice_text() {
        assert_eq!(
            AnalysisError::not_an_image().to_string(),
            "Please upload an image file."
        );
        assert_eq!(
            AnalysisError::no_file().to_string(),
            "Please select an image first."
        );
        assert_eq!(
            AnalysisError::Server("bad image".to_string()).to_string(),
            "bad image"
        );
        assert_eq!(
            AnalysisError::Network.to_string(),
            "Could not reach the analysis service. Please try again."
        );
    }
}
