use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("brand '{brand_name}' not found")]
    NotFound { brand_name: String },

    #[error("brand '{brand_name}' matches {matches} records; disambiguate by industry")]
    AmbiguousMatch { brand_name: String, matches: usize },
}
