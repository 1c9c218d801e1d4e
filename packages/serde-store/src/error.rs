use stephist_store::Error as StoreError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a scalar value, found {kind}")]
    NotScalar { kind: &'static str },
}
