#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status_code}: {body}")]
    UnexpectedStatus { status_code: u16, body: String },
}
