use serde::Deserialize;

#[derive(Deserialize)]
pub struct Claims {
    pub sub: Option<String>,
    pub role: String,
}
