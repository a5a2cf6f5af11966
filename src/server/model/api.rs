use serde::{Deserialize, Serialize};

/// JSON body returned for every failed HTTP request.
#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
