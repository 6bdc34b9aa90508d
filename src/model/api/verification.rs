use serde::{Deserialize, Serialize};

/// A face verification attempt. The captured image is carried as an
/// opaque string; nothing ever decodes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceVerifyRequest {
    pub image: String,
}

/// Simulated face verification outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceVerifyResponse {
    pub verified: bool,
}
