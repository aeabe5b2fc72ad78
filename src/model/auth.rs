use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
