#[derive(Debug, Clone)]
pub struct ValidateSessionDTO {
    pub session_id: String,
}
