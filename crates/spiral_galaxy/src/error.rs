#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GalaxyError {
    #[error("particle count must be >= 0, got {0}")]
    InvalidParticleCount(i32),

    #[error("branch count must be >= 1, got {0}")]
    InvalidBranchCount(i32),

    #[error("radius must be > 0, got {0}")]
    InvalidRadius(f32),

    #[error("particle size must be > 0, got {0}")]
    InvalidParticleSize(f32),

    #[error("randomness power must be >= 0, got {0}")]
    InvalidRandomnessPower(f32),

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("failed to release previous particle set: {0}")]
    Disposal(String),
}
