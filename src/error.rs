use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StormError {
    #[error("surface must have a non-zero area, got {width}x{height}")]
    EmptySurface { width: usize, height: usize },
    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("decay factor must be in [0, 1], got {0}")]
    InvalidDecay(f32),
    #[error("segment length range [{min}, {max}) is empty")]
    InvalidSegmentRange { min: u32, max: u32 },
    #[error("{0} must be greater than zero")]
    ZeroParameter(&'static str),
    #[error("{name} must be at most {max}, got {value}")]
    AboveLimit {
        name: &'static str,
        value: u32,
        max: u32,
    },
}

pub type StormResult<T> = Result<T, StormError>;
