use thiserror::Error;

/// Errors raised while building a maze or one of its regions.
///
/// Out-of-grid positions, unreachable targets and empty operation scopes are
/// not errors; they are reported through `Option` or handled as no-ops.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("render scale must be even and positive, got {0}")]
    InvalidScale(usize),
    #[error("region size must be positive, got {width}x{height}")]
    InvalidRegionSize { width: usize, height: usize },
    #[error("region at ({x}, {y}) of size {width}x{height} does not fit in the coordinate space")]
    RegionOutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("maze must be at least {min_width}x{min_height} for this layout, got {width}x{height}")]
    MazeTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
    #[error("open chance is a percentage between 0 and 100, got {0}")]
    InvalidOpenChance(u8),
    #[error("failed to write maze snapshot: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_violated_bound() {
        let err = MazeError::MazeTooSmall {
            width: 3,
            height: 3,
            min_width: 4,
            min_height: 4,
        };
        assert_eq!(
            err.to_string(),
            "maze must be at least 4x4 for this layout, got 3x3"
        );
        let err = MazeError::RegionOutOfRange {
            x: usize::MAX,
            y: 0,
            width: 2,
            height: 1,
        };
        assert!(err.to_string().contains("does not fit"));
    }
}
