// Transcode engine errors

use thiserror::Error;

use super::backend::Backend;
use super::types::VideoCodec;

/// Precondition failures raised while building transcode options.
///
/// Neither is retried here; callers decide whether to fall back to software.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    #[error("Codec '{codec}' is not supported by the {backend} backend")]
    UnsupportedConfiguration { backend: Backend, codec: VideoCodec },

    #[error("No {backend} device found")]
    MissingDevice { backend: Backend },
}

pub type Result<T> = std::result::Result<T, TranscodeError>;
