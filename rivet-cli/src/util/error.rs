use thiserror::Error;

pub fn is_error_silent(err: &anyhow::Error) -> bool {
    err.is::<CheckFailed>()
}

/// Some files failed to mount; each failure has already been reported.
#[derive(Clone, Copy, Error, Debug)]
#[error("{files} file(s) failed to mount")]
pub struct CheckFailed {
    pub files: usize,
}
