use log::error;

/// Unwraps an [`anyhow::Result`], logging the whole error chain before panicking on failure.
#[inline]
#[track_caller]
pub fn anyhow_unwrap<T>(result: anyhow::Result<T>, failed_to: &str) -> T {
    match result {
        Ok(x) => x,
        Err(e) => {
            log_anyhow_error_and_sources(&e, failed_to);
            panic!("failed to {} while: {e:?}", failed_to);
        }
    }
}

/// Logs an error and each of its sources on its own line.
pub fn log_anyhow_error_and_sources(error: &anyhow::Error, failed_to: &str) {
    error!("failed to {}: {}", failed_to, error);
    let mut sources = error.chain().skip(1).enumerate().peekable();
    if sources.peek().is_some() {
        error!("error message stack:");
    }
    for (depth, source) in sources {
        error!("\t{}: {}", depth, source);
    }
}
