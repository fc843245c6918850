/*!
    One-time codec library registration.
*/

use std::sync::OnceLock;

use crate::error::{Error, Result};

static INIT: OnceLock<Result<(), ffmpeg_next::Error>> = OnceLock::new();

/**
    Register all formats and codecs with the codec library.

    Must run before the first session opens. Safe to call any number of
    times from any thread; only the first call does work, and its outcome
    is returned to every later caller.
*/
pub fn initialize() -> Result<()> {
    let outcome = *INIT.get_or_init(|| {
        let outcome = ffmpeg_next::init();
        match &outcome {
            Ok(()) => tracing::debug!("codec library initialized"),
            Err(e) => tracing::error!(error = %e, "codec library initialization failed"),
        }
        outcome
    });
    outcome.map_err(|e| Error::Init(e.to_string()))
}

/**
    Returns true once [`initialize`] has succeeded.
*/
pub fn is_initialized() -> bool {
    matches!(INIT.get(), Some(Ok(())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_is_idempotent() {
        initialize().unwrap();
        assert!(is_initialized());
        initialize().unwrap();
        assert!(is_initialized());
    }

    #[test]
    fn initialize_from_many_threads() {
        let handles: Vec<_> = (0..4).map(|_| std::thread::spawn(initialize)).collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert!(is_initialized());
    }
}
