use std::sync::Mutex;

use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter, Registry};

lazy_static! {
    static ref LOG_INITIALIZED: Mutex<bool> = Mutex::new(false);
}

/// Initialize logging.  If the environment variable `RUST_LOG` is set to a
/// non-empty value we interpret it as an `EnvFilter` and install a compact
/// formatter; otherwise nothing is installed and the `tracing` macros used
/// throughout the crate are no-ops.
///
/// Embedding applications that already install their own subscriber don't
/// need to call this at all.  Calling it more than once is harmless.
pub fn init_logging() {
    let mut initialized = match LOG_INITIALIZED.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if *initialized {
        return;
    }
    *initialized = true;

    // An empty RUST_LOG is frequently set unconditionally by test scripts, and
    // we don't want that to be interpreted as a desire to enable logging.
    let rustlog = match std::env::var("RUST_LOG") {
        Ok(rustlog) if !rustlog.is_empty() => rustlog,
        _ => return,
    };

    let env_filter = match EnvFilter::try_new(&rustlog) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("Ignoring unparseable RUST_LOG {:?}: {}", rustlog, err);
            return;
        }
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .compact()
        // This usually ends up in a server log, so ANSI isn't helpful.
        .with_ansi(false)
        .without_time()
        .with_filter(env_filter);

    // Someone else may have installed a global subscriber already, in which
    // case theirs wins.
    if Registry::default().with(layer).try_init().is_err() {
        debug!("global tracing subscriber already installed");
    }
}

#[test]
fn test_init_logging_twice() {
    init_logging();
    init_logging();
}
