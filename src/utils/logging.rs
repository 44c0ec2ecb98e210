use tracing::Level;
use tracing_subscriber::fmt::writer::{MakeWriter, MakeWriterExt, OrElse, WithMaxLevel};
use tracing_subscriber::EnvFilter;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Turn a user supplied level into one `EnvFilter` understands, falling back to `info`.
pub fn filter_for(log_level: &str) -> &'static str {
    let wanted = log_level.trim().to_lowercase();
    match LEVELS.iter().find(|level| **level == wanted) {
        Some(level) => *level,
        None => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
            "info"
        }
    }
}

/// Warnings and errors go to `err`, everything else to `out`.
pub fn split_by_level<O, E>(out: O, err: E) -> OrElse<WithMaxLevel<E>, O>
where
    O: for<'a> MakeWriter<'a>,
    E: for<'a> MakeWriter<'a>,
{
    err.with_max_level(Level::WARN).or_else(out)
}

/// Install the global tracing subscriber: stdout for normal output, stderr for
/// warnings and errors. Call once, at the top of `main`.
pub fn init(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter_for(log_level)))
        .with_writer(split_by_level(std::io::stdout, std::io::stderr))
        .with_target(false)
        .init();
}

/// Render an error and its causes on one line.
///
/// Some errors (reqwest's among them) already print their sources in their own
/// message, so a cause whose text is already on the line is skipped.
pub fn describe(err: &anyhow::Error) -> String {
    let mut line = String::new();
    for cause in err.chain() {
        let msg = cause.to_string();
        if line.contains(&msg) {
            continue;
        }
        if !line.is_empty() {
            line.push_str(": ");
        }
        line.push_str(&msg);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn known_levels_pass_through() {
        assert_eq!(filter_for("debug"), "debug");
        assert_eq!(filter_for(" WARN "), "warn");
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(filter_for("loud"), "info");
    }

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn errors_and_warnings_go_to_the_error_writer() {
        let out = Buffer::default();
        let err = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(split_by_level(out.clone(), err.clone()))
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Account Info: {{}}");
            tracing::warn!("No API key set");
            tracing::error!("Error: refused");
        });

        let out = out.text();
        let err = err.text();
        assert!(out.contains("Account Info: {}"));
        assert!(!out.contains("No API key set"));
        assert!(!out.contains("Error: refused"));
        assert!(err.contains("No API key set"));
        assert!(err.contains("Error: refused"));
        assert!(!err.contains("Account Info"));
    }

    #[derive(Debug)]
    struct Connect(io::Error);

    impl fmt::Display for Connect {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            // Repeats its source, the way reqwest's errors do.
            write!(f, "error trying to connect: {}", self.0)
        }
    }

    impl std::error::Error for Connect {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn describe_doesnt_repeat_causes() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = anyhow::Error::new(Connect(refused)).context("sending get.account request");

        assert_eq!(
            describe(&err),
            "sending get.account request: error trying to connect: Connection refused"
        );
    }

    #[test]
    fn describe_keeps_distinct_causes() {
        let err = anyhow::anyhow!("connection refused").context("sending get.account request");
        assert_eq!(
            describe(&err),
            "sending get.account request: connection refused"
        );
    }
}
