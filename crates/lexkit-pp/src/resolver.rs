//! Resolution of `#include` targets to new named character sources.

use std::io;
use std::path::{Path, PathBuf};

use lexkit_lex::{BufReadSource, LineSource};

/// Resolves an `#include` target, relative to the stream that issued it,
/// into a name and a fresh [`LineSource`] to push onto the reader stack.
pub trait IncludeResolver {
    fn resolve(&self, current_stream: &str, include_path: &str) -> io::Result<(String, Box<dyn LineSource>)>;
}

/// Default resolver: if `parent-of-current-stream/include-path` exists,
/// use it; otherwise use `include-path` verbatim (spec §4.3).
pub struct DefaultResolver;

impl IncludeResolver for DefaultResolver {
    fn resolve(&self, current_stream: &str, include_path: &str) -> io::Result<(String, Box<dyn LineSource>)> {
        let sibling = Path::new(current_stream).parent().map(|parent| parent.join(include_path));
        let chosen: PathBuf = match sibling {
            Some(candidate) if candidate.exists() => candidate,
            _ => PathBuf::from(include_path),
        };
        let file = std::fs::File::open(&chosen)?;
        let name = chosen.to_string_lossy().into_owned();
        Ok((name, Box::new(BufReadSource::new(io::BufReader::new(file)))))
    }
}
