//! Persistent endpoint identity store.
//!
//! The relay authorizes inbound requests by obscurity: a single random,
//! unguessable path segment. The token is generated once on first startup,
//! written to `<cache_dir>/endpoint` as raw bytes, and read back verbatim on
//! every later startup. It is never rotated or deleted by this system.

use std::fs;
use std::io;
use std::path::Path;

use uuid::Uuid;

use crate::error::NotifyResult;

/// Filename of the durable token record inside the cache directory.
const TOKEN_FILE: &str = "endpoint";

/// Return the endpoint token, creating and persisting one if absent.
///
/// The cache directory is created idempotently. An existing record is
/// returned verbatim with no format validation. Any other I/O failure is
/// fatal to startup — without a token no endpoint can be safely assigned.
pub fn load_or_create_token(cache_dir: &Path) -> NotifyResult<String> {
    fs::create_dir_all(cache_dir)?;

    let path = cache_dir.join(TOKEN_FILE);
    match fs::read_to_string(&path) {
        Ok(token) => Ok(token),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let token = Uuid::new_v4().to_string();
            fs::write(&path, &token)?;
            tracing::info!(target: "endpoint_store", path = %path.display(), "Generated new endpoint token");
            Ok(token)
        }
        Err(e) => Err(e.into()),
    }
}
