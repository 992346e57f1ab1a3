//! Conversions between platform paths and the byte strings stored in trees.

use std::borrow::Cow;
use std::ffi::OsStr;

/// Return the bytes git would record for a file name or link target.
///
/// On Unix this is the name exactly as the file system reports it. Elsewhere
/// names that are not valid Unicode are converted lossily.
#[cfg(unix)]
pub fn os_str_bytes(s: &OsStr) -> Cow<[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(s.as_bytes())
}

#[cfg(not(unix))]
pub fn os_str_bytes(s: &OsStr) -> Cow<[u8]> {
    match s.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}
