use std::io::{self, BufRead, ErrorKind};

/// Outcome of a bounded read-until-delimiter scan.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum Token {
    /// The delimiter was found. Holds the bytes before it; the delimiter
    /// itself has been consumed.
    Found(Vec<u8>),

    /// The stream ended before the delimiter. Holds everything read.
    Eof(Vec<u8>),

    /// The delimiter did not appear within the lookahead limit.
    TooLong(Vec<u8>),
}

/// Reads bytes from `r` until `delim` is found, examining at most `limit`
/// bytes (the delimiter included).
///
/// Unlike `BufRead::read_until`, this never consumes more than `limit`
/// bytes from the underlying reader, so it is safe to use on streams whose
/// remaining content should not be pulled through.
pub(crate) fn read_until_bounded<R: BufRead + ?Sized>(
    r: &mut R,
    delim: u8,
    limit: usize,
) -> io::Result<Token> {
    let mut out = Vec::new();

    loop {
        if out.len() >= limit {
            return Ok(Token::TooLong(out));
        }

        let (found, used) = {
            let available = match r.fill_buf() {
                Ok(buf) => buf,
                Err(ref err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };

            if available.is_empty() {
                return Ok(Token::Eof(out));
            }

            let window = &available[..available.len().min(limit - out.len())];
            match window.iter().position(|b| *b == delim) {
                Some(n) => {
                    out.extend_from_slice(&window[..n]);
                    (true, n + 1)
                }
                None => {
                    out.extend_from_slice(window);
                    (false, window.len())
                }
            }
        };

        r.consume(used);

        if found {
            return Ok(Token::Found(out));
        }
    }
}
