// +-----------------------------------------------------------------------------------------------+
// | Copyright 2016 Sean Kerr                                                                      |
// |                                                                                               |
// | Licensed under the Apache License, Version 2.0 (the "License");                               |
// | you may not use this file except in compliance with the License.                              |
// | You may obtain a copy of the License at                                                       |
// |                                                                                               |
// |  http://www.apache.org/licenses/LICENSE-2.0                                                   |
// |                                                                                               |
// | Unless required by applicable law or agreed to in writing, software                           |
// | distributed under the License is distributed on an "AS IS" BASIS,                             |
// | WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.                      |
// | See the License for the specific language governing permissions and                           |
// | limitations under the License.                                                                |
// +-----------------------------------------------------------------------------------------------+

//! Message framing: header classification and body length detection.

use bitflags::bitflags;

use crate::http1::parser_error::ErrorKind;

bitflags! {
    /// Per-message flags.
    #[derive(Clone,Copy,Debug,PartialEq,Eq)]
    pub(crate) struct Flags: u16 {
        /// Final transfer coding is chunked.
        const CHUNKED               = 1 << 0;

        /// `Connection` contains `close`.
        const CONNECTION_CLOSE      = 1 << 1;

        /// `Connection` contains `keep-alive`.
        const CONNECTION_KEEP_ALIVE = 1 << 2;

        /// `Connection` contains `upgrade`.
        const CONNECTION_UPGRADE    = 1 << 3;

        /// Request method is `CONNECT`.
        const CONNECT               = 1 << 4;

        /// `Content-Length` has been located.
        const CONTENT_LENGTH        = 1 << 5;

        /// Previous byte within a quoted chunk extension value was a backslash.
        const QUOTE_ESCAPED         = 1 << 6;

        /// Parsing trailers after the last chunk.
        const TRAILERS              = 1 << 7;

        /// `Transfer-Encoding` has been located.
        const TRANSFER_ENCODING     = 1 << 8;

        /// `Upgrade` has been located.
        const UPGRADE               = 1 << 9;

        /// Body is delimited by connection close.
        const UNTIL_CLOSE           = 1 << 10;

        /// Stream has been upgraded.
        const UPGRADED              = 1 << 11;

        /// Upgrade takes effect once the declared request body is complete.
        const UPGRADE_AFTER_BODY    = 1 << 12;
    }
}

// -------------------------------------------------------------------------------------------------

/// Body framing selected once the header section is complete.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub(crate) enum BodyType {
    /// Chunked transfer encoding.
    Chunked,

    /// Content length body of the given length.
    Length(u64),

    /// No body.
    None,

    /// Body runs until the connection closes.
    UntilClose,

    /// Protocol switch, the remaining stream is not HTTP.
    Upgrade,
}

// -------------------------------------------------------------------------------------------------

/// Headers that influence framing.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub(crate) enum HeaderKind {
    Connection,
    ContentLength,
    Other,
    TransferEncoding,
    Upgrade,
}

impl HeaderKind {
    /// Classify a header field name.
    pub fn from_name(name: &[u8]) -> HeaderKind {
        if name.eq_ignore_ascii_case(b"content-length") {
            HeaderKind::ContentLength
        } else if name.eq_ignore_ascii_case(b"transfer-encoding") {
            HeaderKind::TransferEncoding
        } else if name.eq_ignore_ascii_case(b"connection") {
            HeaderKind::Connection
        } else if name.eq_ignore_ascii_case(b"upgrade") {
            HeaderKind::Upgrade
        } else {
            HeaderKind::Other
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Record the framing details carried by a complete header value.
pub(crate) fn apply_header(
    kind: HeaderKind,
    value: &[u8],
    flags: &mut Flags,
    content_length: &mut Option<u64>
) -> Result<(), ErrorKind> {
    match kind {
        HeaderKind::ContentLength => {
            let length = parse_content_length(value).ok_or(ErrorKind::InvalidContentLength)?;

            if flags.contains(Flags::TRANSFER_ENCODING) {
                return Err(ErrorKind::ConflictingLengthHeaders);
            }

            if let Some(previous) = *content_length {
                if previous != length {
                    return Err(ErrorKind::ConflictingLengthHeaders);
                }
            }

            flags.insert(Flags::CONTENT_LENGTH);

            *content_length = Some(length);
        },
        HeaderKind::TransferEncoding => {
            if flags.contains(Flags::CONTENT_LENGTH) {
                return Err(ErrorKind::ConflictingLengthHeaders);
            }

            flags.insert(Flags::TRANSFER_ENCODING);
            flags.set(Flags::CHUNKED, is_chunked_final(value));
        },
        HeaderKind::Connection => {
            for option in value.split(|byte| *byte == b',').map(trim) {
                if option.eq_ignore_ascii_case(b"close") {
                    flags.insert(Flags::CONNECTION_CLOSE);
                } else if option.eq_ignore_ascii_case(b"keep-alive") {
                    flags.insert(Flags::CONNECTION_KEEP_ALIVE);
                } else if option.eq_ignore_ascii_case(b"upgrade") {
                    flags.insert(Flags::CONNECTION_UPGRADE);
                }
            }
        },
        HeaderKind::Upgrade => {
            flags.insert(Flags::UPGRADE);
        },
        HeaderKind::Other => {
        }
    }

    Ok(())
}

/// Indicates that the last coding within a `Transfer-Encoding` value is `chunked`.
pub(crate) fn is_chunked_final(value: &[u8]) -> bool {
    value.rsplit(|byte| *byte == b',')
         .next()
         .map(|coding| trim(coding).eq_ignore_ascii_case(b"chunked"))
         .unwrap_or(false)
}

/// Indicates that a response status code never carries a body.
pub(crate) fn is_bodyless_status(status_code: u16) -> bool {
    (100..200).contains(&status_code) || status_code == 204 || status_code == 304
}

/// Parse a `Content-Length` value.
///
/// Returns `None` when the value is empty, contains anything but digits, or overflows.
pub(crate) fn parse_content_length(value: &[u8]) -> Option<u64> {
    if value.is_empty() {
        return None;
    }

    value.iter().try_fold(0u64, |length, byte| {
        if is_digit!(*byte) {
            length.checked_mul(10)?.checked_add((*byte - b'0') as u64)
        } else {
            None
        }
    })
}

/// Strip leading and trailing spaces and horizontal tabs.
pub(crate) fn trim(value: &[u8]) -> &[u8] {
    trim_end(
        match value.iter().position(|byte| !is_space_tab!(*byte)) {
            Some(start) => &value[start..],
            None => &[]
        }
    )
}

/// Strip trailing spaces and horizontal tabs.
pub(crate) fn trim_end(value: &[u8]) -> &[u8] {
    match value.iter().rposition(|byte| !is_space_tab!(*byte)) {
        Some(end) => &value[..end + 1],
        None => &[]
    }
}
