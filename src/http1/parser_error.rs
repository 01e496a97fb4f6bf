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

use thiserror::Error;

/// Parser error kinds.
///
/// Variants carrying a `u8` hold the byte that failed to parse.
#[derive(Clone,Copy,Debug,Error,PartialEq,Eq)]
pub enum ErrorKind {
    /// A callback returned `false`. Holds the callback name.
    #[error("callback {0} aborted parsing")]
    CallbackAborted(&'static str),

    /// Data other than empty lines arrived after a message that closes the connection.
    #[error("data after connection close on byte {0}")]
    ClosedConnection(u8),

    /// Both `Content-Length` and `Transfer-Encoding` were supplied, or multiple `Content-Length`
    /// headers disagree.
    #[error("conflicting content-length and transfer-encoding headers")]
    ConflictingLengthHeaders,

    /// Parsing has failed, and the parser must be reset.
    #[error("parser is dead")]
    Dead,

    /// A token or the header section exceeded its configured limit.
    #[error("header overflow")]
    HeaderOverflow,

    /// Invalid chunk extension on byte `u8`.
    #[error("invalid chunk extension on byte {0}")]
    InvalidChunkExtension(u8),

    /// Invalid chunk size on byte `u8`, or chunk size overflow.
    #[error("invalid chunk size on byte {0}")]
    InvalidChunkSize(u8),

    /// Invalid `Content-Length` value, or content length overflow.
    #[error("invalid content-length")]
    InvalidContentLength,

    /// Invalid CRLF sequence on byte `u8`.
    #[error("invalid CRLF sequence on byte {0}")]
    InvalidCrlf(u8),

    /// Invalid header field or value on byte `u8`. This includes obsolete line folding.
    #[error("invalid header token on byte {0}")]
    InvalidHeaderToken(u8),

    /// Invalid request method on byte `u8`.
    #[error("invalid request method on byte {0}")]
    InvalidMethod(u8),

    /// Invalid status reason phrase on byte `u8`.
    #[error("invalid status on byte {0}")]
    InvalidStatus(u8),

    /// Invalid status code on byte `u8`.
    #[error("invalid status code on byte {0}")]
    InvalidStatusCode(u8),

    /// A request carries a `Transfer-Encoding` whose final coding is not `chunked`.
    #[error("invalid transfer-encoding")]
    InvalidTransferEncoding,

    /// Invalid URL on byte `u8`.
    #[error("invalid URL on byte {0}")]
    InvalidUrl(u8),

    /// Invalid HTTP version on byte `u8`.
    #[error("invalid HTTP version on byte {0}")]
    InvalidVersion(u8),

    /// The stream ended within the start line or header section.
    #[error("unexpected EOF")]
    UnexpectedEof,

    /// The stream ended within a content length or chunked body.
    #[error("unexpected EOF in body")]
    UnexpectedEofInBody,
}

impl ErrorKind {
    /// Retrieve the stable error code.
    pub fn code(&self) -> &'static str {
        match *self {
            ErrorKind::CallbackAborted(_)        => "CALLBACK_ABORTED",
            ErrorKind::ClosedConnection(_)       => "CLOSED_CONNECTION",
            ErrorKind::ConflictingLengthHeaders  => "CONFLICTING_LENGTH_HEADERS",
            ErrorKind::Dead                      => "DEAD",
            ErrorKind::HeaderOverflow            => "HEADER_OVERFLOW",
            ErrorKind::InvalidChunkExtension(_)  => "INVALID_CHUNK_EXTENSION",
            ErrorKind::InvalidChunkSize(_)       => "INVALID_CHUNK_SIZE",
            ErrorKind::InvalidContentLength      => "INVALID_CONTENT_LENGTH",
            ErrorKind::InvalidCrlf(_)            => "INVALID_CRLF",
            ErrorKind::InvalidHeaderToken(_)     => "INVALID_HEADER_TOKEN",
            ErrorKind::InvalidMethod(_)          => "INVALID_METHOD",
            ErrorKind::InvalidStatus(_)          => "INVALID_STATUS",
            ErrorKind::InvalidStatusCode(_)      => "INVALID_STATUS_CODE",
            ErrorKind::InvalidTransferEncoding   => "INVALID_TRANSFER_ENCODING",
            ErrorKind::InvalidUrl(_)             => "INVALID_URL",
            ErrorKind::InvalidVersion(_)         => "INVALID_VERSION",
            ErrorKind::UnexpectedEof             => "UNEXPECTED_EOF",
            ErrorKind::UnexpectedEofInBody       => "UNEXPECTED_EOF_IN_BODY",
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Parser error.
///
/// The offset is the absolute position of the offending byte, counted from parser creation or
/// the most recent `reset()`.
#[derive(Clone,Copy,Debug,Error,PartialEq,Eq)]
#[error("{kind} at offset {offset}")]
pub struct ParserError {
    kind:   ErrorKind,
    offset: usize,
}

impl ParserError {
    /// Create a new `ParserError`.
    pub fn new(kind: ErrorKind, offset: usize) -> ParserError {
        ParserError {
            kind,
            offset
        }
    }

    /// Retrieve the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Retrieve the absolute stream offset.
    pub fn offset(&self) -> usize {
        self.offset
    }
}
