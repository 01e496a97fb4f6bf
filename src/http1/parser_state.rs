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

//! HTTP 1.x parser states.

use crate::fsm::ParserValue;
use crate::http1::http_handler::HttpHandler;
use crate::http1::parser::Parser;
use crate::http1::parser_error::ParserError;
use byte_slice::ByteStream;

/// Parser states.
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
#[repr(u8)]
pub enum ParserState {
    /// An error was returned from a call to `Parser::feed()` or `Parser::finish()`.
    Dead,

    /// The connection does not persist beyond the previous message. Only empty lines are
    /// accepted.
    Closed,

    /// Stripping empty lines before the next message.
    StripDetect,

    // ---------------------------------------------------------------------------------------------
    // REQUEST LINE
    // ---------------------------------------------------------------------------------------------

    /// Parsing request method.
    RequestMethod,

    /// Parsing request URL.
    RequestUrl,

    /// Parsing request CR after the HTTP version.
    RequestVersionCr,

    // ---------------------------------------------------------------------------------------------
    // HTTP VERSION
    // ---------------------------------------------------------------------------------------------

    /// Parsing HTTP version byte 1.
    Http1,

    /// Parsing HTTP version byte 2.
    Http2,

    /// Parsing HTTP version byte 3.
    Http3,

    /// Parsing HTTP version byte 4.
    Http4,

    /// Parsing HTTP version byte 5.
    Http5,

    /// Parsing HTTP major version.
    VersionMajor,

    /// Parsing HTTP version period.
    VersionPeriod,

    /// Parsing HTTP minor version.
    VersionMinor,

    // ---------------------------------------------------------------------------------------------
    // STATUS LINE
    // ---------------------------------------------------------------------------------------------

    /// Parsing space after the response HTTP version.
    ResponseVersionSpace,

    /// Parsing response status code byte 1.
    ResponseStatusCode1,

    /// Parsing response status code byte 2.
    ResponseStatusCode2,

    /// Parsing response status code byte 3.
    ResponseStatusCode3,

    /// Parsing the byte after the response status code.
    ResponseStatusCodeEnd,

    /// Parsing response status reason phrase.
    ResponseStatus,

    /// Parsing LF at the end of the start line.
    InitialLf,

    // ---------------------------------------------------------------------------------------------
    // HEADERS
    // ---------------------------------------------------------------------------------------------

    /// Checking the first byte of a header line.
    CheckHeaderName,

    /// Parsing header name.
    HeaderName,

    /// Stripping whitespace before header value.
    StripHeaderValue,

    /// Parsing header value.
    HeaderValue,

    /// Parsing LF after a header value.
    HeaderLf1,

    /// Parsing LF of the blank line ending the header section.
    HeaderLf2,

    /// Header section complete, selecting body framing.
    HeaderEnd,

    // ---------------------------------------------------------------------------------------------
    // BODY
    // ---------------------------------------------------------------------------------------------

    /// Parsing content length body.
    BodyLength,

    /// Parsing body delimited by connection close.
    BodyClose,

    /// Passing through the upgraded stream.
    Upgrade,

    // ---------------------------------------------------------------------------------------------
    // CHUNKED TRANSFER ENCODING
    // ---------------------------------------------------------------------------------------------

    /// Parsing chunk size byte 1.
    ChunkLength1,

    /// Parsing chunk size byte 2+.
    ChunkLength2,

    /// Parsing whitespace after chunk size or chunk extension.
    ChunkLengthSpace,

    /// Stripping whitespace before chunk extension name.
    StripChunkExtensionName,

    /// Parsing chunk extension name.
    ChunkExtensionName,

    /// Parsing chunk extension value byte 1.
    ChunkExtensionValue1,

    /// Parsing unquoted chunk extension value byte 2+.
    ChunkExtensionValue2,

    /// Parsing quoted chunk extension value.
    ChunkExtensionQuotedValue,

    /// Parsing the byte after a quoted chunk extension value.
    ChunkExtensionQuotedEnd,

    /// Parsing LF at the end of the chunk size line.
    ChunkLengthLf,

    /// Parsing chunk data.
    ChunkData,

    /// Parsing CR after chunk data.
    ChunkDataCr,

    /// Parsing LF after chunk data.
    ChunkDataLf,

    // ---------------------------------------------------------------------------------------------
    // FINISHED
    // ---------------------------------------------------------------------------------------------

    /// Message has been fully parsed.
    MessageFinished
}

impl ParserState {
    /// Indicates that this state lies within the start line or header section.
    ///
    /// Header states also parse trailers, so this alone does not decide whether a message body
    /// is in progress.
    pub fn is_head(&self) -> bool {
        matches!(
            *self,
            ParserState::RequestMethod
          | ParserState::RequestUrl
          | ParserState::RequestVersionCr
          | ParserState::Http1
          | ParserState::Http2
          | ParserState::Http3
          | ParserState::Http4
          | ParserState::Http5
          | ParserState::VersionMajor
          | ParserState::VersionPeriod
          | ParserState::VersionMinor
          | ParserState::ResponseVersionSpace
          | ParserState::ResponseStatusCode1
          | ParserState::ResponseStatusCode2
          | ParserState::ResponseStatusCode3
          | ParserState::ResponseStatusCodeEnd
          | ParserState::ResponseStatus
          | ParserState::InitialLf
          | ParserState::CheckHeaderName
          | ParserState::HeaderName
          | ParserState::StripHeaderValue
          | ParserState::HeaderValue
          | ParserState::HeaderLf1
          | ParserState::HeaderLf2
          | ParserState::HeaderEnd
        )
    }

    /// Indicates that this state lies within a framed body.
    pub fn is_body(&self) -> bool {
        matches!(
            *self,
            ParserState::BodyLength
          | ParserState::ChunkLength1
          | ParserState::ChunkLength2
          | ParserState::ChunkLengthSpace
          | ParserState::StripChunkExtensionName
          | ParserState::ChunkExtensionName
          | ParserState::ChunkExtensionValue1
          | ParserState::ChunkExtensionValue2
          | ParserState::ChunkExtensionQuotedValue
          | ParserState::ChunkExtensionQuotedEnd
          | ParserState::ChunkLengthLf
          | ParserState::ChunkData
          | ParserState::ChunkDataCr
          | ParserState::ChunkDataLf
        )
    }
}

// -------------------------------------------------------------------------------------------------

/// Execute the state function for the current parser state.
#[inline]
pub(crate) fn dispatch<T: HttpHandler>(parser: &mut Parser, handler: &mut T,
                                       context: &mut ByteStream)
-> Result<ParserValue, ParserError> {
    match parser.state() {
        ParserState::Dead                      => parser.dead(handler, context),
        ParserState::Closed                    => parser.closed(handler, context),
        ParserState::StripDetect               => parser.strip_detect(handler, context),

        ParserState::RequestMethod             => parser.request_method(handler, context),
        ParserState::RequestUrl                => parser.request_url(handler, context),
        ParserState::RequestVersionCr          => parser.request_version_cr(handler, context),

        ParserState::Http1                     => parser.http1(handler, context),
        ParserState::Http2                     => parser.http2(handler, context),
        ParserState::Http3                     => parser.http3(handler, context),
        ParserState::Http4                     => parser.http4(handler, context),
        ParserState::Http5                     => parser.http5(handler, context),
        ParserState::VersionMajor              => parser.version_major(handler, context),
        ParserState::VersionPeriod             => parser.version_period(handler, context),
        ParserState::VersionMinor              => parser.version_minor(handler, context),

        ParserState::ResponseVersionSpace      => parser.response_version_space(handler, context),
        ParserState::ResponseStatusCode1       => parser.response_status_code1(handler, context),
        ParserState::ResponseStatusCode2       => parser.response_status_code2(handler, context),
        ParserState::ResponseStatusCode3       => parser.response_status_code3(handler, context),
        ParserState::ResponseStatusCodeEnd     => parser.response_status_code_end(handler, context),
        ParserState::ResponseStatus            => parser.response_status(handler, context),
        ParserState::InitialLf                 => parser.initial_lf(handler, context),

        ParserState::CheckHeaderName           => parser.check_header_name(handler, context),
        ParserState::HeaderName                => parser.header_name(handler, context),
        ParserState::StripHeaderValue          => parser.strip_header_value(handler, context),
        ParserState::HeaderValue               => parser.header_value(handler, context),
        ParserState::HeaderLf1                 => parser.header_lf1(handler, context),
        ParserState::HeaderLf2                 => parser.header_lf2(handler, context),
        ParserState::HeaderEnd                 => parser.header_end(handler, context),

        ParserState::BodyLength                => parser.body_length(handler, context),
        ParserState::BodyClose                 => parser.body_close(handler, context),
        ParserState::Upgrade                   => parser.upgrade(handler, context),

        ParserState::ChunkLength1              => parser.chunk_length1(handler, context),
        ParserState::ChunkLength2              => parser.chunk_length2(handler, context),
        ParserState::ChunkLengthSpace          => parser.chunk_length_space(handler, context),
        ParserState::StripChunkExtensionName   => parser.strip_chunk_extension_name(handler, context),
        ParserState::ChunkExtensionName        => parser.chunk_extension_name(handler, context),
        ParserState::ChunkExtensionValue1      => parser.chunk_extension_value1(handler, context),
        ParserState::ChunkExtensionValue2      => parser.chunk_extension_value2(handler, context),
        ParserState::ChunkExtensionQuotedValue => parser.chunk_extension_quoted_value(handler, context),
        ParserState::ChunkExtensionQuotedEnd   => parser.chunk_extension_quoted_end(handler, context),
        ParserState::ChunkLengthLf             => parser.chunk_length_lf(handler, context),
        ParserState::ChunkData                 => parser.chunk_data(handler, context),
        ParserState::ChunkDataCr               => parser.chunk_data_cr(handler, context),
        ParserState::ChunkDataLf               => parser.chunk_data_lf(handler, context),

        ParserState::MessageFinished           => parser.message_finished(handler, context)
    }
}
