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

//! HTTP 1.x parser.

use tracing::{debug, trace};

use crate::byte::{is_field_content, is_method, is_token, is_url};
use crate::fsm::ParserValue;
use crate::http1::framing::{apply_header, is_bodyless_status, trim_end, BodyType, Flags, HeaderKind};
use crate::http1::http_handler::HttpHandler;
use crate::http1::limits::Limits;
use crate::http1::parser_error::{ErrorKind, ParserError};
use crate::http1::parser_state::{dispatch, ParserState};
use crate::http1::parser_type::ParserType;
use byte_slice::ByteStream;

// -------------------------------------------------------------------------------------------------

/// HTTP 1.x parser.
///
/// The parser is fed slices of a single connection's stream, and executes
/// [`HttpHandler`](trait.HttpHandler.html) callbacks as each element of each message is located.
/// Slices may be split anywhere. Tokens that span slices are buffered internally, so that every
/// callback except `on_body()` receives its token whole.
pub struct Parser {
    /// Total byte count processed.
    byte_count: usize,

    /// Content length, when one has been located.
    content_length: Option<u64>,

    /// Message flags.
    flags: Flags,

    /// Indicates that the next response replies to a HEAD request.
    head_response: bool,

    /// Framing significance of the current header.
    header_kind: HeaderKind,

    /// Remaining body or chunk length.
    length: u64,

    /// Resource limits.
    limits: Limits,

    /// Absolute offset of the first byte of the current message.
    message_start: usize,

    /// Parser type.
    parser_type: ParserType,

    /// Storage for tokens that span stream slices.
    scratch: Vec<u8>,

    /// Current state.
    state: ParserState,

    /// Response status code.
    status_code: u16,

    /// HTTP major version.
    version_major: u16,

    /// HTTP minor version.
    version_minor: u16,
}

impl Parser {
    /// Create a new `Parser` with default limits.
    pub fn new(parser_type: ParserType) -> Parser {
        Parser::with_limits(parser_type, Limits::default())
    }

    /// Create a new `Parser` with custom limits.
    pub fn with_limits(parser_type: ParserType, limits: Limits) -> Parser {
        Parser{
            byte_count:     0,
            content_length: None,
            flags:          Flags::empty(),
            head_response:  false,
            header_kind:    HeaderKind::Other,
            length:         0,
            limits,
            message_start:  0,
            parser_type,
            scratch:        Vec::new(),
            state:          ParserState::StripDetect,
            status_code:    0,
            version_major:  0,
            version_minor:  0
        }
    }

    /// Retrieve the total byte count processed since the instantiation of `Parser`, or since the
    /// most recent `reset()`.
    ///
    /// The byte count is updated when `feed()` completes. Retrieving it from within a callback
    /// is only accurate within the length of the current slice.
    pub fn byte_count(&self) -> usize {
        self.byte_count
    }

    /// Retrieve the content length of the current message, if one was supplied.
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Parse an additional slice of stream data.
    ///
    /// Returns the amount of bytes consumed, which is always `stream.len()`.
    ///
    /// # Errors
    ///
    /// Any grammar violation, framing inconsistency, limit violation, or callback returning
    /// `false` fails with a [`ParserError`](struct.ParserError.html). The parser is then dead,
    /// and every following call fails with `ErrorKind::Dead` until `reset()`.
    pub fn feed<T: HttpHandler>(&mut self, handler: &mut T, stream: &[u8])
    -> Result<usize, ParserError> {
        if self.state == ParserState::Dead {
            return Err(ParserError::new(ErrorKind::Dead, self.byte_count));
        }

        self.parse(handler, &mut ByteStream::new(stream))?;

        Ok(stream.len())
    }

    /// Notify the parser that the stream has ended.
    ///
    /// This completes a message whose body is delimited by connection close, as well as an
    /// upgraded stream. It is a no-op between messages.
    ///
    /// # Errors
    ///
    /// `ErrorKind::UnexpectedEofInBody` when the stream ends within a content length or chunked
    /// body, and `ErrorKind::UnexpectedEof` when it ends within a start line or header section.
    pub fn finish<T: HttpHandler>(&mut self, handler: &mut T) -> Result<(), ParserError> {
        match self.state {
            ParserState::StripDetect | ParserState::Closed => {
                Ok(())
            },
            ParserState::Dead => {
                Err(ParserError::new(ErrorKind::Dead, self.byte_count))
            },
            ParserState::Upgrade if self.flags.contains(Flags::UPGRADE_AFTER_BODY) => {
                // the message completed along with its declared body
                self.state = ParserState::Closed;

                Ok(())
            },
            ParserState::BodyClose | ParserState::Upgrade => {
                self.head_response = false;
                self.state         = ParserState::Closed;

                debug!(offset = self.byte_count, "message complete at end of stream");

                if handler.on_message_complete() {
                    return Ok(());
                }

                Err(self.fail(ErrorKind::CallbackAborted("on_message_complete"), self.byte_count))
            },
            state if state.is_body() || self.flags.contains(Flags::TRAILERS) => {
                Err(self.fail(ErrorKind::UnexpectedEofInBody, self.byte_count))
            },
            _ => {
                Err(self.fail(ErrorKind::UnexpectedEof, self.byte_count))
            }
        }
    }

    /// Indicates that the current message uses chunked transfer encoding.
    pub fn is_chunked(&self) -> bool {
        self.flags.contains(Flags::CHUNKED)
    }

    /// Indicates that the stream has been upgraded, and that the remaining stream data is being
    /// supplied verbatim to `on_body()`.
    ///
    /// For an upgrade request with a declared body, this becomes `true` once that body is
    /// complete.
    pub fn is_upgrade(&self) -> bool {
        self.flags.contains(Flags::UPGRADED)
    }

    /// Retrieve the resource limits.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Retrieve the parser type.
    pub fn parser_type(&self) -> ParserType {
        self.parser_type
    }

    /// Reset `Parser` to its initial state.
    ///
    /// This clears all message state, the dead state, and the byte count. The parser type and
    /// limits are kept.
    pub fn reset(&mut self) {
        self.byte_count     = 0;
        self.content_length = None;
        self.flags          = Flags::empty();
        self.head_response  = false;
        self.header_kind    = HeaderKind::Other;
        self.length         = 0;
        self.message_start  = 0;
        self.state          = ParserState::StripDetect;
        self.status_code    = 0;
        self.version_major  = 0;
        self.version_minor  = 0;

        self.scratch.clear();
    }

    /// Mark the next response as a reply to a HEAD request.
    ///
    /// The response is treated as having no body, regardless of its length headers. The mark
    /// clears once that response completes.
    pub fn set_head_response(&mut self, head_response: bool) {
        self.head_response = head_response;
    }

    /// Indicates that the connection may carry another message after the current one.
    ///
    /// HTTP/1.1 persists unless `Connection: close` was supplied. HTTP/1.0 persists only when
    /// `Connection: keep-alive` was supplied. Close delimited bodies and upgrades never persist.
    pub fn should_keep_alive(&self) -> bool {
        if self.flags.intersects(Flags::UNTIL_CLOSE | Flags::UPGRADED) {
            return false;
        }

        if self.version_major == 1 && self.version_minor == 0 {
            self.flags.contains(Flags::CONNECTION_KEEP_ALIVE)
        } else {
            !self.flags.contains(Flags::CONNECTION_CLOSE)
        }
    }

    /// Retrieve the current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Retrieve the response status code of the current message.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Retrieve the HTTP major and minor version of the current message.
    pub fn version(&self) -> (u16, u16) {
        (self.version_major, self.version_minor)
    }

    // ---------------------------------------------------------------------------------------------

    /// Reset message state as the first byte of a new message arrives.
    fn begin_message(&mut self, context: &ByteStream) {
        self.content_length = None;
        self.flags          = Flags::empty();
        self.header_kind    = HeaderKind::Other;
        self.length         = 0;
        self.message_start  = self.byte_count + context.stream_index;
        self.status_code    = 0;
        self.version_major  = 0;
        self.version_minor  = 0;

        self.scratch.clear();

        trace!(offset = self.message_start, "message begin");
    }

    /// Select the body framing once the header section is complete.
    fn body_type(&self) -> Result<BodyType, ErrorKind> {
        if self.parser_type == ParserType::Request {
            if self.flags.contains(Flags::CONNECT) {
                return Ok(BodyType::Upgrade);
            }

            // a declared body is parsed before the upgrade takes effect
            if self.flags.contains(Flags::CONNECTION_UPGRADE | Flags::UPGRADE)
            && !self.flags.contains(Flags::CHUNKED)
            && self.content_length.unwrap_or(0) == 0 {
                return Ok(BodyType::Upgrade);
            }
        } else {
            if self.status_code == 101 {
                return Ok(BodyType::Upgrade);
            }

            if self.head_response || is_bodyless_status(self.status_code) {
                return Ok(BodyType::None);
            }
        }

        if self.flags.contains(Flags::CHUNKED) {
            return Ok(BodyType::Chunked);
        }

        if self.flags.contains(Flags::TRANSFER_ENCODING) {
            // a request cannot be delimited by close
            return match self.parser_type {
                ParserType::Request  => Err(ErrorKind::InvalidTransferEncoding),
                ParserType::Response => Ok(BodyType::UntilClose)
            };
        }

        match self.content_length {
            Some(0) => Ok(BodyType::None),
            Some(length) => Ok(BodyType::Length(length)),
            None if self.parser_type == ParserType::Request => Ok(BodyType::None),
            None => Ok(BodyType::UntilClose)
        }
    }

    /// Create a `ParserError` located at the most recently read byte.
    fn error(&self, context: &ByteStream, kind: ErrorKind) -> ParserError {
        ParserError::new(kind, self.byte_count + context.stream_index.saturating_sub(1))
    }

    /// Kill the parser with a `ParserError` located at `offset`.
    fn fail(&mut self, kind: ErrorKind, offset: usize) -> ParserError {
        let error = ParserError::new(kind, offset);

        self.state = ParserState::Dead;

        debug!(%error, "parsing failed");

        error
    }

    /// Indicates that the current head has grown beyond its limit.
    fn head_overflow(&self, context: &ByteStream) -> bool {
        !self.flags.contains(Flags::TRAILERS)
        && self.byte_count + context.stream_index - self.message_start
           > self.limits.max_headers_length
    }

    /// Main parser loop.
    #[inline]
    fn parse<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<(), ParserError> {
        loop {
            match dispatch(self, handler, context) {
                Ok(ParserValue::Continue) => {
                },
                Ok(ParserValue::Exit) => {
                    let overflow = self.state.is_head() && self.head_overflow(context);

                    self.byte_count += context.stream_index;

                    if overflow {
                        return Err(self.fail(
                            ErrorKind::HeaderOverflow,
                            self.byte_count.saturating_sub(1)
                        ));
                    }

                    return Ok(());
                },
                Err(error) => {
                    self.byte_count += context.stream_index;
                    self.state       = ParserState::Dead;

                    debug!(%error, "parsing failed");

                    return Err(error);
                }
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // GRAMMAR
    // ---------------------------------------------------------------------------------------------

    /*
    HTTP-message   = start-line CRLF *( field-line CRLF ) CRLF [ message-body ]
    start-line     = request-line / status-line

    request-line   = method SP request-target SP HTTP-version
    status-line    = HTTP-version SP status-code SP [ reason-phrase ]
    HTTP-version   = "HTTP/" DIGIT "." DIGIT
    status-code    = 3DIGIT
    reason-phrase  = 1*( HTAB / SP / VCHAR / obs-text )

    field-line     = field-name ":" OWS field-value OWS
    field-name     = token
    field-value    = *( HTAB / SP / VCHAR / obs-text )

    chunked-body   = *chunk last-chunk trailer-section CRLF
    chunk          = chunk-size [ chunk-ext ] CRLF chunk-data CRLF
    last-chunk     = 1*("0") [ chunk-ext ] CRLF
    chunk-ext      = *( BWS ";" BWS chunk-ext-name [ "=" chunk-ext-val ] )
    chunk-ext-val  = token / quoted-string

    Empty lines preceding a start line are ignored. Obsolete line folding is rejected.
    */

    // ---------------------------------------------------------------------------------------------
    // DETECTION STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    pub(crate) fn strip_detect<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        bs_collect!(
            context,

            if context.byte != b'\r' && context.byte != b'\n' {
                break;
            },

            // on end-of-stream
            exit_eos!(self, context)
        );

        bs_replay!(context);

        self.begin_message(context);

        match self.parser_type {
            ParserType::Request => {
                callback_transition!(
                    self,
                    handler,
                    context,
                    on_message_begin,
                    RequestMethod
                );
            },
            ParserType::Response => {
                callback_transition!(
                    self,
                    handler,
                    context,
                    on_message_begin,
                    Http1
                );
            }
        }
    }

    #[inline]
    pub(crate) fn closed<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        bs_collect!(
            context,

            if context.byte != b'\r' && context.byte != b'\n' {
                break;
            },

            // on end-of-stream
            exit_eos!(self, context)
        );

        exit_error!(self, context, ClosedConnection, context.byte);
    }

    // ---------------------------------------------------------------------------------------------
    // REQUEST LINE STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    pub(crate) fn request_method<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        collect_token!(
            self,
            context,
            self.limits.max_method_length,
            is_method(context.byte)
        );

        if context.byte != b' ' || token_is_empty!(self, context) {
            exit_error!(self, context, InvalidMethod, context.byte);
        }

        if token!(self, context) == b"CONNECT" {
            self.flags.insert(Flags::CONNECT);
        }

        callback_token_transition!(
            self,
            handler,
            context,
            on_method,
            RequestUrl
        );
    }

    #[inline]
    pub(crate) fn request_url<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        collect_token!(
            self,
            context,
            self.limits.max_url_length,
            is_url(context.byte)
        );

        if context.byte != b' ' || token_is_empty!(self, context) {
            exit_error!(self, context, InvalidUrl, context.byte);
        }

        callback_token_transition!(
            self,
            handler,
            context,
            on_url,
            Http1
        );
    }

    #[inline]
    pub(crate) fn request_version_cr<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\r' {
            transition!(
                self,
                context,
                InitialLf
            );
        }

        exit_error!(self, context, InvalidVersion, context.byte);
    }

    // ---------------------------------------------------------------------------------------------
    // VERSION STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    pub(crate) fn http1<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        if bs_has_bytes!(context, 8) {
            // have enough bytes to compare the common versions immediately, without stepping
            // through each byte
            let minor = match &context.stream[context.stream_index..context.stream_index + 8] {
                b"HTTP/1.1" => Some(1),
                b"HTTP/1.0" => Some(0),
                _ => None
            };

            if let Some(minor) = minor {
                bs_jump!(context, 8);

                self.version_major = 1;
                self.version_minor = minor;

                return self.version_end(handler, context);
            }
        }

        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'H' {
            transition!(
                self,
                context,
                Http2
            );
        }

        exit_error!(self, context, InvalidVersion, context.byte);
    }

    #[inline]
    pub(crate) fn http2<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'T' {
            transition!(
                self,
                context,
                Http3
            );
        }

        exit_error!(self, context, InvalidVersion, context.byte);
    }

    #[inline]
    pub(crate) fn http3<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'T' {
            transition!(
                self,
                context,
                Http4
            );
        }

        exit_error!(self, context, InvalidVersion, context.byte);
    }

    #[inline]
    pub(crate) fn http4<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'P' {
            transition!(
                self,
                context,
                Http5
            );
        }

        exit_error!(self, context, InvalidVersion, context.byte);
    }

    #[inline]
    pub(crate) fn http5<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'/' {
            transition!(
                self,
                context,
                VersionMajor
            );
        }

        exit_error!(self, context, InvalidVersion, context.byte);
    }

    #[inline]
    pub(crate) fn version_major<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        // only HTTP/1.x is parsed here
        if context.byte == b'1' {
            self.version_major = 1;

            transition!(
                self,
                context,
                VersionPeriod
            );
        }

        exit_error!(self, context, InvalidVersion, context.byte);
    }

    #[inline]
    pub(crate) fn version_period<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'.' {
            transition!(
                self,
                context,
                VersionMinor
            );
        }

        exit_error!(self, context, InvalidVersion, context.byte);
    }

    #[inline]
    pub(crate) fn version_minor<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if !is_digit!(context.byte) {
            exit_error!(self, context, InvalidVersion, context.byte);
        }

        self.version_minor = (context.byte - b'0') as u16;

        self.version_end(handler, context)
    }

    /// Report the version, and move on to the remainder of the start line.
    #[inline]
    fn version_end<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        match self.parser_type {
            ParserType::Request => set_state!(self, RequestVersionCr),
            ParserType::Response => set_state!(self, ResponseVersionSpace)
        }

        if handler.on_version(self.version_major, self.version_minor) {
            transition!(self, context);
        }

        exit_callback!(self, context, on_version);
    }

    // ---------------------------------------------------------------------------------------------
    // STATUS LINE STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    pub(crate) fn response_version_space<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b' ' {
            transition!(
                self,
                context,
                ResponseStatusCode1
            );
        }

        exit_error!(self, context, InvalidVersion, context.byte);
    }

    #[inline]
    pub(crate) fn response_status_code1<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if is_digit!(context.byte) {
            self.status_code = (context.byte - b'0') as u16 * 100;

            transition!(
                self,
                context,
                ResponseStatusCode2
            );
        }

        exit_error!(self, context, InvalidStatusCode, context.byte);
    }

    #[inline]
    pub(crate) fn response_status_code2<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if is_digit!(context.byte) {
            self.status_code += (context.byte - b'0') as u16 * 10;

            transition!(
                self,
                context,
                ResponseStatusCode3
            );
        }

        exit_error!(self, context, InvalidStatusCode, context.byte);
    }

    #[inline]
    pub(crate) fn response_status_code3<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if is_digit!(context.byte) {
            self.status_code += (context.byte - b'0') as u16;

            transition!(
                self,
                context,
                ResponseStatusCodeEnd
            );
        }

        exit_error!(self, context, InvalidStatusCode, context.byte);
    }

    #[inline]
    pub(crate) fn response_status_code_end<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b' ' {
            callback_transition!(
                self,
                handler,
                context,
                on_status_code,
                self.status_code,
                ResponseStatus
            );
        } else if context.byte == b'\r' {
            // no reason phrase
            callback_transition!(
                self,
                handler,
                context,
                on_status_code,
                self.status_code,
                InitialLf
            );
        }

        exit_error!(self, context, InvalidStatusCode, context.byte);
    }

    #[inline]
    pub(crate) fn response_status<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        collect_token!(
            self,
            context,
            self.limits.max_status_length,
            is_field_content(context.byte)
        );

        if context.byte != b'\r' {
            exit_error!(self, context, InvalidStatus, context.byte);
        }

        if token_is_empty!(self, context) {
            transition!(
                self,
                context,
                InitialLf
            );
        }

        callback_token_transition!(
            self,
            handler,
            context,
            on_status,
            InitialLf
        );
    }

    #[inline]
    pub(crate) fn initial_lf<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte != b'\n' {
            exit_error!(self, context, InvalidCrlf, context.byte);
        }

        if self.head_overflow(context) {
            exit_error!(self, context, HeaderOverflow);
        }

        transition!(
            self,
            context,
            CheckHeaderName
        );
    }

    // ---------------------------------------------------------------------------------------------
    // HEADER STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    pub(crate) fn check_header_name<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\r' {
            transition!(
                self,
                context,
                HeaderLf2
            );
        } else if is_space_tab!(context.byte) {
            // obsolete line folding
            exit_error!(self, context, InvalidHeaderToken, context.byte);
        }

        bs_replay!(context);

        transition!(
            self,
            context,
            HeaderName
        );
    }

    #[inline]
    pub(crate) fn header_name<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        collect_token!(
            self,
            context,
            self.limits.max_header_field_length,
            is_token(context.byte)
        );

        if context.byte != b':' || token_is_empty!(self, context) {
            exit_error!(self, context, InvalidHeaderToken, context.byte);
        }

        // trailers never affect framing
        self.header_kind = if self.flags.contains(Flags::TRAILERS) {
            HeaderKind::Other
        } else {
            HeaderKind::from_name(token!(self, context))
        };

        callback_token_transition!(
            self,
            handler,
            context,
            on_header_field,
            StripHeaderValue
        );
    }

    #[inline]
    pub(crate) fn strip_header_value<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        bs_collect!(
            context,

            if !is_space_tab!(context.byte) {
                break;
            },

            // on end-of-stream
            exit_eos!(self, context)
        );

        bs_replay!(context);

        transition!(
            self,
            context,
            HeaderValue
        );
    }

    #[inline]
    pub(crate) fn header_value<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        collect_token!(
            self,
            context,
            self.limits.max_header_value_length,
            is_field_content(context.byte)
        );

        if context.byte != b'\r' {
            exit_error!(self, context, InvalidHeaderToken, context.byte);
        }

        set_state!(self, HeaderLf1);

        let value = trim_end(token!(self, context));

        if let Err(kind) = apply_header(
            self.header_kind,
            value,
            &mut self.flags,
            &mut self.content_length
        ) {
            return Err(self.error(context, kind));
        }

        if handler.on_header_value(value) {
            self.scratch.clear();

            transition!(self, context);
        }

        exit_callback!(self, context, on_header_value);
    }

    #[inline]
    pub(crate) fn header_lf1<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte != b'\n' {
            exit_error!(self, context, InvalidCrlf, context.byte);
        }

        if self.head_overflow(context) {
            exit_error!(self, context, HeaderOverflow);
        }

        transition!(
            self,
            context,
            CheckHeaderName
        );
    }

    #[inline]
    pub(crate) fn header_lf2<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte != b'\n' {
            exit_error!(self, context, InvalidCrlf, context.byte);
        }

        if self.flags.contains(Flags::TRAILERS) {
            // end of the last chunk
            callback_transition!(
                self,
                handler,
                context,
                on_chunk_complete,
                MessageFinished
            );
        }

        if self.head_overflow(context) {
            exit_error!(self, context, HeaderOverflow);
        }

        transition!(
            self,
            context,
            HeaderEnd
        );
    }

    #[inline]
    pub(crate) fn header_end<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        let body_type = match self.body_type() {
            Ok(body_type) => body_type,
            Err(kind) => return Err(self.error(context, kind))
        };

        debug!(?body_type, status_code = self.status_code, "header section complete");

        if self.parser_type == ParserType::Request
        && body_type != BodyType::Upgrade
        && self.flags.contains(Flags::CONNECTION_UPGRADE | Flags::UPGRADE) {
            self.flags.insert(Flags::UPGRADE_AFTER_BODY);
        }

        match body_type {
            BodyType::Chunked => {
                callback_transition!(
                    self,
                    handler,
                    context,
                    on_headers_complete,
                    ChunkLength1
                );
            },
            BodyType::Length(length) => {
                self.length = length;

                callback_transition!(
                    self,
                    handler,
                    context,
                    on_headers_complete,
                    BodyLength
                );
            },
            BodyType::None => {
                callback_transition!(
                    self,
                    handler,
                    context,
                    on_headers_complete,
                    MessageFinished
                );
            },
            BodyType::UntilClose => {
                self.flags.insert(Flags::UNTIL_CLOSE);

                callback_transition!(
                    self,
                    handler,
                    context,
                    on_headers_complete,
                    BodyClose
                );
            },
            BodyType::Upgrade => {
                self.flags.insert(Flags::UPGRADED);

                debug!("upgrading stream");

                callback_transition!(
                    self,
                    handler,
                    context,
                    on_headers_complete,
                    Upgrade
                );
            }
        }
    }

    // ---------------------------------------------------------------------------------------------
    // BODY STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    pub(crate) fn body_length<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);

        if bs_available!(context) as u64 >= self.length {
            // the remainder is within this slice
            bs_collect_length!(context, self.length as usize);

            self.length = 0;

            callback_transition!(
                self,
                handler,
                context,
                on_body,
                bs_slice!(context),
                MessageFinished
            );
        }

        self.length -= bs_available!(context) as u64;

        bs_collect_length!(context, bs_available!(context));

        callback_transition!(
            self,
            handler,
            context,
            on_body,
            bs_slice!(context),
            BodyLength
        );
    }

    #[inline]
    pub(crate) fn body_close<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);

        bs_collect_length!(context, bs_available!(context));

        callback_transition!(
            self,
            handler,
            context,
            on_body,
            bs_slice!(context),
            BodyClose
        );
    }

    #[inline]
    pub(crate) fn upgrade<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);

        bs_collect_length!(context, bs_available!(context));

        callback_transition!(
            self,
            handler,
            context,
            on_body,
            bs_slice!(context),
            Upgrade
        );
    }

    // ---------------------------------------------------------------------------------------------
    // CHUNKED TRANSFER ENCODING STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    pub(crate) fn chunk_length1<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if is_hex!(context.byte) {
            self.length = hex_to_byte!(context.byte) as u64;

            transition!(
                self,
                context,
                ChunkLength2
            );
        }

        exit_error!(self, context, InvalidChunkSize, context.byte);
    }

    #[inline]
    pub(crate) fn chunk_length2<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        bs_collect!(
            context,

            if is_hex!(context.byte) {
                // the lower nibble is zero after shifting, so adding a hex digit never overflows
                self.length = match self.length.checked_mul(16) {
                    Some(length) => length + hex_to_byte!(context.byte) as u64,
                    None => exit_error!(self, context, InvalidChunkSize, context.byte)
                };
            } else {
                break;
            },

            // on end-of-stream
            exit_eos!(self, context)
        );

        if context.byte == b'\r' {
            transition!(
                self,
                context,
                ChunkLengthLf
            );
        } else if context.byte == b';' {
            transition!(
                self,
                context,
                StripChunkExtensionName
            );
        } else if is_space_tab!(context.byte) {
            transition!(
                self,
                context,
                ChunkLengthSpace
            );
        }

        exit_error!(self, context, InvalidChunkSize, context.byte);
    }

    #[inline]
    pub(crate) fn chunk_length_space<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        bs_collect!(
            context,

            if !is_space_tab!(context.byte) {
                break;
            },

            // on end-of-stream
            exit_eos!(self, context)
        );

        if context.byte == b'\r' {
            transition!(
                self,
                context,
                ChunkLengthLf
            );
        } else if context.byte == b';' {
            transition!(
                self,
                context,
                StripChunkExtensionName
            );
        }

        exit_error!(self, context, InvalidChunkSize, context.byte);
    }

    #[inline]
    pub(crate) fn strip_chunk_extension_name<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        bs_collect!(
            context,

            if !is_space_tab!(context.byte) {
                break;
            },

            // on end-of-stream
            exit_eos!(self, context)
        );

        bs_replay!(context);

        transition!(
            self,
            context,
            ChunkExtensionName
        );
    }

    #[inline]
    pub(crate) fn chunk_extension_name<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        collect_token!(
            self,
            context,
            self.limits.max_chunk_extension_length,
            is_token(context.byte)
        );

        if token_is_empty!(self, context) {
            exit_error!(self, context, InvalidChunkExtension, context.byte);
        }

        match context.byte {
            b'=' => {
                callback_token_transition!(
                    self,
                    handler,
                    context,
                    on_chunk_extension_name,
                    ChunkExtensionValue1
                );
            },
            b';' => {
                callback_token_transition!(
                    self,
                    handler,
                    context,
                    on_chunk_extension_name,
                    StripChunkExtensionName
                );
            },
            b'\r' => {
                callback_token_transition!(
                    self,
                    handler,
                    context,
                    on_chunk_extension_name,
                    ChunkLengthLf
                );
            },
            b' ' | b'\t' => {
                callback_token_transition!(
                    self,
                    handler,
                    context,
                    on_chunk_extension_name,
                    ChunkLengthSpace
                );
            },
            _ => {
                exit_error!(self, context, InvalidChunkExtension, context.byte);
            }
        }
    }

    #[inline]
    pub(crate) fn chunk_extension_value1<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'"' {
            transition!(
                self,
                context,
                ChunkExtensionQuotedValue
            );
        } else if is_token(context.byte) {
            bs_replay!(context);

            transition!(
                self,
                context,
                ChunkExtensionValue2
            );
        }

        exit_error!(self, context, InvalidChunkExtension, context.byte);
    }

    #[inline]
    pub(crate) fn chunk_extension_value2<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        collect_token!(
            self,
            context,
            self.limits.max_chunk_extension_length,
            is_token(context.byte)
        );

        match context.byte {
            b';' => {
                callback_token_transition!(
                    self,
                    handler,
                    context,
                    on_chunk_extension_value,
                    StripChunkExtensionName
                );
            },
            b'\r' => {
                callback_token_transition!(
                    self,
                    handler,
                    context,
                    on_chunk_extension_value,
                    ChunkLengthLf
                );
            },
            b' ' | b'\t' => {
                callback_token_transition!(
                    self,
                    handler,
                    context,
                    on_chunk_extension_value,
                    ChunkLengthSpace
                );
            },
            _ => {
                exit_error!(self, context, InvalidChunkExtension, context.byte);
            }
        }
    }

    #[inline]
    pub(crate) fn chunk_extension_quoted_value<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        bs_collect!(
            context,

            // an escaped byte is taken as is, provided it is field content
            if self.flags.contains(Flags::QUOTE_ESCAPED) {
                self.flags.remove(Flags::QUOTE_ESCAPED);

                if !is_field_content(context.byte) {
                    exit_error!(self, context, InvalidChunkExtension, context.byte);
                }
            } else if context.byte == b'"' {
                break;
            } else if context.byte == b'\\' {
                self.flags.insert(Flags::QUOTE_ESCAPED);
            } else if !is_field_content(context.byte) {
                exit_error!(self, context, InvalidChunkExtension, context.byte);
            },

            // on end-of-stream
            {
                collect_spill!(
                    self,
                    context,
                    bs_slice!(context),
                    self.limits.max_chunk_extension_length
                );

                exit_eos!(self, context);
            }
        );

        collect_end!(
            self,
            context,
            self.limits.max_chunk_extension_length
        );

        callback_token_transition!(
            self,
            handler,
            context,
            on_chunk_extension_value,
            ChunkExtensionQuotedEnd
        );
    }

    #[inline]
    pub(crate) fn chunk_extension_quoted_end<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\r' {
            transition!(
                self,
                context,
                ChunkLengthLf
            );
        } else if context.byte == b';' {
            transition!(
                self,
                context,
                StripChunkExtensionName
            );
        } else if is_space_tab!(context.byte) {
            transition!(
                self,
                context,
                ChunkLengthSpace
            );
        }

        exit_error!(self, context, InvalidChunkExtension, context.byte);
    }

    #[inline]
    pub(crate) fn chunk_length_lf<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte != b'\n' {
            exit_error!(self, context, InvalidCrlf, context.byte);
        }

        trace!(size = self.length, "chunk header");

        if self.length == 0 {
            // last chunk, trailers follow
            self.flags.insert(Flags::TRAILERS);

            callback_transition!(
                self,
                handler,
                context,
                on_chunk_header,
                0,
                CheckHeaderName
            );
        }

        callback_transition!(
            self,
            handler,
            context,
            on_chunk_header,
            self.length,
            ChunkData
        );
    }

    #[inline]
    pub(crate) fn chunk_data<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);

        if bs_available!(context) as u64 >= self.length {
            // the remainder is within this slice
            bs_collect_length!(context, self.length as usize);

            self.length = 0;

            callback_transition!(
                self,
                handler,
                context,
                on_body,
                bs_slice!(context),
                ChunkDataCr
            );
        }

        self.length -= bs_available!(context) as u64;

        bs_collect_length!(context, bs_available!(context));

        callback_transition!(
            self,
            handler,
            context,
            on_body,
            bs_slice!(context),
            ChunkData
        );
    }

    #[inline]
    pub(crate) fn chunk_data_cr<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\r' {
            transition!(
                self,
                context,
                ChunkDataLf
            );
        }

        exit_error!(self, context, InvalidCrlf, context.byte);
    }

    #[inline]
    pub(crate) fn chunk_data_lf<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_if_eos!(self, context);
        bs_next!(context);

        if context.byte == b'\n' {
            callback_transition!(
                self,
                handler,
                context,
                on_chunk_complete,
                ChunkLength1
            );
        }

        exit_error!(self, context, InvalidCrlf, context.byte);
    }

    // ---------------------------------------------------------------------------------------------
    // FINISHED STATES
    // ---------------------------------------------------------------------------------------------

    #[inline]
    pub(crate) fn dead<T: HttpHandler>(&mut self, _handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        exit_error!(self, context, Dead);
    }

    #[inline]
    pub(crate) fn message_finished<T: HttpHandler>(&mut self, handler: &mut T, context: &mut ByteStream)
    -> Result<ParserValue, ParserError> {
        if self.flags.contains(Flags::UPGRADE_AFTER_BODY) {
            self.flags.insert(Flags::UPGRADED);

            debug!("message complete, upgrading stream");

            callback_transition!(
                self,
                handler,
                context,
                on_message_complete,
                Upgrade
            );
        }

        let keep_alive = self.should_keep_alive();

        self.head_response = false;

        debug!(keep_alive, "message complete");

        if keep_alive {
            callback_transition!(
                self,
                handler,
                context,
                on_message_complete,
                StripDetect
            );
        }

        callback_transition!(
            self,
            handler,
            context,
            on_message_complete,
            Closed
        );
    }
}
