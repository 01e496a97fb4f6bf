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

/// Type that handles HTTP/1.x parser events.
///
/// Every callback returns `true` when parsing should continue. Returning `false` aborts parsing:
/// [`Parser::feed()`](struct.Parser.html#method.feed) fails with
/// [`ErrorKind::CallbackAborted`](enum.ErrorKind.html#variant.CallbackAborted), and the parser
/// stays dead until it is reset.
///
/// All callbacks are optional.
#[allow(unused_variables)]
pub trait HttpHandler {
    /// Callback that is executed when body data has been located.
    ///
    /// This is used for content length bodies, chunk data, close delimited bodies, and the raw
    /// stream that follows an upgrade.
    ///
    /// *Note:* This may be executed multiple times in order to supply the entire body. The
    /// body is split wherever the stream slices passed to `feed()` are split.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_body(&mut self, body: &[u8]) -> bool {
        true
    }

    /// Callback that is executed when a chunk has been fully consumed, including its trailing
    /// CRLF. For the final chunk, this is executed after the trailers.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_chunk_complete(&mut self) -> bool {
        true
    }

    /// Callback that is executed when a chunk extension name has been located.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    ///
    /// **Called When:**
    ///
    /// Within the chunk size line, before `on_chunk_header()`.
    fn on_chunk_extension_name(&mut self, name: &[u8]) -> bool {
        true
    }

    /// Callback that is executed when a chunk extension value has been located.
    ///
    /// Quoted values are supplied without the surrounding quotes. Escape sequences are left
    /// untouched.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_chunk_extension_value(&mut self, value: &[u8]) -> bool {
        true
    }

    /// Callback that is executed when a chunk size line has been parsed.
    ///
    /// A size of `0` marks the last chunk, which is followed by optional trailers.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_chunk_header(&mut self, size: u64) -> bool {
        true
    }

    /// Callback that is executed when a header field has been located.
    ///
    /// Trailer fields following the last chunk are supplied through this callback as well.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_header_field(&mut self, field: &[u8]) -> bool {
        true
    }

    /// Callback that is executed when a header value has been located.
    ///
    /// Leading and trailing whitespace has been removed.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_header_value(&mut self, value: &[u8]) -> bool {
        true
    }

    /// Callback that is executed when header parsing has completed successfully.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    ///
    /// **Called When:**
    ///
    /// After the blank line ending the header section, once body framing has been decided.
    fn on_headers_complete(&mut self) -> bool {
        true
    }

    /// Callback that is executed when the first byte of a new message has been located.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_message_begin(&mut self) -> bool {
        true
    }

    /// Callback that is executed when a message has been fully parsed.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    ///
    /// **Called When:**
    ///
    /// After the last body byte, immediately after `on_headers_complete()` for messages without
    /// a body, or from `Parser::finish()` for close delimited and upgraded streams.
    ///
    /// An upgrade request that declares a body with `Content-Length` or chunked transfer
    /// encoding has that body parsed first. This is then executed after its last byte, and the
    /// upgrade takes effect afterwards, so `Parser::finish()` does not execute it a second time.
    fn on_message_complete(&mut self) -> bool {
        true
    }

    /// Callback that is executed when a request method has been located.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_method(&mut self, method: &[u8]) -> bool {
        true
    }

    /// Callback that is executed when a response status reason phrase has been located.
    ///
    /// This is not executed when the reason phrase is empty.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_status(&mut self, status: &[u8]) -> bool {
        true
    }

    /// Callback that is executed when a response status code has been located.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_status_code(&mut self, code: u16) -> bool {
        true
    }

    /// Callback that is executed when a request URL has been located.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_url(&mut self, url: &[u8]) -> bool {
        true
    }

    /// Callback that is executed when the HTTP version has been located.
    ///
    /// **Returns:**
    ///
    /// `true` when parsing should continue, `false` to abort.
    fn on_version(&mut self, major: u16, minor: u16) -> bool {
        true
    }
}
