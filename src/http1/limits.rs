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

//! Parser resource limits.

/// Resource limits enforced while parsing.
///
/// Exceeding any limit fails parsing with
/// [`ErrorKind::HeaderOverflow`](enum.ErrorKind.html#variant.HeaderOverflow).
#[derive(Clone,Copy,Debug,PartialEq,Eq)]
pub struct Limits {
    /// Maximum chunk extension name or value length.
    pub max_chunk_extension_length: usize,

    /// Maximum header field length.
    pub max_header_field_length: usize,

    /// Maximum header value length.
    pub max_header_value_length: usize,

    /// Maximum length of the entire head, from the first byte of the start line through the
    /// blank line ending the header section.
    pub max_headers_length: usize,

    /// Maximum request method length.
    pub max_method_length: usize,

    /// Maximum status reason phrase length.
    pub max_status_length: usize,

    /// Maximum request URL length.
    pub max_url_length: usize,
}

impl Limits {
    /// Limits that never trigger.
    pub fn unlimited() -> Limits {
        Limits {
            max_chunk_extension_length: usize::MAX,
            max_header_field_length:    usize::MAX,
            max_header_value_length:    usize::MAX,
            max_headers_length:         usize::MAX,
            max_method_length:          usize::MAX,
            max_status_length:          usize::MAX,
            max_url_length:             usize::MAX,
        }
    }
}

impl Default for Limits {
    fn default() -> Limits {
        Limits {
            max_chunk_extension_length: 1024,
            max_header_field_length:    1024,
            max_header_value_length:    1024 * 8,
            max_headers_length:         1024 * 80,
            max_method_length:          32,
            max_status_length:          1024,
            max_url_length:             1024 * 8,
        }
    }
}
