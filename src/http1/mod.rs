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

//! HTTP 1.x parser, states, and errors.

mod framing;
mod http_handler;
mod limits;
mod parser;
mod parser_error;
mod parser_state;
mod parser_type;


pub use crate::http1::http_handler::HttpHandler;
pub use crate::http1::limits::Limits;
pub use crate::http1::parser::Parser;
pub use crate::http1::parser_error::{ErrorKind, ParserError};
pub use crate::http1::parser_state::ParserState;
pub use crate::http1::parser_type::ParserType;
