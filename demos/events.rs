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

//! Print every callback fired while parsing a pipelined request stream fed in small slices.
//!
//! ```text
//! cargo run --example events
//! ```

use http_feed::http1::{HttpHandler, Parser, ParserType};

const STREAM: &[u8] = b"POST /upload HTTP/1.1\r\n\
                        Host: example.com\r\n\
                        Transfer-Encoding: chunked\r\n\
                        \r\n\
                        7;part=1\r\n\
                        Mozilla\r\n\
                        9\r\n\
                        Developer\r\n\
                        0\r\n\
                        Expires: Wed, 21 Oct 2015 07:28:00 GMT\r\n\
                        \r\n\
                        GET /status HTTP/1.1\r\n\
                        Connection: close\r\n\
                        \r\n";

struct Printer;

impl Printer {
    fn print(&self, callback: &str, data: &[u8]) -> bool {
        println!("{:<26} {:?}", callback, String::from_utf8_lossy(data));
        true
    }
}

impl HttpHandler for Printer {
    fn on_body(&mut self, body: &[u8]) -> bool {
        self.print("on_body", body)
    }

    fn on_chunk_complete(&mut self) -> bool {
        self.print("on_chunk_complete", b"")
    }

    fn on_chunk_extension_name(&mut self, name: &[u8]) -> bool {
        self.print("on_chunk_extension_name", name)
    }

    fn on_chunk_extension_value(&mut self, value: &[u8]) -> bool {
        self.print("on_chunk_extension_value", value)
    }

    fn on_chunk_header(&mut self, size: u64) -> bool {
        self.print("on_chunk_header", size.to_string().as_bytes())
    }

    fn on_header_field(&mut self, field: &[u8]) -> bool {
        self.print("on_header_field", field)
    }

    fn on_header_value(&mut self, value: &[u8]) -> bool {
        self.print("on_header_value", value)
    }

    fn on_headers_complete(&mut self) -> bool {
        self.print("on_headers_complete", b"")
    }

    fn on_message_begin(&mut self) -> bool {
        self.print("on_message_begin", b"")
    }

    fn on_message_complete(&mut self) -> bool {
        self.print("on_message_complete", b"")
    }

    fn on_method(&mut self, method: &[u8]) -> bool {
        self.print("on_method", method)
    }

    fn on_url(&mut self, url: &[u8]) -> bool {
        self.print("on_url", url)
    }

    fn on_version(&mut self, major: u16, minor: u16) -> bool {
        self.print("on_version", format!("{}.{}", major, minor).as_bytes())
    }
}

fn main() {
    let mut parser  = Parser::new(ParserType::Request);
    let mut printer = Printer;

    for slice in STREAM.chunks(5) {
        if let Err(error) = parser.feed(&mut printer, slice) {
            eprintln!("{} ({})", error, error.kind().code());
            return;
        }
    }

    if let Err(error) = parser.finish(&mut printer) {
        eprintln!("{} ({})", error, error.kind().code());
        return;
    }

    println!(
        "{} bytes parsed, keep-alive: {}",
        parser.byte_count(),
        parser.should_keep_alive()
    );
}
