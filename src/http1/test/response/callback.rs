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

use crate::http1::*;
use crate::http1::test::*;

macro_rules! setup {
    () => ({
        let (mut p, mut h) = http1_setup!(Response);

        for slice in [
            &b"HTTP/1.1 200 OK\r\n"[..],
            b"content-length: 18\r\n",
            b"\r\n",
            b"body1\n",
            b"body2\n",
            b"body3\n",
            b"\r\n"
        ].iter() {
            assert_eq!(p.feed(&mut h, slice), Ok(slice.len()));
        }

        (p, h)
    });
}

#[test]
fn on_body() {
    let (_, h) = setup!();

    assert_eq!(
        h.events.iter().filter(|e| matches!(e, Event::Body(_))).cloned().collect::<Vec<_>>(),
        vec![
            Event::Body(b"body1\n".to_vec()),
            Event::Body(b"body2\n".to_vec()),
            Event::Body(b"body3\n".to_vec())
        ]
    );
}

#[test]
fn on_header_field() {
    let (_, h) = setup!();

    assert_eq!(h.count(&Event::HeaderField(b"content-length".to_vec())), 1);
}

#[test]
fn on_header_value() {
    let (_, h) = setup!();

    assert_eq!(h.count(&Event::HeaderValue(b"18".to_vec())), 1);
}

#[test]
fn on_headers_complete() {
    let (_, h) = setup!();

    assert_eq!(h.count(&Event::HeadersComplete), 1);
}

#[test]
fn on_message_begin() {
    let (_, h) = setup!();

    assert_eq!(h.count(&Event::MessageBegin), 1);
    assert_eq!(h.events.first(), Some(&Event::MessageBegin));
}

#[test]
fn on_message_complete() {
    let (p, h) = setup!();

    assert_eq!(h.count(&Event::MessageComplete), 1);
    assert_eq!(h.events.last(), Some(&Event::MessageComplete));
    assert_eq!(p.state(), ParserState::StripDetect);
}

#[test]
fn on_status() {
    let (_, h) = setup!();

    assert_eq!(h.count(&Event::Status(b"OK".to_vec())), 1);
}

#[test]
fn on_status_code() {
    let (p, h) = setup!();

    assert_eq!(h.count(&Event::StatusCode(200)), 1);
    assert_eq!(p.status_code(), 200);
}

#[test]
fn sequence() {
    let (p, h) = setup!();

    assert_eq!(
        h.events,
        vec![
            Event::MessageBegin,
            Event::Version(1, 1),
            Event::StatusCode(200),
            Event::Status(b"OK".to_vec()),
            Event::HeaderField(b"content-length".to_vec()),
            Event::HeaderValue(b"18".to_vec()),
            Event::HeadersComplete,
            Event::Body(b"body1\n".to_vec()),
            Event::Body(b"body2\n".to_vec()),
            Event::Body(b"body3\n".to_vec()),
            Event::MessageComplete
        ]
    );

    assert_eq!(p.byte_count(), 59);
    assert_eq!(p.content_length(), Some(18));
    assert!(p.should_keep_alive());
}
