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

#[test]
fn connect() {
    let (mut p, mut h) = http1_setup!(Request);

    assert_eos(
        &mut p,
        &mut h,
        b"CONNECT example.com:443 HTTP/1.1\r\nHost: example.com:443\r\n\r\n\x16\x03\x01",
        ParserState::Upgrade
    );

    assert!(p.is_upgrade());
    assert!(!p.should_keep_alive());
    assert_eq!(h.count(&Event::Url(b"example.com:443".to_vec())), 1);
    assert_eq!(h.body(), b"\x16\x03\x01");
}

#[test]
fn connection_upgrade() {
    let (mut p, mut h) = http1_setup!(Request);

    assert_eos(
        &mut p,
        &mut h,
        b"GET /chat HTTP/1.1\r\nConnection: keep-alive, Upgrade\r\nUpgrade: websocket\r\n\r\n",
        ParserState::Upgrade
    );

    assert_eos(&mut p, &mut h, b"\x81\x05hello", ParserState::Upgrade);
    assert_eos(&mut p, &mut h, b"GET / HTTP/1.1\r\n", ParserState::Upgrade);

    assert_eq!(h.body(), b"\x81\x05helloGET / HTTP/1.1\r\n");
    assert_eq!(h.count(&Event::MessageBegin), 1);

    assert_eq!(p.finish(&mut h), Ok(()));
    assert_eq!(h.events.last(), Some(&Event::MessageComplete));
}

#[test]
fn connection_upgrade_without_upgrade_header() {
    let (mut p, mut h) = http1_setup!(Request);

    assert_eos(
        &mut p,
        &mut h,
        b"GET / HTTP/1.1\r\nConnection: upgrade\r\n\r\n",
        ParserState::StripDetect
    );

    assert!(!p.is_upgrade());
}

#[test]
fn upgrade_header_without_connection_upgrade() {
    let (mut p, mut h) = http1_setup!(Request);

    assert_eos(
        &mut p,
        &mut h,
        b"GET / HTTP/1.1\r\nUpgrade: websocket\r\n\r\n",
        ParserState::StripDetect
    );

    assert!(!p.is_upgrade());
}

#[test]
fn switching_protocols() {
    let (mut p, mut h) = http1_setup!(Response);

    assert_eos(
        &mut p,
        &mut h,
        b"HTTP/1.1 101 Switching Protocols\r\nUpgrade: websocket\r\nConnection: Upgrade\r\n\r\nframes",
        ParserState::Upgrade
    );

    assert!(p.is_upgrade());
    assert_eq!(h.body(), b"frames");
}

#[test]
fn content_length_before_upgrade() {
    let (mut p, mut h) = http1_setup!(Request);

    assert_eos(
        &mut p,
        &mut h,
        b"GET / HTTP/1.1\r\nConnection: upgrade\r\nUpgrade: ws\r\nContent-Length: 3\r\n\r\nabcXYZ",
        ParserState::Upgrade
    );

    assert!(p.is_upgrade());
    assert_eq!(
        &h.events[h.events.len() - 4..],
        &[
            Event::HeadersComplete,
            Event::Body(b"abc".to_vec()),
            Event::MessageComplete,
            Event::Body(b"XYZ".to_vec())
        ]
    );

    assert_eq!(p.finish(&mut h), Ok(()));
    assert_eq!(p.state(), ParserState::Closed);
    assert_eq!(h.count(&Event::MessageComplete), 1);
}

#[test]
fn content_length_before_upgrade_split() {
    let (mut p, mut h) = http1_setup!(Request);

    assert_eos(
        &mut p,
        &mut h,
        b"POST / HTTP/1.1\r\nConnection: upgrade\r\nUpgrade: ws\r\nContent-Length: 5\r\n\r\nab",
        ParserState::BodyLength
    );

    assert!(!p.is_upgrade());

    iter_assert_eos(&mut p, &mut h, b"cdeXY", ParserState::Upgrade);

    assert!(p.is_upgrade());
    assert_eq!(h.body(), b"abcdeXY");
    assert_eq!(h.events[h.events.len() - 3], Event::MessageComplete);
}

#[test]
fn chunked_before_upgrade() {
    let (mut p, mut h) = http1_setup!(Request);

    assert_eos(
        &mut p,
        &mut h,
        b"POST / HTTP/1.1\r\nConnection: upgrade\r\nUpgrade: ws\r\nTransfer-Encoding: chunked\r\n\r\n\
          2\r\nab\r\n0\r\n\r\n\x81\x00",
        ParserState::Upgrade
    );

    assert!(p.is_upgrade());
    assert_eq!(
        &h.events[h.events.len() - 3..],
        &[
            Event::ChunkComplete,
            Event::MessageComplete,
            Event::Body(b"\x81\x00".to_vec())
        ]
    );
}

#[test]
fn zero_content_length_upgrade() {
    let (mut p, mut h) = http1_setup!(Request);

    assert_eos(
        &mut p,
        &mut h,
        b"GET / HTTP/1.1\r\nConnection: upgrade\r\nUpgrade: ws\r\nContent-Length: 0\r\n\r\nabc",
        ParserState::Upgrade
    );

    assert_eq!(h.body(), b"abc");
    assert_eq!(h.count(&Event::MessageComplete), 0);

    assert_eq!(p.finish(&mut h), Ok(()));
    assert_eq!(h.events.last(), Some(&Event::MessageComplete));
}
