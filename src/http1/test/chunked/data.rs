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
        let (mut p, mut h) = http1_setup!(Request);

        assert_eos(
            &mut p,
            &mut h,
            b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n",
            ParserState::ChunkLength1
        );

        h.events.clear();

        (p, h)
    });
}

#[test]
fn complete() {
    let (mut p, mut h) = setup!();

    assert_eos(
        &mut p,
        &mut h,
        b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n",
        ParserState::StripDetect
    );

    assert_eq!(
        h.events,
        vec![
            Event::ChunkHeader(4),
            Event::Body(b"Wiki".to_vec()),
            Event::ChunkComplete,
            Event::ChunkHeader(5),
            Event::Body(b"pedia".to_vec()),
            Event::ChunkComplete,
            Event::ChunkHeader(0),
            Event::ChunkComplete,
            Event::MessageComplete
        ]
    );
}

#[test]
fn callback_abort() {
    let (mut p, mut h) = setup!();

    h.abort = Some("on_chunk_complete");

    assert_error(
        &mut p,
        &mut h,
        b"4\r\nWiki\r\n",
        ErrorKind::CallbackAborted("on_chunk_complete")
    );
}

#[test]
fn eof_in_chunk_error() {
    let (mut p, mut h) = setup!();

    assert_eos(&mut p, &mut h, b"8\r\nabc", ParserState::ChunkData);

    assert_eq!(
        p.finish(&mut h).map_err(|e| e.kind()),
        Err(ErrorKind::UnexpectedEofInBody)
    );
}

#[test]
fn missing_crlf_error() {
    let (mut p, mut h) = setup!();

    assert_error(
        &mut p,
        &mut h,
        b"4\r\nWikiX",
        ErrorKind::InvalidCrlf(b'X')
    );

    assert_eq!(h.body(), b"Wiki");
}

#[test]
fn missing_lf_error() {
    let (mut p, mut h) = setup!();

    assert_error(
        &mut p,
        &mut h,
        b"4\r\nWiki\rX",
        ErrorKind::InvalidCrlf(b'X')
    );
}

#[test]
fn split() {
    let (mut p, mut h) = setup!();

    assert_eos(&mut p, &mut h, b"8\r\nabc", ParserState::ChunkData);
    assert_eos(&mut p, &mut h, b"defgh\r", ParserState::ChunkDataLf);
    assert_eos(&mut p, &mut h, b"\n", ParserState::ChunkLength1);

    assert_eq!(
        h.events,
        vec![
            Event::ChunkHeader(8),
            Event::Body(b"abc".to_vec()),
            Event::Body(b"defgh".to_vec()),
            Event::ChunkComplete
        ]
    );

    assert!(p.is_chunked());
}
