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
            b"GET / HTTP/1.1\r\n",
            ParserState::CheckHeaderName
        );

        (p, h)
    });
}

#[test]
fn allowed() {
    let (mut p, mut h) = setup!();

    assert_eos(
        &mut p,
        &mut h,
        b"X-Custom_Header.1!#$%&'*+^`|~: x\r\n",
        ParserState::CheckHeaderName
    );

    assert_eq!(
        h.headers(),
        vec![(b"X-Custom_Header.1!#$%&'*+^`|~".to_vec(), b"x".to_vec())]
    );
}

#[test]
fn byte_by_byte() {
    let (mut p, mut h) = setup!();

    iter_assert_eos(
        &mut p,
        &mut h,
        b"Host: example.com\r\nAccept: */*\r\n",
        ParserState::CheckHeaderName
    );

    assert_eq!(
        h.headers(),
        vec![
            (b"Host".to_vec(), b"example.com".to_vec()),
            (b"Accept".to_vec(), b"*/*".to_vec())
        ]
    );
}

#[test]
fn case_preserved() {
    let (mut p, mut h) = setup!();

    assert_eos(
        &mut p,
        &mut h,
        b"cOnTeNt-TyPe: text/plain\r\n",
        ParserState::CheckHeaderName
    );

    assert_eq!(h.count(&Event::HeaderField(b"cOnTeNt-TyPe".to_vec())), 1);
}

#[test]
fn callback_abort() {
    let (mut p, mut h) = setup!();

    h.abort = Some("on_header_field");

    assert_error(
        &mut p,
        &mut h,
        b"Host: x\r\n",
        ErrorKind::CallbackAborted("on_header_field")
    );
}

#[test]
fn empty_error() {
    let (mut p, mut h) = setup!();

    assert_error(
        &mut p,
        &mut h,
        b": x\r\n",
        ErrorKind::InvalidHeaderToken(b':')
    );
}

#[test]
fn obs_fold_error() {
    let (mut p, mut h) = setup!();

    assert_error(
        &mut p,
        &mut h,
        b"X-Folded: a\r\n b\r\n",
        ErrorKind::InvalidHeaderToken(b' ')
    );

    assert_eq!(h.headers(), vec![(b"X-Folded".to_vec(), b"a".to_vec())]);
}

#[test]
fn leading_whitespace_error() {
    let (mut p, mut h) = setup!();

    assert_error(
        &mut p,
        &mut h,
        b"\tHost: x\r\n",
        ErrorKind::InvalidHeaderToken(b'\t')
    );
}

#[test]
fn separator_error() {
    let (mut p, mut h) = setup!();

    assert_error(
        &mut p,
        &mut h,
        b"Ho(st: x\r\n",
        ErrorKind::InvalidHeaderToken(b'(')
    );
}

#[test]
fn space_before_colon_error() {
    let (mut p, mut h) = setup!();

    let error = assert_error(
        &mut p,
        &mut h,
        b"Host : x\r\n",
        ErrorKind::InvalidHeaderToken(b' ')
    );

    assert_eq!(error.offset(), 20);
}

#[test]
fn split() {
    let (mut p, mut h) = setup!();

    assert_eos(&mut p, &mut h, b"Con", ParserState::HeaderName);
    assert_eos(&mut p, &mut h, b"tent-", ParserState::HeaderName);
    assert_eos(&mut p, &mut h, b"Type: text/plain\r\n", ParserState::CheckHeaderName);

    assert_eq!(h.count(&Event::HeaderField(b"Content-Type".to_vec())), 1);
}

#[test]
fn too_long() {
    let mut p = Parser::with_limits(
        ParserType::Request,
        Limits { max_header_field_length: 4, ..Limits::default() }
    );
    let mut h = DebugHandler::default();

    assert_eos(&mut p, &mut h, b"GET / HTTP/1.1\r\nHost: x\r\n", ParserState::CheckHeaderName);
    assert_error(&mut p, &mut h, b"Hosts: x\r\n", ErrorKind::HeaderOverflow);
}
