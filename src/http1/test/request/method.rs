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
        http1_setup!(Request)
    });
}

#[test]
fn allowed() {
    for method in ["GET", "POST", "M-SEARCH", "PROPFIND", "SOME_METHOD"].iter() {
        let (mut p, mut h) = setup!();

        assert_eos(
            &mut p,
            &mut h,
            format!("{} ", method).as_bytes(),
            ParserState::RequestUrl
        );

        assert_eq!(
            h.events,
            vec![Event::MessageBegin, Event::Method(method.as_bytes().to_vec())]
        );
    }
}

#[test]
fn byte_by_byte() {
    let (mut p, mut h) = setup!();

    iter_assert_eos(
        &mut p,
        &mut h,
        b"DELETE ",
        ParserState::RequestUrl
    );

    assert_eq!(
        h.events,
        vec![Event::MessageBegin, Event::Method(b"DELETE".to_vec())]
    );
}

#[test]
fn callback_abort() {
    let (mut p, mut h) = setup!();

    h.abort = Some("on_method");

    let error = assert_error(
        &mut p,
        &mut h,
        b"GET ",
        ErrorKind::CallbackAborted("on_method")
    );

    assert_eq!(error.offset(), 3);
}

#[test]
fn empty_error() {
    let (mut p, mut h) = setup!();

    assert_error(
        &mut p,
        &mut h,
        b" / HTTP/1.1\r\n",
        ErrorKind::InvalidMethod(b' ')
    );
}

#[test]
fn leading_empty_lines() {
    let (mut p, mut h) = setup!();

    assert_eos(
        &mut p,
        &mut h,
        b"\r\n\r\n\nGET ",
        ParserState::RequestUrl
    );

    assert_eq!(
        h.events,
        vec![Event::MessageBegin, Event::Method(b"GET".to_vec())]
    );
}

#[test]
fn lower_case_error() {
    let (mut p, mut h) = setup!();

    let error = assert_error(
        &mut p,
        &mut h,
        b"get / HTTP/1.1\r\n",
        ErrorKind::InvalidMethod(b'g')
    );

    assert_eq!(error.offset(), 0);
    assert_eq!(error.kind().code(), "INVALID_METHOD");
    assert_eq!(h.events, vec![Event::MessageBegin]);
}

#[test]
fn too_long() {
    let mut p = Parser::with_limits(
        ParserType::Request,
        Limits { max_method_length: 3, ..Limits::default() }
    );
    let mut h = DebugHandler::default();

    assert_error(
        &mut p,
        &mut h,
        b"POST / HTTP/1.1\r\n",
        ErrorKind::HeaderOverflow
    );
}

#[test]
fn too_long_byte_by_byte() {
    let mut p = Parser::with_limits(
        ParserType::Request,
        Limits { max_method_length: 3, ..Limits::default() }
    );
    let mut h = DebugHandler::default();

    assert_eos(&mut p, &mut h, b"P", ParserState::RequestMethod);
    assert_eos(&mut p, &mut h, b"O", ParserState::RequestMethod);
    assert_eos(&mut p, &mut h, b"S", ParserState::RequestMethod);
    assert_error(&mut p, &mut h, b"T", ErrorKind::HeaderOverflow);
}
