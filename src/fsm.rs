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

//! Finite state machine macros and enums.

/// Execute callback `$function`. If it returns `true`, execute `$exec`. Otherwise exit with
/// `ErrorKind::CallbackAborted`.
macro_rules! callback {
    ($parser:expr, $handler:expr, $context:expr, $function:ident, $data:expr, $exec:expr) => ({
        if $handler.$function($data) {
            $exec
        }

        exit_callback!($parser, $context, $function);
    });

    ($parser:expr, $handler:expr, $context:expr, $function:ident, $exec:expr) => ({
        if $handler.$function() {
            $exec
        }

        exit_callback!($parser, $context, $function);
    });
}

/// Execute callback `$function`. If it returns `true`, transition to `$state`. Otherwise exit
/// with `ErrorKind::CallbackAborted`.
///
/// After each callback, state must either change, or the parser must exit.
macro_rules! callback_transition {
    ($parser:expr, $handler:expr, $context:expr, $function:ident, $data:expr, $state:ident) => ({
        set_state!($parser, $state);
        callback!($parser, $handler, $context, $function, $data, {
            transition!($parser, $context);
        });
    });

    ($parser:expr, $handler:expr, $context:expr, $function:ident, $state:ident) => ({
        set_state!($parser, $state);
        callback!($parser, $handler, $context, $function, {
            transition!($parser, $context);
        });
    });
}

/// Exit parser with `ErrorKind::CallbackAborted` naming `$function`.
macro_rules! exit_callback {
    ($parser:expr, $context:expr, $function:ident) => ({
        return Err($parser.error(
            $context,
            ErrorKind::CallbackAborted(stringify!($function))
        ));
    });
}

/// Exit parser with `ParserValue::Exit`, asking for more stream data.
macro_rules! exit_eos {
    ($parser:expr, $context:expr) => ({
        return Ok(ParserValue::Exit);
    });
}

/// Exit parser with a `ParserError` located at the most recently read byte.
macro_rules! exit_error {
    ($parser:expr, $context:expr, $error:ident, $byte:expr) => ({
        return Err($parser.error($context, ErrorKind::$error($byte)));
    });

    ($parser:expr, $context:expr, $error:ident) => ({
        return Err($parser.error($context, ErrorKind::$error));
    });
}

/// If the stream is EOS, exit with `ParserValue::Exit`. Otherwise do nothing.
macro_rules! exit_if_eos {
    ($parser:expr, $context:expr) => ({
        if bs_is_eos!($context) {
            exit_eos!($parser, $context);
        }
    });
}

/// Set state.
macro_rules! set_state {
    ($parser:expr, $state:ident) => ({
        $parser.state = ParserState::$state;
    });
}

/// Transition to `$state`.
macro_rules! transition {
    ($parser:expr, $context:expr, $state:ident) => ({
        set_state!($parser, $state);
        bs_mark!($context);

        return Ok(ParserValue::Continue);
    });

    ($parser:expr, $context:expr) => ({
        bs_mark!($context);

        return Ok(ParserValue::Continue);
    });
}

// -------------------------------------------------------------------------------------------------

/// Parsing function return values.
#[derive(Clone,Copy,Debug,PartialEq)]
pub enum ParserValue {
    /// Continue the parser loop.
    Continue,

    /// Exit the parser loop. The stream has been fully consumed.
    Exit
}
