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

//! Token collection macros.
//!
//! Tokens are handed to callbacks whole. A token that lies entirely within the current stream
//! slice is passed by reference into the stream. A token that spans slices is spilled into the
//! parser's scratch storage piece by piece, and the scratch storage is passed instead.

/// Append `$slice` to scratch storage, exiting with `ErrorKind::HeaderOverflow` when the token
/// would grow beyond `$limit`.
macro_rules! collect_spill {
    ($parser:expr, $context:expr, $slice:expr, $limit:expr) => ({
        let slice = $slice;

        if $parser.scratch.len() + slice.len() > $limit {
            exit_error!($parser, $context, HeaderOverflow);
        }

        $parser.scratch.extend_from_slice(slice);
    });
}

/// Collect token bytes while `$valid` holds for `$context.byte`.
///
/// When the stream runs out first, the partial token is spilled into scratch storage and the
/// parser exits with EOS, so that collection resumes within the same state on the next slice.
/// Otherwise collection stops on the first byte failing `$valid`, which is left as the current
/// byte.
macro_rules! collect_token {
    ($parser:expr, $context:expr, $limit:expr, $valid:expr) => ({
        bs_collect!(
            $context,

            if !$valid {
                break;
            },

            // on end-of-stream
            {
                collect_spill!($parser, $context, bs_slice!($context), $limit);
                exit_eos!($parser, $context);
            }
        );

        collect_end!($parser, $context, $limit);
    });
}

/// Finish collecting a token that was terminated by the most recently read byte.
///
/// A token that was partially spilled into scratch storage receives its final piece.
macro_rules! collect_end {
    ($parser:expr, $context:expr, $limit:expr) => ({
        if !$parser.scratch.is_empty() {
            collect_spill!($parser, $context, bs_slice_ignore!($context), $limit);
        } else if bs_slice_length!($context) - 1 > $limit {
            exit_error!($parser, $context, HeaderOverflow);
        }
    });
}

/// Retrieve the collected token, excluding the byte that terminated it.
macro_rules! token {
    ($parser:expr, $context:expr) => (
        if $parser.scratch.is_empty() {
            bs_slice_ignore!($context)
        } else {
            &$parser.scratch[..]
        }
    );
}

/// Indicates that the collected token is empty.
macro_rules! token_is_empty {
    ($parser:expr, $context:expr) => (
        $parser.scratch.is_empty() && bs_slice_length!($context) == 1
    );
}

/// Execute callback `$function` with the collected token. If it returns `true`, release scratch
/// storage and transition to `$state`. Otherwise exit with `ErrorKind::CallbackAborted`.
macro_rules! callback_token_transition {
    ($parser:expr, $handler:expr, $context:expr, $function:ident, $state:ident) => ({
        set_state!($parser, $state);

        if $handler.$function(token!($parser, $context)) {
            $parser.scratch.clear();

            transition!($parser, $context);
        }

        exit_callback!($parser, $context, $function);
    });
}
