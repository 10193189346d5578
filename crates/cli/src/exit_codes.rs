//! CLI Exit Code Registry
//!
//! Single source of truth for `taxcheck` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | Success (lookup-level failures still exit 0)    |
//! | 1    | General error                                   |
//! | 2    | Usage error (bad arguments, unreadable input)   |
//! | 3    | Table could not be loaded                       |
//! | 4    | Required column missing                         |
//! | 5    | Requested group not in the table                |
//! | 6    | Output could not be written                     |
//! | 7    | Configuration error                             |

use crate::pipeline::PipelineError;

/// Success. Names that failed to resolve are data, not errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, input file unreadable.
pub const EXIT_USAGE: u8 = 2;

/// Unknown encoding, no delimiter, zero rows.
pub const EXIT_LOAD: u8 = 3;

/// `componente_biologico` or `especie` missing from the header.
pub const EXIT_SCHEMA: u8 = 4;

/// `--group` names a group absent from the table, or the table has none.
pub const EXIT_UNKNOWN_GROUP: u8 = 5;

/// Writing `--out` or stdout failed.
pub const EXIT_OUTPUT_IO: u8 = 6;

/// Config file unreadable or invalid, or bad endpoint.
pub const EXIT_CONFIG: u8 = 7;

pub fn pipeline_exit_code(err: &PipelineError) -> u8 {
    match err {
        PipelineError::Load(_) => EXIT_LOAD,
        PipelineError::Schema(_) => EXIT_SCHEMA,
        PipelineError::UnknownGroup { .. } | PipelineError::NoGroups => EXIT_UNKNOWN_GROUP,
    }
}
