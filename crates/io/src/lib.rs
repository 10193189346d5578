// Table loading: decoding, delimiter sniffing, schema check, group selection

pub mod csv;
pub mod error;
pub mod group;
pub mod schema;
pub mod table;

pub use self::csv::{load_file, load_table};
pub use error::{LoadError, SchemaError};
pub use group::{distinct_groups, select_group, ObservationRecord};
pub use schema::{validate_columns, GROUP_COLUMN, SPECIES_COLUMN};
pub use table::{RawRow, Table};
