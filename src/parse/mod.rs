pub mod record_parser;
pub mod record_serializer;

pub use record_parser::{
    FIELD_COUNT, RecordError, parse_record, parse_record_bytes, parse_record_id,
};
pub use record_serializer::{serialize_lines, serialize_record};
