//! # Procgen Attributes
//!
//! Typed attributes shared by initial shapes and encoder options.
//!
//! ## Architecture
//!
//! ```text
//! ["height:float=12.5", ...] → codec::parse_entries → AttributeMap
//! AttributeMap + EncoderSchema → schema::validate → AttributeMap (default-filled)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use procgen_attributes::parse_entries;
//!
//! let attrs = parse_entries(["ruleFile:string=bin/rule.cgb", "seed:int=42"]).unwrap();
//! assert_eq!(attrs.get_string("ruleFile"), Some("bin/rule.cgb"));
//! assert_eq!(attrs.get_int("seed"), Some(42));
//! ```

pub mod codec;
pub mod error;
pub mod map;
pub mod schema;
pub mod value;

// Re-export public API
pub use codec::{encode_entry, parse_entries, parse_entry};
pub use error::{AttributeEncodeError, AttributeParseError, EncoderValidationError};
pub use map::{AttributeMap, AttributeMapBuilder};
pub use schema::{validate, validate_options, EncoderSchema, EncoderSchemas, UnknownOptionPolicy};
pub use value::{AttributeType, AttributeValue};
