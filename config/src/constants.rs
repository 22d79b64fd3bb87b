//! # Configuration Constants
//!
//! Centralized constants for the generation pipeline. Defaults for initial
//! shapes, encoder identifiers, the attribute encoding and file layout are
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Initial Shape**: Rule file, start rule, seed and name defaults
//! - **Encoders**: Identifiers, option keys and output file names
//! - **Attribute Encoding**: Separators of the `name:type=value` format
//! - **Default Geometry**: The fallback quad
//! - **Limits**: Safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used when comparing re-encoded attribute values and report values.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// INITIAL SHAPE DEFAULTS
// =============================================================================

/// Rule file used when the attributes carry no `ruleFile` override.
///
/// The key is looked up in the resolve map of the rule package.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_RULE_FILE;
///
/// let user_rule_file: Option<&str> = None;
/// assert_eq!(user_rule_file.unwrap_or(DEFAULT_RULE_FILE), "bin/rule.cgb");
/// ```
pub const DEFAULT_RULE_FILE: &str = "bin/rule.cgb";

/// Start rule used when the attributes carry no `startRule` override.
///
/// Start rules are written as `<style>$<rule>`.
pub const DEFAULT_START_RULE: &str = "default$init";

/// Random seed handed to the engine when the attributes carry no `seed`.
pub const DEFAULT_SEED: i32 = 666;

/// Name given to every initial shape.
pub const DEFAULT_SHAPE_NAME: &str = "TheInitialShape";

/// Attribute key overriding the rule file.
pub const ATTR_RULE_FILE: &str = "ruleFile";

/// Attribute key overriding the start rule.
pub const ATTR_START_RULE: &str = "startRule";

/// Attribute key overriding the seed.
pub const ATTR_SEED: &str = "seed";

// =============================================================================
// ENCODER CONSTANTS
// =============================================================================

/// Encoder delivering geometry and reports into memory through callbacks.
///
/// When this is the primary encoder, generation returns one model per shape.
pub const ENCODER_ID_IN_MEMORY: &str = "com.procgen.InMemoryEncoder";

/// Side-channel encoder forwarding the rule reports.
pub const ENCODER_ID_REPORT: &str = "com.procgen.core.ReportEncoder";

/// Side-channel encoder forwarding rule prints and rule errors.
pub const ENCODER_ID_PRINT: &str = "com.procgen.core.PrintEncoder";

/// File encoder writing Wavefront OBJ meshes.
pub const ENCODER_ID_OBJ: &str = "com.procgen.codecs.ObjEncoder";

/// Option key naming the output of the side-channel encoders.
pub const ENCODER_OPT_NAME: &str = "name";

/// Option key naming the files of the geometry encoders.
pub const ENCODER_OPT_BASE_NAME: &str = "baseName";

/// File receiving report entries when output goes to disk.
pub const REPORT_FILE_NAME: &str = "CGAReport.txt";

/// File name option of the print encoder.
pub const PRINT_FILE_NAME: &str = "CGAPrint.txt";

/// Default value of the `baseName` option.
pub const DEFAULT_BASE_NAME: &str = "theModel";

/// Encoder options used when the caller passes none.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_ENCODER_OPTIONS;
///
/// assert_eq!(DEFAULT_ENCODER_OPTIONS, ["baseName:string=theModel"]);
/// ```
pub const DEFAULT_ENCODER_OPTIONS: [&str; 1] = ["baseName:string=theModel"];

// =============================================================================
// ATTRIBUTE ENCODING CONSTANTS
// =============================================================================

/// Separates the attribute name from its type tag.
pub const ATTR_TYPE_SEPARATOR: char = ':';

/// Separates the type tag from the value.
pub const ATTR_VALUE_SEPARATOR: char = '=';

/// Separates the elements of an array value.
///
/// Reserved: string array elements may not contain it.
///
/// # Example
///
/// ```rust
/// use config::constants::ATTR_ARRAY_SEPARATOR;
///
/// let parts: Vec<&str> = "1;2;3".split(ATTR_ARRAY_SEPARATOR).collect();
/// assert_eq!(parts.len(), 3);
/// ```
pub const ATTR_ARRAY_SEPARATOR: char = ';';

/// Suffix marking the array form of a type tag (`float[]`).
pub const ATTR_ARRAY_SUFFIX: &str = "[]";

// =============================================================================
// DEFAULT GEOMETRY
// =============================================================================

/// Vertex coordinates of the fallback quad, as flat xyz triples.
///
/// The quad lies in the XZ plane with its normal along +Y.
pub const DEFAULT_QUAD_VERTICES: [f64; 12] = [
    0.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, //
    1.0, 0.0, 1.0, //
    1.0, 0.0, 0.0,
];

/// Vertex indices of the fallback quad.
pub const DEFAULT_QUAD_INDICES: [u32; 4] = [0, 1, 2, 3];

/// Face vertex counts of the fallback quad.
pub const DEFAULT_QUAD_FACE_COUNTS: [u32; 1] = [4];

// =============================================================================
// FILE LAYOUT CONSTANTS
// =============================================================================

/// Directory created next to the engine installation for file encoders.
pub const OUTPUT_DIR_NAME: &str = "output";

/// Directory holding the engine extension libraries, relative to the
/// engine installation.
pub const EXTENSION_DIR_NAME: &str = "lib";

/// Joins a rule package URI and an entry key inside the package
/// (`file:///rules/city.rpk!/bin/rule.cgb`).
pub const PACKAGE_ENTRY_SEPARATOR: &str = "!/";

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum file size for geometry read from disk (in bytes).
///
/// Prevents loading extremely large files that could cause memory issues.
/// 100 MB default.
pub const MAX_FILE_SIZE: usize = 100 * 1024 * 1024;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}
