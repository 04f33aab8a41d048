// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits that name the core
// concepts of the converter:
//
//   record.rs     - Record, OpinionKey, OpinionSet, OutputRow
//   polarity.rs   - Polarity values, quantification, aggregation
//   vocabulary.rs - Target/aspect tables and CandidatePair
//   traits.rs     - Abstractions implemented by the data layer
//
// Rules for this layer:
//   - NO file I/O
//   - NO logging setup or CLI types
//   - Only plain data and pure functions
//
// Reference: Rust Book §5 (Structs), §6 (Enums), §10 (Traits)

/// Sentence records, opinion keys, and output rows
pub mod record;

/// Polarity values and the mention aggregation rule
pub mod polarity;

/// Fixed target/aspect enumerations per product domain
pub mod vocabulary;

/// Core abstractions (traits) that other layers implement
pub mod traits;
