// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers for one user-visible task.
//
// Rules for this layer:
//   - No parsing or expansion logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

/// Convert a SemEval-2016 directory into NLI-M TSV files
pub mod generate_use_case;

/// List the candidate pairs selected for a file name
pub mod pairs_use_case;
