// Exit code registry (single source of truth)

pub const EXIT_SUCCESS: u8 = 0;
/// Run completed but found mismatches or unmatched residues.
pub const EXIT_MISMATCH: u8 = 1;
/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 2;
/// Runtime failure: unreadable file, bad CSV structure, IO.
pub const EXIT_RUNTIME: u8 = 3;
