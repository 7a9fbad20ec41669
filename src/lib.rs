// Library module for csguard
// Re-exports the checksum engine for the binary and integration tests

pub mod hash;
