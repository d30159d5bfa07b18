




/// Statistics counters checked against known programs.
pub mod stats_verification;
