


/// Misprediction recovery.
pub mod flush;

/// Whole programs run to completion.
pub mod end_to_end;
