// ABOUTME: Render-time context module
// ABOUTME: Exports the immutable context chain used for lookup and override resolution

pub mod chain;
pub mod resolve;

pub use chain::Context;
