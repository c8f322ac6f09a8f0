// Résumé analysis: the three user-facing actions, their prompt templates,
// and the session controller that drives one upload from staging to result.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod session;
