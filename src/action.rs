//! Actions - user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Report, ResolvedLocation};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Search category =====
    /// Input text changed
    SearchQueryChange(String),

    /// Run the pipeline for this query (empty = infer from network)
    SearchSubmit(String),

    // ===== Location category =====
    /// Result: location found (stage 1)
    LocationDidResolve(ResolvedLocation),

    /// Result: location lookup failed
    LocationDidError(String),

    // ===== Report category =====
    /// Result: timezone and weather loaded (stages 2-3)
    ReportDidLoad(Report),

    /// Result: timezone or weather failed
    ReportDidError(String),

    // ===== Dialog category =====
    /// Close the error dialog
    DialogDismiss,

    // ===== UI category =====
    /// Move focus between the input and the Search button
    UiFocusNext,

    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Exit the application
    Quit,
}
