//! Effects - side effects declared by the reducer

use crate::state::Location;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Find coordinates for a city, or infer them from the network when `None`
    ResolveLocation { query: Option<String> },
    /// Look up the timezone and fetch weather for a resolved location
    FetchReport { location: Location },
}
