//! Float-switch polarity for the well and cistern level sensors.
//!
//! Both switches are wired as plain digital inputs.  The electrical level
//! that means "empty well" or "full cistern" depends on how the float is
//! mounted, so it is pinned here and nowhere else.
//!
//! | Sensor  | Debounced level | Meaning          |
//! |---------|-----------------|------------------|
//! | well    | active          | well empty       |
//! | cistern | inactive        | cistern full     |

/// Debounced well-sensor level that means the well is empty.
pub const WELL_EMPTY_LEVEL: bool = true;

/// Debounced cistern-sensor level that means the cistern is full.
pub const CISTERN_FULL_LEVEL: bool = false;

pub const fn well_is_empty(level: bool) -> bool {
    level == WELL_EMPTY_LEVEL
}

pub const fn cistern_is_full(level: bool) -> bool {
    level == CISTERN_FULL_LEVEL
}
