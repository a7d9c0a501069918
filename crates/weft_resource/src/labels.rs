//! Lineage label keys propagated from composite to composed resources.

/// Label naming the composite a composed resource belongs to. Its value
/// doubles as the name prefix for generated child names, so composition
/// cannot proceed without it.
pub const LABEL_NAME_PREFIX: &str = "weft.io/composite";

/// Label carrying the originating claim's name.
pub const LABEL_CLAIM_NAME: &str = "weft.io/claim-name";

/// Label carrying the originating claim's namespace.
pub const LABEL_CLAIM_NAMESPACE: &str = "weft.io/claim-namespace";
