/// Component that adds some information about the entity
/// Useful for debugging - used in log messages when present
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct Info {
    /// A helpful name
    pub name: String,
}
