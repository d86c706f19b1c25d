/// The two fixed keys a Pactum store persists under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageKey {
    Blueprints,
    Contracts,
}

impl StorageKey {
    pub const ALL: [StorageKey; 2] = [StorageKey::Blueprints, StorageKey::Contracts];

    /// The key name as written to the backing medium.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Blueprints => "contract_blueprints",
            StorageKey::Contracts => "contracts",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
