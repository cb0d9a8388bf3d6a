//! `SoftResourceLimits` / `HardResourceLimits`.

use crate::error::{Error, Result};
use crate::options::OptionKey;
use crate::tree::{Composite, IntegerEntries, Pair, Tag};

/// Keys launchd accepts inside a resource-limit dict.
pub const LIMIT_KEYS: &[&str] = &[
    "CPU",
    "FileSize",
    "NumberOfFiles",
    "Core",
    "Data",
    "MemoryLock",
    "NumberOfProcesses",
    "ResidentSetSize",
    "Stack",
];

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceLimits {
    limits: Composite<IntegerEntries>,
}

impl ResourceLimits {
    pub fn soft() -> Self {
        Self::with_key(OptionKey::SoftResourceLimits)
    }

    pub fn hard() -> Self {
        Self::with_key(OptionKey::HardResourceLimits)
    }

    fn with_key(key: OptionKey) -> Self {
        Self {
            limits: Composite::new(key.as_str(), Tag::Dict, Vec::<(String, i64)>::new()),
        }
    }

    pub fn key(&self) -> &str {
        self.limits.key()
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    /// Add limits in order. Stops at the first key outside [`LIMIT_KEYS`];
    /// limits before it stay added.
    pub fn add<K: AsRef<str>>(&mut self, limits: impl IntoIterator<Item = (K, i64)>) -> Result<()> {
        for (key, value) in limits {
            let key = key.as_ref();
            if !LIMIT_KEYS.contains(&key) {
                return Err(Error::InvalidKey {
                    key: key.to_string(),
                    option: self.key().to_string(),
                    allowed: LIMIT_KEYS,
                });
            }
            self.limits.add([(key.to_string(), value)]);
        }
        Ok(())
    }

    /// Drop limits by key. Unknown keys are ignored.
    pub fn remove<K: AsRef<str>>(&mut self, keys: impl IntoIterator<Item = K>) -> usize {
        keys.into_iter()
            .map(|k| self.limits.remove_key(k.as_ref()))
            .sum()
    }

    pub fn serialize(&self) -> String {
        self.limits.serialize()
    }

    pub(crate) fn write(&self, out: &mut String, depth: usize) {
        self.limits.write(out, depth);
    }
}

impl From<ResourceLimits> for Pair {
    fn from(limits: ResourceLimits) -> Self {
        limits.limits.into()
    }
}
