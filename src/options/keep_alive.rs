//! `KeepAlive`: either unconditional, or a dict of conditions.

use crate::error::{Error, Result};
use crate::options::OptionKey;
use crate::tree::{Composite, Element, Flag, Flags, Pair, Tag, Wrap};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Always,
    Depends,
}

impl FromStr for Branch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "always" => Ok(Branch::Always),
            "depends" => Ok(Branch::Depends),
            other => Err(Error::UnsupportedBranch(other.to_string())),
        }
    }
}

/// One entry of the conditional `KeepAlive` dict.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    SuccessfulExit(bool),
    Crashed(bool),
    NetworkState(bool),
    OtherJobEnabled(Composite<Flags>),
    AfterInitialDemand(Composite<Flags>),
    PathState(Composite<Flags>),
}

impl Condition {
    /// Keep alive while (or unless, for `false`) the named jobs are loaded.
    pub fn other_job_enabled<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Flag>,
    {
        Condition::OtherJobEnabled(Composite::new("OtherJobEnabled", Tag::Dict, labels))
    }

    pub fn after_initial_demand<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Flag>,
    {
        Condition::AfterInitialDemand(Composite::new("AfterInitialDemand", Tag::Dict, labels))
    }

    /// Keep alive while each path exists (`true`) or is absent (`false`).
    pub fn path_state<I>(paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Flag>,
    {
        Condition::PathState(Composite::new("PathState", Tag::Dict, paths))
    }

    pub fn key(&self) -> &str {
        match self {
            Condition::SuccessfulExit(_) => "SuccessfulExit",
            Condition::Crashed(_) => "Crashed",
            Condition::NetworkState(_) => "NetworkState",
            Condition::OtherJobEnabled(c)
            | Condition::AfterInitialDemand(c)
            | Condition::PathState(c) => c.key(),
        }
    }
}

impl From<Condition> for Pair {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::SuccessfulExit(flag) => Pair::boolean("SuccessfulExit", flag),
            Condition::Crashed(flag) => Pair::boolean("Crashed", flag),
            Condition::NetworkState(flag) => Pair::boolean("NetworkState", flag),
            Condition::OtherJobEnabled(c)
            | Condition::AfterInitialDemand(c)
            | Condition::PathState(c) => c.into(),
        }
    }
}

/// Inner wrapper for the conditional dict.
pub struct Conditions;

impl Wrap for Conditions {
    type Item = Condition;

    fn wrap(item: Condition) -> Element {
        Element::Pair(item.into())
    }
}

pub type KeepAliveDepends = Composite<Conditions>;

#[derive(Debug, Clone, PartialEq)]
pub enum KeepAlive {
    Always,
    Depends(KeepAliveDepends),
}

impl KeepAlive {
    pub fn always() -> Self {
        KeepAlive::Always
    }

    pub fn depends(conditions: impl IntoIterator<Item = Condition>) -> Self {
        KeepAlive::Depends(Composite::new(
            OptionKey::KeepAlive.as_str(),
            Tag::Dict,
            conditions,
        ))
    }

    /// Pick a branch by name. `conditions` are ignored for `"always"`.
    pub fn select(branch: &str, conditions: impl IntoIterator<Item = Condition>) -> Result<Self> {
        Ok(match branch.parse::<Branch>()? {
            Branch::Always => Self::always(),
            Branch::Depends => Self::depends(conditions),
        })
    }

    pub fn branch(&self) -> Branch {
        match self {
            KeepAlive::Always => Branch::Always,
            KeepAlive::Depends(_) => Branch::Depends,
        }
    }

    /// The condition dict, for the `depends` branch.
    pub fn conditions_mut(&mut self) -> Option<&mut KeepAliveDepends> {
        match self {
            KeepAlive::Always => None,
            KeepAlive::Depends(conditions) => Some(conditions),
        }
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    pub(crate) fn write(&self, out: &mut String, depth: usize) {
        match self {
            KeepAlive::Always => {
                Pair::boolean(OptionKey::KeepAlive.as_str(), true).write(out, depth)
            }
            KeepAlive::Depends(conditions) => conditions.write(out, depth),
        }
    }
}

impl From<KeepAlive> for Pair {
    fn from(keep_alive: KeepAlive) -> Self {
        match keep_alive {
            KeepAlive::Always => Pair::boolean(OptionKey::KeepAlive.as_str(), true),
            KeepAlive::Depends(conditions) => conditions.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn always_is_a_true_pair() {
        assert_eq!(
            KeepAlive::always().serialize(),
            "<key>KeepAlive</key>\n<true/>\n"
        );
    }

    #[test]
    fn depends_holds_conditions() {
        let keep_alive = KeepAlive::depends([
            Condition::SuccessfulExit(false),
            Condition::other_job_enabled(["com.example.db"]),
        ]);
        assert_eq!(
            keep_alive.serialize(),
            "<key>KeepAlive</key>\n\
             <dict>\n    \
             <key>SuccessfulExit</key>\n    \
             <false/>\n    \
             <key>OtherJobEnabled</key>\n    \
             <dict>\n        \
             <key>com.example.db</key>\n        \
             <true/>\n    \
             </dict>\n\
             </dict>\n"
        );
    }

    #[test]
    fn conditions_can_be_added_and_removed() {
        let mut keep_alive = KeepAlive::select("depends", [Condition::Crashed(true)]).unwrap();
        let conditions = keep_alive.conditions_mut().unwrap();

        conditions.add([Condition::path_state([("/tmp/flag", false)])]);
        assert_eq!(conditions.len(), 2);

        assert_eq!(conditions.remove([Condition::Crashed(true)]), 1);
        assert_eq!(conditions.remove_key("PathState"), 1);
        assert!(conditions.is_empty());
    }

    #[test]
    fn unknown_branch_always_fails() {
        for _ in 0..3 {
            let err = KeepAlive::select("sometimes", [Condition::Crashed(true)]).unwrap_err();
            assert!(matches!(err, Error::UnsupportedBranch(ref b) if b == "sometimes"));
        }
        assert!("Always".parse::<Branch>().is_err());
    }

    #[test]
    fn always_branch_has_no_condition_dict() {
        let mut keep_alive = KeepAlive::select("always", []).unwrap();
        assert_eq!(keep_alive.branch(), Branch::Always);
        assert!(keep_alive.conditions_mut().is_none());
    }
}
