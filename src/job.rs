//! Document root: the top-level dict of a launchd job and its target file.

use crate::calendar::StartCalendarInterval;
use crate::error::{Error, Result};
use crate::options::{KeepAlive, OptionKey, ResourceLimits, StartInterval};
use crate::render::render_document;
use crate::tree::{Composite, Entries, Pair, Strings};
use std::fs;
use std::path::{Path, PathBuf};

/// An option as attached to a job.
///
/// Collection options keep their container, so `add`/`remove` after
/// attaching still reach the outer array or dict.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOption {
    Pair(Pair),
    Strings(Composite<Strings>),
    Entries(Composite<Entries>),
    Calendar(StartCalendarInterval),
    KeepAlive(KeepAlive),
    Limits(ResourceLimits),
}

impl JobOption {
    pub fn key(&self) -> &str {
        match self {
            JobOption::Pair(pair) => pair.key(),
            JobOption::Strings(strings) => strings.key(),
            JobOption::Entries(entries) => entries.key(),
            JobOption::Calendar(calendar) => calendar.key(),
            JobOption::KeepAlive(_) => OptionKey::KeepAlive.as_str(),
            JobOption::Limits(limits) => limits.key(),
        }
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.write(&mut out, 0);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        match self {
            JobOption::Pair(pair) => pair.write(out, depth),
            JobOption::Strings(strings) => strings.write(out, depth),
            JobOption::Entries(entries) => entries.write(out, depth),
            JobOption::Calendar(calendar) => calendar.write(out, depth),
            JobOption::KeepAlive(keep_alive) => keep_alive.write(out, depth),
            JobOption::Limits(limits) => limits.write(out, depth),
        }
    }
}

impl From<Pair> for JobOption {
    fn from(pair: Pair) -> Self {
        JobOption::Pair(pair)
    }
}

impl From<Composite<Strings>> for JobOption {
    fn from(strings: Composite<Strings>) -> Self {
        JobOption::Strings(strings)
    }
}

impl From<Composite<Entries>> for JobOption {
    fn from(entries: Composite<Entries>) -> Self {
        JobOption::Entries(entries)
    }
}

impl From<StartCalendarInterval> for JobOption {
    fn from(calendar: StartCalendarInterval) -> Self {
        JobOption::Calendar(calendar)
    }
}

impl From<KeepAlive> for JobOption {
    fn from(keep_alive: KeepAlive) -> Self {
        JobOption::KeepAlive(keep_alive)
    }
}

impl From<ResourceLimits> for JobOption {
    fn from(limits: ResourceLimits) -> Self {
        JobOption::Limits(limits)
    }
}

impl From<StartInterval> for JobOption {
    fn from(interval: StartInterval) -> Self {
        JobOption::Pair(interval.into())
    }
}

/// A job document bound to the file it will be written to.
///
/// Options keep insertion order. Keys are not deduplicated; that is up to
/// the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    path: PathBuf,
    options: Vec<JobOption>,
}

impl Job {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add_option(&mut self, option: impl Into<JobOption>) -> &mut Self {
        self.options.push(option.into());
        self
    }

    pub fn options(&self) -> &[JobOption] {
        &self.options
    }

    /// First option with `key`.
    pub fn option(&self, key: &str) -> Option<&JobOption> {
        self.options.iter().find(|o| o.key() == key)
    }

    pub fn option_mut(&mut self, key: &str) -> Option<&mut JobOption> {
        self.options.iter_mut().find(|o| o.key() == key)
    }

    /// Remove every option with `key`; returns how many were removed.
    pub fn remove_option(&mut self, key: &str) -> usize {
        let before = self.options.len();
        self.options.retain(|o| o.key() != key);
        before - self.options.len()
    }

    pub fn clear(&mut self) {
        self.options.clear();
    }

    pub fn serialize(&self) -> String {
        let mut body = String::new();
        for option in &self.options {
            option.write(&mut body, 1);
        }
        render_document(&body)
    }

    /// Write the document to the job's own path.
    pub fn commit(&self) -> Result<()> {
        self.commit_to(&self.path)
    }

    /// Write the document to `target`, replacing whatever is there.
    pub fn commit_to(&self, target: impl AsRef<Path>) -> Result<()> {
        let target = target.as_ref();
        let text = self.serialize();
        fs::write(target, &text).map_err(|source| Error::Io {
            path: target.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %target.display(), bytes = text.len(), options = self.options.len(), "wrote job plist");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{self, KeepAlive, StartInterval};
    use pretty_assertions::assert_eq;

    fn sample() -> Job {
        let mut job = Job::new("/tmp/com.example.job.plist");
        job.add_option(options::label("com.example.job"))
            .add_option(options::program("/usr/local/bin/job"));
        job
    }

    #[test]
    fn document_layout() {
        let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>com.example.job</string>
    <key>Program</key>
    <string>/usr/local/bin/job</string>
</dict>
</plist>
"#;
        assert_eq!(sample().serialize(), expected);
    }

    #[test]
    fn serialize_is_idempotent() {
        let job = sample();
        assert_eq!(job.serialize(), job.serialize());
    }

    #[test]
    fn nested_options_indent_per_level() {
        let mut job = Job::new("unused");
        job.add_option(KeepAlive::always())
            .add_option(options::program_arguments(["/bin/sh", "-c", "true"]));
        let text = job.serialize();
        assert!(text.contains("    <key>KeepAlive</key>\n    <true/>\n"));
        assert!(text.contains("    <array>\n        <string>/bin/sh</string>\n"));
    }

    #[test]
    fn duplicate_keys_are_kept() {
        let mut job = sample();
        job.add_option(options::label("again"));
        assert_eq!(job.options().len(), 3);
        assert_eq!(job.remove_option("Label"), 2);
        assert!(job.option("Label").is_none());
    }

    #[test]
    fn options_can_be_changed_after_attach() {
        let mut job = sample();
        job.add_option(StartInterval::new().every(1).hour());
        if let Some(JobOption::Pair(program)) = job.option_mut("Program") {
            program.set_value(crate::tree::Node::string("/opt/job"));
        }
        assert!(job.serialize().contains("<string>/opt/job</string>"));
        assert!(job.serialize().contains("<integer>3600</integer>"));
    }

    #[test]
    fn attached_collections_still_mutate_their_outer_node() {
        let mut job = sample();
        job.add_option(options::watch_paths(["/tmp/a"]))
            .add_option(options::environment_variables([("LANG", "C")]));

        match job.option_mut("WatchPaths") {
            Some(JobOption::Strings(paths)) => paths.add(["/tmp/b"]),
            other => panic!("unexpected option: {other:?}"),
        }
        if let Some(JobOption::Entries(env)) = job.option_mut("EnvironmentVariables") {
            assert_eq!(env.remove_key("LANG"), 1);
        }

        let text = job.serialize();
        assert!(text.contains(
            "    <key>WatchPaths</key>\n    <array>\n        <string>/tmp/a</string>\n        <string>/tmp/b</string>\n    </array>\n"
        ));
        assert!(!text.contains("EnvironmentVariables"));

        let keys: Vec<String> = crate::inspect::parse_document(&text)
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["Label", "Program", "WatchPaths"]);
    }

    #[test]
    fn keep_alive_conditions_change_after_attach() {
        let mut job = sample();
        job.add_option(KeepAlive::depends([options::Condition::Crashed(true)]));

        if let Some(JobOption::KeepAlive(keep_alive)) = job.option_mut("KeepAlive") {
            if let Some(conditions) = keep_alive.conditions_mut() {
                conditions.add([options::Condition::SuccessfulExit(false)]);
            }
        }
        assert!(job.serialize().contains(
            "        <key>SuccessfulExit</key>\n        <false/>\n    </dict>\n"
        ));
    }

    #[test]
    fn multi_line_arguments_keep_their_text() {
        let mut job = sample();
        job.add_option(options::program_arguments(["/bin/sh", "-c", "echo a\necho b"]));
        let text = job.serialize();
        assert!(text.contains("        <string>echo a\necho b</string>\n"));
    }

    #[test]
    fn commit_overwrites_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.plist");
        std::fs::write(&path, "stale content that is much longer than nothing").unwrap();

        let job = sample();
        job.commit_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), job.serialize());

        let own = Job::new(dir.path().join("own.plist"));
        own.commit().unwrap();
        assert!(own.path().exists());
    }

    #[test]
    fn commit_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let job = Job::new(dir.path().join("missing").join("job.plist"));
        let err = job.commit().unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("missing"));
    }
}
