//! Job description (job.json).
//!
//! JSON shape:
//! {
//!   "label": "com.example.backup",          // required
//!   "program_arguments": ["/usr/bin/backup", "--quiet"],
//!   "environment_variables": { "PATH": "/usr/bin:/bin" },
//!   "run_at_load": true,
//!   "start_interval": { "every": 2, "unit": "hour" },
//!   "start_calendar_interval": [
//!     { "at": { "Hour": 3, "Minute": 15 } },
//!     { "mix": { "weekday": [1, 3, 5], "hour": [9] } },
//!     { "interval": { "day": [1, 8] } }       // half-open: days 1..=7
//!   ],
//!   "soft_resource_limits": { "NumberOfFiles": 1024 },
//!   "keep_alive": { "branch": "depends", "successful_exit": false },
//!   ...
//! }
//!
//! Options land in the job in a fixed catalog order, not in JSON order.

use crate::calendar::{self, Fields, Predicate};
use crate::job::{Job, JobOption};
use crate::options::{self, Condition, KeepAlive, ResourceLimits, StartInterval, Unit};
use crate::tree::{Composite, Wrap};

use anyhow::{Context, bail};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    pub label: String,

    #[serde(default)]
    pub program: Option<String>,

    #[serde(default)]
    pub program_arguments: Vec<String>,

    #[serde(default)]
    pub environment_variables: BTreeMap<String, String>,

    #[serde(default)]
    pub standard_in_path: Option<String>,

    #[serde(default)]
    pub standard_out_path: Option<String>,

    #[serde(default)]
    pub standard_error_path: Option<String>,

    #[serde(default)]
    pub working_directory: Option<String>,

    #[serde(default)]
    pub soft_resource_limits: BTreeMap<String, i64>,

    #[serde(default)]
    pub hard_resource_limits: BTreeMap<String, i64>,

    #[serde(default)]
    pub run_at_load: Option<bool>,

    #[serde(default)]
    pub start_interval: Option<IntervalSpec>,

    #[serde(default)]
    pub start_calendar_interval: Vec<CalendarSpec>,

    #[serde(default)]
    pub start_on_mount: Option<bool>,

    #[serde(default)]
    pub watch_paths: Vec<String>,

    #[serde(default)]
    pub queue_directories: Vec<String>,

    #[serde(default)]
    pub keep_alive: Option<KeepAliveSpec>,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub group_name: Option<String>,

    #[serde(default)]
    pub init_groups: Option<bool>,

    #[serde(default)]
    pub umask: Option<i64>,

    #[serde(default)]
    pub root_directory: Option<String>,

    #[serde(default)]
    pub abandon_process_group: Option<bool>,

    #[serde(default)]
    pub exit_time_out: Option<i64>,

    #[serde(default)]
    pub time_out: Option<i64>,

    #[serde(default)]
    pub throttle_interval: Option<i64>,

    #[serde(default)]
    pub legacy_timers: Option<bool>,

    #[serde(default)]
    pub nice: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntervalSpec {
    pub every: f64,
    pub unit: Unit,
}

/// One entry of `start_calendar_interval`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarSpec {
    /// A literal predicate, e.g. `{"Hour": 3}`.
    At(Predicate),
    /// Explicit value lists per field; expanded to every combination.
    Mix(FieldsSpec<Vec<i64>>),
    /// `[start, end)` per field; expanded to every combination.
    Interval(FieldsSpec<Option<[i64; 2]>>),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldsSpec<T: Default> {
    pub month: T,
    pub day: T,
    pub week: T,
    pub weekday: T,
    pub hour: T,
    pub minute: T,
}

impl<T: Default> FieldsSpec<T> {
    fn map<U>(self, f: impl Fn(T) -> U) -> Fields<U> {
        Fields {
            month: f(self.month),
            day: f(self.day),
            week: f(self.week),
            weekday: f(self.weekday),
            hour: f(self.hour),
            minute: f(self.minute),
        }
    }
}

impl CalendarSpec {
    fn expand(self) -> Vec<Predicate> {
        match self {
            CalendarSpec::At(predicate) => vec![predicate],
            CalendarSpec::Mix(fields) => calendar::generate_mix(fields.map(|v| v)),
            CalendarSpec::Interval(fields) => {
                calendar::generate_interval(fields.map(|r| r.map(|[start, end]| start..end)))
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeepAliveSpec {
    pub branch: String,

    #[serde(default)]
    pub successful_exit: Option<bool>,

    #[serde(default)]
    pub crashed: Option<bool>,

    #[serde(default)]
    pub network_state: Option<bool>,

    #[serde(default)]
    pub other_job_enabled: BTreeMap<String, bool>,

    #[serde(default)]
    pub after_initial_demand: BTreeMap<String, bool>,

    #[serde(default)]
    pub path_state: BTreeMap<String, bool>,
}

impl KeepAliveSpec {
    fn build(self) -> crate::Result<KeepAlive> {
        let mut conditions = Vec::new();
        if let Some(flag) = self.successful_exit {
            conditions.push(Condition::SuccessfulExit(flag));
        }
        if let Some(flag) = self.crashed {
            conditions.push(Condition::Crashed(flag));
        }
        if let Some(flag) = self.network_state {
            conditions.push(Condition::NetworkState(flag));
        }
        if !self.other_job_enabled.is_empty() {
            conditions.push(Condition::other_job_enabled(self.other_job_enabled));
        }
        if !self.after_initial_demand.is_empty() {
            conditions.push(Condition::after_initial_demand(self.after_initial_demand));
        }
        if !self.path_state.is_empty() {
            conditions.push(Condition::path_state(self.path_state));
        }
        KeepAlive::select(&self.branch, conditions)
    }
}

impl JobSpec {
    /// Read and parse a job description file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read job description {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parse job description {}", path.display()))
    }

    /// Validate the description and assemble a job bound to `target`.
    pub fn validate_and_build(self, target: impl Into<PathBuf>) -> anyhow::Result<Job> {
        if self.label.trim().is_empty() {
            bail!("job description has an empty label");
        }

        check_keys("environment_variables", self.environment_variables.keys())?;
        if let Some(keep_alive) = &self.keep_alive {
            check_keys("keep_alive.other_job_enabled", keep_alive.other_job_enabled.keys())?;
            check_keys("keep_alive.after_initial_demand", keep_alive.after_initial_demand.keys())?;
            check_keys("keep_alive.path_state", keep_alive.path_state.keys())?;
        }

        let mut job = Job::new(target);

        push(&mut job, Some(options::label(self.label)));
        push(&mut job, self.program.map(options::program));
        push(&mut job, non_empty(options::program_arguments(self.program_arguments)));
        push(
            &mut job,
            non_empty(options::environment_variables(self.environment_variables)),
        );
        push(&mut job, self.standard_in_path.map(options::standard_in_path));
        push(&mut job, self.standard_out_path.map(options::standard_out_path));
        push(&mut job, self.standard_error_path.map(options::standard_error_path));
        push(&mut job, self.working_directory.map(options::working_directory));
        push(
            &mut job,
            resource_limits(ResourceLimits::soft(), self.soft_resource_limits)?,
        );
        push(
            &mut job,
            resource_limits(ResourceLimits::hard(), self.hard_resource_limits)?,
        );
        push(&mut job, self.run_at_load.map(options::run_at_load));
        push(
            &mut job,
            self.start_interval
                .map(|s| StartInterval::new().every(s.every).unit(s.unit)),
        );
        let predicates: Vec<Predicate> = self
            .start_calendar_interval
            .into_iter()
            .flat_map(CalendarSpec::expand)
            .collect();
        push(&mut job, non_empty(options::start_calendar_interval(predicates)));
        push(&mut job, self.start_on_mount.map(options::start_on_mount));
        push(&mut job, non_empty(options::watch_paths(self.watch_paths)));
        push(&mut job, non_empty(options::queue_directories(self.queue_directories)));
        push(
            &mut job,
            self.keep_alive
                .map(KeepAliveSpec::build)
                .transpose()
                .context("keep_alive")?,
        );
        push(&mut job, self.user_name.map(options::user_name));
        push(&mut job, self.group_name.map(options::group_name));
        push(&mut job, self.init_groups.map(options::init_groups));
        push(&mut job, self.umask.map(options::umask));
        push(&mut job, self.root_directory.map(options::root_directory));
        push(&mut job, self.abandon_process_group.map(options::abandon_process_group));
        push(&mut job, self.exit_time_out.map(options::exit_time_out));
        push(&mut job, self.time_out.map(options::time_out));
        push(&mut job, self.throttle_interval.map(options::throttle_interval));
        push(&mut job, self.legacy_timers.map(options::legacy_timers));
        push(&mut job, self.nice.map(options::nice));

        Ok(job)
    }
}

fn push(job: &mut Job, option: Option<impl Into<JobOption>>) {
    if let Some(option) = option {
        job.add_option(option);
    }
}

/// Dict keys become `<key>` elements and must not be empty.
fn check_keys<'a>(field: &str, mut keys: impl Iterator<Item = &'a String>) -> anyhow::Result<()> {
    if keys.any(|k| k.trim().is_empty()) {
        bail!("{} has an empty key", field);
    }
    Ok(())
}

/// Empty collections are left out of the document entirely.
fn non_empty<W: Wrap>(composite: Composite<W>) -> Option<Composite<W>> {
    (!composite.is_empty()).then_some(composite)
}

fn resource_limits(
    mut limits: ResourceLimits,
    values: BTreeMap<String, i64>,
) -> anyhow::Result<Option<ResourceLimits>> {
    if values.is_empty() {
        return Ok(None);
    }
    limits
        .add(values)
        .with_context(|| format!("invalid {}", limits.key()))?;
    Ok(Some(limits))
}
