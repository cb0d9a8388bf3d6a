//! Option catalog: launchd keys and thin constructors over the tree types.
//!
//! Scalar options are a single pair; list and dict options are composites so
//! that later `add`/`remove` calls reach the collection. Schedules, limits
//! and KeepAlive live in their own submodules.

pub mod interval;
pub mod keep_alive;
pub mod limits;

pub use crate::calendar::{StartCalendarInterval, start_calendar_interval};
pub use interval::{StartInterval, Unit};
pub use keep_alive::{Branch, Condition, Conditions, KeepAlive, KeepAliveDepends};
pub use limits::{LIMIT_KEYS, ResourceLimits};

use crate::tree::{Composite, Entries, Entry, Pair, Strings, Tag};
use std::fmt;

/// Top-level keys of a launchd job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Label,
    Program,
    ProgramArguments,
    EnvironmentVariables,
    StandardInPath,
    StandardOutPath,
    StandardErrorPath,
    WorkingDirectory,
    SoftResourceLimits,
    HardResourceLimits,
    RunAtLoad,
    StartInterval,
    StartCalendarInterval,
    StartOnMount,
    WatchPaths,
    QueueDirectories,
    KeepAlive,
    UserName,
    GroupName,
    InitGroups,
    Umask,
    RootDirectory,
    AbandonProcessGroup,
    ExitTimeOut,
    TimeOut,
    ThrottleInterval,
    LegacyTimers,
    Nice,
}

impl OptionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::Label => "Label",
            OptionKey::Program => "Program",
            OptionKey::ProgramArguments => "ProgramArguments",
            OptionKey::EnvironmentVariables => "EnvironmentVariables",
            OptionKey::StandardInPath => "StandardInPath",
            OptionKey::StandardOutPath => "StandardOutPath",
            OptionKey::StandardErrorPath => "StandardErrorPath",
            OptionKey::WorkingDirectory => "WorkingDirectory",
            OptionKey::SoftResourceLimits => "SoftResourceLimits",
            OptionKey::HardResourceLimits => "HardResourceLimits",
            OptionKey::RunAtLoad => "RunAtLoad",
            OptionKey::StartInterval => "StartInterval",
            OptionKey::StartCalendarInterval => "StartCalendarInterval",
            OptionKey::StartOnMount => "StartOnMount",
            OptionKey::WatchPaths => "WatchPaths",
            OptionKey::QueueDirectories => "QueueDirectories",
            OptionKey::KeepAlive => "KeepAlive",
            OptionKey::UserName => "UserName",
            OptionKey::GroupName => "GroupName",
            OptionKey::InitGroups => "InitGroups",
            OptionKey::Umask => "Umask",
            OptionKey::RootDirectory => "RootDirectory",
            OptionKey::AbandonProcessGroup => "AbandonProcessGroup",
            OptionKey::ExitTimeOut => "ExitTimeOut",
            OptionKey::TimeOut => "TimeOut",
            OptionKey::ThrottleInterval => "ThrottleInterval",
            OptionKey::LegacyTimers => "LegacyTimers",
            OptionKey::Nice => "Nice",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! scalar_options {
    ($ctor:ident, $arg:ty => $( $name:ident : $key:ident ),* $(,)?) => {
        $(
            #[doc = concat!("`", stringify!($key), "` option.")]
            pub fn $name(value: $arg) -> Pair {
                Pair::$ctor(OptionKey::$key.as_str(), value)
            }
        )*
    };
}

scalar_options!(string, impl Into<String> =>
    label: Label,
    program: Program,
    standard_in_path: StandardInPath,
    standard_out_path: StandardOutPath,
    standard_error_path: StandardErrorPath,
    working_directory: WorkingDirectory,
    user_name: UserName,
    group_name: GroupName,
    root_directory: RootDirectory,
);

scalar_options!(integer, i64 =>
    umask: Umask,
    exit_time_out: ExitTimeOut,
    time_out: TimeOut,
    throttle_interval: ThrottleInterval,
    nice: Nice,
);

scalar_options!(boolean, bool =>
    run_at_load: RunAtLoad,
    start_on_mount: StartOnMount,
    abandon_process_group: AbandonProcessGroup,
    legacy_timers: LegacyTimers,
    init_groups: InitGroups,
);

fn string_array<I>(key: OptionKey, items: I) -> Composite<Strings>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    Composite::new(key.as_str(), Tag::Array, items)
}

pub fn program_arguments<I>(args: I) -> Composite<Strings>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    string_array(OptionKey::ProgramArguments, args)
}

pub fn watch_paths<I>(paths: I) -> Composite<Strings>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    string_array(OptionKey::WatchPaths, paths)
}

pub fn queue_directories<I>(dirs: I) -> Composite<Strings>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    string_array(OptionKey::QueueDirectories, dirs)
}

pub fn environment_variables<I>(vars: I) -> Composite<Entries>
where
    I: IntoIterator,
    I::Item: Into<Entry>,
{
    Composite::new(OptionKey::EnvironmentVariables.as_str(), Tag::Dict, vars)
}
