use plistgen::calendar::{self, Fields};
use plistgen::inspect::{TopLevelEntry, parse_document};
use plistgen::options::{self, Condition, KeepAlive, ResourceLimits, StartInterval};
use plistgen::{Job, JobOption};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

const GOLDEN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>com.example.backup</string>
    <key>ProgramArguments</key>
    <array>
        <string>/usr/local/bin/backup</string>
        <string>--quiet</string>
    </array>
    <key>StartCalendarInterval</key>
    <array>
        <dict>
            <key>Weekday</key>
            <integer>1</integer>
            <key>Hour</key>
            <integer>3</integer>
        </dict>
        <dict>
            <key>Weekday</key>
            <integer>5</integer>
            <key>Hour</key>
            <integer>3</integer>
        </dict>
    </array>
    <key>KeepAlive</key>
    <dict>
        <key>SuccessfulExit</key>
        <false/>
    </dict>
    <key>Nice</key>
    <integer>10</integer>
</dict>
</plist>
"#;

fn backup_job() -> Job {
    let mut job = Job::new("com.example.backup.plist");
    job.add_option(options::label("com.example.backup"))
        .add_option(options::program_arguments(["/usr/local/bin/backup", "--quiet"]))
        .add_option(options::start_calendar_interval(calendar::generate_mix(
            Fields {
                weekday: vec![1, 5],
                hour: vec![3],
                ..Default::default()
            },
        )))
        .add_option(KeepAlive::depends([Condition::SuccessfulExit(false)]))
        .add_option(options::nice(10));
    job
}

#[test]
fn golden_document() {
    assert_eq!(backup_job().serialize(), GOLDEN);
}

#[test]
fn label_and_program_round_trip() {
    let mut job = Job::new("unused.plist");
    job.add_option(options::label("job"))
        .add_option(options::program("/bin/date"));

    let entries = parse_document(&job.serialize()).unwrap();
    let map: BTreeMap<String, String> = entries
        .into_iter()
        .filter_map(|e| e.value.map(|v| (e.key, v)))
        .collect();

    let expected: BTreeMap<String, String> = [
        ("Label".to_string(), "job".to_string()),
        ("Program".to_string(), "/bin/date".to_string()),
    ]
    .into_iter()
    .collect();
    assert_eq!(map, expected);
}

#[test]
fn inspector_sees_every_option_kind() {
    let mut limits = ResourceLimits::soft();
    limits.add([("NumberOfFiles", 256)]).unwrap();

    let mut job = backup_job();
    job.add_option(StartInterval::new().every(10).minute())
        .add_option(options::run_at_load(true))
        .add_option(limits);

    let entries = parse_document(&job.serialize()).unwrap();
    let kinds: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.key.as_str(), e.kind.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("Label", "string"),
            ("ProgramArguments", "array"),
            ("StartCalendarInterval", "array"),
            ("KeepAlive", "dict"),
            ("Nice", "integer"),
            ("StartInterval", "integer"),
            ("RunAtLoad", "true"),
            ("SoftResourceLimits", "dict"),
        ]
    );
    assert_eq!(
        entries[5],
        TopLevelEntry {
            key: "StartInterval".into(),
            kind: "integer".into(),
            value: Some("600".into()),
        }
    );
}

#[test]
fn committed_file_matches_serialization() {
    let dir = tempfile::tempdir().unwrap();
    let job = backup_job();
    let path = dir.path().join("backup.plist");

    job.commit_to(&path).unwrap();
    job.commit_to(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), GOLDEN);
}

#[test]
fn multi_line_program_survives_render_and_inspect() {
    let script = "#!/bin/sh\n  echo a\necho b";
    let mut job = Job::new("unused.plist");
    job.add_option(options::label("job"))
        .add_option(options::program(script))
        .add_option(options::program_arguments(["/bin/sh", "-c", script]));

    let text = job.serialize();
    assert!(text.contains("        <string>#!/bin/sh\n  echo a\necho b</string>\n"));

    let entries = parse_document(&text).unwrap();
    assert_eq!(entries[1].value.as_deref(), Some(script));
    assert_eq!(entries[2].kind, "array");
}

#[test]
fn attached_watch_paths_can_grow() {
    let mut job = backup_job();
    job.add_option(options::watch_paths(["/tmp/a"]));
    if let Some(JobOption::Strings(paths)) = job.option_mut("WatchPaths") {
        paths.add(["/tmp/b"]);
    }

    let entries = parse_document(&job.serialize()).unwrap();
    let last = entries.last().unwrap();
    assert_eq!((last.key.as_str(), last.kind.as_str()), ("WatchPaths", "array"));
    assert!(job.serialize().contains("        <string>/tmp/b</string>\n    </array>\n"));
}
