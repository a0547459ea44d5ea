use chrono::{Datelike, NaiveDate};
use plaintask::model::task::{Priority, Status, Task, parse_deadline};
use plaintask::parse::{parse_record, serialize_lines, serialize_record};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;

/// Helper: load a fixture file, parse every line, serialize it back, and
/// assert byte-for-byte equality
fn assert_store_round_trip(fixture_name: &str) {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(fixture_name);
    let source = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Could not read fixture {}: {}", fixture_name, e));

    let lines: Vec<String> = source
        .lines()
        .map(|line| {
            let task = parse_record(line)
                .unwrap_or_else(|e| panic!("{}: {:?}: {}", fixture_name, line, e));
            serialize_record(&task)
        })
        .collect();

    assert_eq!(
        String::from_utf8(serialize_lines(&lines)).unwrap(),
        source,
        "Round-trip failed for fixture: {}",
        fixture_name
    );
}

#[test]
fn round_trip_fixture_file() {
    assert_store_round_trip("project.txt");
}

/// Characters free-text fields are built from: everything a record may
/// hold, including whitespace, quotes and multi-byte text, but never the
/// delimiter or a line break.
const FIELD_CHARS: &[char] = &[
    'a', 'Z', '0', '9', ' ', '\t', ';', ':', '"', '\'', '/', '\\', '-', '_', '.', '(', ')',
    'é', 'Ü', 'ß', '✓', '日', '本', '🦀',
];

fn random_text(rng: &mut StdRng) -> String {
    let len = rng.gen_range(0..16);
    (0..len)
        .map(|_| FIELD_CHARS[rng.gen_range(0..FIELD_CHARS.len())])
        .collect()
}

fn random_deadline(rng: &mut StdRng) -> NaiveDate {
    let lo = NaiveDate::from_ymd_opt(1000, 1, 1).unwrap().num_days_from_ce();
    let hi = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap().num_days_from_ce();
    NaiveDate::from_num_days_from_ce_opt(rng.gen_range(lo..=hi)).unwrap()
}

#[test]
fn round_trip_generated_tasks() {
    let priorities = [Priority::Low, Priority::Medium, Priority::High];
    let statuses = [Status::Pending, Status::InProgress, Status::Completed];
    let mut rng = StdRng::seed_from_u64(0x7a5c);

    for _ in 0..2000 {
        let task = Task::new(
            rng.gen_range(1..=u32::MAX),
            random_text(&mut rng),
            random_text(&mut rng),
            random_text(&mut rng),
            random_deadline(&mut rng),
            priorities[rng.gen_range(0..priorities.len())],
            statuses[rng.gen_range(0..statuses.len())],
            random_text(&mut rng),
        )
        .unwrap();

        let line = serialize_record(&task);
        let decoded = parse_record(&line).unwrap_or_else(|e| panic!("{:?}: {}", line, e));
        assert_eq!(decoded, task, "record: {:?}", line);
    }
}

#[test]
fn round_trip_awkward_field_values() {
    let texts = [
        "",
        " padded ",
        "In Progress",
        "tab\there",
    ];
    for text in texts {
        let task = Task::new(
            42,
            text.to_string(),
            text.to_string(),
            text.to_string(),
            parse_deadline("29/02/2024").unwrap(),
            Priority::Medium,
            Status::InProgress,
            text.to_string(),
        )
        .unwrap();

        let line = serialize_record(&task);
        assert_eq!(parse_record(&line).unwrap(), task, "record: {:?}", line);
    }
}
