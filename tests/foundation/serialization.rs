//! JSON shapes of the foundation types

use chrono::NaiveDate;
use heatsheet_foundation::{Competitor, Entry, Gender, Meet, SeedTime, Slot};
use serde_json::json;

#[test]
fn entry_uses_camel_case_and_string_seed_time() {
    let entry = Entry::from_competitor(&Competitor::new("c1", "Ann", "Lee"), &"WCC".into())
        .with_seed_time(SeedTime::Recorded(3_254));
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(
        value,
        json!({
            "id": "c1",
            "firstName": "Ann",
            "lastName": "Lee",
            "team": "WCC",
            "seedTime": "32.54"
        })
    );
    let back: Entry = serde_json::from_value(value).unwrap();
    assert_eq!(back, entry);
}

#[test]
fn entry_seed_time_defaults_to_nt() {
    let entry: Entry = serde_json::from_value(json!({
        "id": "c1",
        "firstName": "Ann",
        "lastName": "Lee",
        "team": "WCC"
    }))
    .unwrap();
    assert_eq!(entry.seed_time, SeedTime::NoTime);
    assert_eq!(serde_json::to_value(entry).unwrap()["seedTime"], "NT");
}

#[test]
fn bad_seed_time_is_rejected() {
    let result: Result<Entry, _> = serde_json::from_value(json!({
        "id": "c1",
        "firstName": "Ann",
        "lastName": "Lee",
        "team": "WCC",
        "seedTime": "soon"
    }));
    assert!(result.is_err());
}

#[test]
fn meet_defaults_lanes_and_reads_home_away() {
    let meet: Meet = serde_json::from_value(json!({
        "id": "m1",
        "name": "Dual",
        "date": "2026-06-13",
        "homeTeamId": "WCC",
        "awayTeamId": "PRC"
    }))
    .unwrap();
    assert_eq!(meet.lanes_available, 8);
    assert_eq!(meet.date, NaiveDate::from_ymd_opt(2026, 6, 13));
    assert!(meet.is_home(&"WCC".into()));
}

#[test]
fn competitor_and_slot_shapes() {
    let competitor: Competitor = serde_json::from_value(json!({
        "id": "c9",
        "firstName": "Bo",
        "lastName": "Diaz",
        "age": 11,
        "gender": "Male"
    }))
    .unwrap();
    assert_eq!(competitor.age, 11);
    assert_eq!(competitor.gender, Gender::Male);

    assert_eq!(
        serde_json::to_value(Slot::new(2, 5)).unwrap(),
        json!({ "heat": 2, "lane": 5 })
    );
}
