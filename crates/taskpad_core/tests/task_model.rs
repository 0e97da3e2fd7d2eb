use chrono::{TimeZone, Utc};
use taskpad_core::Task;

fn decode(value: serde_json::Value) -> Task {
    serde_json::from_value(value).unwrap()
}

#[test]
fn serialization_uses_expected_wire_fields() {
    let task = decode(serde_json::json!({
        "id": "1714552200000",
        "title": "Write report",
        "description": "",
        "category": "work",
        "completed": false,
        "createdAt": "2024-05-01T08:30:00Z"
    }));

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "1714552200000");
    assert_eq!(json["title"], "Write report");
    assert_eq!(json["description"], "");
    assert_eq!(json["category"], "work");
    assert_eq!(json["completed"], false);
    assert_eq!(json["createdAt"], "2024-05-01T08:30:00.000Z");
    assert_eq!(json.as_object().unwrap().len(), 6);

    assert_eq!(decode(json), task);
}

#[test]
fn accessors_expose_decoded_fields() {
    let task = decode(serde_json::json!({
        "id": "abc",
        "title": "Call mom",
        "description": "before dinner",
        "category": "family",
        "completed": true,
        "createdAt": "2024-05-01T10:30:00+02:00"
    }));

    assert_eq!(task.id(), "abc");
    assert_eq!(task.title(), "Call mom");
    assert_eq!(task.description(), "before dinner");
    assert_eq!(task.category(), "family");
    assert!(task.is_completed());
    assert_eq!(
        task.created_at(),
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap()
    );
}

#[test]
fn deserialize_truncates_sub_millisecond_precision() {
    let task = decode(serde_json::json!({
        "id": "abc",
        "title": "Precise",
        "description": "",
        "category": "work",
        "completed": false,
        "createdAt": "2024-05-01T08:30:00.123456Z"
    }));

    assert_eq!(task.created_at().timestamp_subsec_nanos(), 123_000_000);
    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["createdAt"], "2024-05-01T08:30:00.123Z");
}

#[test]
fn deserialize_rejects_unknown_fields() {
    let value = serde_json::json!({
        "id": "abc",
        "title": "Call mom",
        "description": "",
        "category": "life",
        "completed": false,
        "createdAt": "2024-05-01T08:30:00.000Z",
        "priority": 3
    });

    assert!(serde_json::from_value::<Task>(value).is_err());
}
