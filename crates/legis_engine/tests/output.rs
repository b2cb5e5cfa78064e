use std::fs;

use chrono::NaiveDate;
use legis_core::{Bill, BillType, Chamber, Record, VoteEvent, VoteResult, VoteTally, VoteValue};
use legis_engine::{
    decode_html, deterministic_filename, ensure_output_dir, AtomicFileWriter, JsonDirSink,
    RecordSink,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn sample_bill() -> Record {
    let mut bill = Bill::new(
        "AB 1234",
        "20192020",
        Chamber::Lower,
        BillType::Bill,
        "Water: conservation.",
    );
    bill.add_source("http://leginfo.legislature.ca.gov/faces/billStatusClient.xhtml?bill_id=1");
    Record::Bill(bill)
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf()).unwrap();

    let first = writer.write("bill.json", b"hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("bill.json", b"world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn writer_refuses_a_file_as_directory() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    assert!(AtomicFileWriter::new(file_path).is_err());
}

#[test]
fn json_sink_writes_one_file_per_record() {
    let temp = TempDir::new().unwrap();
    let mut sink = JsonDirSink::new(temp.path().join("records")).unwrap();

    sink.emit(sample_bill()).unwrap();
    sink.emit(sample_bill()).unwrap();

    let expected = temp
        .path()
        .join("records")
        .join(deterministic_filename("bill", "20192020 AB 1234"));
    assert_eq!(sink.written()[0], expected);
    assert_eq!(sink.written()[0], sink.written()[1]);
    assert_eq!(fs::read_dir(temp.path().join("records")).unwrap().count(), 1);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&expected).unwrap()).unwrap();
    assert_eq!(json["type"], "bill");
    assert_eq!(json["identifier"], "AB 1234");
    assert_eq!(json["chamber"], "lower");
}

#[test]
fn json_sink_keeps_same_day_votes_from_different_committees() {
    let temp = TempDir::new().unwrap();
    let mut sink = JsonDirSink::new(temp.path().to_path_buf()).unwrap();
    let bill = Bill::new("AB 1234", "20192020", Chamber::Lower, BillType::Bill, "Water.");
    let date = NaiveDate::from_ymd_opt(2019, 4, 2).unwrap();
    let mut tally = VoteTally::new();
    tally.record("Mathis", VoteValue::Yes);

    for (chamber, location) in [
        (Chamber::Lower, "Asm. Water, Parks and Wildlife"),
        (Chamber::Upper, "Sen. Natural Resources and Water"),
    ] {
        let vote = VoteEvent::from_tally(
            &bill,
            chamber,
            location,
            "Do pass.",
            date,
            VoteResult::Pass,
            &tally,
        );
        sink.emit(Record::VoteEvent(vote)).unwrap();
    }

    assert_eq!(sink.written().len(), 2);
    assert_ne!(sink.written()[0], sink.written()[1]);
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 2);
}

#[test]
fn records_round_trip_through_json() {
    let mut bill = Bill::new("SB 5", "20192020", Chamber::Upper, BillType::Bill, "Taxes.");
    bill.add_action(legis_core::BillAction {
        description: "Introduced.".to_string(),
        date: NaiveDate::from_ymd_opt(2019, 1, 7).unwrap(),
        chamber: Chamber::Upper,
        classification: ["introduction".to_string()].into_iter().collect(),
        committees: Vec::new(),
    });
    let record = Record::Bill(bill);

    let json = serde_json::to_string(&record).unwrap();
    let back: Record = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn decode_uses_declared_charset() {
    let bytes = b"<p>Caf\xe9</p>";
    let decoded = decode_html(bytes, Some("text/html; charset=ISO-8859-1")).unwrap();
    assert_eq!(decoded.html, "<p>Caf\u{e9}</p>");
}

#[test]
fn decode_falls_back_when_utf8_is_a_lie() {
    let bytes = b"<p>Se\xf1or \x96 Assembly</p>";
    let decoded = decode_html(bytes, Some("text/html; charset=utf-8")).unwrap();
    assert_eq!(decoded.encoding_label, "windows-1252");
    assert_eq!(decoded.html, "<p>Se\u{f1}or \u{2013} Assembly</p>");
}

#[test]
fn decode_honours_bom_over_header() {
    let bytes = b"\xef\xbb\xbf<p>ok</p>";
    let decoded = decode_html(bytes, Some("text/html; charset=windows-1252")).unwrap();
    assert_eq!(decoded.encoding_label, "UTF-8");
    assert_eq!(decoded.html, "<p>ok</p>");
}
