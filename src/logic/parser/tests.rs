use super::*;

#[test]
fn test_format_from_extension() {
    assert_eq!(InputFormat::from_extension("CSV").unwrap(), InputFormat::Csv);
    assert_eq!(InputFormat::from_extension(".json").unwrap(), InputFormat::Json);
    assert_eq!(InputFormat::from_extension("log").unwrap(), InputFormat::Text);
    assert_eq!(InputFormat::from_extension("txt").unwrap(), InputFormat::Text);

    match InputFormat::from_extension("exe") {
        Err(ParseError::UnsupportedFormat(ext)) => assert_eq!(ext, "exe"),
        other => panic!("Expected UnsupportedFormat, got {:?}", other),
    }
}

#[test]
fn test_csv_headers_normalized() {
    let csv = "Src IP,Dst IP,Total Fwd Packets\n10.0.0.1,1.2.3.4,1500\n10.0.0.2,8.8.8.8,12\n";
    let records = parse(csv.as_bytes(), InputFormat::Csv).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].text_of(&["src_ip"]).as_deref(), Some("10.0.0.1"));
    assert_eq!(records[0].number_of(&["total_fwd_packets"]), Some(1500.0));
    assert_eq!(records[1].text_of(&["dst_ip"]).as_deref(), Some("8.8.8.8"));
}

#[test]
fn test_csv_empty_cells_are_absent() {
    let csv = "process_name,cpu,pid\nminer.exe,,42\n";
    let records = parse(csv.as_bytes(), InputFormat::Csv).unwrap();

    assert_eq!(records.len(), 1);
    assert!(!records[0].contains("cpu"));
    assert_eq!(records[0].text_of(&["pid"]).as_deref(), Some("42"));
}

#[test]
fn test_csv_header_only_is_empty() {
    let records = parse(b"src_ip,dst_ip\n", InputFormat::Csv).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_csv_ragged_row_is_error() {
    let csv = "a,b\n1,2,3\n";
    assert!(matches!(parse(csv.as_bytes(), InputFormat::Csv), Err(ParseError::Csv(_))));
}

#[test]
fn test_json_array_and_single_object() {
    let array = r#"[{"src_ip": "1.2.3.4"}, {"Dst IP": "5.6.7.8", "packets": 20}]"#;
    let records = parse(array.as_bytes(), InputFormat::Json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].text_of(&["dst_ip"]).as_deref(), Some("5.6.7.8"));

    let single = r#"{"process_name": "svchost.exe", "cpu_percent": 12.5}"#;
    let records = parse(single.as_bytes(), InputFormat::Json).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].number_of(&["cpu_percent"]), Some(12.5));
}

#[test]
fn test_json_combined_result_flattened() {
    let doc = r#"{
        "signature_based": [{"domain": "evil.com"}],
        "host_based": [{"cpu": 90}, {"cpu": 10}],
        "behavior_based": {"packets": 5000}
    }"#;
    let records = parse(doc.as_bytes(), InputFormat::Json).unwrap();

    // host_based, behavior_based, signature_based
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].number_of(&["cpu"]), Some(90.0));
    assert_eq!(records[2].number_of(&["packets"]), Some(5000.0));
    assert_eq!(records[3].text_of(&["domain"]).as_deref(), Some("evil.com"));
}

#[test]
fn test_json_mixed_keys_not_flattened() {
    let doc = r#"{"host_based": [{"cpu": 90}], "hostname": "box1"}"#;
    let records = parse(doc.as_bytes(), InputFormat::Json).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].contains("hostname"));
}

#[test]
fn test_json_nulls_skipped_and_nested_kept_as_text() {
    let doc = r#"[{"src_ip": null, "tags": ["a", "b"]}, null, "evil.com"]"#;
    let records = parse(doc.as_bytes(), InputFormat::Json).unwrap();

    assert_eq!(records.len(), 2);
    assert!(!records[0].contains("src_ip"));
    assert_eq!(records[0].text_of(&["tags"]).as_deref(), Some(r#"["a","b"]"#));
    assert_eq!(records[1].text_of(&[LINE_FIELD]).as_deref(), Some("evil.com"));
}

#[test]
fn test_json_malformed_and_scalar() {
    assert!(matches!(parse(b"{not json", InputFormat::Json), Err(ParseError::Json(_))));
    assert!(matches!(parse(b"42", InputFormat::Json), Err(ParseError::UnexpectedShape(_))));
}

#[test]
fn test_text_lines() {
    let text = "1.2.3.4\n\n   evil.com  \n\t\n";
    let records = parse(text.as_bytes(), InputFormat::Text).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].text_of(&[LINE_FIELD]).as_deref(), Some("evil.com"));
    assert_eq!(records[1].text_of(&[LINE_TYPE_FIELD]).as_deref(), Some(LINE_TYPE_UNKNOWN));
}

#[test]
fn test_invalid_utf8_is_error() {
    let bytes = [0xff, 0xfe, 0x00, 0x41];
    assert!(matches!(parse(&bytes, InputFormat::Text), Err(ParseError::Encoding(_))));
}

#[test]
fn test_empty_input_is_not_error() {
    assert!(parse(b"", InputFormat::Text).unwrap().is_empty());
    assert!(parse(b"", InputFormat::Json).unwrap().is_empty());
    assert!(parse(b"", InputFormat::Csv).unwrap().is_empty());
}
