use flamediff::parser::{parse_line, strip_hex_addresses, DatasetId, FoldedRecord};

#[test]
fn test_parse_folded_line() {
    let record = parse_line("main;execute;storage_read 1000", false).unwrap();
    assert_eq!(
        record,
        FoldedRecord::new("main;execute;storage_read", 1000.0)
    );
    assert_eq!(
        record.frames().collect::<Vec<_>>(),
        vec!["main", "execute", "storage_read"]
    );
}

#[test]
fn test_parse_tab_separated_count() {
    let record = parse_line("a;b\t7", false).unwrap();
    assert_eq!(record.stack, "a;b");
    assert_eq!(record.count, 7.0);
}

#[test]
fn test_parse_rejects_missing_count() {
    assert!(parse_line("main;execute", false).is_none());
    assert!(parse_line("main;execute 12abc", false).is_none());
}

#[test]
fn test_strip_hex_collapses_addresses() {
    let a = parse_line("libc.so;[unknown] 0x1a2b 5", true).unwrap();
    let b = parse_line("libc.so;[unknown] 0x3c4d 5", true).unwrap();
    assert_eq!(a.stack, b.stack);
    assert_eq!(strip_hex_addresses("f 0xABC0 g"), "f 0x... g");
}

#[test]
fn test_dataset_display() {
    assert_eq!(DatasetId::A.to_string(), "A");
    assert_eq!(DatasetId::B.to_string(), "B");
}
