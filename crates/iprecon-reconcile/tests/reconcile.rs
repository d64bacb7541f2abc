//! End-to-end runs against scratch working directories.

use std::fs;
use std::path::Path;

use iprecon_reconcile::config::ReconcileConfig;
use iprecon_reconcile::pipeline::DeviceStatus;
use iprecon_reconcile::{run, ReconcileError};

const SYSLOG: &str = "\
timestamp,host,message
2024-05-01T10:00:00,fw1,conn from 192.168.1.10 to 10.0.0.5 on 300.300.300.300 and 999
2024-05-01T10:00:01,fw1,conn from 10.0.0.5 to 8.8.8.8
2024-05-01T10:00:02,2.2.2.2,heartbeat
";

fn read_ips(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

fn outputs(dir: &Path) -> (Vec<String>, Vec<String>, Vec<String>) {
    (
        read_ips(&dir.join("extracted_ips.csv")),
        read_ips(&dir.join("matched_ips.csv")),
        read_ips(&dir.join("unmatched_ips.csv")),
    )
}

#[test]
fn test_full_run_with_csv_inventory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), SYSLOG).unwrap();
    fs::write(
        dir.path().join("Device_data.csv"),
        "Hostname,IP Address\ncore,10.0.0.5\ncore-dup, 10.0.0.5 \ndns,1.1.1.1\n",
    )
    .unwrap();

    let report = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap();

    assert_eq!(report.syslog_rows, 3);
    assert_eq!(
        report.device,
        DeviceStatus::Matched {
            file: dir.path().join("Device_data.csv"),
            column: "IP Address".to_string(),
        }
    );

    let (extracted, matched, unmatched) = outputs(dir.path());
    assert_eq!(
        extracted,
        vec!["ip", "10.0.0.5", "192.168.1.10", "2.2.2.2", "8.8.8.8"]
    );
    assert_eq!(matched, vec!["ip", "10.0.0.5"]);
    assert_eq!(unmatched, vec!["ip", "192.168.1.10", "2.2.2.2", "8.8.8.8"]);
}

#[test]
fn test_matched_and_unmatched_partition_extracted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.1.csv"), SYSLOG).unwrap();
    fs::write(
        dir.path().join("devices.csv"),
        "name,ip\na,8.8.8.8\nb,192.168.1.10\nc,172.16.0.1\n",
    )
    .unwrap();

    let report = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap();
    let r = &report.reconciliation;

    assert!(r.matched.is_disjoint(&r.unmatched));
    assert_eq!(r.matched.len() + r.unmatched.len(), r.extracted.len());
    for ip in r.extracted.iter() {
        assert!(r.matched.contains(ip) ^ r.unmatched.contains(ip));
    }
    assert_eq!(report.matched_count, 2);
}

#[test]
fn test_no_device_file_marks_everything_unmatched() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), SYSLOG).unwrap();

    let report = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap();

    assert_eq!(report.device, DeviceStatus::NoDeviceFile);
    let (extracted, matched, unmatched) = outputs(dir.path());
    assert_eq!(matched, vec!["ip"]);
    assert_eq!(unmatched, extracted);
}

#[test]
fn test_inventory_without_address_column() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), SYSLOG).unwrap();
    fs::write(
        dir.path().join("Device_data.csv"),
        "hostname,location\ncore,10.0.0.5\n",
    )
    .unwrap();

    let report = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap();

    assert_eq!(
        report.device,
        DeviceStatus::NoAddressColumn {
            file: dir.path().join("Device_data.csv"),
        }
    );
    let (extracted, matched, unmatched) = outputs(dir.path());
    assert_eq!(matched, vec!["ip"]);
    assert_eq!(unmatched, extracted);
}

#[test]
fn test_empty_syslog_writes_header_only_tables() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), "timestamp,host,message\n").unwrap();
    fs::write(dir.path().join("Device_data.csv"), "ip\n10.0.0.5\n").unwrap();

    let report = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap();

    assert_eq!(report.extracted_count, 0);
    let (extracted, matched, unmatched) = outputs(dir.path());
    assert_eq!(extracted, vec!["ip"]);
    assert_eq!(matched, vec!["ip"]);
    assert_eq!(unmatched, vec!["ip"]);
}

#[test]
fn test_spreadsheet_inventory_fallback() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), SYSLOG).unwrap();

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Device").unwrap();
    sheet.write_string(0, 1, "IP").unwrap();
    sheet.write_string(1, 0, "resolver").unwrap();
    sheet.write_string(1, 1, "8.8.8.8").unwrap();
    workbook.save(dir.path().join("Device_data.xlsx")).unwrap();

    let report = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap();

    assert_eq!(report.matched_count, 1);
    let (_, matched, _) = outputs(dir.path());
    assert_eq!(matched, vec!["ip", "8.8.8.8"]);
}

#[test]
fn test_unreadable_inventory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), SYSLOG).unwrap();
    fs::write(dir.path().join("Device_data.csv"), [0xffu8, 0xfe, 0x00, 0x81]).unwrap();

    let err = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap_err();
    assert!(matches!(err, ReconcileError::DeviceLoad { .. }));
}

#[test]
fn test_malformed_syslog_is_fatal_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), "host\nfw1,10.0.0.1\n").unwrap();

    let err = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap_err();

    assert!(matches!(err, ReconcileError::SyslogLoad { .. }));
    assert!(!dir.path().join("extracted_ips.csv").exists());
}

#[test]
fn test_rerun_overwrites_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReconcileConfig::default();
    fs::write(dir.path().join("syslog.csv"), SYSLOG).unwrap();
    run(dir.path(), dir.path(), &config).unwrap();

    fs::write(dir.path().join("syslog.csv"), "message\nonly 4.4.4.4\n").unwrap();
    run(dir.path(), dir.path(), &config).unwrap();

    let (extracted, _, _) = outputs(dir.path());
    assert_eq!(extracted, vec!["ip", "4.4.4.4"]);
}

#[test]
fn test_custom_keywords_and_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("messages_export.csv"), SYSLOG).unwrap();
    fs::write(dir.path().join("inventory.csv"), "mgmt_addr\n2.2.2.2\n").unwrap();

    let config = ReconcileConfig {
        syslog_candidates: vec![],
        syslog_keyword: "messages".to_string(),
        device_keyword: "inventory".to_string(),
        address_keywords: vec!["addr".to_string()],
        ..ReconcileConfig::default()
    };
    let out = dir.path().join("reports");

    let report = run(dir.path(), &out, &config).unwrap();

    assert_eq!(report.syslog_file, dir.path().join("messages_export.csv"));
    let (_, matched, _) = outputs(&out);
    assert_eq!(matched, vec!["ip", "2.2.2.2"]);
}

#[test]
fn test_empty_inventory_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), SYSLOG).unwrap();
    fs::write(dir.path().join("Device_data.csv"), "").unwrap();

    let err = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap_err();

    assert!(matches!(err, ReconcileError::DeviceLoad { .. }));
    assert!(!dir.path().join("matched_ips.csv").exists());
}

#[test]
fn test_empty_syslog_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), "").unwrap();

    let err = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap_err();

    assert!(matches!(err, ReconcileError::SyslogLoad { .. }));
    assert!(!dir.path().join("extracted_ips.csv").exists());
    assert!(!dir.path().join("unmatched_ips.csv").exists());
}

#[test]
fn test_spreadsheet_inventory_with_csv_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("syslog.csv"), SYSLOG).unwrap();

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "IP").unwrap();
    sheet.write_string(1, 0, "10.0.0.5").unwrap();
    workbook.save(dir.path().join("Device_data.csv")).unwrap();

    let report = run(dir.path(), dir.path(), &ReconcileConfig::default()).unwrap();

    assert_eq!(report.matched_count, 1);
    let (_, matched, _) = outputs(dir.path());
    assert_eq!(matched, vec!["ip", "10.0.0.5"]);
}
