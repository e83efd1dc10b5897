use route_report_metrics::ingestion::csv::{ingest_csv_from_path, ingest_csv_from_str, read_csv_rows_from_path};
use route_report_metrics::ingestion::ReportOptions;
use route_report_metrics::types::Region;

#[test]
fn ingest_csv_from_path_happy_path() {
    let records = ingest_csv_from_path("tests/fixtures/relatorio.csv", &ReportOptions::default()).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].driver_name(), "João");
    assert_eq!(records[0].region(), Some(Region::Rj));
    assert_eq!(records[0].total_orders(), "42");
    assert_eq!(records[0].pending(), "42");
    assert_eq!(records[1].driver_name(), "Maria");
    assert_eq!(records[1].region(), Some(Region::Sp));
    assert_eq!(records[1].total_orders(), "10");
}

#[test]
fn ingest_csv_tolerates_garbage_counts() {
    let records = ingest_csv_from_path("tests/fixtures/relatorio.csv", &ReportOptions::default()).unwrap();
    let pedro = &records[2];
    assert_eq!(pedro.driver_name(), "Pedro");
    assert_eq!(pedro.total_orders(), "0");
    assert_eq!(pedro.region(), None);
    assert_eq!(pedro.delivery_percent(), "0%");
}

#[test]
fn ingest_csv_records_share_one_date_stamp() {
    let opts = ReportOptions::default();
    let records = ingest_csv_from_path("tests/fixtures/relatorio.csv", &opts).unwrap();
    let first = records[0].date().to_string();
    assert!(!first.is_empty());
    assert!(records.iter().all(|r| r.date() == first));
}

#[test]
fn ingest_csv_reads_only_the_report_column() {
    let rows = read_csv_rows_from_path("tests/fixtures/relatorio.csv", &ReportOptions::default()).unwrap();
    assert_eq!(rows[3].get("Observação"), Some("ok"));

    // "Agente:" in a side column has no effect.
    let input = "Relatório,Notas\nAgente: Ana,Agente: Fantasma\nServiços: 3,Serviços: 99\n";
    let records = ingest_csv_from_str(input, &ReportOptions::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].total_orders(), "3");
}

#[test]
fn ingest_csv_with_explicit_column() {
    let input = "Id,Linha\n1,Agente: Ana\n2,Veículo: Van RJ\n3,Serviços: 8\n";
    let opts = ReportOptions {
        column: Some("Linha".to_string()),
        ..Default::default()
    };
    let records = ingest_csv_from_str(input, &opts).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].region(), Some(Region::Rj));
    assert_eq!(records[0].total_orders(), "8");
}

#[test]
fn ingest_csv_errors_on_missing_report_column() {
    let opts = ReportOptions {
        column: Some("Linha".to_string()),
        ..Default::default()
    };
    let err = ingest_csv_from_str("A,B\nAgente: Ana,x\n", &opts).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("not tabular"));
    assert!(msg.contains("missing report column 'Linha'"));
}
