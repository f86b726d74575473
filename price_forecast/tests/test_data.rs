use pretty_assertions::assert_eq;
use price_forecast::data::{Column, DataLoader, Dataset, PricePoint};
use price_forecast::ForecastError;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[test]
fn test_data_loader_from_csv() {
    let file = write_csv(&[
        "Timestamp,Open,High,Low,Close,Volume",
        "1325317920,4.39,4.39,4.39,4.39,0.45558086",
        "1325317980,4.4,4.5,4.3,4.45,1.5",
        "1325318040,4.45,4.6,4.4,4.58,12.25",
    ]);

    let data = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(data.len(), 3);
    assert!(!data.is_empty());
    assert_eq!(data.close_prices(), vec![4.39, 4.45, 4.58]);
}

#[test]
fn test_row_order_and_schema_fidelity() {
    let file = write_csv(&[
        "Timestamp,Open,High,Low,Close,Volume",
        "3,30.5,31.25,29.75,30.0,300",
        "1,10.5,11.25,9.75,10.0,100",
        "2,20.5,21.25,19.75,20.0,200",
    ]);

    let data = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(
        data.points(),
        &[
            PricePoint {
                timestamp: 3.0,
                open: 30.5,
                high: 31.25,
                low: 29.75,
                close: 30.0,
                volume: 300.0,
            },
            PricePoint {
                timestamp: 1.0,
                open: 10.5,
                high: 11.25,
                low: 9.75,
                close: 10.0,
                volume: 100.0,
            },
            PricePoint {
                timestamp: 2.0,
                open: 20.5,
                high: 21.25,
                low: 19.75,
                close: 20.0,
                volume: 200.0,
            },
        ]
    );
    assert_eq!(data.column(Column::Timestamp), vec![3.0, 1.0, 2.0]);
}

#[test]
fn test_extra_fields_ignored() {
    let file = write_csv(&[
        "Timestamp,Open,High,Low,Close,Volume,Note",
        "1,1.0,2.0,0.5,1.5,10,anything",
    ]);

    let data = DataLoader::from_csv(file.path()).unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data.points()[0].close, 1.5);
}

#[test]
fn test_header_only_is_empty() {
    let file = write_csv(&["Timestamp,Open,High,Low,Close,Volume"]);
    let data = DataLoader::from_csv(file.path()).unwrap();
    assert!(data.is_empty());
    assert!(data.last().is_none());
}

#[test]
fn test_missing_file() {
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}

#[test]
fn test_unparseable_field_fails_whole_load() {
    let file = write_csv(&[
        "Timestamp,Open,High,Low,Close,Volume",
        "1,1.0,2.0,0.5,1.5,10",
        "2,1.0,2.0,0.5,abc,10",
        "3,1.0,2.0,0.5,1.5,10",
    ]);

    match DataLoader::from_csv(file.path()) {
        Err(ForecastError::ParseError {
            line,
            column,
            value,
        }) => {
            assert_eq!(line, 3);
            assert_eq!(column, "Close");
            assert_eq!(value, "abc");
        }
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_short_row_fails_whole_load() {
    let file = write_csv(&[
        "Timestamp,Open,High,Low,Close,Volume",
        "1,1.0,2.0,0.5,1.5",
    ]);

    let result = DataLoader::from_csv(file.path());
    assert!(matches!(
        result,
        Err(ForecastError::MissingFields {
            line: 2,
            expected: 6,
            found: 5
        })
    ));
}

#[test]
fn test_from_reader() {
    let csv = "Timestamp,Open,High,Low,Close,Volume\n0,1,1,1,1,1\n60,2,2,2,2,2\n";
    let data = DataLoader::from_reader(csv.as_bytes()).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data.sampling_interval(), Some(chrono::Duration::seconds(60)));
}

#[rstest]
#[case("close", Column::Close)]
#[case("Close", Column::Close)]
#[case(" OPEN ", Column::Open)]
#[case("volume", Column::Volume)]
#[case("timestamp", Column::Timestamp)]
fn test_column_from_str(#[case] input: &str, #[case] expected: Column) {
    assert_eq!(input.parse::<Column>().unwrap(), expected);
}

#[test]
fn test_unknown_column() {
    assert!(matches!(
        "price".parse::<Column>(),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn test_dataset_operations() {
    let data = Dataset::from_closes(&[100.0, 103.0, 106.0, 109.0]);

    let subset = data.slice(1, Some(3)).unwrap();
    assert_eq!(subset.close_prices(), vec![103.0, 106.0]);
    assert!(data.slice(3, Some(2)).is_err());
    assert!(data.slice(0, Some(5)).is_err());

    assert_eq!(data.last().map(|p| p.close), Some(109.0));
    assert_eq!(data.sampling_interval(), Some(chrono::Duration::seconds(1)));
    assert_eq!(Dataset::from_closes(&[1.0]).sampling_interval(), None);
}

#[test]
fn test_datetime_from_epoch() {
    let data = Dataset::new(vec![PricePoint {
        timestamp: 1_325_317_888.0,
        open: 0.0,
        high: 0.0,
        low: 0.0,
        close: 0.0,
        volume: 0.0,
    }]);
    assert_eq!(data.last_datetime().map(|d| d.timestamp()), Some(1_325_317_888));
    assert_eq!(data.datetime(1), None);
}

#[rstest]
#[case(1_700_000_000, 1_700_000_060)]
#[case(1_700_000_060, 1_700_000_120)]
#[case(1_325_317_920, 1_325_317_980)]
fn test_minute_epochs_keep_full_precision(#[case] first: i64, #[case] second: i64) {
    let csv = format!(
        "Timestamp,Open,High,Low,Close,Volume\n{},4.39,4.39,4.39,4.39,1\n{},4.4,4.4,4.4,4.4,1\n",
        first, second
    );
    let data = DataLoader::from_reader(csv.as_bytes()).unwrap();

    assert_eq!(data.datetime(0).map(|d| d.timestamp()), Some(first));
    assert_eq!(data.sampling_interval(), Some(chrono::Duration::seconds(60)));
    assert_eq!(data.last_datetime().map(|d| d.timestamp()), Some(second));
    assert_eq!(
        data.slice(1, None).unwrap().last_datetime().map(|d| d.timestamp()),
        Some(second)
    );
}
