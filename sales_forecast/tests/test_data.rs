use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sales_forecast::data::{to_records, DataLoader};
use sales_forecast::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_data_loader_from_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Order_ID,Order_Date,Product_Name,Category,Region,Sale_Price,Quantity"
    )
    .unwrap();
    writeln!(file, "1001,2024-01-05,Laptop,Electronics,North,900.00,2").unwrap();
    writeln!(file, "1001,2024-01-05,Mouse,Electronics,North,25.50,4").unwrap();
    writeln!(file, "1002,2024-02-11,Desk,Furniture,South,300.00,1").unwrap();

    let lines = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].order_id.as_deref(), Some("1001"));
    assert_eq!(lines[0].order_date, date(2024, 1, 5));
    assert_eq!(lines[0].revenue, 1800.0);
    assert_eq!(lines[1].revenue, 102.0);
    assert_eq!(lines[2].category.as_deref(), Some("Furniture"));

    let records = to_records(&lines);
    assert_eq!(records[2].order_date, date(2024, 2, 11));
    assert_eq!(records[2].revenue, 300.0);
}

#[test]
fn test_revenue_column_wins_over_price_and_quantity() {
    let data = "order_date,sale_price,quantity,revenue\n\
                2024-03-01,10.0,3,25.0\n\
                2024-03-02,10.0,3,\n";

    let lines = DataLoader::from_reader(data.as_bytes()).unwrap();

    assert_eq!(lines[0].revenue, 25.0);
    assert_eq!(lines[1].revenue, 30.0);
}

#[test]
fn test_lowercase_headers_and_us_dates() {
    let data = "date,revenue\n03/15/2024,120.5\n";

    let lines = DataLoader::from_reader(data.as_bytes()).unwrap();

    assert_eq!(lines[0].order_date, date(2024, 3, 15));
    assert_eq!(lines[0].order_id, None);
    assert_eq!(lines[0].revenue, 120.5);
}

#[test]
fn test_bad_date_reports_line() {
    let data = "Order_Date,Revenue\n2024-01-01,10\nyesterday,20\n";

    match DataLoader::from_reader(data.as_bytes()) {
        Err(ForecastError::ParseError(msg)) => assert!(msg.contains("line 3"), "{}", msg),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_missing_revenue_inputs() {
    let data = "Order_Date,Sale_Price\n2024-01-01,10\n";

    assert!(matches!(
        DataLoader::from_reader(data.as_bytes()),
        Err(ForecastError::DataError(_))
    ));
}

#[test]
fn test_data_loader_error_handling() {
    // Non-existent file
    let result = DataLoader::from_csv("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));

    // Header without a date column
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid,csv,format").unwrap();
    writeln!(file, "1,2,3").unwrap();
    assert!(DataLoader::from_csv(file.path()).is_err());

    // Header only
    let result = DataLoader::from_reader("Order_Date,Revenue\n".as_bytes());
    assert!(matches!(result, Err(ForecastError::DataError(_))));
}
