//! Reports API

use chrono::NaiveDate;
use serde_json::Value;
use shared::models::ReportTable;
use shared::response::data_value;

use super::TillClient;
use crate::{ClientError, ClientResult, Credential, HttpClient};

/// Inclusive day range; each bound is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn is_closed(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// `startDate=dT00:00:00`, `endDate=dT23:59:59`
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::with_capacity(2);
        if let Some(start) = self.start {
            query.push(("startDate", format!("{}T00:00:00", start.format("%Y-%m-%d"))));
        }
        if let Some(end) = self.end {
            query.push(("endDate", format!("{}T23:59:59", end.format("%Y-%m-%d"))));
        }
        query
    }
}

/// Report endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    MostSellingProducts(DateRange),
    ExpiredProducts,
    StockValue,
    DailyProfit(NaiveDate),
    ProfitRange(DateRange),
    SalesSummary,
}

impl Report {
    pub fn path(&self) -> String {
        match self {
            Report::MostSellingProducts(_) => "api/reports/most-selling-products".into(),
            Report::ExpiredProducts => "api/reports/expired-products".into(),
            Report::StockValue => "api/reports/stock-value".into(),
            Report::DailyProfit(date) => {
                format!("api/reports/profit/daily/{}", date.format("%Y-%m-%d"))
            }
            Report::ProfitRange(_) => "api/reports/profit/date-range".into(),
            Report::SalesSummary => "api/reports/sales-summary".into(),
        }
    }

    fn range(&self) -> Option<&DateRange> {
        match self {
            Report::MostSellingProducts(range) | Report::ProfitRange(range) => Some(range),
            _ => None,
        }
    }
}

impl<H: HttpClient> TillClient<H> {
    /// Fetch a report and project it into a table.
    ///
    /// Range reports need both bounds.
    pub async fn report(&self, report: Report, credential: &Credential) -> ClientResult<ReportTable> {
        let body: Value = match report.range() {
            Some(range) if !range.is_closed() => {
                return Err(ClientError::Validation("Select start and end date".into()));
            }
            Some(range) => {
                self.http()
                    .get_with_query(&report.path(), &range.query(), Some(credential))
                    .await?
            }
            None => self.http().get(&report.path(), Some(credential)).await?,
        };
        Ok(ReportTable::from_value(&data_value(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_range_query() {
        let range = DateRange::between(day("2025-03-01"), day("2025-03-31"));
        assert_eq!(
            range.query(),
            vec![
                ("startDate", "2025-03-01T00:00:00".to_string()),
                ("endDate", "2025-03-31T23:59:59".to_string()),
            ]
        );
        assert!(DateRange::default().is_unbounded());
        assert!(DateRange::new(None, Some(day("2025-01-01"))).query().len() == 1);
    }

    #[test]
    fn test_report_paths() {
        assert_eq!(
            Report::DailyProfit(day("2025-02-03")).path(),
            "api/reports/profit/daily/2025-02-03"
        );
        assert_eq!(Report::StockValue.path(), "api/reports/stock-value");
    }
}
