//! Publication market document as returned by the transparency platform.
//!
//! Only the elements needed to build the price series are modelled, everything else is ignored.
//! All leaf values are kept as raw strings: the parser decides what to do with malformed ones.

use serde::{Deserialize, Deserializer};

use crate::prelude::*;

/// Element that may occur once or repeatedly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OneOrMany<T> {
    /// Repeated siblings decode as a list, a lone element decodes as a bare item.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut items = Vec::deserialize(deserializer)?;
        if items.len() == 1 { Ok(Self::One(items.swap_remove(0))) } else { Ok(Self::Many(items)) }
    }
}

/// Normalise an optional one-or-many element into a list, absent being empty.
pub fn as_list<T>(value: Option<OneOrMany<T>>) -> Vec<T> {
    value.map(OneOrMany::into_vec).unwrap_or_default()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PriceDocument {
    #[serde(rename = "TimeSeries", default)]
    pub series: Option<OneOrMany<TimeSeries>>,

    /// Only present in acknowledgement documents, which the platform sends instead of prices.
    #[serde(rename = "Reason", default)]
    pub reason: Option<Reason>,
}

impl PriceDocument {
    pub fn from_xml(xml: &str) -> Result<Self> {
        quick_xml::de::from_str(xml).context("failed to deserialize the price document")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Reason {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TimeSeries {
    #[serde(rename = "Period", default)]
    pub periods: Option<OneOrMany<Period>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Period {
    #[serde(rename = "timeInterval", default)]
    pub time_interval: Option<TimeInterval>,

    /// ISO 8601 duration code, such as `PT15M`.
    #[serde(default)]
    pub resolution: Option<String>,

    #[serde(rename = "Point", default)]
    pub points: Option<OneOrMany<Point>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TimeInterval {
    #[serde(default)]
    pub start: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Point {
    /// 1-based.
    #[serde(default)]
    pub position: Option<String>,

    #[serde(rename = "price.amount", default)]
    pub amount: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_list() {
        assert_eq!(as_list::<u8>(None), Vec::<u8>::new());
        assert_eq!(as_list(Some(OneOrMany::One(1))), vec![1]);
        assert_eq!(as_list(Some(OneOrMany::Many(vec![1, 2]))), vec![1, 2]);
    }

    #[test]
    fn test_from_xml_publication_ok() -> Result {
        // language=XML
        const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
            <Publication_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-3:publicationdocument:7:3">
                <mRID>1b3fb5c3a4e54ef3a0a6d5ad3f3f4e29</mRID>
                <type>A44</type>
                <period.timeInterval>
                    <start>2025-01-05T23:00Z</start>
                    <end>2025-01-06T23:00Z</end>
                </period.timeInterval>
                <TimeSeries>
                    <mRID>1</mRID>
                    <businessType>A62</businessType>
                    <in_Domain.mRID codingScheme="A01">10YNL----------L</in_Domain.mRID>
                    <currency_Unit.name>EUR</currency_Unit.name>
                    <price_Measure_Unit.name>MWH</price_Measure_Unit.name>
                    <curveType>A03</curveType>
                    <Period>
                        <timeInterval>
                            <start>2025-01-05T23:00Z</start>
                            <end>2025-01-06T23:00Z</end>
                        </timeInterval>
                        <resolution>PT15M</resolution>
                        <Point>
                            <position>1</position>
                            <price.amount>101.53</price.amount>
                        </Point>
                        <Point>
                            <position>2</position>
                            <price.amount>98.2</price.amount>
                        </Point>
                    </Period>
                </TimeSeries>
            </Publication_MarketDocument>
        "#;
        let document = PriceDocument::from_xml(XML)?;
        assert_eq!(document.reason, None);
        assert!(matches!(document.series, Some(OneOrMany::One(_))));

        let series = as_list(document.series);
        assert_eq!(series.len(), 1);
        let periods = as_list(series[0].periods.clone());
        assert_eq!(periods.len(), 1);
        let period = &periods[0];
        assert_eq!(period.resolution.as_deref(), Some("PT15M"));
        assert_eq!(
            period.time_interval.as_ref().and_then(|interval| interval.start.as_deref()),
            Some("2025-01-05T23:00Z"),
        );
        assert!(matches!(period.points, Some(OneOrMany::Many(_))));
        let points = as_list(period.points.clone());
        assert_eq!(
            points,
            vec![
                Point { position: Some("1".into()), amount: Some("101.53".into()) },
                Point { position: Some("2".into()), amount: Some("98.2".into()) },
            ],
        );
        Ok(())
    }

    #[test]
    fn test_from_xml_acknowledgement_ok() -> Result {
        // language=XML
        const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
            <Acknowledgement_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-1:acknowledgementdocument:7:0">
                <mRID>4e5b6c7d</mRID>
                <createdDateTime>2025-01-06T10:00:00Z</createdDateTime>
                <Reason>
                    <code>999</code>
                    <text>No matching data found for Data item Energy Prices [12.1.D]</text>
                </Reason>
            </Acknowledgement_MarketDocument>
        "#;
        let document = PriceDocument::from_xml(XML)?;
        assert_eq!(document.series, None);
        let reason = document.reason.unwrap();
        assert_eq!(reason.code.as_deref(), Some("999"));
        assert!(reason.text.unwrap().starts_with("No matching data found"));
        Ok(())
    }

    #[test]
    fn test_from_xml_malformed_err() {
        assert!(PriceDocument::from_xml("<Publication_MarketDocument><TimeSeries>").is_err());
    }
}
