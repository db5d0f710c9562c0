quantity!(
    /// Wholesale price as published by the market, in currency per megawatt-hour.
    MegawattHourPrice,
    "€/MWh",
    2
);

quantity!(
    /// Sensor display unit: currency cents per kilowatt-hour.
    KilowattHourCents,
    "¢/kWh",
    3
);

impl MegawattHourPrice {
    /// Parse a market price amount, falling back to zero on anything that is not a finite number.
    pub fn parse_or_zero(amount: Option<&str>) -> Self {
        amount
            .and_then(|amount| amount.trim().parse::<f64>().ok())
            .filter(|amount| amount.is_finite())
            .map_or(Self::ZERO, Self)
    }
}

impl From<MegawattHourPrice> for KilowattHourCents {
    /// 1 €/MWh is 100 ¢ per 1000 kWh, hence the fixed factor of ten.
    ///
    /// This assumes the market quotes in a currency with one hundred cents to the unit.
    fn from(price: MegawattHourPrice) -> Self {
        Self(price.0 / 10.0)
    }
}
