//! # Quote Engine
//!
//! Computes transport quotes across eligible providers.
//!
//! This module provides the [`QuoteEngine`] which filters the provider
//! catalog for a route, computes each provider's price across its fee
//! structure and currency, and returns a batch of quotes with a shared
//! validity window.
//!
//! Per-provider computation runs concurrently and preserves the catalog's
//! eligibility order. Currency-conversion failures degrade per provider
//! (the quote falls back to the rate currency) and never abort the batch;
//! an empty eligibility result is a legitimate "no offers" outcome, not
//! an error.

use crate::application::error::ApplicationResult;
use crate::domain::entities::booking::Dimensions;
use crate::domain::entities::provider::TransportProvider;
use crate::domain::entities::quote::{AdditionalService, TransportQuote};
use crate::domain::services::pricing;
use crate::domain::value_objects::{
    CountryCode, CurrencyCode, Money, RunningCondition, ServiceKind, Timestamp, VehicleType,
};
use crate::infrastructure::customs::CustomsReference;
use crate::infrastructure::exchange::CurrencyConverter;
use crate::infrastructure::persistence::traits::{ProviderCatalog, RouteQuery};
use futures::future::join_all;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, warn};

/// Configuration for quote computation.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Currency quotes default to when the request names none.
    pub base_currency: CurrencyCode,
    /// Quote validity window in days.
    pub validity_days: u32,
    /// Default lead time for same-country moves, in days.
    pub same_country_days: u32,
    /// Default lead time for cross-border moves, in days.
    pub cross_border_days: u32,
    /// Lead time when the destination requires a transit carnet, in days.
    pub carnet_days: u32,
    /// Flat customs-handling service fee for cross-border routes.
    pub customs_handling_fee: Decimal,
    /// Door-to-door service fee.
    pub door_to_door_fee: Decimal,
    /// Expedited-transport service fee.
    pub expedited_fee: Decimal,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            base_currency: CurrencyCode::known("EUR"),
            validity_days: 7,
            same_country_days: 3,
            cross_border_days: 7,
            carnet_days: 14,
            customs_handling_fee: Decimal::new(250, 0),
            door_to_door_fee: Decimal::new(120, 0),
            expedited_fee: Decimal::new(200, 0),
        }
    }
}

impl QuoteConfig {
    /// Sets the default currency.
    #[must_use]
    pub fn with_base_currency(mut self, currency: CurrencyCode) -> Self {
        self.base_currency = currency;
        self
    }

    /// Sets the validity window in days.
    #[must_use]
    pub fn with_validity_days(mut self, days: u32) -> Self {
        self.validity_days = days;
        self
    }

    /// Sets the customs-handling service fee.
    #[must_use]
    pub fn with_customs_handling_fee(mut self, fee: Decimal) -> Self {
        self.customs_handling_fee = fee;
        self
    }
}

/// A request for transport quotes on one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    /// Pickup country.
    pub pickup_country: CountryCode,
    /// Pickup city.
    pub pickup_city: String,
    /// Delivery country.
    pub delivery_country: CountryCode,
    /// Delivery city.
    pub delivery_city: String,
    /// Vehicle body class.
    pub vehicle_type: VehicleType,
    /// Vehicle make, informational.
    pub make: Option<String>,
    /// Vehicle model, informational.
    pub model: Option<String>,
    /// Model year, informational.
    pub year: Option<u16>,
    /// Measured dimensions, when known; carried for the provider, not
    /// priced.
    pub dimensions: Option<Dimensions>,
    /// Whether the vehicle moves under its own power.
    pub running_condition: RunningCondition,
    /// Currency to quote in; defaults to the engine's base currency.
    pub requested_currency: Option<CurrencyCode>,
}

impl QuoteRequest {
    /// Creates a request for a running vehicle quoted in the engine's
    /// base currency.
    #[must_use]
    pub fn new(
        pickup_country: CountryCode,
        pickup_city: impl Into<String>,
        delivery_country: CountryCode,
        delivery_city: impl Into<String>,
        vehicle_type: VehicleType,
    ) -> Self {
        Self {
            pickup_country,
            pickup_city: pickup_city.into(),
            delivery_country,
            delivery_city: delivery_city.into(),
            vehicle_type,
            make: None,
            model: None,
            year: None,
            dimensions: None,
            running_condition: RunningCondition::Running,
            requested_currency: None,
        }
    }

    /// Sets the vehicle description.
    #[must_use]
    pub fn with_vehicle(
        mut self,
        make: impl Into<String>,
        model: impl Into<String>,
        year: u16,
    ) -> Self {
        self.make = Some(make.into());
        self.model = Some(model.into());
        self.year = Some(year);
        self
    }

    /// Sets the measured dimensions.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Sets the running condition.
    #[must_use]
    pub fn with_condition(mut self, condition: RunningCondition) -> Self {
        self.running_condition = condition;
        self
    }

    /// Sets the requested quote currency.
    #[must_use]
    pub fn in_currency(mut self, currency: CurrencyCode) -> Self {
        self.requested_currency = Some(currency);
        self
    }

    /// Returns true if pickup and delivery countries differ.
    #[must_use]
    pub fn is_cross_border(&self) -> bool {
        self.pickup_country != self.delivery_country
    }
}

/// Engine computing quote batches across eligible providers.
///
/// All collaborators are constructor-injected ports, so the engine can be
/// exercised against in-memory fakes without any shared state.
#[derive(Debug)]
pub struct QuoteEngine {
    catalog: Arc<dyn ProviderCatalog>,
    converter: Arc<dyn CurrencyConverter>,
    customs: Arc<dyn CustomsReference>,
    config: QuoteConfig,
}

impl QuoteEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn ProviderCatalog>,
        converter: Arc<dyn CurrencyConverter>,
        customs: Arc<dyn CustomsReference>,
        config: QuoteConfig,
    ) -> Self {
        Self {
            catalog,
            converter,
            customs,
            config,
        }
    }

    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn with_defaults(
        catalog: Arc<dyn ProviderCatalog>,
        converter: Arc<dyn CurrencyConverter>,
        customs: Arc<dyn CustomsReference>,
    ) -> Self {
        Self::new(catalog, converter, customs, QuoteConfig::default())
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Computes quotes for every eligible provider on the route.
    ///
    /// Returns quotes in catalog order (preferred-first, rating
    /// descending). Every quote in the batch carries the same
    /// `valid_until` timestamp. An empty list means no provider covers
    /// the route.
    ///
    /// # Errors
    ///
    /// Returns an error only when the catalog query itself fails;
    /// conversion failures degrade per provider.
    pub async fn quote(&self, request: &QuoteRequest) -> ApplicationResult<Vec<TransportQuote>> {
        let currency = request
            .requested_currency
            .clone()
            .unwrap_or_else(|| self.config.base_currency.clone());

        let query = RouteQuery::new(
            request.pickup_country.clone(),
            request.delivery_country.clone(),
            request.vehicle_type,
        );
        let providers = self.catalog.find_eligible(&query).await?;
        debug!(
            from = %query.from,
            to = %query.to,
            vehicle_type = %query.vehicle_type,
            eligible = providers.len(),
            "provider eligibility resolved"
        );
        if providers.is_empty() {
            return Ok(Vec::new());
        }

        let estimated_days = self.estimate_days(request).await;
        // Computed once so every quote in the batch shares the timestamp.
        let valid_until = Timestamp::now().add_days(i64::from(self.config.validity_days));
        let services = self.additional_services(request.is_cross_border(), &currency);

        let quotes = join_all(providers.iter().map(|provider| {
            self.quote_provider(
                provider,
                request,
                &currency,
                estimated_days,
                valid_until,
                &services,
            )
        }))
        .await;

        Ok(quotes.into_iter().flatten().collect())
    }

    /// Default lead-time estimate for the route. Not a route plan: 3 days
    /// domestic, 7 cross-border, 14 when the destination needs a carnet.
    async fn estimate_days(&self, request: &QuoteRequest) -> u32 {
        if !request.is_cross_border() {
            return self.config.same_country_days;
        }
        match self.customs.lookup(&request.delivery_country).await {
            Some(info) if info.carnet_required => self.config.carnet_days,
            _ => self.config.cross_border_days,
        }
    }

    /// The fixed add-on service catalog attached to every quote. Customs
    /// handling is free on domestic routes.
    fn additional_services(
        &self,
        cross_border: bool,
        currency: &CurrencyCode,
    ) -> Vec<AdditionalService> {
        let customs_fee = if cross_border {
            self.config.customs_handling_fee
        } else {
            Decimal::ZERO
        };
        vec![
            AdditionalService::new(
                ServiceKind::CustomsHandling,
                Money::new(customs_fee, currency.clone()),
            ),
            AdditionalService::new(
                ServiceKind::DoorToDoor,
                Money::new(self.config.door_to_door_fee, currency.clone()),
            ),
            AdditionalService::new(
                ServiceKind::Expedited,
                Money::new(self.config.expedited_fee, currency.clone()),
            ),
        ]
    }

    /// Prices one provider: base rate, fees in order, condition surcharge,
    /// conversion, rounding. Returns `None` when the provider cannot be
    /// priced (logged, never fatal for the batch).
    async fn quote_provider(
        &self,
        provider: &TransportProvider,
        request: &QuoteRequest,
        currency: &CurrencyCode,
        estimated_days: u32,
        valid_until: Timestamp,
        services: &[AdditionalService],
    ) -> Option<TransportQuote> {
        let rate = provider.base_rate_for(
            &request.pickup_country,
            &request.delivery_country,
            request.vehicle_type,
        )?;

        let total = match pricing::compute_provider_price(
            rate,
            provider.additional_fees(),
            request.running_condition,
        ) {
            Ok(total) => total,
            Err(err) => {
                warn!(provider = %provider.id(), %err, "price computation failed, provider skipped");
                return None;
            }
        };

        let rate_currency = rate.price.currency();
        let price = if rate_currency == currency {
            Money::new(total, currency.clone())
        } else {
            match self.converter.convert(total, rate_currency, currency).await {
                Ok(conversion) => Money::new(conversion.converted_amount, currency.clone()),
                Err(err) => {
                    warn!(
                        provider = %provider.id(),
                        from = %rate_currency,
                        to = %currency,
                        %err,
                        "currency conversion failed, quoting in rate currency"
                    );
                    Money::new(total, rate_currency.clone())
                }
            }
        };

        Some(
            TransportQuote::new(
                provider.id().clone(),
                provider.name(),
                price.rounded(),
                estimated_days,
                valid_until,
            )
            .with_insurance_options(provider.insurance_options().to_vec())
            .with_additional_services(services.to_vec()),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::provider::{AdditionalFee, BaseRate, InsuranceOption};
    use crate::domain::value_objects::ProviderId;
    use crate::infrastructure::customs::{CountryCustomsInfo, InMemoryCustomsReference};
    use crate::infrastructure::exchange::{
        Conversion, ExchangeError, ExchangeResult, InMemoryExchangeRates,
    };
    use crate::infrastructure::persistence::in_memory::InMemoryProviderCatalog;
    use async_trait::async_trait;

    fn country(code: &str) -> CountryCode {
        CountryCode::new(code).unwrap()
    }

    fn currency(code: &str) -> CurrencyCode {
        CurrencyCode::new(code).unwrap()
    }

    fn eur_money(amount: i64, scale: u32) -> Money {
        Money::new(Decimal::new(amount, scale), currency("EUR"))
    }

    /// DE -> RS sedan, 500 EUR base, one 10% fee.
    fn de_rs_provider() -> TransportProvider {
        TransportProvider::builder("prov-1", "Adria Motors Logistics")
            .operating_country(country("DE"))
            .operating_country(country("RS"))
            .base_rate(BaseRate::new(
                country("DE"),
                country("RS"),
                VehicleType::Sedan,
                eur_money(500, 0),
            ))
            .additional_fee(AdditionalFee::percentage("fuel surcharge", Decimal::new(10, 0)))
            .insurance_option(InsuranceOption::new(
                "Full coverage",
                Decimal::new(30_000, 0),
                eur_money(45, 0),
            ))
            .rating(4.5)
            .build()
    }

    async fn engine_with(
        providers: Vec<TransportProvider>,
        carnet_for_rs: bool,
    ) -> QuoteEngine {
        let catalog = InMemoryProviderCatalog::new();
        for p in providers {
            catalog.save(&p).await.unwrap();
        }
        let rates = InMemoryExchangeRates::new(currency("EUR"))
            .with_rate(currency("USD"), Decimal::new(108, 2));
        let mut customs = InMemoryCustomsReference::new();
        if carnet_for_rs {
            customs = customs.with_entry(
                country("RS"),
                CountryCustomsInfo::new("Serbia", true),
            );
        }
        QuoteEngine::with_defaults(Arc::new(catalog), Arc::new(rates), Arc::new(customs))
    }

    fn de_rs_request() -> QuoteRequest {
        QuoteRequest::new(
            country("DE"),
            "Berlin",
            country("RS"),
            "Belgrade",
            VehicleType::Sedan,
        )
        .with_vehicle("Volkswagen", "Golf", 2019)
    }

    #[tokio::test]
    async fn de_rs_running_quotes_550_eur() {
        let engine = engine_with(vec![de_rs_provider()], false).await;
        let quotes = engine.quote(&de_rs_request()).await.unwrap();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].price(), &eur_money(55000, 2)); // 550.00
        assert_eq!(quotes[0].estimated_days(), 7);
    }

    #[tokio::test]
    async fn carnet_destination_extends_lead_time_to_14_days() {
        let engine = engine_with(vec![de_rs_provider()], true).await;
        let quotes = engine.quote(&de_rs_request()).await.unwrap();
        assert_eq!(quotes[0].estimated_days(), 14);
    }

    #[tokio::test]
    async fn non_running_surcharge_quotes_687_50() {
        let engine = engine_with(vec![de_rs_provider()], false).await;
        let request = de_rs_request().with_condition(RunningCondition::NonRunning);
        let quotes = engine.quote(&request).await.unwrap();
        assert_eq!(quotes[0].price(), &eur_money(68750, 2)); // 687.50
    }

    #[tokio::test]
    async fn same_country_defaults_to_3_days_and_free_customs_handling() {
        let domestic = TransportProvider::builder("prov-de", "Bundesweit Transporte")
            .operating_country(country("DE"))
            .base_rate(BaseRate::new(
                country("DE"),
                country("DE"),
                VehicleType::Sedan,
                eur_money(300, 0),
            ))
            .build();
        let engine = engine_with(vec![domestic], false).await;

        let request = QuoteRequest::new(
            country("DE"),
            "Munich",
            country("DE"),
            "Hamburg",
            VehicleType::Sedan,
        );
        let quotes = engine.quote(&request).await.unwrap();

        assert_eq!(quotes[0].estimated_days(), 3);
        let customs_service = quotes[0]
            .additional_services()
            .iter()
            .find(|s| s.kind == ServiceKind::CustomsHandling)
            .unwrap();
        assert_eq!(customs_service.price.amount(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn cross_border_customs_handling_carries_flat_fee() {
        let engine = engine_with(vec![de_rs_provider()], false).await;
        let quotes = engine.quote(&de_rs_request()).await.unwrap();

        let customs_service = quotes[0]
            .additional_services()
            .iter()
            .find(|s| s.kind == ServiceKind::CustomsHandling)
            .unwrap();
        assert_eq!(customs_service.price.amount(), Decimal::new(250, 0));
        assert_eq!(quotes[0].additional_services().len(), 3);
    }

    #[tokio::test]
    async fn batch_shares_one_validity_timestamp_seven_days_out() {
        let second = TransportProvider::builder("prov-2", "Balkan Express")
            .operating_country(country("DE"))
            .operating_country(country("RS"))
            .base_rate(BaseRate::new(
                country("DE"),
                country("RS"),
                VehicleType::Sedan,
                eur_money(480, 0),
            ))
            .rating(3.0)
            .build();
        let engine = engine_with(vec![de_rs_provider(), second], false).await;

        let before = Timestamp::now();
        let quotes = engine.quote(&de_rs_request()).await.unwrap();
        let after = Timestamp::now();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].valid_until(), quotes[1].valid_until());
        assert!(!quotes[0].valid_until().is_before(&before.add_days(7)));
        assert!(!quotes[0].valid_until().is_after(&after.add_days(7)));
    }

    #[tokio::test]
    async fn no_eligible_providers_is_empty_not_error() {
        let engine = engine_with(vec![], false).await;
        let quotes = engine.quote(&de_rs_request()).await.unwrap();
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn provider_without_matching_rate_never_appears() {
        let truck_only = TransportProvider::builder("prov-trucks", "Heavy Haul")
            .operating_country(country("DE"))
            .operating_country(country("RS"))
            .base_rate(BaseRate::new(
                country("DE"),
                country("RS"),
                VehicleType::Truck,
                eur_money(900, 0),
            ))
            .build();
        let engine = engine_with(vec![de_rs_provider(), truck_only], false).await;

        let quotes = engine.quote(&de_rs_request()).await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].provider_id(), &ProviderId::new("prov-1"));
    }

    #[tokio::test]
    async fn requested_currency_is_converted_and_rounded() {
        let engine = engine_with(vec![de_rs_provider()], false).await;
        let request = de_rs_request().in_currency(currency("USD"));
        let quotes = engine.quote(&request).await.unwrap();

        // 550.00 EUR * 1.08 = 594.00 USD
        assert_eq!(
            quotes[0].price(),
            &Money::new(Decimal::new(59400, 2), currency("USD"))
        );
    }

    #[tokio::test]
    async fn insurance_options_pass_through() {
        let engine = engine_with(vec![de_rs_provider()], false).await;
        let quotes = engine.quote(&de_rs_request()).await.unwrap();
        assert_eq!(quotes[0].insurance_options().len(), 1);
        assert_eq!(quotes[0].insurance_options()[0].name, "Full coverage");
    }

    #[tokio::test]
    async fn catalog_order_is_preserved_preferred_first() {
        let preferred = TransportProvider::builder("prov-pref", "Preferred Partner")
            .operating_country(country("DE"))
            .operating_country(country("RS"))
            .base_rate(BaseRate::new(
                country("DE"),
                country("RS"),
                VehicleType::Sedan,
                eur_money(600, 0),
            ))
            .preferred(true)
            .rating(2.0)
            .build();
        let engine = engine_with(vec![de_rs_provider(), preferred], false).await;

        let quotes = engine.quote(&de_rs_request()).await.unwrap();
        assert_eq!(quotes[0].provider_id(), &ProviderId::new("prov-pref"));
        assert_eq!(quotes[1].provider_id(), &ProviderId::new("prov-1"));
    }

    /// Converter that always fails, for the degradation path.
    #[derive(Debug)]
    struct FailingConverter;

    #[async_trait]
    impl CurrencyConverter for FailingConverter {
        async fn convert(
            &self,
            _amount: Decimal,
            from: &CurrencyCode,
            _to: &CurrencyCode,
        ) -> ExchangeResult<Conversion> {
            Err(ExchangeError::CurrencyNotFound(from.clone()))
        }
    }

    #[tokio::test]
    async fn conversion_failure_falls_back_to_rate_currency() {
        let catalog = InMemoryProviderCatalog::new();
        catalog.save(&de_rs_provider()).await.unwrap();
        let engine = QuoteEngine::with_defaults(
            Arc::new(catalog),
            Arc::new(FailingConverter),
            Arc::new(InMemoryCustomsReference::new()),
        );

        let request = de_rs_request().in_currency(currency("USD"));
        let quotes = engine.quote(&request).await.unwrap();

        // Degraded, not dropped: original price in the rate currency.
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].price(), &eur_money(55000, 2));
    }

    #[test]
    fn config_defaults() {
        let config = QuoteConfig::default();
        assert_eq!(config.base_currency.as_str(), "EUR");
        assert_eq!(config.validity_days, 7);
        assert_eq!(config.same_country_days, 3);
        assert_eq!(config.cross_border_days, 7);
        assert_eq!(config.carnet_days, 14);
    }

    #[test]
    fn config_builders() {
        let config = QuoteConfig::default()
            .with_base_currency(CurrencyCode::new("USD").unwrap())
            .with_validity_days(3)
            .with_customs_handling_fee(Decimal::new(99, 0));
        assert_eq!(config.base_currency.as_str(), "USD");
        assert_eq!(config.validity_days, 3);
        assert_eq!(config.customs_handling_fee, Decimal::new(99, 0));
    }
}
