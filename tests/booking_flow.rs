//! End-to-end flow over the in-memory stack: quote a cross-border route,
//! book the winning offer, and drive the booking through transit, a
//! customs hold, and delivery.

#![allow(clippy::expect_used)]

use autohaul::application::services::{BookingService, QuoteEngine, QuoteRequest};
use autohaul::domain::entities::booking::{
    BookingNote, BookingRequest, CustomsCompletion, StatusTransition, StatusUpdate,
    TrackingUpdate, TransferPoint, VehicleDetails,
};
use autohaul::domain::entities::provider::{
    AdditionalFee, BaseRate, InsuranceOption, TransportProvider,
};
use autohaul::domain::value_objects::{
    BookingStatus, CountryCode, CurrencyCode, CustomsStatus, Money, RunningCondition, VehicleType,
};
use autohaul::infrastructure::customs::{CountryCustomsInfo, InMemoryCustomsReference};
use autohaul::infrastructure::exchange::InMemoryExchangeRates;
use autohaul::infrastructure::persistence::in_memory::{
    InMemoryBookingRepository, InMemoryProviderCatalog,
};
use autohaul::infrastructure::persistence::traits::ProviderCatalog;
use rust_decimal::Decimal;
use std::sync::Arc;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("autohaul=debug")
        .with_test_writer()
        .try_init();
}

fn country(code: &str) -> CountryCode {
    CountryCode::new(code).expect("valid country code")
}

fn eur() -> CurrencyCode {
    CurrencyCode::new("EUR").expect("valid currency code")
}

fn eur_money(amount: i64, scale: u32) -> Money {
    Money::new(Decimal::new(amount, scale), eur())
}

fn seed_provider() -> TransportProvider {
    TransportProvider::builder("adria-logistics", "Adria Motors Logistics")
        .operating_country(country("DE"))
        .operating_country(country("RS"))
        .base_rate(BaseRate::new(
            country("DE"),
            country("RS"),
            VehicleType::Sedan,
            eur_money(500, 0),
        ))
        .additional_fee(AdditionalFee::percentage(
            "fuel surcharge",
            Decimal::new(10, 0),
        ))
        .insurance_option(InsuranceOption::new(
            "Full coverage",
            Decimal::new(30_000, 0),
            eur_money(45, 0),
        ))
        .preferred(true)
        .rating(4.6)
        .build()
}

async fn stack() -> (QuoteEngine, BookingService) {
    init_tracing();

    let catalog = Arc::new(InMemoryProviderCatalog::new());
    catalog.save(&seed_provider()).await.expect("seed provider");

    let rates = Arc::new(
        InMemoryExchangeRates::new(eur()).with_rate(
            CurrencyCode::new("RSD").expect("valid currency code"),
            Decimal::new(11718, 2),
        ),
    );
    let customs = Arc::new(InMemoryCustomsReference::new().with_entry(
        country("RS"),
        CountryCustomsInfo::new("Serbia", true).with_notes("transit carnet required"),
    ));

    let engine = QuoteEngine::with_defaults(catalog.clone(), rates, customs);
    let service = BookingService::new(Arc::new(InMemoryBookingRepository::new()), catalog);
    (engine, service)
}

#[tokio::test]
async fn quote_book_clear_customs_and_deliver() {
    let (engine, service) = stack().await;

    // 1. Quote the route. 500 EUR base + 10% fee = 550.00 EUR, 14 days
    //    because Serbia requires a transit carnet.
    let request = QuoteRequest::new(
        country("DE"),
        "Berlin",
        country("RS"),
        "Belgrade",
        VehicleType::Sedan,
    )
    .with_vehicle("Volkswagen", "Golf", 2019);

    let quotes = engine.quote(&request).await.expect("quote batch");
    assert_eq!(quotes.len(), 1);
    let offer = &quotes[0];
    assert_eq!(offer.price(), &eur_money(55000, 2));
    assert_eq!(offer.estimated_days(), 14);
    assert!(!offer.is_expired());

    // 2. Book the offer.
    let booking = service
        .create(BookingRequest::new(
            "veh-golf-2019",
            "buyer-1",
            "seller-1",
            offer.provider_id().clone(),
            TransferPoint::new("Kurfürstendamm 1", "Berlin", country("DE"), "H. Brandt"),
            TransferPoint::new(
                "Bulevar kralja Aleksandra 2",
                "Belgrade",
                country("RS"),
                "M. Petrović",
            ),
            VehicleDetails::new("Volkswagen", "Golf", 2019, "WVWZZZ1KZAW000001"),
            offer.price().clone(),
            "buyer-1",
        ))
        .await
        .expect("create booking");

    let id = booking.id();
    assert_eq!(booking.status(), BookingStatus::QuoteRequested);
    assert!(booking.customs().is_some_and(|c| c.required()));
    assert_eq!(booking.route().expect("route skeleton").waypoints.len(), 3);
    assert_eq!(booking.tracking().history().len(), 1);

    // 3. Drive the lifecycle to transit.
    for status in [
        BookingStatus::Quoted,
        BookingStatus::Booked,
        BookingStatus::PickupScheduled,
        BookingStatus::InTransit,
    ] {
        service
            .update_status(&id, &StatusTransition::to(status))
            .await
            .expect("forward transition");
    }

    // 4. Carrier facts arrive out-of-band.
    let tracked = service
        .update_tracking(
            &id,
            &TrackingUpdate::default()
                .with_tracking_number("TRK-55012")
                .with_status_update(StatusUpdate::new("Passed Szeged").with_location("Szeged")),
        )
        .await
        .expect("tracking update");
    assert_eq!(tracked.tracking().tracking_number(), Some("TRK-55012"));
    assert_eq!(tracked.tracking().current_location(), Some("Szeged"));

    // 5. Customs hold at the border, then clearance auto-advances back to
    //    transit with one extra ledger entry.
    let held = service
        .update_status(
            &id,
            &StatusTransition::to(BookingStatus::CustomsClearance)
                .with_location("Horgoš border crossing"),
        )
        .await
        .expect("customs hold");
    assert_eq!(held.customs().expect("customs").status(), CustomsStatus::InProgress);
    let entries_before = held.tracking().history().len();

    let cleared = service
        .complete_customs_clearance(
            &id,
            &CustomsCompletion::default()
                .with_office("Carinarnica Beograd")
                .with_agent("Agencija Tranzit d.o.o.")
                .with_duties(eur_money(120, 0))
                .with_document("SAD-2026-0042"),
        )
        .await
        .expect("customs completion");
    assert_eq!(cleared.status(), BookingStatus::InTransit);
    assert_eq!(cleared.tracking().history().len(), entries_before + 1);
    assert_eq!(
        cleared.customs().expect("customs").status(),
        CustomsStatus::Completed
    );

    // 6. Deliver, settle, annotate.
    let delivered = service
        .update_status(
            &id,
            &StatusTransition::to(BookingStatus::Delivered).with_location("Belgrade"),
        )
        .await
        .expect("delivery");
    assert!(delivered.tracking().actual_delivery().is_some());
    assert!(delivered.is_terminal());

    let settled = service
        .record_actual_price(&id, eur_money(55000, 2))
        .await
        .expect("actual price");
    let paid = service.mark_paid(&id).await.expect("payment");
    assert!(paid.pricing().is_paid());
    assert_eq!(settled.pricing().actual_amount(), Some(&eur_money(55000, 2)));

    let annotated = service
        .add_note(&id, BookingNote::new("agent-1", "handover signed by buyer"))
        .await
        .expect("note");
    assert_eq!(annotated.notes().len(), 1);

    // The ledger recorded the whole journey in order, created-entry first.
    let final_state = service.get(&id).await.expect("final read");
    let labels: Vec<&str> = final_state
        .tracking()
        .history()
        .iter()
        .map(|e| e.status.as_str())
        .collect();
    assert_eq!(
        labels,
        [
            "Booking created",
            "QUOTED",
            "BOOKED",
            "PICKUP_SCHEDULED",
            "IN_TRANSIT",
            "Passed Szeged",
            "CUSTOMS_CLEARANCE",
            "IN_TRANSIT",
            "DELIVERED",
        ]
    );
}

#[tokio::test]
async fn non_running_vehicle_carries_the_surcharge_through_booking() {
    let (engine, service) = stack().await;

    let request = QuoteRequest::new(
        country("DE"),
        "Berlin",
        country("RS"),
        "Belgrade",
        VehicleType::Sedan,
    )
    .with_condition(RunningCondition::NonRunning);

    let quotes = engine.quote(&request).await.expect("quote batch");
    assert_eq!(quotes[0].price(), &eur_money(68750, 2)); // 687.50

    let booking = service
        .create(BookingRequest::new(
            "veh-wreck",
            "buyer-2",
            "seller-2",
            quotes[0].provider_id().clone(),
            TransferPoint::new("Kurfürstendamm 1", "Berlin", country("DE"), "H. Brandt"),
            TransferPoint::new(
                "Bulevar kralja Aleksandra 2",
                "Belgrade",
                country("RS"),
                "M. Petrović",
            ),
            VehicleDetails::new("Audi", "A4", 2015, "WAUZZZ8K9FA000002")
                .with_condition(RunningCondition::NonRunning),
            quotes[0].price().clone(),
            "buyer-2",
        ))
        .await
        .expect("create booking");

    assert_eq!(booking.pricing().quote_amount(), &eur_money(68750, 2));
    assert_eq!(
        booking.vehicle().running_condition,
        RunningCondition::NonRunning
    );
}
