use chrono::{DateTime, TimeZone, Utc};

use super::domain::{Category, Goal, Product, ProductId, StockStatus, Vendor};

fn created(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId("oura-ring-gen3".to_string()),
            slug: "oura-ring-gen3".to_string(),
            title: "Oura Ring Gen3".to_string(),
            vendor: Vendor::Oura,
            vendor_product_id: None,
            affiliate_url: Some("https://ouraring.com/product/rings?utm_source=acme".to_string()),
            images: strings(&["/images/products/oura-ring.jpg"]),
            price: 299.0,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(4.6),
            category: Category::Wearables,
            goals: vec![Goal::Sleep, Goal::Hrv, Goal::Recovery],
            tags: strings(&["ring", "sleep tracking", "hrv", "temperature"]),
            stock_status: StockStatus::InStock,
            short: "Titanium smart ring tracking sleep stages, HRV, and readiness.".to_string(),
            pros: strings(&["Discreet form factor", "Accurate overnight HRV"]),
            cons: strings(&["Monthly membership required"]),
            created_at: created(2024, 1, 15),
            popularity: 95.0,
        },
        Product {
            id: ProductId("whoop-4".to_string()),
            slug: "whoop-4-0".to_string(),
            title: "WHOOP 4.0".to_string(),
            vendor: Vendor::Whoop,
            vendor_product_id: None,
            affiliate_url: Some("https://whoop.com/membership?utm_source=acme".to_string()),
            images: strings(&["/images/products/whoop.jpg"]),
            price: 239.0,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(4.4),
            category: Category::Wearables,
            goals: vec![Goal::Recovery, Goal::Hrv, Goal::Sleep],
            tags: strings(&["strap", "strain", "recovery score"]),
            stock_status: StockStatus::InStock,
            short: "Screenless strap scoring daily strain, recovery, and sleep need.".to_string(),
            pros: strings(&["Continuous HRV", "Strong coaching insights"]),
            cons: strings(&["Subscription pricing"]),
            created_at: created(2023, 9, 2),
            popularity: 88.0,
        },
        Product {
            id: ProductId("eight-sleep-pod4".to_string()),
            slug: "eight-sleep-pod-4".to_string(),
            title: "Eight Sleep Pod 4".to_string(),
            vendor: Vendor::EightSleep,
            vendor_product_id: None,
            affiliate_url: Some("https://eightsleep.com/product/pod-cover?utm_source=acme".to_string()),
            images: strings(&["/images/products/eight-sleep.jpg"]),
            price: 2495.0,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(4.5),
            category: Category::Sleep,
            goals: vec![Goal::Sleep, Goal::Recovery],
            tags: strings(&["mattress cover", "temperature", "smart bed"]),
            stock_status: StockStatus::InStock,
            short: "Dual-zone cooling cover that adapts bed temperature through the night.".to_string(),
            pros: strings(&["Noticeable deep sleep gains", "Per-side temperature"]),
            cons: strings(&["Premium price", "Requires water tank refills"]),
            created_at: created(2024, 5, 20),
            popularity: 81.0,
        },
        Product {
            id: ProductId("levels-cgm-program".to_string()),
            slug: "levels-cgm-program".to_string(),
            title: "Levels CGM Program".to_string(),
            vendor: Vendor::Levels,
            vendor_product_id: None,
            affiliate_url: Some("https://levelshealth.com/join?utm_source=acme".to_string()),
            images: strings(&["/images/products/levels.jpg"]),
            price: 199.0,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(4.2),
            category: Category::Diagnostics,
            goals: vec![Goal::Metabolic, Goal::Longevity],
            tags: strings(&["cgm", "glucose", "metabolic"]),
            stock_status: StockStatus::Backorder,
            short: "Continuous glucose monitoring with food-response scoring.".to_string(),
            pros: strings(&["Real-time glucose feedback"]),
            cons: strings(&["Sensor waitlist", "Prescription step"]),
            created_at: created(2023, 11, 8),
            popularity: 72.0,
        },
        Product {
            id: ProductId("thorne-magnesium-bisglycinate".to_string()),
            slug: "thorne-magnesium-bisglycinate".to_string(),
            title: "Thorne Magnesium Bisglycinate".to_string(),
            vendor: Vendor::Thorne,
            vendor_product_id: None,
            affiliate_url: Some("https://thorne.com/products/dp/magnesium-bisglycinate?utm_source=acme".to_string()),
            images: strings(&["/images/products/thorne-magnesium.jpg"]),
            price: 47.0,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(4.7),
            category: Category::Nutrition,
            goals: vec![Goal::Sleep, Goal::Recovery],
            tags: strings(&["magnesium", "supplement", "vegan", "stimulant free"]),
            stock_status: StockStatus::InStock,
            short: "Highly absorbable magnesium powder for relaxation and sleep quality.".to_string(),
            pros: strings(&["NSF Certified for Sport", "Gentle on digestion"]),
            cons: strings(&["Powder format only"]),
            created_at: created(2023, 6, 12),
            popularity: 84.0,
        },
        Product {
            id: ProductId("thorne-creatine".to_string()),
            slug: "thorne-creatine".to_string(),
            title: "Thorne Creatine".to_string(),
            vendor: Vendor::Thorne,
            vendor_product_id: None,
            affiliate_url: Some("https://thorne.com/products/dp/creatine?utm_source=acme".to_string()),
            images: strings(&["/images/products/thorne-creatine.jpg"]),
            price: 43.0,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(4.8),
            category: Category::Nutrition,
            goals: vec![Goal::Cognitive, Goal::Recovery, Goal::Longevity],
            tags: strings(&["creatine", "supplement", "vegan", "strength"]),
            stock_status: StockStatus::InStock,
            short: "Micronized creatine monohydrate for strength and cognitive support.".to_string(),
            pros: strings(&["Well-studied compound", "Unflavored"]),
            cons: strings(&[]),
            created_at: created(2024, 2, 1),
            popularity: 79.0,
        },
        Product {
            id: ProductId("nmn-longevity-complex".to_string()),
            slug: "nmn-longevity-complex".to_string(),
            title: "NMN Longevity Complex".to_string(),
            vendor: Vendor::Shopify,
            vendor_product_id: Some("44012345678901".to_string()),
            affiliate_url: None,
            images: strings(&["/images/products/nmn-complex.jpg"]),
            price: 89.0,
            currency: "USD".to_string(),
            price_in_cents: Some(8900),
            rating: Some(4.3),
            category: Category::Nutrition,
            goals: vec![Goal::Longevity, Goal::Metabolic],
            tags: strings(&["nmn", "nad+", "supplement", "stimulant free"]),
            stock_status: StockStatus::InStock,
            short: "NAD+ precursor blend with resveratrol and TMG, shipped direct.".to_string(),
            pros: strings(&["Third-party tested", "Ships from partner warehouse"]),
            cons: strings(&["Evidence still emerging"]),
            created_at: created(2024, 7, 3),
            popularity: 66.0,
        },
        Product {
            id: ProductId("sleep-mask-pro".to_string()),
            slug: "contoured-sleep-mask".to_string(),
            title: "Contoured Blackout Sleep Mask".to_string(),
            vendor: Vendor::Shopify,
            vendor_product_id: Some("44012345678902".to_string()),
            affiliate_url: None,
            images: strings(&["/images/products/sleep-mask.jpg"]),
            price: 35.0,
            currency: "USD".to_string(),
            price_in_cents: Some(3500),
            rating: Some(4.5),
            category: Category::Sleep,
            goals: vec![Goal::Sleep],
            tags: strings(&["mask", "blackout", "travel"]),
            stock_status: StockStatus::InStock,
            short: "Zero-pressure eye cups block 100% of light without touching lashes.".to_string(),
            pros: strings(&["Comfortable for side sleepers"]),
            cons: strings(&["Bulkier than flat masks"]),
            created_at: created(2024, 3, 18),
            popularity: 70.0,
        },
        Product {
            id: ProductId("red-light-panel".to_string()),
            slug: "red-light-therapy-panel".to_string(),
            title: "Red Light Therapy Panel".to_string(),
            vendor: Vendor::Shopify,
            vendor_product_id: Some("44012345678903".to_string()),
            affiliate_url: None,
            images: strings(&["/images/products/red-light.jpg"]),
            price: 449.0,
            currency: "USD".to_string(),
            price_in_cents: Some(44900),
            rating: Some(4.1),
            category: Category::SmartHome,
            goals: vec![Goal::Recovery, Goal::Sleep],
            tags: strings(&["red light", "photobiomodulation", "recovery"]),
            stock_status: StockStatus::Backorder,
            short: "Dual-wavelength 660/850nm panel for evening recovery routines.".to_string(),
            pros: strings(&["Low EMF", "App timer"]),
            cons: strings(&["Needs wall or stand mounting"]),
            created_at: created(2024, 8, 9),
            popularity: 58.0,
        },
        Product {
            id: ProductId("polar-h10".to_string()),
            slug: "polar-h10-chest-strap".to_string(),
            title: "Polar H10 Heart Rate Sensor".to_string(),
            vendor: Vendor::Amazon,
            vendor_product_id: Some("B07PM54P4N".to_string()),
            affiliate_url: None,
            images: strings(&["/images/products/polar-h10.jpg"]),
            price: 89.95,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(4.6),
            category: Category::Wearables,
            goals: vec![Goal::Hrv, Goal::Recovery],
            tags: strings(&["chest strap", "ecg", "hrv"]),
            stock_status: StockStatus::InStock,
            short: "ECG-grade chest strap for precise HRV and training data.".to_string(),
            pros: strings(&["Gold-standard accuracy"]),
            cons: strings(&["Not for all-day wear"]),
            created_at: created(2022, 10, 4),
            popularity: 76.0,
        },
        Product {
            id: ProductId("cgm-starter-kit".to_string()),
            slug: "cgm-starter-kit".to_string(),
            title: "CGM Starter Kit (2 sensors)".to_string(),
            vendor: Vendor::Ebay,
            vendor_product_id: Some("295812345678".to_string()),
            affiliate_url: None,
            images: strings(&["/images/products/cgm-kit.jpg"]),
            price: 129.0,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(3.9),
            category: Category::Diagnostics,
            goals: vec![Goal::Metabolic],
            tags: strings(&["cgm", "glucose"]),
            stock_status: StockStatus::OutOfStock,
            short: "Two-week glucose sensors for self-experimentation.".to_string(),
            pros: strings(&["No subscription"]),
            cons: strings(&["No coaching app included"]),
            created_at: created(2023, 4, 27),
            popularity: 41.0,
        },
        Product {
            id: ProductId("outlive-book".to_string()),
            slug: "outlive-peter-attia".to_string(),
            title: "Outlive: The Science and Art of Longevity".to_string(),
            vendor: Vendor::Amazon,
            vendor_product_id: Some("0593236599".to_string()),
            affiliate_url: None,
            images: strings(&["/images/products/outlive.jpg"]),
            price: 18.99,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(4.8),
            category: Category::Books,
            goals: vec![Goal::Longevity, Goal::Metabolic, Goal::Cognitive],
            tags: strings(&["book", "medicine 3.0", "exercise"]),
            stock_status: StockStatus::InStock,
            short: "A practical framework for extending healthspan.".to_string(),
            pros: strings(&["Actionable frameworks"]),
            cons: strings(&["Dense in places"]),
            created_at: created(2023, 3, 28),
            popularity: 92.0,
        },
        Product {
            id: ProductId("why-we-sleep-book".to_string()),
            slug: "why-we-sleep".to_string(),
            title: "Why We Sleep".to_string(),
            vendor: Vendor::Amazon,
            vendor_product_id: Some("1501144324".to_string()),
            affiliate_url: None,
            images: strings(&["/images/products/why-we-sleep.jpg"]),
            price: 14.99,
            currency: "USD".to_string(),
            price_in_cents: None,
            rating: Some(4.5),
            category: Category::Books,
            goals: vec![Goal::Sleep, Goal::Cognitive],
            tags: strings(&["book", "sleep science"]),
            stock_status: StockStatus::InStock,
            short: "An accessible tour of the science of sleep and dreams.".to_string(),
            pros: strings(&["Motivating read"]),
            cons: strings(&["Some claims contested"]),
            created_at: created(2022, 6, 1),
            popularity: 67.0,
        },
        Product {
            id: ProductId("air-quality-monitor".to_string()),
            slug: "indoor-air-quality-monitor".to_string(),
            title: "Indoor Air Quality Monitor".to_string(),
            vendor: Vendor::Other,
            vendor_product_id: None,
            affiliate_url: Some("https://airthings.com/view-plus".to_string()),
            images: strings(&["/images/products/air-monitor.jpg"]),
            price: 229.0,
            currency: "USD".to_string(),
            price_in_cents: Some(22900),
            rating: Some(4.2),
            category: Category::SmartHome,
            goals: vec![Goal::Sleep, Goal::Cognitive, Goal::Longevity],
            tags: strings(&["co2", "radon", "bedroom"]),
            stock_status: StockStatus::InStock,
            short: "Tracks CO2, radon, and particulates so bedrooms stay breathable.".to_string(),
            pros: strings(&["Battery powered", "Radon detection"]),
            cons: strings(&["Hub needed for remote access"]),
            created_at: created(2024, 4, 11),
            popularity: 54.0,
        },
    ]
}
