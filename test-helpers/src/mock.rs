//! Seed data for the mock catalog.
//!
//! The wineries are loaded straight into the catalog. Wines are created
//! through the admin API, the same way the UI creates them, so the seed run
//! doubles as a smoke test of the write endpoints.

use crate::TestApp;
use anyhow::Result;
use payloads::requests::CreateWine;
use payloads::{Vintage, WineId, WineStatus, Winery, WineryId};
use rust_decimal::Decimal;

fn winery(
    id: i64,
    name: &str,
    slug: &str,
    address: &str,
    phone: &str,
    description: &str,
) -> Winery {
    Winery {
        id: WineryId(id),
        name: name.into(),
        slug: slug.into(),
        shop_url: format!("https://{slug}.example.com/shop"),
        address: Some(address.into()),
        phone: Some(phone.into()),
        email: Some(format!("cellar@{slug}.example.com")),
        description: Some(description.into()),
        image_url: None,
        website_url: Some(format!("https://{slug}.example.com")),
        is_active: true,
    }
}

/// The directory's wineries. The last one is inactive and stays out of the
/// public listing.
pub fn wineries() -> Vec<Winery> {
    let mut closed = winery(
        5,
        "Old Mill Vineyard",
        "old-mill-vineyard",
        "2 Mill Lane, Hahndorf",
        "08 8388 0005",
        "Closed for replanting.",
    );
    closed.is_active = false;

    vec![
        winery(
            1,
            "Ridge Road Estate",
            "ridge-road-estate",
            "14 Ridge Road, Balhannah",
            "08 8388 0001",
            "Cool climate estate known for Pinot and Sparkling.",
        ),
        winery(
            2,
            "Valley Floor Cellars",
            "valley-floor-cellars",
            "220 Main Road, Tanunda",
            "08 8563 0002",
            "Fourth-generation family producer of old vine Shiraz.",
        ),
        winery(
            3,
            "Stonewall Wines",
            "stonewall-wines",
            "9 Quarry Street, Clare",
            "08 8842 0003",
            "Small-batch Riesling from limestone slopes.",
        ),
        winery(
            4,
            "Coastal Breeze Vineyards",
            "coastal-breeze-vineyards",
            "71 Esplanade, McLaren Vale",
            "08 8323 0004",
            "Mediterranean varieties grown by the sea.",
        ),
        closed,
    ]
}

struct SeedWine {
    winery: i64,
    name: &'static str,
    variety: &'static str,
    vintage: Option<Vintage>,
    price_cents: Option<i64>,
    status: WineStatus,
}

const fn seed(
    winery: i64,
    name: &'static str,
    variety: &'static str,
    vintage: Option<Vintage>,
    price_cents: Option<i64>,
    status: WineStatus,
) -> SeedWine {
    SeedWine {
        winery,
        name,
        variety,
        vintage,
        price_cents,
        status,
    }
}

const fn year(year: u16) -> Option<Vintage> {
    Some(Vintage::Year(year))
}

const NV: Option<Vintage> = Some(Vintage::NonVintage);

use WineStatus::{Archived, Live, Pending};

const SEED_WINES: &[SeedWine] = &[
    seed(1, "Ridge Road Pinot Noir", "Pinot Noir", year(2022), Some(4200), Live),
    seed(1, "Ridge Road Chardonnay", "Chardonnay", year(2023), Some(3600), Live),
    seed(1, "Ridge Road Sparkling Brut", "Sparkling", NV, Some(4800), Live),
    seed(1, "Ridge Road Rosé", "Rosé", year(2024), Some(2600), Live),
    seed(1, "Reserve Pinot Noir", "Pinot Noir", year(2021), Some(7500), Pending),
    seed(1, "Blanc de Blancs", "Sparkling", year(2019), Some(6500), Pending),
    seed(2, "Old Vine Shiraz", "Shiraz", year(2020), Some(8500), Live),
    seed(2, "Reserve Shiraz", "Shiraz", year(2018), Some(12000), Live),
    seed(2, "Estate GSM", "Grenache Blend", year(2021), Some(3800), Live),
    seed(2, "Valley Cabernet Sauvignon", "Cabernet Sauvignon", year(2021), Some(4500), Live),
    seed(2, "Cellar Door Tawny", "Fortified", NV, Some(3000), Live),
    seed(2, "Single Block Shiraz", "Shiraz", year(2022), Some(9500), Pending),
    seed(2, "Sparkling Shiraz", "Sparkling", NV, None, Pending),
    seed(2, "Valley Merlot", "Merlot", year(2019), Some(2800), Archived),
    seed(3, "Watervale Riesling", "Riesling", year(2024), Some(3200), Live),
    seed(3, "Limestone Riesling", "Riesling", year(2023), Some(3900), Live),
    seed(3, "Late Harvest Riesling", "Riesling", year(2022), Some(2900), Live),
    seed(3, "Clare Malbec", "Malbec", year(2021), Some(3500), Live),
    seed(3, "Aged Release Riesling", "Riesling", year(2015), Some(5500), Pending),
    seed(3, "Quarry Shiraz", "Shiraz", year(2020), Some(3300), Archived),
    seed(4, "Coastal Fiano", "Fiano", year(2024), Some(2800), Live),
    seed(4, "Coastal Vermentino", "Vermentino", year(2024), Some(2700), Live),
    seed(4, "Sea Breeze Grenache", "Grenache", year(2023), Some(3400), Live),
    seed(4, "Esplanade Tempranillo", "Tempranillo", year(2022), Some(3700), Live),
    seed(4, "Nero d'Avola", "Nero d'Avola", year(2023), Some(3100), Pending),
    seed(4, "Coastal Sangiovese", "Sangiovese", year(2021), None, Live),
    seed(4, "Beach House Shiraz", "Shiraz", year(2023), Some(2200), Pending),
];

fn create_details(wine: &SeedWine) -> CreateWine {
    let mut details = crate::wine_details(
        WineryId(wine.winery),
        wine.name,
        wine.status,
    );
    details.variety = Some(wine.variety.to_string());
    details.vintage = wine.vintage.clone();
    details.price = wine.price_cents.map(|cents| Decimal::new(cents, 2));
    details.alcohol_content = Some("13.5%".into());
    details.description =
        Some(format!("{} from the {} range.", wine.variety, wine.name));
    details
}

/// Development dataset: every seed wine, created through the admin API.
pub struct DevDataset {
    pub wineries: Vec<Winery>,
    pub wines: Vec<(WineId, WineStatus)>,
}

impl DevDataset {
    pub async fn create(app: &TestApp) -> Result<Self> {
        tracing::info!("🍇 Creating {} seed wines", SEED_WINES.len());
        let mut wines = Vec::with_capacity(SEED_WINES.len());
        for wine in SEED_WINES {
            let id = app.create_wine(&create_details(wine)).await?;
            wines.push((id, wine.status));
        }
        let wineries = app.client.list_wineries().await?.wineries;
        Ok(DevDataset { wineries, wines })
    }

    fn count(&self, status: WineStatus) -> usize {
        self.wines.iter().filter(|(_, s)| *s == status).count()
    }

    pub fn print_summary(&self) {
        tracing::info!("📋 Available test data:");
        for winery in &self.wineries {
            tracing::info!("   🏠 {} (/wineries/{})", winery.name, winery.slug);
        }
        tracing::info!(
            "   🍷 {} wines: {} live, {} pending review, {} archived",
            self.wines.len(),
            self.count(WineStatus::Live),
            self.count(WineStatus::Pending),
            self.count(WineStatus::Archived),
        );
    }
}
