use chrono::{Duration, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set, TransactionTrait};

use crate::{
    dto::seed::SeedReport,
    entity::products::{ActiveModel as ProductActive, Entity as Products},
    error::AppResult,
    models::Category,
    response::{ApiResponse, Meta},
    services::user_service::ensure_user,
    state::AppState,
};

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: i64,
    original_price: Option<i64>,
    category: Category,
    image: &'static str,
    sizes: &'static [&'static str],
    colors: &'static [&'static str],
    stock: i32,
    featured: bool,
    trending: bool,
}

const APPAREL: &[&str] = &["XS", "S", "M", "L", "XL"];

const CATALOG: &[SeedProduct] = &[
    SeedProduct {
        id: "prod-001",
        name: "Nordic Knit Cardigan",
        description: "Cozy brown cardigan with elegant white nordic pattern. Perfect for layering in autumn and winter.",
        price: 12900,
        original_price: Some(15900),
        category: Category::NewArrivals,
        image: "cardigan",
        sizes: APPAREL,
        colors: &["Brown", "Navy", "Cream"],
        stock: 10,
        featured: true,
        trending: true,
    },
    SeedProduct {
        id: "prod-002",
        name: "Sage Collar Sweater",
        description: "Soft knit sweater with delicate collar detail. A timeless piece for any wardrobe.",
        price: 8900,
        original_price: None,
        category: Category::NewArrivals,
        image: "sweater",
        sizes: &["XS", "S", "M", "L"],
        colors: &["Sage", "Ivory", "Blush"],
        stock: 15,
        featured: true,
        trending: false,
    },
    SeedProduct {
        id: "prod-003",
        name: "Stacked Knit Collection",
        description: "Set of layered knit sweaters in earth tones. Mix and match for endless styling options.",
        price: 19900,
        original_price: Some(24900),
        category: Category::NewArrivals,
        image: "knitwear",
        sizes: &["S", "M", "L"],
        colors: &["Multi"],
        stock: 8,
        featured: false,
        trending: true,
    },
    SeedProduct {
        id: "prod-004",
        name: "Textured Knit Duo",
        description: "Two-piece textured knit set in neutral tones. Elegant and comfortable.",
        price: 15900,
        original_price: None,
        category: Category::NewArrivals,
        image: "texture",
        sizes: APPAREL,
        colors: &["Taupe", "Olive"],
        stock: 12,
        featured: false,
        trending: false,
    },
    SeedProduct {
        id: "prod-005",
        name: "Blue Pattern Kurta",
        description: "Stylish blue patterned kurta with modern fit. Perfect for casual and semi-formal occasions.",
        price: 7900,
        original_price: None,
        category: Category::Men,
        image: "menblue",
        sizes: &["S", "M", "L", "XL", "XXL"],
        colors: &["Blue", "Black"],
        stock: 20,
        featured: true,
        trending: false,
    },
    SeedProduct {
        id: "prod-006",
        name: "Geometric Print Shirt",
        description: "Bold geometric print shirt for the fashion-forward man. Stand out in any crowd.",
        price: 6900,
        original_price: Some(8900),
        category: Category::Men,
        image: "shirt",
        sizes: &["S", "M", "L", "XL"],
        colors: &["Multi"],
        stock: 18,
        featured: false,
        trending: true,
    },
    SeedProduct {
        id: "prod-007",
        name: "Classic Three-Piece Suit",
        description: "Timeless charcoal three-piece suit. Impeccable tailoring for the modern gentleman.",
        price: 44900,
        original_price: Some(54900),
        category: Category::Men,
        image: "suit",
        sizes: &["38", "40", "42", "44", "46"],
        colors: &["Charcoal", "Navy", "Black"],
        stock: 5,
        featured: true,
        trending: false,
    },
    SeedProduct {
        id: "prod-008",
        name: "Terracotta Cord Jacket",
        description: "Vintage-inspired corduroy jacket in warm terracotta. A statement piece for fall.",
        price: 18900,
        original_price: None,
        category: Category::Men,
        image: "jacket",
        sizes: &["S", "M", "L", "XL"],
        colors: &["Terracotta", "Forest Green"],
        stock: 10,
        featured: false,
        trending: false,
    },
    SeedProduct {
        id: "prod-009",
        name: "Sleeveless White Blouse",
        description: "Crisp white sleeveless blouse with elegant draping. Essential for any wardrobe.",
        price: 5900,
        original_price: None,
        category: Category::Women,
        image: "blouse",
        sizes: &["XS", "S", "M", "L"],
        colors: &["White", "Ivory", "Blush"],
        stock: 25,
        featured: true,
        trending: false,
    },
    SeedProduct {
        id: "prod-010",
        name: "Ribbed Knit Dress",
        description: "Form-fitting ribbed dress with elegant side slit. Sophisticated and comfortable.",
        price: 11900,
        original_price: Some(14900),
        category: Category::Women,
        image: "dress1",
        sizes: &["XS", "S", "M", "L"],
        colors: &["Cream", "Black", "Taupe"],
        stock: 14,
        featured: false,
        trending: true,
    },
    SeedProduct {
        id: "prod-011",
        name: "City Sky Dress",
        description: "Modern silhouette dress perfect for urban adventures. Effortlessly chic.",
        price: 13900,
        original_price: None,
        category: Category::Women,
        image: "dress2",
        sizes: APPAREL,
        colors: &["Sky Blue", "Charcoal"],
        stock: 16,
        featured: false,
        trending: false,
    },
    SeedProduct {
        id: "prod-012",
        name: "Linen Maxi Dress",
        description: "Flowing linen maxi dress with puff sleeves. Perfect for summer days.",
        price: 15900,
        original_price: Some(19900),
        category: Category::Women,
        image: "maxi",
        sizes: &["XS", "S", "M", "L"],
        colors: &["Natural", "Sage", "Terracotta"],
        stock: 11,
        featured: true,
        trending: false,
    },
    SeedProduct {
        id: "prod-013",
        name: "Cream Leather Clutch",
        description: "Elegant cream leather clutch with gold hardware. Perfect for evening occasions.",
        price: 8900,
        original_price: None,
        category: Category::Accessories,
        image: "clutch",
        sizes: &[],
        colors: &["Cream", "Black", "Tan"],
        stock: 30,
        featured: false,
        trending: true,
    },
    SeedProduct {
        id: "prod-014",
        name: "Statement Jewelry Set",
        description: "Curated jewelry display featuring rings, necklaces, and bracelets.",
        price: 14900,
        original_price: Some(18900),
        category: Category::Accessories,
        image: "jewelry",
        sizes: &[],
        colors: &["Gold", "Silver"],
        stock: 22,
        featured: true,
        trending: false,
    },
    SeedProduct {
        id: "prod-015",
        name: "Designer Sunglasses",
        description: "Bold statement sunglasses with modern frames. UV protection with style.",
        price: 12900,
        original_price: None,
        category: Category::Accessories,
        image: "sunglasses",
        sizes: &[],
        colors: &["Black", "Tortoise"],
        stock: 35,
        featured: false,
        trending: false,
    },
    SeedProduct {
        id: "prod-016",
        name: "Cognac Leather Belt",
        description: "Premium leather belt with classic buckle. Timeless craftsmanship.",
        price: 7900,
        original_price: None,
        category: Category::Accessories,
        image: "belt",
        sizes: &["30", "32", "34", "36", "38"],
        colors: &["Cognac", "Black"],
        stock: 40,
        featured: false,
        trending: false,
    },
    SeedProduct {
        id: "prod-017",
        name: "Classic Leather Watch",
        description: "Minimalist watch with black leather strap. Elegant timekeeping.",
        price: 19900,
        original_price: Some(24900),
        category: Category::Accessories,
        image: "watch",
        sizes: &[],
        colors: &["Black", "Brown"],
        stock: 18,
        featured: true,
        trending: false,
    },
    SeedProduct {
        id: "prod-018",
        name: "Gold Statement Ring",
        description: "Bold gold ring with modern geometric design. Make a statement.",
        price: 6900,
        original_price: None,
        category: Category::Accessories,
        image: "ring",
        sizes: &["5", "6", "7", "8"],
        colors: &["Gold", "Rose Gold"],
        stock: 50,
        featured: false,
        trending: false,
    },
];

/// Number of products the seed inserts into an empty catalog.
pub const CATALOG_SIZE: usize = CATALOG.len();

pub async fn seed_database(state: &AppState) -> AppResult<ApiResponse<SeedReport>> {
    let report = seed(&state.orm, &state.config.demo_user_id).await?;
    let message = if report.seeded {
        "Database seeded"
    } else {
        "Database already seeded"
    };
    Ok(ApiResponse::success(message, report, Some(Meta::empty())))
}

/// Populates the catalog and the demo user. A populated catalog is left untouched.
pub async fn seed(db: &DatabaseConnection, demo_user_id: &str) -> AppResult<SeedReport> {
    let txn = db.begin().await?;
    ensure_user(&txn, demo_user_id).await?;

    let existing = Products::find().count(&txn).await?;
    if existing > 0 {
        txn.commit().await?;
        tracing::info!(products = existing, "catalog already seeded");
        return Ok(SeedReport {
            seeded: false,
            products: existing,
        });
    }

    // Earlier catalog entries are the newest, so the default ordering follows the catalog.
    let now = Utc::now();
    let mut models = Vec::with_capacity(CATALOG.len());
    for (index, product) in CATALOG.iter().enumerate() {
        models.push(ProductActive {
            id: Set(product.id.to_string()),
            name: Set(product.name.to_string()),
            description: Set(product.description.to_string()),
            price: Set(product.price),
            original_price: Set(product.original_price),
            category: Set(product.category.to_string()),
            image_url: Set(format!("https://picsum.photos/seed/{}/600/800", product.image)),
            sizes: Set(serde_json::to_string(product.sizes)?),
            colors: Set(serde_json::to_string(product.colors)?),
            stock: Set(product.stock),
            is_featured: Set(product.featured),
            is_trending: Set(product.trending),
            created_at: Set((now - Duration::minutes(index as i64)).into()),
        });
    }
    Products::insert_many(models).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(products = CATALOG.len(), "catalog seeded");
    Ok(SeedReport {
        seeded: true,
        products: CATALOG.len() as u64,
    })
}
