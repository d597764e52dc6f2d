//! Seed data for the stub catalog backend

use crate::catalog::ProductDetail;

/// A 1x1 transparent PNG served for every stub image
pub const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn product(
    id: i64,
    title: &str,
    summary: &str,
    description: &str,
    price: &str,
) -> ProductDetail {
    ProductDetail {
        id,
        title: title.to_string(),
        summary: summary.to_string(),
        description: description.to_string(),
        price: price.to_string(),
        image_url: format!(
            "https://www.meijer.com/content/dam/meijer/product/{}.png",
            title.to_lowercase()
        ),
    }
}

/// Three produce items in listing order: Bananas (0), Apples (1), Oranges (2).
pub fn sample_catalog() -> Vec<ProductDetail> {
    vec![
        product(
            0,
            "Bananas",
            "Fresh bananas",
            "Sweet yellow bananas, sold by the pound. Great for snacking and baking.",
            "$0.59/lb",
        ),
        product(
            1,
            "Apples",
            "Fresh apples",
            "Crisp Honeycrisp apples picked in Michigan orchards.",
            "$1.29/lb",
        ),
        product(
            2,
            "Oranges",
            "Navel oranges",
            "Seedless navel oranges, easy to peel and full of juice.",
            "$0.99/lb",
        ),
    ]
}
