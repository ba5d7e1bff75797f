use shared::{
    protocol::{Button, MediaRef, PresentationPayload},
    token::Command,
};

use crate::controller::{Entry, Listing, ProductDetail, Screen};

const PREVIOUS_PAGE: &str = "⬅️ Back";
const NEXT_PAGE: &str = "Next ➡️";
const PREVIOUS_ITEM: &str = "⬅️ Prev.";
const NEXT_ITEM: &str = "Next ➡️";
const BACK_TO_CATEGORIES: &str = "⬅️ Back to categories";
const BACK_TO_SUBCATEGORIES: &str = "⬅️ Back to subcategories";

/// Turns screens into payloads. Rows are laid out as entries first, then
/// the pagination row, then the way back to the parent level.
#[derive(Debug, Clone)]
pub struct Renderer {
    currency: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new("RUB")
    }
}

impl Renderer {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn welcome(&self) -> PresentationPayload {
        PresentationPayload {
            text: "Welcome! Choose an action:".to_string(),
            rows: vec![vec![Button::new("Catalog", &Command::start())]],
            media: None,
        }
    }

    /// `media` is the resolved photo location when the product photo
    /// exists; it is ignored for every other screen.
    pub fn render(&self, screen: &Screen, media: Option<MediaRef>) -> PresentationPayload {
        match screen {
            Screen::Categories(listing) => text_payload(
                "Product categories:",
                listing_rows(listing, None),
            ),
            Screen::EmptyCatalog { retry } => text_payload(
                "No categories found.",
                vec![vec![Button::new("🔄 Refresh", retry)]],
            ),
            Screen::Subcategories { listing, back, .. } => text_payload(
                "Subcategories:",
                listing_rows(listing, Some(Button::new(BACK_TO_CATEGORIES, back))),
            ),
            Screen::NoSubcategories { back, .. } => text_payload(
                "This category has no subcategories yet.",
                vec![vec![Button::new(BACK_TO_CATEGORIES, back)]],
            ),
            Screen::NoMoreResults { previous, back } => {
                let mut rows = vec![vec![Button::new(PREVIOUS_PAGE, previous)]];
                if let Some(back) = back {
                    rows.push(vec![Button::new(BACK_TO_CATEGORIES, back)]);
                }
                text_payload("No more results.", rows)
            }
            Screen::Product(detail) => self.product(detail, media),
            Screen::ProductNotFound { back } => text_payload(
                "Product not found.",
                vec![vec![Button::new(BACK_TO_SUBCATEGORIES, back)]],
            ),
        }
    }

    fn product(&self, detail: &ProductDetail, media: Option<MediaRef>) -> PresentationPayload {
        let product = &detail.product;
        let caption = format!(
            "{}\n{}\nPrice: {} {}\nItem {}",
            product.name, product.description, product.price, self.currency, detail.index
        );
        let rows = vec![
            vec![Button::new("🛒 Add to cart", &detail.add_to_cart)],
            vec![Button::new("💸 Buy", &detail.checkout)],
            vec![
                Button::new(PREVIOUS_ITEM, &detail.previous),
                Button::new(NEXT_ITEM, &detail.next),
            ],
            vec![Button::new(BACK_TO_SUBCATEGORIES, &detail.back)],
        ];

        match media {
            Some(media) => PresentationPayload {
                text: caption,
                rows,
                media: Some(media),
            },
            None => PresentationPayload {
                text: format!("Photo for {} not found.\n\n{caption}", product.name),
                rows,
                media: None,
            },
        }
    }
}

fn text_payload(text: &str, rows: Vec<Vec<Button>>) -> PresentationPayload {
    PresentationPayload {
        text: text.to_string(),
        rows,
        media: None,
    }
}

fn listing_rows(listing: &Listing, back: Option<Button>) -> Vec<Vec<Button>> {
    let mut rows: Vec<Vec<Button>> = listing
        .entries
        .iter()
        .map(|Entry { label, target }| vec![Button::new(label.as_str(), target)])
        .collect();

    let pagination: Vec<Button> = listing
        .previous
        .iter()
        .map(|command| Button::new(PREVIOUS_PAGE, command))
        .chain(listing.next.iter().map(|command| Button::new(NEXT_PAGE, command)))
        .collect();
    if !pagination.is_empty() {
        rows.push(pagination);
    }
    rows.extend(back.map(|button| vec![button]));
    rows
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
