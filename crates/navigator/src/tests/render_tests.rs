use super::*;
use crate::controller::{Entry, Listing, ProductDetail, Screen};
use shared::domain::{CategoryId, Price, Product, ProductId, SubcategoryId};

fn tokens(payload: &PresentationPayload) -> Vec<Vec<&str>> {
    payload
        .rows
        .iter()
        .map(|row| row.iter().map(|button| button.token.as_str()).collect())
        .collect()
}

fn detail() -> ProductDetail {
    let step = |index| Command::ViewProduct {
        subcategory_id: SubcategoryId(10),
        category_id: CategoryId(1),
        index,
    };
    ProductDetail {
        product: Product {
            id: ProductId(100),
            name: "steel kettle".into(),
            description: "1.7 litres".into(),
            price: Price::from_minor(199_90),
            photo: "kettle.jpg".into(),
            subcategory_id: SubcategoryId(10),
        },
        index: 2,
        add_to_cart: Command::CartAdd {
            product_id: ProductId(100),
        },
        checkout: Command::Checkout,
        previous: step(1),
        next: step(3),
        back: Command::ListSubcategories {
            category_id: CategoryId(1),
            page: 1,
        },
    }
}

#[test]
fn listing_rows_put_pagination_before_back() {
    let listing = Listing {
        page: 2,
        entries: vec![Entry {
            label: "kettles".into(),
            target: Command::ListProducts {
                subcategory_id: SubcategoryId(10),
                category_id: CategoryId(1),
            },
        }],
        previous: Some(Command::ListSubcategories {
            category_id: CategoryId(1),
            page: 1,
        }),
        next: Some(Command::ListSubcategories {
            category_id: CategoryId(1),
            page: 3,
        }),
    };
    let payload = Renderer::default().render(
        &Screen::Subcategories {
            category_id: CategoryId(1),
            listing,
            back: Command::start(),
        },
        None,
    );
    assert_eq!(payload.text, "Subcategories:");
    assert_eq!(
        tokens(&payload),
        vec![
            vec!["subcategory_10_1_1"],
            vec!["category_1_1", "category_1_3"],
            vec!["catalog_1"],
        ]
    );
    assert_eq!(payload.rows[0][0].label, "kettles");
}

#[test]
fn first_page_without_more_rows_has_no_pagination_row() {
    let listing = Listing {
        page: 1,
        entries: vec![Entry {
            label: "kitchen".into(),
            target: Command::ListSubcategories {
                category_id: CategoryId(1),
                page: 1,
            },
        }],
        previous: None,
        next: None,
    };
    let payload = Renderer::default().render(&Screen::Categories(listing), None);
    assert_eq!(tokens(&payload), vec![vec!["category_1_1"]]);
}

#[test]
fn product_with_media_uses_plain_caption() {
    let media = MediaRef {
        path: "/srv/media/kettle.jpg".into(),
    };
    let payload = Renderer::new("RUB").render(&Screen::Product(detail()), Some(media.clone()));
    assert_eq!(payload.media, Some(media));
    assert_eq!(
        payload.text,
        "steel kettle\n1.7 litres\nPrice: 199.90 RUB\nItem 2"
    );
}

#[test]
fn product_without_media_marks_missing_photo_and_keeps_buttons() {
    let renderer = Renderer::new("RUB");
    let with_media = renderer.render(
        &Screen::Product(detail()),
        Some(MediaRef {
            path: "kettle.jpg".into(),
        }),
    );
    let without = renderer.render(&Screen::Product(detail()), None);

    assert!(without.media.is_none());
    assert!(without.text.starts_with("Photo for steel kettle not found.\n\n"));
    assert!(without.text.contains("1.7 litres"));
    assert!(without.text.contains("199.90"));
    assert_eq!(without.rows, with_media.rows);
    assert_eq!(
        tokens(&without),
        vec![
            vec!["add_to_cart_100"],
            vec!["buy_product"],
            vec!["product_10_1_1", "product_10_1_3"],
            vec!["category_1_1"],
        ]
    );
}

#[test]
fn welcome_opens_the_catalog() {
    let payload = Renderer::default().welcome();
    assert_eq!(tokens(&payload), vec![vec!["catalog_1"]]);
}

#[test]
fn not_found_screen_is_never_a_dead_end() {
    let payload = Renderer::default().render(
        &Screen::ProductNotFound {
            back: Command::ListSubcategories {
                category_id: CategoryId(3),
                page: 1,
            },
        },
        None,
    );
    assert_eq!(payload.text, "Product not found.");
    assert_eq!(tokens(&payload), vec![vec!["category_3_1"]]);
}
