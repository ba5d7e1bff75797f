use super::*;

async fn seeded() -> (Storage, CategoryId, SubcategoryId) {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let kitchen = storage.create_category("kitchen").await.expect("category");
    let kettles = storage
        .create_subcategory(kitchen, "kettles")
        .await
        .expect("subcategory");
    for (name, price) in [("steel", 199_90), ("glass", 249_00), ("travel", 99_50)] {
        storage
            .create_product(NewProduct {
                subcategory_id: kettles,
                name,
                description: "kettle",
                price: Price::from_minor(price),
                photo: &format!("{name}.jpg"),
            })
            .await
            .expect("product");
    }
    (storage, kitchen, kettles)
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let suffix = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = std::env::temp_dir().join(format!("catalog_storage_test_{suffix}"));
    let db_path = temp_root.join("nested").join("catalog.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );

    std::fs::remove_dir_all(temp_root).expect("cleanup");
}

#[tokio::test]
async fn lists_categories_in_id_order_with_offset() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let mut ids = Vec::new();
    for name in ["a", "b", "c", "d", "e", "f"] {
        ids.push(storage.create_category(name).await.expect("category"));
    }

    let first = storage.list_categories(4, 0).await.expect("page one");
    assert_eq!(first.iter().map(|c| c.id).collect::<Vec<_>>(), ids[..4]);

    let second = storage.list_categories(4, 4).await.expect("page two");
    assert_eq!(second.iter().map(|c| c.id).collect::<Vec<_>>(), ids[4..]);

    let past_end = storage.list_categories(4, 8).await.expect("page three");
    assert!(past_end.is_empty());
}

#[tokio::test]
async fn subcategories_are_scoped_to_their_category() {
    let (storage, kitchen, kettles) = seeded().await;
    let garden = storage.create_category("garden").await.expect("category");
    storage
        .create_subcategory(garden, "hoses")
        .await
        .expect("subcategory");

    let rows = storage
        .list_subcategories(kitchen, 4, 0)
        .await
        .expect("subcategories");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, kettles);
    assert_eq!(rows[0].category_id, kitchen);
}

#[tokio::test]
async fn product_offsets_agree_with_count() {
    let (storage, _kitchen, kettles) = seeded().await;
    let count = storage.count_products(kettles).await.expect("count");
    assert_eq!(count, 3);

    let mut names = Vec::new();
    for index0 in 0..count {
        let product = storage
            .product_at(kettles, index0)
            .await
            .expect("fetch")
            .expect("product in range");
        assert_eq!(product.subcategory_id, kettles);
        names.push(product.name);
    }
    assert_eq!(names, ["steel", "glass", "travel"]);

    assert!(storage.product_at(kettles, count).await.expect("fetch").is_none());
    assert!(storage.product_at(kettles, -1).await.expect("fetch").is_none());
}

#[tokio::test]
async fn product_rows_keep_price_and_photo() {
    let (storage, _kitchen, kettles) = seeded().await;
    let product = storage
        .product_at(kettles, 0)
        .await
        .expect("fetch")
        .expect("product");
    assert_eq!(product.price, Price::from_minor(199_90));
    assert_eq!(product.photo, "steel.jpg");
    assert_eq!(product.description, "kettle");
}

#[tokio::test]
async fn rejects_subcategory_for_unknown_category() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let err = storage
        .create_subcategory(CategoryId(404), "orphans")
        .await
        .expect_err("foreign key");
    assert!(err.to_string().contains("orphans"));
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(
        normalize_database_url("sqlite:data\\test.db"),
        "sqlite://data/test.db"
    );
}

#[test]
fn keeps_memory_and_full_urls_untouched() {
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
    assert_eq!(
        normalize_database_url(" sqlite://./data/test.db "),
        "sqlite://./data/test.db"
    );
}
