mod common;

use catalog_core::{models::Category, ports::ProductRepository as _};
use common::{open, product};

#[tokio::test]
async fn test_empty_catalog() -> anyhow::Result<()> {
    let db = open().await?;
    let stats = db.product_stats().await?;

    assert!(stats.by_category.is_empty());
    assert_eq!(stats.total_products, 0);
    assert_eq!(stats.in_stock, 0);
    assert_eq!(stats.out_of_stock, 0);

    Ok(())
}

#[tokio::test]
async fn test_grouped_aggregates() -> anyhow::Result<()> {
    let db = open().await?;
    let mut sold_out = product("Speaker", 50.0, Category::Electronics);
    sold_out.in_stock = false;

    for data in [
        product("Laptop", 1000.0, Category::Electronics),
        product("Mouse", 20.0, Category::Electronics),
        sold_out,
        product("Pan", 35.0, Category::Kitchen),
    ] {
        db.create_product(data).await?.expect("refused");
    }

    let stats = db.product_stats().await?;
    assert_eq!(stats.total_products, 4);
    assert_eq!(stats.in_stock, 3);
    assert_eq!(stats.out_of_stock, 1);

    let categories = stats
        .by_category
        .iter()
        .map(|group| group.category)
        .collect::<Vec<_>>();
    assert_eq!(categories, [Category::Electronics, Category::Kitchen]);

    let electronics = &stats.by_category[0];
    assert_eq!(electronics.count, 3);
    assert_eq!(electronics.min_price, 20.0);
    assert_eq!(electronics.max_price, 1000.0);
    assert_eq!(electronics.total_value, 1070.0);
    assert!((electronics.avg_price - 1070.0 / 3.0).abs() < 1e-9);
    assert_eq!(electronics.in_stock, 2);

    let kitchen = &stats.by_category[1];
    assert_eq!(kitchen.count, 1);
    assert_eq!(kitchen.avg_price, 35.0);

    Ok(())
}
