//! Catalog browsing commands.

use shopfront_client::ApiClient;
use shopfront_core::{Category, Product};

use super::{CommandFailed, report_failure};

/// List all products.
pub async fn list_products(client: &ApiClient) -> Result<(), CommandFailed> {
    match client.list_products().await {
        Ok(products) => {
            print_products(&products);
            Ok(())
        }
        Err(err) => Err(report_failure(&err, "Failed to load products")),
    }
}

/// Search products by name or description.
pub async fn search_products(client: &ApiClient, query: &str) -> Result<(), CommandFailed> {
    match client.search_products(query).await {
        Ok(products) => {
            print_products(&products);
            Ok(())
        }
        Err(err) => Err(report_failure(&err, "Search failed")),
    }
}

/// List the products in one category.
pub async fn products_by_category(client: &ApiClient, name: String) -> Result<(), CommandFailed> {
    let category = Category::from(name);
    match client.products_by_category(&category).await {
        Ok(products) => {
            print_products(&products);
            Ok(())
        }
        Err(err) => Err(report_failure(
            &err,
            "Failed to load products for this category",
        )),
    }
}

/// List all category labels.
pub async fn list_categories(client: &ApiClient) -> Result<(), CommandFailed> {
    match client.list_categories().await {
        Ok(categories) => {
            if categories.is_empty() {
                println!("No categories found.");
            } else {
                for category in &categories {
                    println!("{category}");
                }
            }
            Ok(())
        }
        Err(err) => Err(report_failure(&err, "Failed to load categories")),
    }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }

    for product in products {
        println!(
            "{} - {} ({} in stock) [{}]",
            product.name, product.price, product.stock, product.category
        );
        if !product.description.is_empty() {
            println!("    {}", product.description);
        }
    }
}
