// Catalog behavior over the in-memory store

mod common;

use std::collections::HashSet;

use account_catalog_server::models::{Category, ListingFilter, ListingStatus, NewListing, Platform};

#[tokio::test]
async fn test_prefix_search_orders_newest_first() {
    let state = common::app_state_with_memory().await;
    let catalog = &state.catalog;

    let a = catalog
        .add(NewListing::new("nike_x", Platform::Instagram, Category::ThreeLetter))
        .await
        .unwrap();
    let b = catalog
        .add(NewListing::new("nikeworld", Platform::X, Category::Special).with_status(ListingStatus::Sold))
        .await
        .unwrap();

    let found = catalog
        .search(&ListingFilter::from_params("all", "all", "nike").unwrap())
        .await
        .unwrap();
    assert_eq!(found, vec![b.clone(), a.clone()]);

    let instagram = catalog
        .search(&ListingFilter::from_params("Instagram", "all", "").unwrap())
        .await
        .unwrap();
    assert_eq!(instagram, vec![a.clone()]);

    catalog.set_status(&a.id, ListingStatus::Sold).await.unwrap();
    let listed = catalog.list().await.unwrap();
    let a_now = listed.iter().find(|l| l.id == a.id).unwrap();
    assert_eq!(a_now.status, ListingStatus::Sold);
    assert!(listed.contains(&b));
}

#[tokio::test]
async fn test_unfiltered_search_returns_every_listing() {
    let state = common::app_state_with_memory().await;
    for (name, platform) in [("abc", Platform::X), ("wxyz", Platform::TikTok), ("★", Platform::Snapchat)] {
        state
            .catalog
            .add(NewListing::new(name, platform, Category::Special))
            .await
            .unwrap();
    }

    let listed: HashSet<String> = state.catalog.list().await.unwrap().into_iter().map(|l| l.id).collect();
    let searched = state
        .catalog
        .search(&ListingFilter::from_params("all", "all", "").unwrap())
        .await
        .unwrap();

    assert_eq!(searched.len(), 3);
    assert!(searched.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(searched.into_iter().map(|l| l.id).collect::<HashSet<_>>(), listed);
}

#[tokio::test]
async fn test_search_is_case_sensitive() {
    let state = common::app_state_with_memory().await;
    state
        .catalog
        .add(NewListing::new("Nike", Platform::X, Category::FourLetter))
        .await
        .unwrap();

    let lower = ListingFilter::from_params("all", "all", "nike").unwrap();
    assert!(state.catalog.search(&lower).await.unwrap().is_empty());

    let exact = ListingFilter::from_params("all", "all", "Nik").unwrap();
    assert_eq!(state.catalog.search(&exact).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_every_returned_listing_satisfies_the_filter() {
    let state = common::app_state_with_memory().await;
    let seeds = [
        ("ab", Platform::X, Category::ThreeLetter),
        ("abc", Platform::X, Category::FourLetter),
        ("abd", Platform::Instagram, Category::ThreeLetter),
        ("b", Platform::X, Category::ThreeLetter),
    ];
    for (name, platform, category) in seeds {
        state
            .catalog
            .add(NewListing::new(name, platform, category))
            .await
            .unwrap();
    }

    let filter = ListingFilter::from_params("X", "three-letter", "ab").unwrap();
    let found = state.catalog.search(&filter).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username, "ab");
    assert!(found.iter().all(|l| filter.matches(l)));
}

#[tokio::test]
async fn test_delete_is_idempotent_and_leaves_others() {
    let state = common::app_state_with_memory().await;
    let keep = state
        .catalog
        .add(NewListing::new("keep", Platform::X, Category::Special))
        .await
        .unwrap();
    let gone = state
        .catalog
        .add(NewListing::new("gone", Platform::X, Category::Special))
        .await
        .unwrap();

    state.catalog.delete(&gone.id).await.unwrap();
    state.catalog.delete(&gone.id).await.unwrap();
    state.catalog.delete("never-existed").await.unwrap();

    assert_eq!(state.catalog.list().await.unwrap(), vec![keep]);
}

#[tokio::test]
async fn test_status_filter() {
    let state = common::app_state_with_memory().await;
    state
        .catalog
        .add(NewListing::new("one", Platform::X, Category::Special))
        .await
        .unwrap();
    let sold = state
        .catalog
        .add(NewListing::new("two", Platform::X, Category::Special).with_status(ListingStatus::Sold))
        .await
        .unwrap();

    let filter = ListingFilter::all().with_status(Some(ListingStatus::Sold));
    assert_eq!(state.catalog.search(&filter).await.unwrap(), vec![sold]);
}
