//! Database-backed tests for ownership isolation and history ordering.
//!
//! These run against a real `PostgreSQL` instance: `sqlx::test` provisions a
//! throwaway database per test from `DATABASE_URL` and applies the server's
//! migrations. Completion calls still go through [`FakeBackend`].

use std::path::Path;
use std::time::Duration;

use sqlx::PgPool;

use shelftalk_core::{Email, ProductId};
use shelftalk_integration_tests::FakeBackend;
use shelftalk_server::db::generations::GenerationRepository;
use shelftalk_server::db::products::ProductRepository;
use shelftalk_server::db::users::UserRepository;
use shelftalk_server::models::generation::NewGeneration;
use shelftalk_server::models::product::{NewProduct, Product};
use shelftalk_server::models::user::User;
use shelftalk_server::services::generation::{GenerationError, GenerationService};

async fn seed_user(pool: &PgPool, email: &str) -> User {
    let email = Email::parse(email).expect("seed email should be valid");
    UserRepository::new(pool)
        .create_with_password("Test User", &email, "$argon2id$not-a-real-hash")
        .await
        .expect("user insert should succeed")
}

async fn seed_product(pool: &PgPool, owner: &User, name: &str) -> Product {
    ProductRepository::new(pool)
        .create(&NewProduct {
            owner_id: owner.id,
            name: name.to_string(),
            description: None,
            image_url: None,
        })
        .await
        .expect("product insert should succeed")
}

fn generation_fields(product_id: ProductId, title: &str) -> NewGeneration {
    NewGeneration {
        product_id,
        seo_title: title.to_string(),
        long_description: "Descrição longa.".to_string(),
        tags: "caneca, térmica".to_string(),
        social_instagram: "ig".to_string(),
        social_tiktok: "tt".to_string(),
        social_facebook: "fb".to_string(),
        social_pinterest: "pin".to_string(),
    }
}

fn service<'a>(pool: &'a PgPool, backend: &'a FakeBackend) -> GenerationService<'a, FakeBackend> {
    GenerationService::new(pool, backend, Path::new("uploads/products"))
}

// =============================================================================
// Ownership Isolation
// =============================================================================

#[sqlx::test(migrations = "../server/migrations")]
async fn test_foreign_owner_and_unknown_id_fail_identically(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let stranger = seed_user(&pool, "stranger@example.com").await;
    let product = seed_product(&pool, &owner, "Caneca Térmica").await;

    let backend = FakeBackend::echo();
    let svc = service(&pool, &backend);

    // Someone else's product and a product that does not exist surface the
    // same error, so existence never leaks across accounts.
    let foreign = svc.generate_all(stranger.id, product.id).await;
    assert!(matches!(foreign, Err(GenerationError::ProductNotFound)));

    let unknown = svc.generate_all(owner.id, ProductId::generate()).await;
    assert!(matches!(unknown, Err(GenerationError::ProductNotFound)));

    // The ownership check runs before any pipeline is invoked.
    assert_eq!(backend.text_call_count(), 0);

    let foreign_list = svc.list_for_product(stranger.id, product.id).await;
    assert!(matches!(
        foreign_list,
        Err(GenerationError::ProductNotFound)
    ));

    let unknown_list = svc
        .list_for_product(owner.id, ProductId::generate())
        .await;
    assert!(matches!(
        unknown_list,
        Err(GenerationError::ProductNotFound)
    ));
}

#[sqlx::test(migrations = "../server/migrations")]
async fn test_get_hides_foreign_generations(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let stranger = seed_user(&pool, "stranger@example.com").await;
    let product = seed_product(&pool, &owner, "Caneca Térmica").await;

    let generation = GenerationRepository::new(&pool)
        .insert(&generation_fields(product.id, "Caneca Térmica Inox"))
        .await
        .expect("generation insert should succeed");

    let backend = FakeBackend::echo();
    let svc = service(&pool, &backend);

    let owned = svc.get(owner.id, generation.id).await;
    assert!(owned.is_ok());

    let foreign = svc.get(stranger.id, generation.id).await;
    assert!(matches!(foreign, Err(GenerationError::GenerationNotFound)));
}

// =============================================================================
// Persistence & History Ordering
// =============================================================================

#[sqlx::test(migrations = "../server/migrations")]
async fn test_generate_all_persists_one_row(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let product = seed_product(&pool, &owner, "Mochila Urbana").await;

    let backend = FakeBackend::echo();
    let svc = service(&pool, &backend);

    let generation = svc
        .generate_all(owner.id, product.id)
        .await
        .expect("generation should succeed");

    let history = svc
        .list_for_product(owner.id, product.id)
        .await
        .expect("listing should succeed");

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, generation.id);
    assert!(!history[0].seo_title.is_empty());
}

#[sqlx::test(migrations = "../server/migrations")]
async fn test_failed_fanout_persists_nothing(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let product = seed_product(&pool, &owner, "Mochila Urbana").await;

    // Only the TikTok pipeline's prompt contains this marker.
    let backend = FakeBackend::failing_on("Canal: tiktok");
    let svc = service(&pool, &backend);

    let result = svc.generate_all(owner.id, product.id).await;
    assert!(matches!(result, Err(GenerationError::Completion(_))));

    let history = svc
        .list_for_product(owner.id, product.id)
        .await
        .expect("listing should succeed");
    assert!(history.is_empty(), "failed run must not persist a row");
}

#[sqlx::test(migrations = "../server/migrations")]
async fn test_history_lists_newest_first(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let product = seed_product(&pool, &owner, "Caneca Térmica").await;
    let repo = GenerationRepository::new(&pool);

    repo.insert(&generation_fields(product.id, "primeiro"))
        .await
        .expect("first insert should succeed");
    // Keep the created_at timestamps strictly ordered.
    tokio::time::sleep(Duration::from_millis(10)).await;
    repo.insert(&generation_fields(product.id, "segundo"))
        .await
        .expect("second insert should succeed");

    let backend = FakeBackend::echo();
    let history = service(&pool, &backend)
        .list_for_product(owner.id, product.id)
        .await
        .expect("listing should succeed");

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].seo_title, "segundo");
    assert_eq!(history[1].seo_title, "primeiro");
    assert!(history[0].created_at >= history[1].created_at);
}
