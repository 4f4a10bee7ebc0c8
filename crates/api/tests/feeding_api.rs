//! Feeding creation through `/cats/{id}/add_feeding`.

mod common;

use axum::http::StatusCode;
use catcollector_core::meal::Meal;
use catcollector_db::repositories::FeedingRepo;
use chrono::NaiveDate;
use common::{body_json, create_cat, get_as, location, post_form, signup};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn feeding_attaches_to_path_cat(pool: PgPool) {
    let alice = signup(&pool, "alice").await;
    let id = create_cat(&pool, &alice, "Franklin").await;
    let other = create_cat(&pool, &alice, "Biscuit").await;
    let other_id = other.to_string();

    let response = post_form(
        common::build_test_app(pool.clone()),
        &format!("/cats/{id}/add_feeding"),
        &[
            ("date", "2024-01-01"),
            ("meal", "B"),
            ("cat_id", other_id.as_str()),
        ],
        Some(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/cats/{id}/"));

    let feedings = FeedingRepo::list_by_cat(&pool, id).await.unwrap();
    assert_eq!(feedings.len(), 1);
    assert_eq!(feedings[0].cat_id, id);
    assert_eq!(feedings[0].meal, Meal::Breakfast);
    assert_eq!(feedings[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert!(FeedingRepo::list_by_cat(&pool, other).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn newest_feeding_is_listed_first(pool: PgPool) {
    let alice = signup(&pool, "alice").await;
    let id = create_cat(&pool, &alice, "Franklin").await;

    for (date, meal) in [("12/31/2023", "D"), ("2024-01-01", "B"), ("06/15/23", "L")] {
        let response = post_form(
            common::build_test_app(pool.clone()),
            &format!("/cats/{id}/add_feeding"),
            &[("date", date), ("meal", meal)],
            Some(&alice),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{date}");
    }

    let response = get_as(
        common::build_test_app(pool),
        &format!("/cats/{id}/"),
        Some(&alice),
    )
    .await;
    let json = body_json(response).await;
    let dates: Vec<&str> = json["feedings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2024-01-01", "2023-12-31", "2023-06-15"]);
    assert_eq!(json["feedings"][0]["meal"], "B");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn meal_defaults_to_breakfast(pool: PgPool) {
    let alice = signup(&pool, "alice").await;
    let id = create_cat(&pool, &alice, "Franklin").await;

    post_form(
        common::build_test_app(pool.clone()),
        &format!("/cats/{id}/add_feeding"),
        &[("date", "2024-03-01")],
        Some(&alice),
    )
    .await;

    let feedings = FeedingRepo::list_by_cat(&pool, id).await.unwrap();
    assert_eq!(feedings[0].meal, Meal::Breakfast);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_feeding_is_400_and_not_stored(pool: PgPool) {
    let alice = signup(&pool, "alice").await;
    let id = create_cat(&pool, &alice, "Franklin").await;

    for fields in [
        [("date", "2024-01-01"), ("meal", "S")],
        [("date", "not a date"), ("meal", "B")],
        [("date", ""), ("meal", "L")],
    ] {
        let response = post_form(
            common::build_test_app(pool.clone()),
            &format!("/cats/{id}/add_feeding"),
            &fields,
            Some(&alice),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    assert!(FeedingRepo::list_by_cat(&pool, id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn feeding_for_foreign_cat_is_not_found(pool: PgPool) {
    let alice = signup(&pool, "alice").await;
    let bob = signup(&pool, "bob").await;
    let bob_cat = create_cat(&pool, &bob, "Biscuit").await;

    let response = post_form(
        common::build_test_app(pool.clone()),
        &format!("/cats/{bob_cat}/add_feeding"),
        &[("date", "2024-01-01"), ("meal", "B")],
        Some(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(FeedingRepo::list_by_cat(&pool, bob_cat).await.unwrap().is_empty());
}
