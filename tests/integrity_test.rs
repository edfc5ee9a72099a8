//! Cascade delete, nested read and uniqueness behavior against SQLite.

mod common;

use std::sync::Arc;

use sea_orm::ConnectionTrait;

use auto_shop::config::DeleteMode;
use auto_shop::domain::{NewCustomer, UpdateCustomer};
use auto_shop::errors::AppError;
use auto_shop::infra::{Database, Persistence, UnitOfWork};
use auto_shop::services::{IntegrityManager, ServiceContainer, Services};

use common::{seed_car, seed_customer, seed_service, setup_database, test_config};

struct Fixture {
    db: Arc<Database>,
    uow: Arc<Persistence>,
    services: Services,
}

async fn fixture() -> Fixture {
    fixture_with(test_config()).await
}

async fn fixture_with(config: auto_shop::Config) -> Fixture {
    let db = setup_database(&config).await;
    Fixture {
        uow: Arc::new(Persistence::new(db.get_connection())),
        services: Services::from_connection(db.get_connection(), &config),
        db,
    }
}

/// Seed a customer owning `cars` cars with `per_car` service records each.
async fn seed_tree(uow: &Persistence, phone: &str, cars: usize, per_car: usize) -> (i32, Vec<i32>) {
    let customer = seed_customer(uow.customers().as_ref(), phone).await;
    let mut car_ids = Vec::new();
    for c in 0..cars {
        let car = seed_car(uow.cars().as_ref(), customer.id, &format!("{}-VIN{}", phone, c)).await;
        for s in 0..per_car {
            seed_service(uow.services().as_ref(), car.id, &format!("job {}", s)).await;
        }
        car_ids.push(car.id);
    }
    (customer.id, car_ids)
}

async fn remaining_services(uow: &Persistence, car_ids: &[i32]) -> usize {
    let mut total = 0;
    for id in car_ids {
        total += uow.services().list_by_car_with_deleted(*id).await.unwrap().len();
    }
    total
}

#[tokio::test]
async fn test_delete_customer_removes_every_descendant() {
    for (n, m) in [(0, 0), (1, 0), (1, 3), (3, 2)] {
        let f = fixture().await;
        let (customer_id, car_ids) = seed_tree(&f.uow, "555-0100", n, m).await;

        let deleted = f.services.customers().delete_customer(customer_id).await.unwrap();

        assert_eq!(deleted.id, customer_id, "echo for {}x{}", n, m);
        assert!(f.uow.customers().find_by_id_with_deleted(customer_id).await.unwrap().is_none());
        assert!(f
            .uow
            .cars()
            .list_by_customer_with_deleted(customer_id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(remaining_services(&f.uow, &car_ids).await, 0);
    }
}

#[tokio::test]
async fn test_delete_customer_leaves_other_customers_alone() {
    let f = fixture().await;
    let (doomed, _) = seed_tree(&f.uow, "555-0100", 2, 2).await;
    let (kept, kept_cars) = seed_tree(&f.uow, "555-0200", 2, 2).await;

    f.services.customers().delete_customer(doomed).await.unwrap();

    let survivor = f.services.customers().get_customer(kept).await.unwrap();
    assert_eq!(survivor.cars.len(), 2);
    assert_eq!(remaining_services(&f.uow, &kept_cars).await, 4);
}

#[tokio::test]
async fn test_delete_car_keeps_owner_and_siblings() {
    let f = fixture().await;
    let (customer_id, car_ids) = seed_tree(&f.uow, "555-0100", 2, 3).await;

    let deleted = f.services.cars().delete_car(car_ids[0]).await.unwrap();
    assert_eq!(deleted.id, car_ids[0]);

    assert_eq!(remaining_services(&f.uow, &car_ids[..1]).await, 0);
    assert_eq!(remaining_services(&f.uow, &car_ids[1..]).await, 3);

    let customer = f.services.customers().get_customer(customer_id).await.unwrap();
    assert!(customer.exists());
    assert_eq!(customer.cars.len(), 1);
    assert_eq!(customer.cars[0].id, car_ids[1]);
}

#[tokio::test]
async fn test_deleting_unknown_ids_is_a_noop() {
    let f = fixture().await;
    let (customer_id, _) = seed_tree(&f.uow, "555-0100", 1, 1).await;

    assert!(!f.services.customers().delete_customer(999).await.unwrap().exists());
    assert!(!f.services.cars().delete_car(999).await.unwrap().exists());
    assert!(!f.services.maintenance().delete_service(999).await.unwrap().exists());

    let customer = f.services.customers().get_customer(customer_id).await.unwrap();
    assert_eq!(customer.cars.len(), 1);
}

#[tokio::test]
async fn test_deleting_twice_is_idempotent() {
    let f = fixture().await;
    let (customer_id, _) = seed_tree(&f.uow, "555-0100", 1, 1).await;

    assert!(f.services.customers().delete_customer(customer_id).await.unwrap().exists());
    assert!(!f.services.customers().delete_customer(customer_id).await.unwrap().exists());
}

#[tokio::test]
async fn test_cascade_without_transaction() {
    let mut config = test_config();
    config.cascade_in_transaction = false;
    let f = fixture_with(config).await;
    let (customer_id, car_ids) = seed_tree(&f.uow, "555-0100", 2, 2).await;

    let manager = IntegrityManager::new(f.uow.clone(), DeleteMode::Soft, false);
    let removed = manager.remove_customer(customer_id).await.unwrap();

    assert_eq!(removed.map(|c| c.id), Some(customer_id));
    assert_eq!(remaining_services(&f.uow, &car_ids).await, 0);
}

/// Make every car delete fail so a cascade stops after its service level.
async fn block_car_deletes(db: &Database) {
    db.connection()
        .execute_unprepared(
            "CREATE TRIGGER block_car_delete BEFORE DELETE ON cars \
             BEGIN SELECT RAISE(ABORT, 'car delete blocked'); END;",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_failed_cascade_rolls_back_in_transaction() {
    let f = fixture().await;
    let (customer_id, car_ids) = seed_tree(&f.uow, "555-0100", 2, 2).await;
    block_car_deletes(&f.db).await;

    let result = f.services.customers().delete_customer(customer_id).await;

    assert!(result.is_err());
    assert_eq!(remaining_services(&f.uow, &car_ids).await, 4);
    let customer = f.services.customers().get_customer(customer_id).await.unwrap();
    assert_eq!(customer.cars.len(), 2);
}

#[tokio::test]
async fn test_failed_cascade_without_transaction_keeps_earlier_levels_deleted() {
    let mut config = test_config();
    config.cascade_in_transaction = false;
    let f = fixture_with(config).await;
    let (customer_id, car_ids) = seed_tree(&f.uow, "555-0100", 2, 2).await;
    block_car_deletes(&f.db).await;

    let result = f.services.customers().delete_customer(customer_id).await;

    assert!(result.is_err());
    assert_eq!(remaining_services(&f.uow, &car_ids).await, 0);
    let customer = f.services.customers().get_customer(customer_id).await.unwrap();
    assert!(customer.exists());
    assert_eq!(customer.cars.len(), 2);
}

#[tokio::test]
async fn test_cascade_purges_soft_deleted_car() {
    let f = fixture().await;
    let (customer_id, car_ids) = seed_tree(&f.uow, "555-0100", 1, 2).await;

    assert_eq!(f.uow.cars().soft_delete(car_ids[0]).await.unwrap(), 1);
    let customer = f.services.customers().get_customer(customer_id).await.unwrap();
    assert!(customer.cars.is_empty());
    assert!(!f.services.cars().get_car(car_ids[0]).await.unwrap().exists());

    f.services.customers().delete_customer(customer_id).await.unwrap();

    assert!(f.uow.cars().find_by_id_with_deleted(car_ids[0]).await.unwrap().is_none());
    assert_eq!(remaining_services(&f.uow, &car_ids).await, 0);
}

#[tokio::test]
async fn test_duplicate_phone_is_a_constraint_violation() {
    let f = fixture().await;
    let first = f
        .services
        .customers()
        .create_customer(NewCustomer {
            first_name: "Ana".into(),
            last_name: "Lopez".into(),
            phone: "555-0100".into(),
        })
        .await
        .unwrap();

    let second = f
        .services
        .customers()
        .create_customer(NewCustomer {
            first_name: "Eva".into(),
            last_name: "Ruiz".into(),
            phone: "555-0100".into(),
        })
        .await;

    assert!(matches!(second, Err(AppError::Conflict(_))));
    let stored = f.services.customers().get_customer(first.id).await.unwrap();
    assert_eq!(stored.first_name, "Ana");
}

#[tokio::test]
async fn test_store_level_unique_violation_maps_to_conflict() {
    let f = fixture().await;
    seed_customer(f.uow.customers().as_ref(), "555-0100").await;

    // Bypasses the pre-insert check, so the database constraint fires
    let result = f
        .uow
        .customers()
        .create(NewCustomer {
            first_name: "Eva".into(),
            last_name: "Ruiz".into(),
            phone: "555-0100".into(),
        })
        .await;

    match result {
        Err(AppError::Conflict(field)) => assert_eq!(field, "Phone number"),
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_soft_deleted_customer_still_holds_phone() {
    let f = fixture().await;
    let customer = seed_customer(f.uow.customers().as_ref(), "555-0100").await;
    assert_eq!(f.uow.customers().soft_delete(customer.id).await.unwrap(), 1);
    assert_eq!(f.uow.customers().soft_delete(customer.id).await.unwrap(), 0);

    assert!(f.uow.customers().list().await.unwrap().is_empty());

    let result = f
        .services
        .customers()
        .create_customer(NewCustomer {
            first_name: "Eva".into(),
            last_name: "Ruiz".into(),
            phone: "555-0100".into(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_hard_deleted_phone_is_reusable() {
    let f = fixture().await;
    let (customer_id, _) = seed_tree(&f.uow, "555-0100", 1, 1).await;
    f.services.customers().delete_customer(customer_id).await.unwrap();

    let again = f
        .services
        .customers()
        .create_customer(NewCustomer {
            first_name: "Eva".into(),
            last_name: "Ruiz".into(),
            phone: "555-0100".into(),
        })
        .await
        .unwrap();

    assert!(again.exists());
    assert_eq!(again.phone, "555-0100");
}

#[tokio::test]
async fn test_customer_read_returns_exactly_its_cars() {
    let f = fixture().await;
    let (customer_id, car_ids) = seed_tree(&f.uow, "555-0100", 3, 0).await;
    seed_tree(&f.uow, "555-0200", 2, 0).await;

    let customer = f.services.customers().get_customer(customer_id).await.unwrap();

    let mut ids: Vec<i32> = customer.cars.iter().map(|c| c.id).collect();
    ids.sort();
    assert_eq!(ids, car_ids);
    assert!(customer.cars.iter().all(|c| c.customer_id == customer_id));
}

#[tokio::test]
async fn test_missing_customer_reads_as_zero_value() {
    let f = fixture().await;
    let customer = f.services.customers().get_customer(12345).await.unwrap();

    assert_eq!(customer.id, 0);
    assert!(customer.cars.is_empty());
}

#[tokio::test]
async fn test_update_blanks_omitted_fields() {
    let f = fixture().await;
    let customer = seed_customer(f.uow.customers().as_ref(), "555-0100").await;

    let update: UpdateCustomer = serde_json::from_str(r#"{"firstName":"X"}"#).unwrap();
    let updated = f
        .services
        .customers()
        .update_customer(customer.id, update)
        .await
        .unwrap();

    assert_eq!(updated.first_name, "X");
    assert_eq!(updated.last_name, "");
    assert_eq!(updated.phone, "");

    let stored = f.uow.customers().find_by_id(customer.id).await.unwrap().unwrap();
    assert_eq!(stored.phone, "");
}

#[tokio::test]
async fn test_update_conflict_returns_stale_customer() {
    let f = fixture().await;
    let first = seed_customer(f.uow.customers().as_ref(), "555-0100").await;
    let second = seed_customer(f.uow.customers().as_ref(), "555-0200").await;

    let update = UpdateCustomer {
        first_name: "Eva".into(),
        last_name: "Ruiz".into(),
        phone: first.phone.clone(),
    };
    let result = f
        .services
        .customers()
        .update_customer(second.id, update)
        .await
        .unwrap();

    assert_eq!(result.phone, "555-0200");
    assert_eq!(result.first_name, "Ana");
}

#[tokio::test]
async fn test_service_delete_is_soft_and_cascade_purges_it() {
    let f = fixture().await;
    let (customer_id, car_ids) = seed_tree(&f.uow, "555-0100", 1, 2).await;
    let car = f.services.cars().get_car(car_ids[0]).await.unwrap();
    let target = car.services[0].id;

    let deleted = f.services.maintenance().delete_service(target).await.unwrap();
    assert_eq!(deleted.id, target);

    // Hidden from reads but still stored
    assert!(!f.services.maintenance().get_service(target).await.unwrap().exists());
    assert_eq!(f.services.cars().get_car(car_ids[0]).await.unwrap().services.len(), 1);
    let raw = f.uow.services().find_by_id_with_deleted(target).await.unwrap().unwrap();
    assert!(raw.is_deleted());

    // The cascade sees soft-deleted rows too
    f.services.customers().delete_customer(customer_id).await.unwrap();
    assert_eq!(remaining_services(&f.uow, &car_ids).await, 0);
}

#[tokio::test]
async fn test_hard_service_delete_mode() {
    let mut config = test_config();
    config.service_delete_mode = DeleteMode::Hard;
    let f = fixture_with(config).await;
    let (_, car_ids) = seed_tree(&f.uow, "555-0100", 1, 1).await;
    let target = f.services.cars().get_car(car_ids[0]).await.unwrap().services[0].id;

    f.services.maintenance().delete_service(target).await.unwrap();

    assert!(f.uow.services().find_by_id_with_deleted(target).await.unwrap().is_none());
}

#[tokio::test]
async fn test_car_requires_existing_owner() {
    let f = fixture().await;
    let result = f
        .services
        .cars()
        .create_car(auto_shop::domain::NewCar {
            make: "Ford".into(),
            model: "Focus".into(),
            color: "Grey".into(),
            vin: "XYZ".into(),
            customer_id: 77,
        })
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let f = fixture().await;
    let customer = f
        .services
        .customers()
        .create_customer(NewCustomer {
            first_name: "Ana".into(),
            last_name: "Lopez".into(),
            phone: "555-0100".into(),
        })
        .await
        .unwrap();
    let car = f
        .services
        .cars()
        .create_car(auto_shop::domain::NewCar {
            make: "Toyota".into(),
            model: "Corolla".into(),
            color: String::new(),
            vin: "ABC123".into(),
            customer_id: customer.id,
        })
        .await
        .unwrap();
    let service = f
        .services
        .maintenance()
        .create_service(auto_shop::domain::NewService {
            comment: "oil change".into(),
            miles: "15000".into(),
            car_id: car.id,
        })
        .await
        .unwrap();

    f.services.customers().delete_customer(customer.id).await.unwrap();

    assert!(!f.services.cars().get_car(car.id).await.unwrap().exists());
    assert!(!f.services.maintenance().get_service(service.id).await.unwrap().exists());
    assert!(f.uow.services().find_by_id_with_deleted(service.id).await.unwrap().is_none());
}
