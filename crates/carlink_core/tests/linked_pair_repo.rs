use carlink_core::db::schema::reset_schema;
use carlink_core::db::{open_db_in_memory, DbError};
use carlink_core::{
    NewLinkedPair, PrincipalKeySync, RelationshipRepository, RepoError,
    SqliteRelationshipRepository,
};
use rusqlite::Connection;

const WRITE_BACK: PrincipalKeySync = PrincipalKeySync::WriteBack;

fn ready_conn() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    reset_schema(&mut conn).unwrap();
    conn
}

#[test]
fn repository_requires_reset_schema() {
    let mut conn = open_db_in_memory().unwrap();
    let err = SqliteRelationshipRepository::try_new(&mut conn)
        .err()
        .expect("unreset connection must be rejected");
    assert!(matches!(err, RepoError::Db(DbError::SchemaNotInitialized)));
}

#[test]
fn write_back_links_both_key_columns() {
    let mut conn = ready_conn();
    let mut repo = SqliteRelationshipRepository::try_new(&mut conn).unwrap();

    let draft = NewLinkedPair::new("John Doe", "Tesla", "3");
    let (user, car) = repo.create_linked_pair(&draft, WRITE_BACK).unwrap();

    assert_eq!(car.user_id, user.id);
    assert_eq!(user.car_id, Some(car.id));

    let stored_user = repo.get_user(user.id).unwrap().unwrap();
    let stored_car = repo.get_car(car.id).unwrap().unwrap();
    assert_eq!(stored_user, user);
    assert_eq!(stored_car, car);
}

#[test]
fn skip_leaves_principal_key_unset() {
    let mut conn = ready_conn();
    let mut repo = SqliteRelationshipRepository::try_new(&mut conn).unwrap();

    let draft = NewLinkedPair::new("Jane Roe", "Volvo", "XC40");
    let (user, car) = repo
        .create_linked_pair(&draft, PrincipalKeySync::Skip)
        .unwrap();

    assert_eq!(car.user_id, user.id);
    assert_eq!(user.car_id, None);

    let listed = repo.list_users().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].car_id, None);
    assert_eq!(listed[0].to_string(), "User Jane Roe (1) has car #0");

    // The association is still navigable from the dependent key.
    let resolved = repo.car_for_user(user.id).unwrap().unwrap();
    assert_eq!(resolved.id, car.id);
}

#[test]
fn lists_are_ordered_by_id() {
    let mut conn = ready_conn();
    let mut repo = SqliteRelationshipRepository::try_new(&mut conn).unwrap();

    for (name, make) in [("A", "Fiat"), ("B", "Kia"), ("C", "Opel")] {
        let draft = NewLinkedPair::new(name, make, "1");
        repo.create_linked_pair(&draft, WRITE_BACK).unwrap();
    }

    let names: Vec<String> = repo.list_users().unwrap().into_iter().map(|u| u.name).collect();
    let makes: Vec<String> = repo.list_cars().unwrap().into_iter().map(|c| c.make).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert_eq!(makes, ["Fiat", "Kia", "Opel"]);
}

#[test]
fn navigation_resolves_both_directions() {
    let mut conn = ready_conn();
    let mut repo = SqliteRelationshipRepository::try_new(&mut conn).unwrap();

    let first = NewLinkedPair::new("First", "Seat", "Ibiza");
    let second = NewLinkedPair::new("Second", "Audi", "A4");
    repo.create_linked_pair(&first, WRITE_BACK).unwrap();
    let (user, car) = repo.create_linked_pair(&second, WRITE_BACK).unwrap();

    assert_eq!(repo.car_for_user(user.id).unwrap(), Some(car.clone()));
    assert_eq!(repo.user_for_car(car.id).unwrap(), user);
}

#[test]
fn navigation_reports_missing_rows() {
    let mut conn = ready_conn();
    let repo = SqliteRelationshipRepository::try_new(&mut conn).unwrap();

    let err = repo.car_for_user(5).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "user", id: 5 }));

    let err = repo.user_for_car(9).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "car", id: 9 }));
}

#[test]
fn second_car_for_one_user_is_reported_as_invalid_data() {
    let mut conn = ready_conn();
    let user_id = {
        let mut repo = SqliteRelationshipRepository::try_new(&mut conn).unwrap();
        let draft = NewLinkedPair::new("Dup", "BMW", "i3");
        let (user, _) = repo.create_linked_pair(&draft, WRITE_BACK).unwrap();
        user.id
    };

    // No uniqueness constraint exists on cars.user_id; a stray row gets in.
    conn.execute(
        "INSERT INTO cars (make, model, user_id) VALUES ('Mini', 'Cooper', ?1);",
        [user_id],
    )
    .unwrap();

    let repo = SqliteRelationshipRepository::try_new(&mut conn).unwrap();
    let err = repo.car_for_user(user_id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn failed_save_persists_nothing() {
    let mut conn = ready_conn();
    conn.execute_batch(
        "CREATE TRIGGER reject_cars BEFORE INSERT ON cars
         BEGIN SELECT RAISE(ABORT, 'cars are read-only'); END;",
    )
    .unwrap();

    let mut repo = SqliteRelationshipRepository::try_new(&mut conn).unwrap();
    let draft = NewLinkedPair::new("Ghost", "None", "0");
    let err = repo.create_linked_pair(&draft, WRITE_BACK).unwrap_err();
    assert!(matches!(err, RepoError::Db(DbError::Sqlite(_))));

    assert!(repo.list_users().unwrap().is_empty());
    assert!(repo.list_cars().unwrap().is_empty());
}
