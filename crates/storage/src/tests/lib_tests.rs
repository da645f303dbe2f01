use super::*;
use shared::domain::BillStatus;

#[tokio::test]
async fn employees_only_list_their_own_bills() {
    let storage = Storage::from_records(fixtures::bills());
    storage
        .insert(
            BillRecord::new("other", "2005-05-05", BillStatus::Pending, 10.0).with_owner("b@b"),
        )
        .await
        .expect("insert");

    let own = storage
        .list_bills(&UserSession::employee(fixtures::FIXTURE_EMAIL))
        .await
        .expect("list");
    assert_eq!(own.len(), 4);
    assert!(own.iter().all(|bill| bill.email.as_deref() == Some("a@a")));

    let all = storage
        .list_bills(&UserSession::admin("admin@billed.test"))
        .await
        .expect("list");
    assert_eq!(all.len(), 5);
}

#[tokio::test]
async fn listing_preserves_insertion_order() {
    let storage = Storage::from_records(fixtures::bills());
    let ids: Vec<_> = storage
        .list_bills(&UserSession::employee("a@a"))
        .await
        .expect("list")
        .into_iter()
        .map(|bill| bill.id.0)
        .collect();
    assert_eq!(
        ids,
        [
            "47qAXb6fIm2zOKkLzMro",
            "BeKy5Mo4jkmdfPGYpTxZ",
            "UIUZtnPQvnbFnB0ozvJh",
            "qcCK3SzECmaZAGRrHjaC"
        ]
    );
}

#[tokio::test]
async fn rejects_duplicate_ids() {
    let storage = Storage::in_memory();
    let bill = BillRecord::new("dup", "2004-04-04", BillStatus::Pending, 1.0);
    storage.insert(bill.clone()).await.expect("first insert");
    let err = storage.insert(bill).await.expect_err("duplicate");
    assert!(err.to_string().contains("already exists"));
    assert_eq!(storage.len().await, 1);
}

#[tokio::test]
async fn get_bill_finds_by_id() {
    let storage = Storage::from_records(fixtures::bills());
    let bill = storage
        .get_bill(&BillId("UIUZtnPQvnbFnB0ozvJh".into()))
        .await
        .expect("bill");
    assert_eq!(bill.status, BillStatus::Accepted);
    assert!(storage.get_bill(&BillId("missing".into())).await.is_none());
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let storage = Storage::in_memory();
    assert!(storage.is_empty().await);
    let bills = storage
        .list_bills(&UserSession::employee("a@a"))
        .await
        .expect("list");
    assert!(bills.is_empty());
}
