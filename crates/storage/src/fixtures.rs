//! Sample bills owned by `a@a`, shaped like the records the app ships with.

use shared::domain::{BillRecord, BillStatus};

pub const FIXTURE_EMAIL: &str = "a@a";

pub fn bills() -> Vec<BillRecord> {
    let mut hotel =
        BillRecord::new("47qAXb6fIm2zOKkLzMro", "2004-04-04", BillStatus::Pending, 400.0)
            .with_file(
                "https://example.com/receipts/preview-facture-free-201801-pdf-1.jpg",
                "preview-facture-free-201801-pdf-1.jpg",
            )
            .with_owner(FIXTURE_EMAIL)
            .with_label("Hôtel et logement", "encore");
    hotel.vat = Some("80".into());
    hotel.pct = Some(20);
    hotel.commentary = Some("séminaire billed".into());
    hotel.comment_admin = Some("ok".into());

    let mut transport =
        BillRecord::new("BeKy5Mo4jkmdfPGYpTxZ", "2001-01-01", BillStatus::Refused, 100.0)
            .with_file("https://example.com/receipts/1592770761.jpeg", "1592770761.jpeg")
            .with_owner(FIXTURE_EMAIL)
            .with_label("Transports", "test1");
    transport.vat = Some(String::new());
    transport.pct = Some(20);
    transport.commentary = Some("plop".into());
    transport.comment_admin = Some("en fait non".into());

    let mut online =
        BillRecord::new("UIUZtnPQvnbFnB0ozvJh", "2003-03-03", BillStatus::Accepted, 300.0)
            .with_file(
                "https://example.com/receipts/facture-client-php-exportee.png",
                "facture-client-php-exportee.png",
            )
            .with_owner(FIXTURE_EMAIL)
            .with_label("Services en ligne", "test3");
    online.vat = Some("60".into());
    online.pct = Some(20);
    online.commentary = Some(String::new());
    online.comment_admin = Some("bon bah d'accord".into());

    let mut restaurant =
        BillRecord::new("qcCK3SzECmaZAGRrHjaC", "2002-02-02", BillStatus::Refused, 200.0)
            .with_file(
                "https://example.com/receipts/preview-facture-free-201801-pdf-1.jpg",
                "preview-facture-free-201801-pdf-1.jpg",
            )
            .with_owner(FIXTURE_EMAIL)
            .with_label("Restaurants et bars", "test2");
    restaurant.vat = Some("40".into());
    restaurant.pct = Some(20);
    restaurant.commentary = Some("test2".into());
    restaurant.comment_admin = Some("pas la bonne facture".into());

    vec![hotel, transport, online, restaurant]
}
