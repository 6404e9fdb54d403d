use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row, TransactionBehavior};

use crate::models::{Booking, BookingStatus};

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn fmt(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}

fn parse_booking_row(row: &Row) -> rusqlite::Result<Booking> {
    let start_str: String = row.get(6)?;
    let end_str: String = row.get(7)?;
    let created_str: String = row.get(10)?;
    let status_str: String = row.get(9)?;

    let parse = |s: &str, idx: usize| {
        NaiveDateTime::parse_from_str(s, DATETIME_FMT).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
    };

    Ok(Booking {
        id: row.get(0)?,
        service_id: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        notes: row.get(5)?,
        start: parse(&start_str, 6)?,
        end: parse(&end_str, 7)?,
        duration_minutes: row.get(8)?,
        status: BookingStatus::parse(&status_str),
        created_at: parse(&created_str, 10)?,
        price_cents: row.get(11)?,
        reimbursable: row.get::<_, i64>(12)? != 0,
    })
}

const BOOKING_COLUMNS: &str = "id, service_id, name, email, phone, notes, start_at, end_at, \
     duration_minutes, status, created_at, price_cents, reimbursable";

/// Atomic create-if-absent on the booking key. Opens an immediate
/// transaction, reads the key, and inserts only if nothing is there; a
/// concurrent attempt on the same key either sees the row or fails the
/// primary-key insert. Returns false when the slot was already claimed.
pub fn insert_booking_if_absent(conn: &mut Connection, booking: &Booking) -> anyhow::Result<bool> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let exists: bool = tx.query_row(
        "SELECT COUNT(*) > 0 FROM bookings WHERE id = ?1",
        params![booking.id],
        |row| row.get(0),
    )?;
    if exists {
        // Nothing written; dropping the transaction rolls it back.
        return Ok(false);
    }

    tx.execute(
        "INSERT INTO bookings (id, service_id, name, email, phone, notes, start_at, end_at,
            duration_minutes, status, created_at, price_cents, reimbursable)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            booking.id,
            booking.service_id,
            booking.name,
            booking.email,
            booking.phone,
            booking.notes,
            fmt(&booking.start),
            fmt(&booking.end),
            booking.duration_minutes,
            booking.status.as_str(),
            fmt(&booking.created_at),
            booking.price_cents,
            booking.reimbursable as i64,
        ],
    )?;

    tx.commit()?;
    Ok(true)
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"
    ))?;

    match stmt.query_row(params![id], parse_booking_row) {
        Ok(booking) => Ok(Some(booking)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Bookings whose start falls within [start, end], inclusive on both ends.
pub fn bookings_in_range(
    conn: &Connection,
    start: &NaiveDateTime,
    end: &NaiveDateTime,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE start_at >= ?1 AND start_at <= ?2 AND status != 'cancelled'
         ORDER BY start_at ASC"
    ))?;

    let rows = stmt.query_map(params![fmt(start), fmt(end)], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::booking_key;
    use chrono::Duration;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn make_booking(date: &str, time: &str, service: &str) -> Booking {
        let start = dt(&format!("{date} {time}"));
        Booking {
            id: booking_key(date, time, service),
            service_id: service.to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            phone: "+32470000000".to_string(),
            notes: "premier rendez-vous".to_string(),
            start,
            end: start + Duration::minutes(30),
            duration_minutes: 30,
            status: BookingStatus::Confirmed,
            created_at: dt("2025-06-10 12:00"),
            price_cents: None,
            reimbursable: true,
        }
    }

    #[test]
    fn test_insert_and_fetch_roundtrip() {
        let mut conn = setup_db();
        let booking = make_booking("2025-06-16", "08:40", "classique");
        assert!(insert_booking_if_absent(&mut conn, &booking).unwrap());

        let fetched = get_booking_by_id(&conn, &booking.id).unwrap().unwrap();
        assert_eq!(fetched.start, booking.start);
        assert_eq!(fetched.end, booking.end);
        assert_eq!(fetched.status, BookingStatus::Confirmed);
        assert_eq!(fetched.notes, "premier rendez-vous");
        assert!(fetched.reimbursable);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut conn = setup_db();
        let booking = make_booking("2025-06-16", "08:40", "classique");
        assert!(insert_booking_if_absent(&mut conn, &booking).unwrap());
        assert!(!insert_booking_if_absent(&mut conn, &booking).unwrap());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_same_slot_different_service_coexists() {
        let mut conn = setup_db();
        assert!(insert_booking_if_absent(&mut conn, &make_booking("2025-06-16", "08:40", "classique")).unwrap());
        assert!(insert_booking_if_absent(&mut conn, &make_booking("2025-06-16", "08:40", "sport")).unwrap());
    }

    #[test]
    fn test_range_query_inclusive_bounds() {
        let mut conn = setup_db();
        for (date, time) in [
            ("2025-06-16", "08:00"),
            ("2025-06-17", "08:40"),
            ("2025-06-30", "08:00"),
        ] {
            insert_booking_if_absent(&mut conn, &make_booking(date, time, "classique")).unwrap();
        }

        let found =
            bookings_in_range(&conn, &dt("2025-06-16 08:00"), &dt("2025-06-30 08:00")).unwrap();
        assert_eq!(found.len(), 3);

        let narrower =
            bookings_in_range(&conn, &dt("2025-06-16 08:01"), &dt("2025-06-29 23:59")).unwrap();
        assert_eq!(narrower.len(), 1);
        assert_eq!(narrower[0].id, "2025-06-17_08:40_classique");
    }

    #[test]
    fn test_cupping_price_persisted() {
        let mut conn = setup_db();
        let mut booking = make_booking("2025-06-16", "08:40", "cupping");
        booking.price_cents = Some(5000);
        booking.reimbursable = false;
        insert_booking_if_absent(&mut conn, &booking).unwrap();

        let fetched = get_booking_by_id(&conn, &booking.id).unwrap().unwrap();
        assert_eq!(fetched.price_cents, Some(5000));
        assert!(!fetched.reimbursable);
    }
}
