//! Report formatting
//!
//! Pure CSV and board projections over the domain models. Handlers
//! fetch the scoped data, these functions only format it.
//!
//! CSV rules: field values have commas replaced by spaces so the column
//! count stays fixed, serial lists are joined with ';', and dates are
//! rendered as dd/mm/yyyy.

use crate::db::models::{Product, Repair, RepairStatus};
use chrono::TimeZone;
use serde::Serialize;
use std::collections::HashMap;

/// Replace commas with spaces so a value never splits a CSV row
pub fn sanitize_field(value: &str) -> String {
    value.replace(',', " ")
}

/// Render a millisecond timestamp as dd/mm/yyyy.
///
/// Dates are rendered in UTC so exports are identical no matter where
/// the server runs; the client's timezone is not known here.
pub fn format_date(millis: i64) -> String {
    match chrono::Utc.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(dt) => dt.format("%d/%m/%Y").to_string(),
        _ => String::new(),
    }
}

fn opt(value: &Option<String>) -> String {
    sanitize_field(value.as_deref().unwrap_or(""))
}

/// Product stock export
pub fn products_csv(products: &[Product]) -> String {
    let mut out = String::from(
        "ID,Name,Price,Quantity,Vendor,Location,Courier Charges,Serials,Created At\n",
    );
    for product in products {
        let id = product
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();
        let serials = sanitize_field(&product.serials.join(";"));
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            sanitize_field(&id),
            sanitize_field(&product.name),
            product.price,
            product.quantity,
            opt(&product.vendor),
            opt(&product.location),
            product.courier_charges,
            serials,
            format_date(product.created_at),
        ));
    }
    out
}

/// Repair ticket export
///
/// `store_names` maps "store:id" to a display name. When present (the
/// all-stores export), a Store column is inserted after Date.
pub fn repairs_csv(repairs: &[Repair], store_names: Option<&HashMap<String, String>>) -> String {
    let mut out = String::new();
    match store_names {
        Some(_) => out.push_str(
            "Date,Store,Customer,Contact,Device,Model,Serial No,Problem,Status,Cost,Technician,PartReplaced\n",
        ),
        None => out.push_str(
            "Date,Customer,Contact,Device,Model,Serial No,Problem,Status,Cost,Technician,PartReplaced\n",
        ),
    }

    for repair in repairs {
        out.push_str(&format_date(repair.created_at));
        if let Some(names) = store_names {
            let key = repair.store_id.to_string();
            let name = names.get(&key).map(String::as_str).unwrap_or("");
            out.push(',');
            out.push_str(&sanitize_field(name));
        }
        out.push_str(&format!(
            ",{},{},{},{},{},{},{},{},{},{}\n",
            sanitize_field(&repair.customer_name),
            opt(&repair.contact_number),
            sanitize_field(&repair.device_details),
            sanitize_field(&repair.model_number),
            sanitize_field(&repair.serial_number),
            opt(&repair.issue_description),
            repair.status,
            repair.estimated_cost,
            opt(&repair.technician_name),
            opt(&repair.part_replaced_name),
        ));
    }
    out
}

/// One kanban board column
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: RepairStatus,
    pub tickets: Vec<Repair>,
}

/// Project repairs onto board columns in canonical status order.
/// Every column is present even when empty.
pub fn board_columns(repairs: &[Repair]) -> Vec<BoardColumn> {
    RepairStatus::ALL
        .iter()
        .map(|&status| BoardColumn {
            status,
            tickets: repairs
                .iter()
                .filter(|r| r.status == status)
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, serials: &[&str]) -> Product {
        Product {
            id: Some("product:p1".parse().unwrap()),
            name: name.into(),
            category: Some("Parts".into()),
            price: 25.5,
            quantity: serials.len() as u32,
            vendor: Some("Acme, Inc".into()),
            location: None,
            courier_charges: 3.0,
            serials: serials.iter().map(|s| s.to_string()).collect(),
            store_id: "store:main".parse().unwrap(),
            low_stock: false,
            // 2026-01-15 UTC
            created_at: 1768435200000,
        }
    }

    fn repair(customer: &str, status: RepairStatus) -> Repair {
        Repair {
            id: Some("repair:r1".parse().unwrap()),
            customer_name: customer.into(),
            contact_number: Some("555-0101".into()),
            device_details: "Laptop, 15 inch".into(),
            model_number: "XPS-15".into(),
            serial_number: "SN-9".into(),
            issue_description: Some("No boot, black screen".into()),
            problem_found: None,
            technician_name: Some("Lee".into()),
            is_part_change: false,
            is_service_only: false,
            part_replaced_name: None,
            status,
            estimated_cost: 40.0,
            custom_message: None,
            store_id: "store:main".parse().unwrap(),
            created_at: 1768435200000,
            updated_at: 1768435200000,
        }
    }

    #[test]
    fn test_sanitize_field_strips_commas() {
        assert_eq!(sanitize_field("a,b,c"), "a b c");
        assert_eq!(sanitize_field("clean"), "clean");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(1768435200000), "15/01/2026");
    }

    #[test]
    fn test_products_csv_header_and_columns() {
        let csv = products_csv(&[product("Screen", &["SN1", "SN2"])]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ID,Name,Price,Quantity,Vendor,Location,Courier Charges,Serials,Created At"
        );
        let row = lines.next().unwrap();
        assert_eq!(row.split(',').count(), 9);
        assert!(row.contains("SN1;SN2"));
        // Vendor comma was sanitized
        assert!(row.contains("Acme  Inc"));
    }

    #[test]
    fn test_repairs_csv_without_store_column() {
        let csv = repairs_csv(&[repair("Ana", RepairStatus::Received)], None);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Date,Customer,Contact,Device,Model,Serial No,Problem,Status,Cost,Technician,PartReplaced"
        );
        let row = lines.next().unwrap();
        assert_eq!(row.split(',').count(), 11);
        assert!(row.contains("Laptop  15 inch"));
    }

    #[test]
    fn test_repairs_csv_with_store_column() {
        let mut names = HashMap::new();
        names.insert("store:main".to_string(), "Main Street".to_string());
        let csv = repairs_csv(&[repair("Ana", RepairStatus::Delivered)], Some(&names));
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Date,Store,Customer"));
        assert_eq!(header.split(',').count(), 12);
        let row = lines.next().unwrap();
        assert_eq!(row.split(',').count(), 12);
        assert!(row.contains("Main Street"));
    }

    #[test]
    fn test_repairs_csv_unknown_store_blank() {
        let names = HashMap::new();
        let csv = repairs_csv(&[repair("Ana", RepairStatus::Received)], Some(&names));
        let row = csv.lines().nth(1).unwrap();
        // Column count holds even when the store name is unknown
        assert_eq!(row.split(',').count(), 12);
    }

    #[test]
    fn test_status_with_parens_stays_one_column() {
        let csv = repairs_csv(
            &[repair("Ana", RepairStatus::DeliveredPaymentPending)],
            None,
        );
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row.split(',').count(), 11);
        assert!(row.contains("Delivered (Payment Pending)"));
    }

    #[test]
    fn test_board_columns_order_and_empties() {
        let repairs = vec![
            repair("Ana", RepairStatus::Received),
            repair("Bo", RepairStatus::Delivered),
            repair("Cy", RepairStatus::Received),
        ];
        let board = board_columns(&repairs);
        assert_eq!(board.len(), 6);
        assert_eq!(board[0].status, RepairStatus::Received);
        assert_eq!(board[0].tickets.len(), 2);
        assert_eq!(board[1].tickets.len(), 0);
        assert_eq!(board[5].status, RepairStatus::Delivered);
        assert_eq!(board[5].tickets.len(), 1);
    }
}
