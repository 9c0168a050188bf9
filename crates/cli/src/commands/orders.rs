use std::path::Path;
use std::process;

use shop_core::timestamp::format_iso;
use shop_core::OrderRecord;
use shop_remote::{ShopClient, ShopEvent};
use tokio::runtime::Runtime;

use super::dispatch;
use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_orders(rt: &Runtime, client: &ShopClient, output: OutputFormat, quiet: bool) {
    let events = match dispatch(rt, |tx| async move { client.list_orders(&tx).await }) {
        Ok(events) => events,
        Err(e) => {
            report_error(&format!("error: could not load orders: {}", e), output, quiet);
            process::exit(1);
        }
    };

    let orders = events
        .into_iter()
        .find_map(|event| match event {
            ShopEvent::SetOrders(orders) => Some(orders),
            _ => None,
        })
        .unwrap_or_default();

    match output {
        OutputFormat::Json => {
            print_json(&serde_json::Value::Array(
                orders.iter().map(OrderRecord::to_json).collect(),
            ));
        }
        OutputFormat::Text => {
            if orders.is_empty() {
                println!("No orders found.");
            }
            for order in &orders {
                println!("{}", order_line(order));
            }
        }
    }
}

pub(crate) fn cmd_order(
    rt: &Runtime,
    client: &ShopClient,
    items_path: &Path,
    total: Option<f64>,
    output: OutputFormat,
    quiet: bool,
) {
    let items = match read_items(items_path) {
        Ok(items) => items,
        Err(msg) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(1);
        }
    };

    let total_amount = match order_total(&items, total) {
        Ok(total) => total,
        Err(msg) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(1);
        }
    };

    let result = dispatch(rt, |tx| async move {
        client.create_order(items, total_amount, &tx).await
    });
    let events = match result {
        Ok(events) => events,
        Err(e) => {
            report_error(&format!("error: could not place order: {}", e), output, quiet);
            process::exit(1);
        }
    };

    for event in events {
        if let ShopEvent::AddOrder(order) = event {
            match output {
                OutputFormat::Json => print_json(&order.to_json()),
                OutputFormat::Text => {
                    if !quiet {
                        println!("Order placed: {}", order_line(&order));
                    }
                }
            }
        }
    }
}

fn order_line(order: &OrderRecord) -> String {
    let date = format_iso(order.date).unwrap_or_else(|_| order.date.to_string());
    format!(
        "{}  {}  {:.2}  ({} items)",
        order.id,
        date,
        order.total_amount,
        order.items.len()
    )
}

fn read_items(path: &Path) -> Result<Vec<serde_json::Value>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| format!("'{}' is not a JSON array of items: {}", path.display(), e))
}

/// The explicit total, or the sum of every item's `sum` field. Must be finite.
fn order_total(items: &[serde_json::Value], explicit: Option<f64>) -> Result<f64, String> {
    let total = match explicit {
        Some(total) => total,
        None => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.get("sum").and_then(serde_json::Value::as_f64).ok_or_else(|| {
                    format!("item {} has no numeric 'sum'; pass --total", i + 1)
                })
            })
            .sum::<Result<f64, String>>()?,
    };
    if !total.is_finite() {
        return Err(format!("order total {} is not a finite number", total));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn total_from_item_sums() {
        let items = vec![
            serde_json::json!({"productId": "p1", "sum": 19.98}),
            serde_json::json!({"productId": "p2", "sum": 5.0}),
        ];
        let total = order_total(&items, None).unwrap();
        assert!((total - 24.98).abs() < 1e-9);
    }

    #[test]
    fn explicit_total_wins() {
        let items = vec![serde_json::json!({"id": "p1", "qty": 2})];
        assert_eq!(order_total(&items, Some(19.98)), Ok(19.98));
    }

    #[test]
    fn missing_sum_needs_explicit_total() {
        let items = vec![serde_json::json!({"id": "p1", "qty": 2})];
        assert_eq!(
            order_total(&items, None),
            Err("item 1 has no numeric 'sum'; pass --total".to_string())
        );
    }

    #[test]
    fn non_finite_total_is_refused() {
        assert_eq!(
            order_total(&[], Some(f64::NAN)),
            Err("order total NaN is not a finite number".to_string())
        );
        assert!(order_total(&[], Some(f64::INFINITY)).is_err());

        // Each sum fits in f64, their total does not.
        let items = vec![
            serde_json::json!({"sum": f64::MAX}),
            serde_json::json!({"sum": f64::MAX}),
        ];
        assert!(order_total(&items, None).is_err());
    }

    #[test]
    fn text_line() {
        let order = OrderRecord {
            id: "o1".to_string(),
            items: vec![serde_json::json!({}), serde_json::json!({})],
            total_amount: 19.98,
            date: datetime!(2023-01-01 00:00:00 UTC),
        };
        assert_eq!(
            order_line(&order),
            "o1  2023-01-01T00:00:00.000Z  19.98  (2 items)"
        );
    }
}
