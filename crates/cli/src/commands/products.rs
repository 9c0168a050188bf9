use std::process;

use shop_core::{Product, ProductForm};
use shop_remote::{ShopClient, ShopEvent};
use tokio::runtime::Runtime;

use super::dispatch;
use crate::{print_json, report_error, OutputFormat};

pub(crate) fn cmd_products(rt: &Runtime, client: &ShopClient, output: OutputFormat, quiet: bool) {
    let products = load_products(rt, client, output, quiet);

    match output {
        OutputFormat::Json => match serde_json::to_value(&products) {
            Ok(value) => print_json(&value),
            Err(e) => {
                report_error(&format!("error: serialization failed: {}", e), output, quiet);
                process::exit(1);
            }
        },
        OutputFormat::Text => {
            if products.is_empty() {
                println!("No products found.");
            }
            for product in &products {
                println!("{}  {}  {:.2}", product.id, product.title, product.price);
            }
        }
    }
}

pub(crate) fn cmd_product_add(
    rt: &Runtime,
    client: &ShopClient,
    fields: &[String],
    output: OutputFormat,
    quiet: bool,
) {
    let mut form = ProductForm::new_product();
    let submitted =
        fill_form(&mut form, fields).and_then(|()| form.submit().map_err(|e| e.to_string()));
    let draft = match submitted {
        Ok(draft) => draft,
        Err(msg) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(1);
        }
    };

    let events = match dispatch(rt, |tx| async move {
        client.create_product(&draft, &tx).await
    }) {
        Ok(events) => events,
        Err(e) => {
            report_error(&format!("error: could not create product: {}", e), output, quiet);
            process::exit(1);
        }
    };

    for event in events {
        if let ShopEvent::CreateProduct(product) = event {
            report_product(&product, "Product created", output, quiet);
        }
    }
}

pub(crate) fn cmd_product_edit(
    rt: &Runtime,
    client: &ShopClient,
    product_id: &str,
    fields: &[String],
    output: OutputFormat,
    quiet: bool,
) {
    let products = load_products(rt, client, output, quiet);
    let Some(product) = products.into_iter().find(|p| p.id == product_id) else {
        report_error(
            &format!("error: product '{}' not found", product_id),
            output,
            quiet,
        );
        process::exit(1);
    };

    let mut form = ProductForm::edit(&product);
    let submitted =
        fill_form(&mut form, fields).and_then(|()| form.submit().map_err(|e| e.to_string()));
    let draft = match submitted {
        Ok(draft) => draft,
        Err(msg) => {
            report_error(&format!("error: {}", msg), output, quiet);
            process::exit(1);
        }
    };

    let draft_ref = &draft;
    let result = dispatch(rt, |tx| async move {
        client.update_product(product_id, draft_ref, &tx).await
    });
    if let Err(e) = result {
        report_error(&format!("error: could not update product: {}", e), output, quiet);
        process::exit(1);
    }

    let updated = Product {
        title: draft.title,
        image_url: draft.image_url,
        description: draft.description,
        ..product
    };
    report_product(&updated, "Product updated", output, quiet);
}

fn load_products(
    rt: &Runtime,
    client: &ShopClient,
    output: OutputFormat,
    quiet: bool,
) -> Vec<Product> {
    let events = match dispatch(rt, |tx| async move { client.list_products(&tx).await }) {
        Ok(events) => events,
        Err(e) => {
            report_error(&format!("error: could not load products: {}", e), output, quiet);
            process::exit(1);
        }
    };
    events
        .into_iter()
        .find_map(|event| match event {
            ShopEvent::SetProducts(products) => Some(products),
            _ => None,
        })
        .unwrap_or_default()
}

fn report_product(product: &Product, headline: &str, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => match serde_json::to_value(product) {
            Ok(value) => print_json(&value),
            Err(e) => report_error(&format!("error: serialization failed: {}", e), output, quiet),
        },
        OutputFormat::Text => {
            if !quiet {
                println!("{}: {}  {}", headline, product.id, product.title);
            }
        }
    }
}

/// Split `name=value`. The value may itself contain `=`.
fn parse_field(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(format!("invalid field '{}': expected NAME=VALUE", raw)),
    }
}

/// Feed every `name=value` pair through the form, in order.
fn fill_form(form: &mut ProductForm, fields: &[String]) -> Result<(), String> {
    for raw in fields {
        let (name, value) = parse_field(raw)?;
        form.check_editable(name).map_err(|e| e.to_string())?;
        let state = form.input(name, value);
        if state.is_field_valid(name) == Some(false) {
            tracing::debug!(field = name, "field failed validation");
        }
    }
    Ok(())
}
