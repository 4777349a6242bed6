//! Plain-text rendering of the storefront views.

use std::fmt::Write as _;

use client_core::{ActionButton, CatalogEvent, ViewController, ViewState};
use serde_json::Value;
use shared::{
    domain::Product,
    error::{ApiError, ErrorCode},
    protocol::ProductOperation,
};

pub fn view(controller: &ViewController) -> String {
    let mut out = button_line(controller.button());
    match controller.state() {
        ViewState::Listing => out.push_str(&product_list(controller.store().products())),
        ViewState::Creating => {
            out.push_str("New product\n");
            out.push_str("  submit quantity=<n> name=<name> [key=value]...\n");
        }
        ViewState::Viewing(product) => {
            out.push_str(&product_detail(product));
            out.push_str("  actions: buy, edit, delete\n");
        }
        ViewState::Editing(product) => {
            let _ = writeln!(out, "Editing {}", product.display_name());
            out.push_str(&product_detail(product));
            out.push_str("  submit [key=value]... (fields left out keep their value)\n");
        }
    }
    out
}

/// The primary button and the shell word that presses it.
pub fn button_line(button: ActionButton) -> String {
    format!("[ {} ]  ({})\n", button.label, button.intent().name())
}

pub fn product_list(products: &[Product]) -> String {
    if products.is_empty() {
        return "  (no products)\n".to_string();
    }
    let mut out = String::new();
    for product in products {
        let id = product.id.as_ref().map(|id| id.as_str()).unwrap_or("-");
        let _ = writeln!(
            out,
            "  {id:<26} {:<30} {}",
            product.display_name(),
            product.quantity
        );
    }
    out
}

pub fn product_detail(product: &Product) -> String {
    let mut out = format!("{}\n", product.display_name());
    if let Some(id) = &product.id {
        let _ = writeln!(out, "  id: {id}");
    }
    let _ = writeln!(out, "  quantity: {}", product.quantity);
    for (key, value) in product.fields.iter().filter(|(key, _)| key.as_str() != "name") {
        let _ = writeln!(out, "  {key}: {}", field_value(value));
    }
    out
}

fn field_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn event_message(event: &CatalogEvent) -> String {
    match event {
        CatalogEvent::CatalogLoaded { count } => format!("loaded {count} products"),
        CatalogEvent::ProductCreated { product } => {
            format!("created {} (reload to see it in the list)", product.display_name())
        }
        CatalogEvent::ProductDeleted { id } => format!("deleted product {id}"),
        CatalogEvent::ProductUpdated { id } => format!("updated product {id}"),
        CatalogEvent::RequestFailed { operation, error } => failure_message(*operation, error),
    }
}

pub fn failure_message(operation: ProductOperation, error: &ApiError) -> String {
    let action = match operation {
        ProductOperation::List => "loading products",
        ProductOperation::Create => "creating product",
        ProductOperation::Delete => "deleting product",
        ProductOperation::Update => "updating product",
    };
    let hint = match error.code {
        ErrorCode::Transport => "API unreachable; check the URL and network",
        ErrorCode::NotFound => "product no longer exists on the server",
        ErrorCode::Validation => "server rejected the product",
        ErrorCode::Decode => "unexpected response from server",
        ErrorCode::Internal => "server error",
    };
    format!("{action} failed: {hint} ({})", error.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::Quantity;

    #[test]
    fn button_line_names_the_command_that_presses_it() {
        assert_eq!(
            button_line(ViewState::Listing.button()),
            "[ Add a product ]  (toggle)\n"
        );
    }

    #[test]
    fn detail_lists_opaque_fields() {
        let product = Product::new(Quantity::Unavailable)
            .with_id("a1")
            .with_field("name", "Lamp")
            .with_field("price", 20);
        let text = product_detail(&product);
        assert!(text.starts_with("Lamp\n"));
        assert!(text.contains("  quantity: Product is not Available\n"));
        assert!(text.contains("  price: 20\n"));
        assert!(!text.contains("name:"));
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(product_list(&[]), "  (no products)\n");
    }

    #[test]
    fn transport_failures_get_network_hint() {
        let message = failure_message(
            ProductOperation::Delete,
            &ApiError::new(ErrorCode::Transport, "connection refused"),
        );
        assert!(message.starts_with("deleting product failed: API unreachable"));
        assert!(message.ends_with("(connection refused)"));
    }
}
