//! Which of the four storefront views is showing, and how gestures move
//! between them.
//!
//! ```text
//!   Listing  --toggle-------------> Creating
//!   Creating --toggle, submit-new-> Listing
//!   Listing  --select(id)---------> Viewing(p)
//!   Viewing  --toggle, delete-----> Listing
//!   Viewing  --request-edit-------> Editing(p)
//!   Editing  --toggle-------------> Viewing(p)
//!   Editing  --submit-edit--------> Listing
//! ```

use shared::domain::{Product, ProductId};

use crate::error::CatalogError;

pub const ADD_PRODUCT_LABEL: &str = "Add a product";
pub const BACK_TO_LIST_LABEL: &str = "Back to product list";
pub const BACK_TO_DETAIL_LABEL: &str = "Back to Product Detail";

/// The active view. `Viewing` and `Editing` hold a snapshot taken when the
/// product was selected; later store changes do not reach it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Listing,
    Creating,
    Viewing(Product),
    Editing(Product),
}

/// A user gesture delivered to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// The primary action button; its meaning depends on the current view.
    Toggle,
    Select(ProductId),
    RequestEdit,
    Buy(ProductId),
    Delete(ProductId),
    SubmitNew(Product),
    SubmitEdit(Product),
    Reload,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Toggle => "toggle",
            Intent::Select(_) => "select",
            Intent::RequestEdit => "request edit",
            Intent::Buy(_) => "buy",
            Intent::Delete(_) => "delete",
            Intent::SubmitNew(_) => "submit new product",
            Intent::SubmitEdit(_) => "submit edited product",
            Intent::Reload => "reload",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    pub label: &'static str,
}

impl ActionButton {
    pub fn intent(&self) -> Intent {
        Intent::Toggle
    }
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Listing => "listing",
            ViewState::Creating => "creating",
            ViewState::Viewing(_) => "viewing",
            ViewState::Editing(_) => "editing",
        }
    }

    pub fn selected(&self) -> Option<&Product> {
        match self {
            ViewState::Viewing(product) | ViewState::Editing(product) => Some(product),
            ViewState::Listing | ViewState::Creating => None,
        }
    }

    pub fn button(&self) -> ActionButton {
        let label = match self {
            ViewState::Listing => ADD_PRODUCT_LABEL,
            ViewState::Creating | ViewState::Viewing(_) => BACK_TO_LIST_LABEL,
            ViewState::Editing(_) => BACK_TO_DETAIL_LABEL,
        };
        ActionButton { label }
    }

    /// Editing backs out to the detail view, detail backs out to the list,
    /// and the list and create form flip between each other.
    pub fn toggle(&mut self) {
        *self = match std::mem::take(self) {
            ViewState::Editing(product) => ViewState::Viewing(product),
            ViewState::Viewing(_) | ViewState::Creating => ViewState::Listing,
            ViewState::Listing => ViewState::Creating,
        };
    }

    pub fn select(&mut self, product: Product) -> Result<(), CatalogError> {
        if let ViewState::Editing(_) = self {
            return Err(self.rejected("select"));
        }
        *self = ViewState::Viewing(product);
        Ok(())
    }

    pub fn request_edit(&mut self) -> Result<(), CatalogError> {
        match std::mem::take(self) {
            ViewState::Viewing(product) => {
                *self = ViewState::Editing(product);
                Ok(())
            }
            other => {
                *self = other;
                Err(self.rejected("request edit"))
            }
        }
    }

    /// Swaps in a fresh snapshot after a local change to the shown product.
    pub fn show_updated(&mut self, product: Product) {
        *self = if matches!(self, ViewState::Editing(_)) {
            ViewState::Editing(product)
        } else {
            ViewState::Viewing(product)
        };
    }

    /// Delete is offered from the detail view, and from the list when the
    /// id is named directly. An open form has to be left first.
    pub fn finish_delete(&mut self) -> Result<(), CatalogError> {
        if matches!(self, ViewState::Creating | ViewState::Editing(_)) {
            return Err(self.rejected("delete"));
        }
        *self = ViewState::Listing;
        Ok(())
    }

    pub fn submit_new(&mut self) -> Result<(), CatalogError> {
        if !matches!(self, ViewState::Creating) {
            return Err(self.rejected("submit new product"));
        }
        *self = ViewState::Listing;
        Ok(())
    }

    /// Leaves the edit form and returns the id of the product being edited.
    pub fn submit_edit(&mut self) -> Result<ProductId, CatalogError> {
        let id = match self {
            ViewState::Editing(product) => product.id.clone().ok_or(CatalogError::MissingId)?,
            _ => return Err(self.rejected("submit edited product")),
        };
        *self = ViewState::Listing;
        Ok(id)
    }

    fn rejected(&self, intent: &'static str) -> CatalogError {
        CatalogError::InvalidTransition {
            intent,
            state: self.name(),
        }
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
